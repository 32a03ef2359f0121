use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use okascii_config::Config;
use okascii_core::Preset;
use okascii_scene::{
    AnimatedBackdrop, CancelToken, FrameScheduler, MountPoint, SystemClock, cells_to_pixels,
    frame_interval,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{debug, info};

/// The showcase application: one full-screen backdrop and a help line.
#[derive(Debug)]
pub struct App {
    config: Config,
    /// Preset currently shown.
    preset: Preset,
    /// Scanline override toggled from the keyboard.
    scanlines: Option<bool>,
    mount: MountPoint,
    backdrop: Option<AnimatedBackdrop>,
    scheduler: FrameScheduler,
    clock: SystemClock,
    /// Cancelled to leave the main loop.
    running: CancelToken,
    interval: Duration,
    accent: Color,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            preset: config.preset,
            scanlines: config.scanlines,
            interval: frame_interval(config.fps),
            config,
            mount: MountPoint::default(),
            backdrop: None,
            scheduler: FrameScheduler::new(),
            clock: SystemClock::new(),
            running: CancelToken::new(),
            accent: Color::Gray,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height)?;

        while !self.running.is_cancelled() {
            let started = Instant::now();
            self.frame();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(self.interval.saturating_sub(started.elapsed()))?;
        }

        self.unmount();
        Ok(())
    }

    /// Advance the backdrop by one frame.
    fn frame(&mut self) {
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.frame(&mut self.mount, &self.clock);
        }
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        self.mount.render(frame, area);

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let color = self.accent;
        let help = Line::from(vec![
            self.preset.name().bold().fg(color),
            "  ".into(),
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "n/p".bold().fg(color),
            " preset  ".dark_gray(),
            "s".bold().fg(color),
            " scanlines  ".dark_gray(),
            "r".bold().fg(color),
            " remount".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        let deadline = Instant::now() + timeout;
        while !self.running.is_cancelled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Resize(cols, rows) => self.resize(cols, rows)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('n') | KeyCode::Char(' ')) => self.select(self.preset.next())?,
            (_, KeyCode::Char('p')) => self.select(self.preset.prev())?,
            (_, KeyCode::Char('s')) => self.toggle_scanlines()?,
            (_, KeyCode::Char('r')) => self.remount()?,
            _ => {}
        }
        Ok(())
    }

    /// Follow a terminal resize, mounting the backdrop once there is room.
    fn resize(&mut self, cols: u16, rows: u16) -> color_eyre::Result<()> {
        let (width, height) = cells_to_pixels(cols, rows);
        self.mount.resize(width, height);
        match &mut self.backdrop {
            Some(backdrop) => backdrop.resize(width, height),
            None => self.remount()?,
        }
        Ok(())
    }

    /// Switch to another preset.
    fn select(&mut self, preset: Preset) -> color_eyre::Result<()> {
        info!(%preset, "preset selected");
        self.preset = preset;
        self.remount()
    }

    fn toggle_scanlines(&mut self) -> color_eyre::Result<()> {
        let current = self.config.backdrop_for(self.preset)?.style.scanlines;
        self.scanlines = Some(!self.scanlines.unwrap_or(current));
        self.remount()
    }

    /// Tear down the current backdrop and mount a fresh one.
    fn remount(&mut self) -> color_eyre::Result<()> {
        self.unmount();

        let mut config = self.config.backdrop_for(self.preset)?;
        if let Some(scanlines) = self.scanlines {
            config.style.scanlines = scanlines;
        }
        self.accent = config.style.color.into();
        self.backdrop = AnimatedBackdrop::mount(&config, &mut self.mount, &mut self.scheduler)?;
        if self.backdrop.is_none() {
            debug!("terminal has no area yet, waiting for resize");
        }
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(backdrop) = self.backdrop.take() {
            backdrop.unmount(&mut self.mount, &mut self.scheduler);
        }
    }

    /// Cancel the main loop.
    fn quit(&mut self) {
        self.running.cancel();
    }
}
