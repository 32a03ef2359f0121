mod app;
mod logging;

use okascii_config::Config;
use tracing::info;

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let log_path = logging::init_tracing(&config.log_level)?;
    info!(?log_path, preset = %config.preset, fps = config.fps, "starting okascii");

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}
