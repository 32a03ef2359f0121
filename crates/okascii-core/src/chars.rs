//! Named character ramps.
//!
//! Every ramp is ordered from empty to full density and starts with a space so
//! unlit cells stay blank.

/// Classic ten-step ramp, the default.
pub const CLASSIC_RAMP: &str = " .:-+*=%@#";

/// Shade blocks.
pub const BLOCK_RAMP: &str = " ░▒▓█";

/// Dots only, for a light touch.
pub const DOT_RAMP: &str = " ·•●";

/// Longer ramp for finer gradients.
pub const DETAILED_RAMP: &str = " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Ramps selectable by name in the config file.
pub const NAMED_RAMPS: &[(&str, &str)] = &[
    ("classic", CLASSIC_RAMP),
    ("blocks", BLOCK_RAMP),
    ("dots", DOT_RAMP),
    ("detailed", DETAILED_RAMP),
];

/// Look up a ramp by name, ignoring case.
pub fn named_ramp(name: &str) -> Option<&'static str> {
    NAMED_RAMPS
        .iter()
        .find(|(ramp_name, _)| ramp_name.eq_ignore_ascii_case(name.trim()))
        .map(|(_, ramp)| *ramp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_ramps_start_empty() {
        for (name, ramp) in NAMED_RAMPS {
            assert!(ramp.starts_with(' '), "{name}");
            assert!(ramp.chars().count() >= 2, "{name}");
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(named_ramp("Blocks"), Some(BLOCK_RAMP));
        assert_eq!(named_ramp("missing"), None);
    }
}
