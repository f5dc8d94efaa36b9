use crate::evaluating::DEFAULT_MAX_DEPTH;
use crate::mode::Mode;

use clap::Parser;

/// Interactive calculator with mathematics and programming modes.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "modecalc")]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Mode to start in: m (mathematics) or p (programming)
    #[arg(short, long, env = "MODECALC_MODE", default_value = "m")]
    pub mode: Mode,

    /// Deepest nesting of parentheses, operators or variable references
    #[arg(long, env = "MODECALC_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Log filter, e.g. "debug" or "modecalc=trace"
    #[arg(long, env = "MODECALC_LOG", default_value = "warn")]
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            log: "warn".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_command_line() {
        let parsed = Settings::try_parse_from(["modecalc"]).unwrap();
        assert_eq!(parsed.max_depth, Settings::default().max_depth);
        assert_eq!(parsed.log, Settings::default().log);
    }

    #[test]
    fn parses_flags() {
        let parsed = Settings::try_parse_from(["modecalc", "--mode", "p", "--max-depth", "8"]).unwrap();
        assert_eq!(parsed.mode, Mode::programming);
        assert_eq!(parsed.max_depth, 8);
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(Settings::try_parse_from(["modecalc", "--mode", "x"]).is_err());
    }
}
