use std::fmt;
use std::str::FromStr;

/// Selects the grammar an expression is parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Real arithmetic on `f64`.
    #[default]
    mathematics,
    /// Integer and bitwise arithmetic on the `i64` interpretation of operands.
    programming,
}

impl Mode {
    /// One-letter label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Mode::mathematics => "M",
            Mode::programming => "P",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::mathematics => "mathematics",
            Mode::programming => "programming",
        }
    }

    /// Interprets the exact text of an enter-key command.
    pub fn from_command(text: &str) -> Option<Self> {
        match text {
            "m" => Some(Mode::mathematics),
            "p" => Some(Mode::programming),
            _ => None,
        }
    }
}

pub fn mode_label(mode: Mode) -> &'static str {
    mode.label()
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidMode(pub String);

impl fmt::Display for InvalidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a mode, expected 'm' or 'p'", self.0)
    }
}

impl std::error::Error for InvalidMode {}

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "math" | "mathematics" => Ok(Mode::mathematics),
            "p" | "prog" | "programming" => Ok(Mode::programming),
            _ => Err(InvalidMode(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(mode_label(Mode::mathematics), "M");
        assert_eq!(mode_label(Mode::programming), "P");
    }

    #[test]
    fn commands_are_exact() {
        assert_eq!(Mode::from_command("m"), Some(Mode::mathematics));
        assert_eq!(Mode::from_command("p"), Some(Mode::programming));
        assert_eq!(Mode::from_command("M"), None);
        assert_eq!(Mode::from_command(" p"), None);
        assert_eq!(Mode::from_command("xyz"), None);
    }

    #[test]
    fn parses_long_names() {
        assert_eq!("Programming".parse::<Mode>(), Ok(Mode::programming));
        assert_eq!("m".parse::<Mode>(), Ok(Mode::mathematics));
        assert!("q".parse::<Mode>().is_err());
    }
}
