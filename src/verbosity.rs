//! Output verbosity shared by the CLI, the pipeline and progress bars.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Status lines and row diagnostics
    #[default]
    Normal,
    /// Everything, including per-stage logging
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Status lines, warnings and progress bars.
    pub fn show_status(self) -> bool {
        self != Self::Quiet
    }

    pub fn show_detail(self) -> bool {
        self == Self::Verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn test_levels() {
        assert!(!Verbosity::Quiet.show_status());
        assert!(Verbosity::Normal.show_status());
        assert!(!Verbosity::Normal.show_detail());
        assert!(Verbosity::Verbose.show_detail());
    }
}
