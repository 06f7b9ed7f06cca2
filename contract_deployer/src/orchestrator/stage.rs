//!
//! The deployment run stage.
//!

///
/// The deployment run stage.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing has been loaded yet.
    Unconfigured,
    /// The environment configuration has been loaded.
    Configured,
    /// The network profile has been selected.
    NetworkSelected,
    /// The creation transaction has been broadcast.
    Submitted,
    /// The required confirmations have been observed. Terminal.
    Confirmed,
    /// The run has failed. Terminal.
    Failed,
}

impl Stage {
    ///
    /// Whether the run may move from this stage to the specified one.
    ///
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unconfigured, Self::Configured)
                | (Self::Configured, Self::NetworkSelected)
                | (Self::NetworkSelected, Self::Submitted)
                | (Self::Submitted, Self::Confirmed)
                | (
                    Self::Configured | Self::NetworkSelected | Self::Submitted,
                    Self::Failed
                )
        )
    }

    ///
    /// Whether the run has finished.
    ///
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "unconfigured"),
            Self::Configured => write!(f, "configured"),
            Self::NetworkSelected => write!(f, "network selected"),
            Self::Submitted => write!(f, "submitted"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stage;

    const ALL: [Stage; 6] = [
        Stage::Unconfigured,
        Stage::Configured,
        Stage::NetworkSelected,
        Stage::Submitted,
        Stage::Confirmed,
        Stage::Failed,
    ];

    #[test]
    fn happy_path() {
        let path = [
            Stage::Unconfigured,
            Stage::Configured,
            Stage::NetworkSelected,
            Stage::Submitted,
            Stage::Confirmed,
        ];

        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn failure_after_configured_only() {
        assert!(!Stage::Unconfigured.can_advance_to(Stage::Failed));
        for stage in [Stage::Configured, Stage::NetworkSelected, Stage::Submitted] {
            assert!(stage.can_advance_to(Stage::Failed), "{stage}");
        }
    }

    #[test]
    fn terminal_stages_have_no_exits() {
        for stage in [Stage::Confirmed, Stage::Failed] {
            assert!(stage.is_terminal());
            for next in ALL {
                assert!(!stage.can_advance_to(next), "{stage} -> {next}");
            }
        }
    }

    #[test]
    fn no_skipping() {
        assert!(!Stage::Configured.can_advance_to(Stage::Submitted));
        assert!(!Stage::NetworkSelected.can_advance_to(Stage::Confirmed));
        assert!(!Stage::Submitted.can_advance_to(Stage::NetworkSelected));
    }
}
