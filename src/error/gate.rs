use thiserror::Error;

/// Reason a `/clone` invocation was refused before any remote call was made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// The command was invoked outside the configured source guild.
    #[error("invoked outside the source guild")]
    WrongGuild,

    /// The confirmation token did not case-insensitively equal `CONFIRM`.
    #[error("confirmation token missing or incorrect")]
    NotConfirmed,

    /// Another run against the same target guild is still in progress.
    #[error("a replication run is already active for the target guild")]
    AlreadyRunning,
}

impl GateRejection {
    /// Private explanatory response shown to the invoking user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WrongGuild => "This command can only be used in the source server.",
            Self::NotConfirmed => "Cloning process aborted. Confirmation not provided.",
            Self::AlreadyRunning => {
                "A clone is already running for the target server. Wait for it to finish."
            }
        }
    }
}
