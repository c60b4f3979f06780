use thiserror::Error;

use crate::error::remote::RemoteError;

/// Fatal replication error.
///
/// Per-item failures never abort a run; they are logged and collected in the
/// [`ReplicationSummary`](crate::model::summary::ReplicationSummary). Only an
/// unresolvable guild stops a run, and it does so before any mutating call.
#[derive(Error, Debug)]
pub enum ReplicationError {
    /// The source or target guild could not be fetched.
    ///
    /// Usually means the bot is not a member of the guild or the configured ID is wrong.
    #[error("Guild {guild_id} could not be resolved: {source}")]
    GuildUnavailable {
        /// The guild that failed to resolve
        guild_id: u64,
        /// The underlying remote failure
        #[source]
        source: RemoteError,
    },
}
