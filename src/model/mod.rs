//! Run-scoped domain models.
//!
//! Everything here lives for the duration of a single replication run: the snapshots
//! read from the source and target guilds, the parameters of each create call, the
//! identifier map built by role replication, and the summary reported at the end.
//! Nothing is persisted between runs.

pub mod guild;
pub mod identifier_map;
pub mod params;
pub mod summary;
