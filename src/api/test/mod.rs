use crate::{
    api::discord::{classify_status, snapshot_from_parts},
    error::remote::RemoteError,
    model::guild::{ChannelKind, OverwriteSubject, PermissionOverwrite},
};
use test_utils::serenity::{create_test_role, create_test_role_with, ChannelBuilder};

mod snapshot_from_parts;
