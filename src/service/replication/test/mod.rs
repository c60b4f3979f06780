use serenity::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::{
        mock::{ApiCall, MockGuildApi},
        GuildApi,
    },
    error::{gate::GateRejection, remote::RemoteError, replication::ReplicationError},
    model::{
        guild::{
            CategorySnapshot, ChannelKind, ChannelSnapshot, GuildSnapshot, OverwriteSubject,
            PermissionOverwrite, RoleSnapshot,
        },
        identifier_map::IdentifierMap,
        summary::{Phase, ReplicationSummary},
    },
    service::{
        rate_limit::{FixedDelay, RateLimiter},
        replication::{
            channel::{remap_overwrites, ChannelTreeService},
            gate::{check_invocation, ConfirmationGate},
            lock::ReplicationLocks,
            purge::TargetPurgeService,
            role::RoleReplicationService,
            ReplicationEngine,
        },
    },
};


const SOURCE: u64 = 1000;
const TARGET: u64 = 2000;

/// VIEW_CHANNEL
const READ: u64 = 1 << 10;
/// SEND_MESSAGES
const SEND: u64 = 1 << 11;

/// Rate limiter that never waits but counts how often it was asked to.
#[derive(Default)]
struct CountingLimiter {
    throttles: AtomicUsize,
    back_offs: std::sync::Mutex<Vec<Duration>>,
}

impl CountingLimiter {
    fn count(&self) -> usize {
        self.throttles.load(Ordering::SeqCst)
    }

    fn back_offs(&self) -> Vec<Duration> {
        self.back_offs.lock().unwrap().clone()
    }
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn throttle(&self) {
        self.throttles.fetch_add(1, Ordering::SeqCst);
    }

    async fn back_off(&self, retry_after: Duration) {
        self.back_offs.lock().unwrap().push(retry_after);
    }
}

fn no_delay() -> FixedDelay {
    FixedDelay::new(Duration::ZERO)
}

fn everyone(guild_id: u64, permissions: u64) -> RoleSnapshot {
    RoleSnapshot {
        role_id: guild_id,
        name: "@everyone".to_string(),
        permissions,
        position: 0,
        is_default: true,
        ..Default::default()
    }
}

fn role(role_id: u64, name: &str, position: u16) -> RoleSnapshot {
    RoleSnapshot {
        role_id,
        name: name.to_string(),
        permissions: READ,
        color: 0x3498db,
        hoist: true,
        mentionable: false,
        position,
        ..Default::default()
    }
}

fn managed_role(role_id: u64, name: &str, position: u16) -> RoleSnapshot {
    RoleSnapshot {
        is_managed: true,
        ..role(role_id, name, position)
    }
}

fn role_overwrite(role_id: u64, allow: u64) -> PermissionOverwrite {
    PermissionOverwrite {
        subject: OverwriteSubject::Role(role_id),
        allow,
        deny: 0,
    }
}

fn member_overwrite(user_id: u64, allow: u64) -> PermissionOverwrite {
    PermissionOverwrite {
        subject: OverwriteSubject::Member(user_id),
        allow,
        deny: 0,
    }
}

fn category(
    channel_id: u64,
    name: &str,
    position: u16,
    overwrites: Vec<PermissionOverwrite>,
) -> CategorySnapshot {
    CategorySnapshot {
        channel_id,
        name: name.to_string(),
        position,
        overwrites,
    }
}

fn text_channel(
    channel_id: u64,
    name: &str,
    parent_id: Option<u64>,
    overwrites: Vec<PermissionOverwrite>,
) -> ChannelSnapshot {
    ChannelSnapshot {
        channel_id,
        name: name.to_string(),
        kind: ChannelKind::Text {
            topic: Some(format!("{} topic", name)),
            slow_mode: 0,
            nsfw: false,
        },
        parent_id,
        position: 0,
        overwrites,
    }
}

fn voice_channel(channel_id: u64, name: &str, parent_id: Option<u64>) -> ChannelSnapshot {
    ChannelSnapshot {
        channel_id,
        name: name.to_string(),
        kind: ChannelKind::Voice {
            user_limit: Some(5),
            bitrate: Some(96000),
        },
        parent_id,
        position: 1,
        overwrites: vec![],
    }
}

fn guild(
    guild_id: u64,
    name: &str,
    roles: Vec<RoleSnapshot>,
    categories: Vec<CategorySnapshot>,
    channels: Vec<ChannelSnapshot>,
) -> GuildSnapshot {
    GuildSnapshot {
        guild_id,
        name: name.to_string(),
        roles,
        categories,
        channels,
    }
}

/// A fresh target guild containing only its default role.
fn empty_target() -> GuildSnapshot {
    guild(TARGET, "Target", vec![everyone(TARGET, 0)], vec![], vec![])
}

fn created_role_names(calls: &[ApiCall]) -> Vec<String> {
    calls
        .iter()
        .filter_map(|call| match call {
            ApiCall::CreateRole { params, .. } => Some(params.name.clone()),
            _ => None,
        })
        .collect()
}
