use super::*;

const GUILD_ID: u64 = 100;

/// Tests converting serenity roles into role snapshots.
///
/// Verifies the role whose ID equals the guild ID is flagged as the default role and
/// that permissions, colour, hoist, mentionable and managed are carried over.
///
/// Expected: two roles, one default, one managed with its flags intact
#[test]
fn converts_roles_and_flags_default_role() {
    let everyone = create_test_role(GUILD_ID, "@everyone", 0, 0);
    let bot = create_test_role_with(200, "Bot", 3, 0x8, true);

    let snapshot = snapshot_from_parts(GUILD_ID, "Source", [&everyone, &bot], []);

    assert_eq!(snapshot.guild_id, GUILD_ID);
    assert_eq!(snapshot.name, "Source");

    let default = snapshot.default_role().unwrap();
    assert_eq!(default.role_id, GUILD_ID);
    assert!(!default.is_managed);

    let bot = snapshot.roles.iter().find(|r| r.role_id == 200).unwrap();
    assert!(!bot.is_default);
    assert!(bot.is_managed);
    assert!(bot.hoist);
    assert!(bot.mentionable);
    assert_eq!(bot.permissions, 0x8);
    assert_eq!(bot.color, 0x99AAB5);
    assert_eq!(bot.position, 3);
}

/// Tests splitting categories out of the channel list.
///
/// Verifies categories become category snapshots while text, voice and announcement
/// channels keep their kind-specific attributes and parent. Announcement channels are
/// read as text channels; stage channels are not supported.
///
/// Expected: one category, four channels with the expected kinds
#[test]
fn splits_categories_and_keeps_kind_attributes() {
    let general = ChannelBuilder::category(10, GUILD_ID, "General")
        .position(1)
        .build();
    let chat = ChannelBuilder::text(11, GUILD_ID, "chat")
        .parent(10)
        .topic("talk here")
        .slow_mode(5)
        .nsfw(true)
        .build();
    let lounge = ChannelBuilder::voice(12, GUILD_ID, "lounge")
        .parent(10)
        .user_limit(10)
        .bitrate(64000)
        .build();
    let news = ChannelBuilder::announcement(13, GUILD_ID, "news")
        .topic("release notes")
        .slow_mode(30)
        .build();
    let stage = ChannelBuilder::stage(14, GUILD_ID, "town hall").build();

    let snapshot = snapshot_from_parts(
        GUILD_ID,
        "Source",
        [],
        [&general, &chat, &lounge, &news, &stage],
    );

    assert_eq!(snapshot.categories.len(), 1);
    assert_eq!(snapshot.categories[0].name, "General");
    assert_eq!(snapshot.categories[0].position, 1);
    assert_eq!(snapshot.channels.len(), 4);

    let chat = snapshot.channels.iter().find(|c| c.name == "chat").unwrap();
    assert_eq!(chat.parent_id, Some(10));
    assert_eq!(
        chat.kind,
        ChannelKind::Text {
            topic: Some("talk here".to_string()),
            slow_mode: 5,
            nsfw: true,
        }
    );

    let lounge = snapshot.channels.iter().find(|c| c.name == "lounge").unwrap();
    assert_eq!(
        lounge.kind,
        ChannelKind::Voice {
            user_limit: Some(10),
            bitrate: Some(64000),
        }
    );

    let news = snapshot.channels.iter().find(|c| c.name == "news").unwrap();
    assert_eq!(
        news.kind,
        ChannelKind::Text {
            topic: Some("release notes".to_string()),
            slow_mode: 30,
            nsfw: false,
        }
    );
    assert_eq!(news.parent_id, None);

    let stage = snapshot.channels.iter().find(|c| c.name == "town hall").unwrap();
    assert_eq!(stage.kind, ChannelKind::Other);
}

/// Tests converting permission overwrites.
///
/// Expected: role and member overwrites keep their subject kind and bitsets
#[test]
fn converts_role_and_member_overwrites() {
    let chat = ChannelBuilder::text(11, GUILD_ID, "chat")
        .role_overwrite(300, 1024, 0)
        .member_overwrite(400, 0, 2048)
        .build();

    let snapshot = snapshot_from_parts(GUILD_ID, "Source", [], [&chat]);

    let overwrites = &snapshot.channels[0].overwrites;
    assert_eq!(overwrites.len(), 2);
    assert!(overwrites.contains(&PermissionOverwrite {
        subject: OverwriteSubject::Role(300),
        allow: 1024,
        deny: 0,
    }));
    assert!(overwrites.contains(&PermissionOverwrite {
        subject: OverwriteSubject::Member(400),
        allow: 0,
        deny: 2048,
    }));
}

/// Tests converting a text channel without optional attributes.
///
/// Expected: no topic and a slow-mode delay of zero
#[test]
fn defaults_missing_text_attributes() {
    let plain = ChannelBuilder::text(11, GUILD_ID, "plain").build();

    let snapshot = snapshot_from_parts(GUILD_ID, "Source", [], [&plain]);

    assert_eq!(
        snapshot.channels[0].kind,
        ChannelKind::Text {
            topic: None,
            slow_mode: 0,
            nsfw: false,
        }
    );
}
