//! Frames as the game server actually sends them, fed through the decoder
//! and into the arena.

use snowbox_core::Vec2;
use snowbox_core::arena::{Arena, ArenaEvent, SnowballState};
use snowbox_core::net::messages::{
    ClientMessage, PlayerMoveMsg, ServerMessage, Skin, StartGameMsg, ThrowBallMsg, TreeKind,
};
use snowbox_core::net::protocol::{
    ProtocolError, decode_server_message, encode_client_message,
};

const GAME_STARTED: &str = r#"{
    "type": "game-started",
    "data": {
        "id": "Xk3nQ9",
        "width": 2000,
        "height": 1500,
        "playerName": "buggy",
        "skin": "girl",
        "maxSnowballs": 8,
        "trees": [
            {"x": 900, "y": 700, "width": 120, "height": 180, "type": "pinale"},
            {"x": 300, "y": 200, "width": 100, "height": 150, "type": "tree"}
        ],
        "playersInfo": [
            {"id": "a1", "x": 500, "y": 400, "name": "alice", "skin": "boy"},
            {"id": "b2", "x": 1200, "y": 1000, "name": "bob", "skin": "girl"}
        ]
    }
}"#;

fn decode(text: &str) -> ServerMessage {
    decode_server_message(text).unwrap()
}

#[test]
fn full_game_started_fixture() {
    let ServerMessage::GameStarted(msg) = decode(GAME_STARTED) else {
        panic!("expected game-started");
    };
    assert_eq!(msg.id, "Xk3nQ9");
    assert_eq!(msg.skin, Skin::Girl);
    assert_eq!(msg.max_snowballs, Some(8));
    assert_eq!(msg.trees[0].kind, TreeKind::Pine);
    assert_eq!(msg.trees[1].kind, TreeKind::Regular);
    assert_eq!(msg.players_info.len(), 2);

    let mut arena = Arena::new();
    let events = arena.apply(ServerMessage::GameStarted(msg));
    assert!(events.contains(&ArenaEvent::AmmoReady { max: 8 }));
    assert!(events.contains(&ArenaEvent::TreesPlanted { count: 2 }));
    // Trees are re-ordered back to front.
    assert_eq!(arena.trees()[0].layout.kind, TreeKind::Regular);
    assert_eq!(arena.players().count(), 3);
    assert_eq!(
        arena.local_player().map(|p| p.motion.center),
        Some(Vec2::new(1000.0, 750.0))
    );
}

#[test]
fn a_short_match() {
    let mut arena = Arena::new();
    arena.apply(decode(GAME_STARTED));

    arena.apply(decode(
        r#"{"type":"player-moved","data":{"id":"a1","x":510,"y":400,"velocity":12,"angle":0}}"#,
    ));
    arena.apply(decode(
        r#"{"type":"snowball-changed","data":{"id":41,"x":520,"y":400,"velocity":30,"angle":0}}"#,
    ));
    arena.step(0.016);
    assert_eq!(
        arena.snowball(0).map(|s| s.state),
        Some(SnowballState::Flying)
    );

    arena.apply(decode(
        r#"{"type":"snowball-changed","data":{"id":41,"x":600,"y":400,"velocity":0,"angle":0,"deleted":true}}"#,
    ));
    assert_eq!(
        arena.snowball(0).map(|s| s.state),
        Some(SnowballState::Splashing)
    );

    let events = arena.apply(decode(
        r#"{"type":"score-changed","data":{"playerId":"a1","newScore":3}}"#,
    ));
    assert_eq!(events, vec![ArenaEvent::ScoresChanged]);
    let events = arena.apply(decode(
        r#"{"type":"player-scored","data":{"playerId":"a1","scoreDelta":3}}"#,
    ));
    assert!(matches!(events[0], ArenaEvent::Scored { delta: 3, .. }));

    arena.apply(decode(
        r#"{"type":"snowball-count-changed","data":{"newCount":7}}"#,
    ));
    assert_eq!(arena.ammo().map(|a| a.count), Some(7));

    let events = arena.apply(decode(
        r#"{"type":"enemy-disconnected","data":{"id":"b2"}}"#,
    ));
    assert_eq!(events[0], ArenaEvent::PlayerLeft { id: "b2".into() });
    let ranking: Vec<_> = arena
        .scoreboard()
        .ranking()
        .iter()
        .map(|e| e.label())
        .collect();
    assert_eq!(ranking, vec!["alice: 3", "buggy: 0"]);
}

#[test]
fn client_frames_match_server_expectations() {
    let start = encode_client_message(&ClientMessage::StartGame(StartGameMsg {
        name: "buggy".into(),
        skin: Skin::Boy,
    }))
    .unwrap();
    assert_eq!(
        start,
        r#"{"type":"start-game","data":{"name":"buggy","skin":"boy"}}"#
    );

    let mv = encode_client_message(&ClientMessage::PlayerMove(PlayerMoveMsg { x: -1, y: 0 }))
        .unwrap();
    assert_eq!(mv, r#"{"type":"player-move","data":{"x":-1,"y":0}}"#);

    let throw = encode_client_message(&ClientMessage::ThrowBall(ThrowBallMsg {
        x: 12.5,
        y: 40.0,
    }))
    .unwrap();
    assert_eq!(throw, r#"{"type":"throw-ball","data":{"x":12.5,"y":40.0}}"#);
}

#[test]
fn null_optional_fields_start_the_match() {
    let text = r#"{"type":"game-started","data":{
        "id":"me","width":800,"height":600,"playerName":"buggy","skin":null,
        "trees":null,"playersInfo":null,"maxSnowballs":null}}"#;
    let ServerMessage::GameStarted(msg) = decode(text) else {
        panic!("expected game-started");
    };
    assert!(msg.trees.is_empty());
    assert!(msg.players_info.is_empty());
    assert_eq!(msg.skin, Skin::Boy);
    assert_eq!(msg.max_snowballs, None);

    let mut arena = Arena::new();
    let events = arena.apply(ServerMessage::GameStarted(msg));
    assert!(arena.is_started());
    assert!(events.contains(&ArenaEvent::TreesPlanted { count: 0 }));
}

#[test]
fn null_tree_type_is_a_regular_tree() {
    let text = r#"{"type":"game-started","data":{
        "id":"me","width":800,"height":600,"playerName":"buggy",
        "trees":[{"x":100,"y":100,"width":100,"height":150,"type":null}],
        "playersInfo":[{"id":"a1","x":5,"y":5,"name":"alice","skin":null}]}}"#;
    let ServerMessage::GameStarted(msg) = decode(text) else {
        panic!("expected game-started");
    };
    assert_eq!(msg.trees[0].kind, TreeKind::Regular);
    assert_eq!(msg.players_info[0].skin, Skin::Boy);
}

#[test]
fn malformed_frames_are_rejected() {
    assert!(matches!(
        decode_server_message(""),
        Err(ProtocolError::EmptyMessage)
    ));
    assert!(matches!(
        decode_server_message(r#"{"type":"chat","data":{}}"#),
        Err(ProtocolError::UnknownMessageType(_))
    ));
    assert!(matches!(
        decode_server_message(r#"{"type":"player-moved","data":{"id":"a1"}}"#),
        Err(ProtocolError::DeserializeError(_))
    ));
}
