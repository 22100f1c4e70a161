use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned player identifier (the socket id on the server side).
pub type PlayerId = String;

/// Server-assigned snowball identifier.
pub type SnowballId = u64;

/// Network message type discriminator. Serialized as the `type` field of
/// every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    // Client -> Server
    StartGame,
    PlayerMove,
    ThrowBall,

    // Server -> Client
    GameStarted,
    PlayerMoved,
    PlayerStopped,
    EnemyConnected,
    EnemyDisconnected,
    SnowballChanged,
    ScoreChanged,
    PlayerScored,
    SnowballCountChanged,
}

impl MessageType {
    pub const ALL: [MessageType; 12] = [
        MessageType::StartGame,
        MessageType::PlayerMove,
        MessageType::ThrowBall,
        MessageType::GameStarted,
        MessageType::PlayerMoved,
        MessageType::PlayerStopped,
        MessageType::EnemyConnected,
        MessageType::EnemyDisconnected,
        MessageType::SnowballChanged,
        MessageType::ScoreChanged,
        MessageType::PlayerScored,
        MessageType::SnowballCountChanged,
    ];

    /// Wire name of the message type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartGame => "start-game",
            Self::PlayerMove => "player-move",
            Self::ThrowBall => "throw-ball",
            Self::GameStarted => "game-started",
            Self::PlayerMoved => "player-moved",
            Self::PlayerStopped => "player-stopped",
            Self::EnemyConnected => "enemy-connected",
            Self::EnemyDisconnected => "enemy-disconnected",
            Self::SnowballChanged => "snowball-changed",
            Self::ScoreChanged => "score-changed",
            Self::PlayerScored => "player-scored",
            Self::SnowballCountChanged => "snowball-count-changed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// True for messages the server sends to clients.
    pub fn is_server_message(self) -> bool {
        !matches!(self, Self::StartGame | Self::PlayerMove | Self::ThrowBall)
    }
}

/// Character sprite sheet chosen at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Boy,
    Girl,
}

impl Skin {
    pub const ALL: [Skin; 2] = [Skin::Boy, Skin::Girl];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boy => "boy",
            Self::Girl => "girl",
        }
    }
}

/// Obstacle artwork variant. The server spells the pine variant `pinale`;
/// anything else is drawn as a regular tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TreeKind {
    #[serde(rename = "pinale")]
    Pine,
    #[default]
    #[serde(other, rename = "tree")]
    Regular,
}

// ---------------------------------------------------------------------------
// Client -> Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartGameMsg {
    pub name: String,
    pub skin: Skin,
}

/// Movement intent. Each component is -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerMoveMsg {
    pub x: i8,
    pub y: i8,
}

/// Throw target in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowBallMsg {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    StartGame(StartGameMsg),
    PlayerMove(PlayerMoveMsg),
    ThrowBall(ThrowBallMsg),
}

impl ClientMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::StartGame(_) => MessageType::StartGame,
            Self::PlayerMove(_) => MessageType::PlayerMove,
            Self::ThrowBall(_) => MessageType::ThrowBall,
        }
    }
}

// ---------------------------------------------------------------------------
// Server -> Client
// ---------------------------------------------------------------------------

/// Optional server fields may be absent or an explicit `null`; both mean
/// the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeInfo {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: TreeKind,
}

/// A player as announced by the server. `x`/`y` is the body center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skin: Skin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStartedMsg {
    pub id: PlayerId,
    pub width: f32,
    pub height: f32,
    pub player_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skin: Skin,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trees: Vec<TreeInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players_info: Vec<PlayerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_snowballs: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMovedMsg {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStoppedMsg {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDisconnectedMsg {
    pub id: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowballChangedMsg {
    pub id: SnowballId,
    pub x: f32,
    pub y: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub velocity: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub angle: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreChangedMsg {
    pub player_id: PlayerId,
    pub new_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScoredMsg {
    pub player_id: PlayerId,
    pub score_delta: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowballCountChangedMsg {
    pub new_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    GameStarted(Box<GameStartedMsg>),
    PlayerMoved(PlayerMovedMsg),
    PlayerStopped(PlayerStoppedMsg),
    EnemyConnected(PlayerInfo),
    EnemyDisconnected(EnemyDisconnectedMsg),
    SnowballChanged(SnowballChangedMsg),
    ScoreChanged(ScoreChangedMsg),
    PlayerScored(PlayerScoredMsg),
    SnowballCountChanged(SnowballCountChangedMsg),
}

impl ServerMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::GameStarted(_) => MessageType::GameStarted,
            Self::PlayerMoved(_) => MessageType::PlayerMoved,
            Self::PlayerStopped(_) => MessageType::PlayerStopped,
            Self::EnemyConnected(_) => MessageType::EnemyConnected,
            Self::EnemyDisconnected(_) => MessageType::EnemyDisconnected,
            Self::SnowballChanged(_) => MessageType::SnowballChanged,
            Self::ScoreChanged(_) => MessageType::ScoreChanged,
            Self::PlayerScored(_) => MessageType::PlayerScored,
            Self::SnowballCountChanged(_) => MessageType::SnowballCountChanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_names_roundtrip() {
        for t in MessageType::ALL {
            assert_eq!(MessageType::from_name(t.as_str()), Some(t));
        }
        assert_eq!(MessageType::from_name("bogus"), None);
    }

    #[test]
    fn only_three_client_message_types() {
        let client: Vec<_> = MessageType::ALL
            .into_iter()
            .filter(|t| !t.is_server_message())
            .collect();
        assert_eq!(
            client,
            vec![
                MessageType::StartGame,
                MessageType::PlayerMove,
                MessageType::ThrowBall
            ]
        );
    }

    #[test]
    fn tree_kind_accepts_unknown_names() {
        let pine: TreeInfo =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4,"type":"pinale"}"#).unwrap();
        assert_eq!(pine.kind, TreeKind::Pine);

        let oak: TreeInfo =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4,"type":"oak"}"#).unwrap();
        assert_eq!(oak.kind, TreeKind::Regular);

        let untyped: TreeInfo =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(untyped.kind, TreeKind::Regular);
    }

    #[test]
    fn game_started_optional_fields_default() {
        let msg: GameStartedMsg = serde_json::from_str(
            r#"{"id":"abc","width":2000,"height":1500,"playerName":"buggy","skin":"girl"}"#,
        )
        .unwrap();
        assert_eq!(msg.skin, Skin::Girl);
        assert!(msg.trees.is_empty());
        assert!(msg.players_info.is_empty());
        assert_eq!(msg.max_snowballs, None);
    }

    #[test]
    fn explicit_nulls_mean_absent() {
        let tree: TreeInfo =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4,"type":null}"#).unwrap();
        assert_eq!(tree.kind, TreeKind::Regular);

        let player: PlayerInfo =
            serde_json::from_str(r#"{"id":"a","x":1,"y":2,"name":"al","skin":null}"#).unwrap();
        assert_eq!(player.skin, Skin::Boy);

        let ball: SnowballChangedMsg = serde_json::from_str(
            r#"{"id":4,"x":1,"y":2,"velocity":null,"angle":null,"deleted":null}"#,
        )
        .unwrap();
        assert_eq!((ball.velocity, ball.angle, ball.deleted), (0.0, 0.0, false));
    }
}
