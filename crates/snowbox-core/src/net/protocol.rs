use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::messages::{
    ClientMessage, EnemyDisconnectedMsg, GameStartedMsg, MessageType, PlayerInfo, PlayerMoveMsg,
    PlayerMovedMsg, PlayerScoredMsg, PlayerStoppedMsg, ScoreChangedMsg, ServerMessage,
    SnowballChangedMsg, SnowballCountChangedMsg, StartGameMsg, ThrowBallMsg,
};

/// Maximum size in bytes of an encoded frame. Decoded frames are
/// not capped: a `game-started` grows with the number of trees.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024; // 64 KiB

#[derive(Debug)]
pub enum ProtocolError {
    EmptyMessage,
    UnknownMessageType(String),
    /// A known type arrived on the wrong side of the connection.
    UnexpectedMessageType(MessageType),
    PayloadTooLarge(usize),
    SerializeError(String),
    DeserializeError(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "empty message"),
            Self::UnknownMessageType(t) => write!(f, "unknown message type: {t:?}"),
            Self::UnexpectedMessageType(t) => {
                write!(f, "unexpected message type: {}", t.as_str())
            },
            Self::PayloadTooLarge(size) => {
                write!(
                    f,
                    "payload too large: {size} bytes (max {MAX_MESSAGE_SIZE})"
                )
            },
            Self::SerializeError(e) => write!(f, "serialize error: {e}"),
            Self::DeserializeError(e) => write!(f, "deserialize error: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

#[derive(Serialize)]
struct OutgoingFrame<'a, T> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a T,
}

#[derive(Deserialize)]
struct IncomingFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Encode a payload as a `{"type": ..., "data": ...}` JSON frame.
pub fn encode_message<T: Serialize>(
    msg_type: MessageType,
    payload: &T,
) -> Result<String, ProtocolError> {
    let frame = OutgoingFrame {
        kind: msg_type.as_str(),
        data: payload,
    };
    let text =
        serde_json::to_string(&frame).map_err(|e| ProtocolError::SerializeError(e.to_string()))?;
    if text.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::PayloadTooLarge(text.len()));
    }
    Ok(text)
}

/// Encode a `ClientMessage` to wire format.
pub fn encode_client_message(msg: &ClientMessage) -> Result<String, ProtocolError> {
    match msg {
        ClientMessage::StartGame(m) => encode_message(MessageType::StartGame, m),
        ClientMessage::PlayerMove(m) => encode_message(MessageType::PlayerMove, m),
        ClientMessage::ThrowBall(m) => encode_message(MessageType::ThrowBall, m),
    }
}

/// Encode a `ServerMessage` to wire format.
pub fn encode_server_message(msg: &ServerMessage) -> Result<String, ProtocolError> {
    match msg {
        ServerMessage::GameStarted(m) => encode_message(MessageType::GameStarted, m),
        ServerMessage::PlayerMoved(m) => encode_message(MessageType::PlayerMoved, m),
        ServerMessage::PlayerStopped(m) => encode_message(MessageType::PlayerStopped, m),
        ServerMessage::EnemyConnected(m) => encode_message(MessageType::EnemyConnected, m),
        ServerMessage::EnemyDisconnected(m) => encode_message(MessageType::EnemyDisconnected, m),
        ServerMessage::SnowballChanged(m) => encode_message(MessageType::SnowballChanged, m),
        ServerMessage::ScoreChanged(m) => encode_message(MessageType::ScoreChanged, m),
        ServerMessage::PlayerScored(m) => encode_message(MessageType::PlayerScored, m),
        ServerMessage::SnowballCountChanged(m) => {
            encode_message(MessageType::SnowballCountChanged, m)
        },
    }
}

/// Split a raw frame into its message type and undecoded payload.
fn decode_frame(text: &str) -> Result<(MessageType, serde_json::Value), ProtocolError> {
    if text.trim().is_empty() {
        return Err(ProtocolError::EmptyMessage);
    }
    let frame: IncomingFrame =
        serde_json::from_str(text).map_err(|e| ProtocolError::DeserializeError(e.to_string()))?;
    let msg_type =
        MessageType::from_name(&frame.kind).ok_or(ProtocolError::UnknownMessageType(frame.kind))?;
    Ok((msg_type, frame.data))
}

/// Extract the message type from raw wire data without decoding the payload.
pub fn decode_message_type(text: &str) -> Result<MessageType, ProtocolError> {
    decode_frame(text).map(|(t, _)| t)
}

fn decode_payload<T: DeserializeOwned>(data: serde_json::Value) -> Result<T, ProtocolError> {
    serde_json::from_value(data).map_err(|e| ProtocolError::DeserializeError(e.to_string()))
}

/// Decode raw wire data into a `ServerMessage`.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
    let (msg_type, data) = decode_frame(text)?;
    match msg_type {
        MessageType::GameStarted => Ok(ServerMessage::GameStarted(Box::new(decode_payload::<
            GameStartedMsg,
        >(data)?))),
        MessageType::PlayerMoved => Ok(ServerMessage::PlayerMoved(decode_payload::<
            PlayerMovedMsg,
        >(data)?)),
        MessageType::PlayerStopped => Ok(ServerMessage::PlayerStopped(decode_payload::<
            PlayerStoppedMsg,
        >(data)?)),
        MessageType::EnemyConnected => Ok(ServerMessage::EnemyConnected(decode_payload::<
            PlayerInfo,
        >(data)?)),
        MessageType::EnemyDisconnected => Ok(ServerMessage::EnemyDisconnected(decode_payload::<
            EnemyDisconnectedMsg,
        >(data)?)),
        MessageType::SnowballChanged => Ok(ServerMessage::SnowballChanged(decode_payload::<
            SnowballChangedMsg,
        >(data)?)),
        MessageType::ScoreChanged => Ok(ServerMessage::ScoreChanged(decode_payload::<
            ScoreChangedMsg,
        >(data)?)),
        MessageType::PlayerScored => Ok(ServerMessage::PlayerScored(decode_payload::<
            PlayerScoredMsg,
        >(data)?)),
        MessageType::SnowballCountChanged => Ok(ServerMessage::SnowballCountChanged(
            decode_payload::<SnowballCountChangedMsg>(data)?,
        )),
        other => Err(ProtocolError::UnexpectedMessageType(other)),
    }
}

/// Decode raw wire data into a `ClientMessage`.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, ProtocolError> {
    let (msg_type, data) = decode_frame(text)?;
    match msg_type {
        MessageType::StartGame => Ok(ClientMessage::StartGame(decode_payload::<StartGameMsg>(
            data,
        )?)),
        MessageType::PlayerMove => Ok(ClientMessage::PlayerMove(
            decode_payload::<PlayerMoveMsg>(data)?,
        )),
        MessageType::ThrowBall => Ok(ClientMessage::ThrowBall(decode_payload::<ThrowBallMsg>(
            data,
        )?)),
        other => Err(ProtocolError::UnexpectedMessageType(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::messages::Skin;

    #[test]
    fn client_frames_carry_type_and_data() {
        let msg = ClientMessage::PlayerMove(PlayerMoveMsg { x: -1, y: 0 });
        let encoded = encode_client_message(&msg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["type"], "player-move");
        assert_eq!(value["data"]["x"], -1);
        assert_eq!(value["data"]["y"], 0);
    }

    #[test]
    fn roundtrip_start_game() {
        let msg = ClientMessage::StartGame(StartGameMsg {
            name: "buggy".to_string(),
            skin: Skin::Girl,
        });
        let encoded = encode_client_message(&msg).unwrap();
        assert_eq!(decode_client_message(&encoded).unwrap(), msg);
    }

    #[test]
    fn decode_player_moved_from_server_json() {
        let text = r#"{"type":"player-moved","data":{"id":"p1","x":10.5,"y":20,"velocity":3,"angle":1.57}}"#;
        match decode_server_message(text).unwrap() {
            ServerMessage::PlayerMoved(m) => {
                assert_eq!(m.id, "p1");
                assert_eq!(m.x, 10.5);
                assert_eq!(m.velocity, 3.0);
            },
            other => panic!("Expected PlayerMoved, got {other:?}"),
        }
    }

    #[test]
    fn decode_snowball_deleted_without_motion_fields() {
        let text = r#"{"type":"snowball-changed","data":{"id":7,"x":1,"y":2,"deleted":true}}"#;
        match decode_server_message(text).unwrap() {
            ServerMessage::SnowballChanged(m) => {
                assert!(m.deleted);
                assert_eq!(m.velocity, 0.0);
            },
            other => panic!("Expected SnowballChanged, got {other:?}"),
        }
    }

    #[test]
    fn decode_empty_message_fails() {
        assert!(matches!(
            decode_server_message("   "),
            Err(ProtocolError::EmptyMessage)
        ));
    }

    #[test]
    fn decode_unknown_type_fails() {
        let result = decode_server_message(r#"{"type":"chat","data":{}}"#);
        assert!(matches!(result, Err(ProtocolError::UnknownMessageType(t)) if t == "chat"));
    }

    #[test]
    fn decode_server_msg_with_client_type_fails() {
        let encoded =
            encode_client_message(&ClientMessage::ThrowBall(ThrowBallMsg { x: 1.0, y: 2.0 }))
                .unwrap();
        assert!(matches!(
            decode_server_message(&encoded),
            Err(ProtocolError::UnexpectedMessageType(MessageType::ThrowBall))
        ));
    }

    #[test]
    fn decode_malformed_payload_fails() {
        let result = decode_server_message(r#"{"type":"player-stopped","data":{"id":"a"}}"#);
        assert!(matches!(result, Err(ProtocolError::DeserializeError(_))));
    }

    #[test]
    fn payload_too_large_rejected() {
        let msg = ClientMessage::StartGame(StartGameMsg {
            name: "x".repeat(MAX_MESSAGE_SIZE),
            skin: Skin::Boy,
        });
        assert!(matches!(
            encode_client_message(&msg),
            Err(ProtocolError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn protocol_error_display() {
        assert_eq!(format!("{}", ProtocolError::EmptyMessage), "empty message");
        assert!(
            format!("{}", ProtocolError::UnknownMessageType("chat".into())).contains("chat")
        );
        assert!(
            format!(
                "{}",
                ProtocolError::UnexpectedMessageType(MessageType::PlayerMove)
            )
            .contains("player-move")
        );
        assert!(format!("{}", ProtocolError::PayloadTooLarge(99999)).contains("99999"));
    }

    #[test]
    fn large_incoming_frames_still_decode() {
        let trees = vec![r#"{"x":10,"y":20,"width":100,"height":150,"type":"pinale"}"#; 2000];
        let text = format!(
            r#"{{"type":"game-started","data":{{"id":"me","width":8000,"height":8000,"playerName":"buggy","trees":[{}]}}}}"#,
            trees.join(",")
        );
        assert!(text.len() > MAX_MESSAGE_SIZE);
        match decode_server_message(&text).unwrap() {
            ServerMessage::GameStarted(msg) => assert_eq!(msg.trees.len(), 2000),
            other => panic!("unexpected {other:?}"),
        }
    }
}
