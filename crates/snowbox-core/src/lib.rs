pub mod animation;
pub mod arena;
pub mod geometry;
pub mod layout;
pub mod motion;
pub mod net;
pub mod obstacles;
pub mod registry;
pub mod scoreboard;
pub mod tween;

pub use glam::Vec2;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::arena::Arena;
    use crate::net::messages::{
        GameStartedMsg, PlayerInfo, PlayerMovedMsg, ServerMessage, Skin, SnowballChangedMsg,
        TreeInfo, TreeKind,
    };

    /// A `game-started` for local player `me` in an 800x600 world.
    pub fn game_started(players: Vec<PlayerInfo>, trees: Vec<TreeInfo>) -> ServerMessage {
        ServerMessage::GameStarted(Box::new(GameStartedMsg {
            id: "me".into(),
            width: 800.0,
            height: 600.0,
            player_name: "buggy".into(),
            skin: Skin::Girl,
            trees,
            players_info: players,
            max_snowballs: Some(5),
        }))
    }

    pub fn player_info(id: &str, x: f32, y: f32) -> PlayerInfo {
        PlayerInfo {
            id: id.into(),
            x,
            y,
            name: format!("{id}-name"),
            skin: Skin::Boy,
        }
    }

    /// A 100x150 tree with its trunk centered at `(x, y)`.
    pub fn tree(x: f32, y: f32, kind: TreeKind) -> TreeInfo {
        TreeInfo {
            x,
            y,
            width: 100.0,
            height: 150.0,
            kind,
        }
    }

    pub fn player_moved(id: &str, x: f32, y: f32, velocity: f32, angle: f32) -> ServerMessage {
        ServerMessage::PlayerMoved(PlayerMovedMsg {
            id: id.into(),
            x,
            y,
            velocity,
            angle,
        })
    }

    /// A snowball heading right (angle 0) at server speed 10.
    pub fn snowball_update(id: u64, x: f32, y: f32, deleted: bool) -> ServerMessage {
        ServerMessage::SnowballChanged(SnowballChangedMsg {
            id,
            x,
            y,
            velocity: 10.0,
            angle: 0.0,
            deleted,
        })
    }

    /// Started arena with the local player and the given enemies and trees.
    pub fn started_arena(players: Vec<PlayerInfo>, trees: Vec<TreeInfo>) -> Arena {
        let mut arena = Arena::new();
        arena.apply(game_started(players, trees));
        arena
    }

    /// Step `n` frames of `dt` seconds.
    pub fn run_frames(arena: &mut Arena, n: usize, dt: f32) {
        for _ in 0..n {
            arena.step(dt);
        }
    }
}
