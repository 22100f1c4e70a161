pub mod spawn;
pub mod sync;

use bevy::ecs::system::NonSend;
use bevy::prelude::*;

use snowbox_core::Vec2 as CoreVec2;
use snowbox_core::arena::{Arena, ArenaEvent};
use snowbox_core::net::messages::PlayerId;
use snowbox_core::net::protocol::decode_server_message;
use snowbox_core::registry::SlotIndex;

use crate::app::AppState;
use crate::net_client::WsClient;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaState>()
            .init_resource::<ArenaEventQueue>()
            .configure_sets(
                Update,
                (
                    FrameSet::Receive,
                    FrameSet::React,
                    FrameSet::Simulate,
                    FrameSet::Sync,
                )
                    .chain(),
            )
            .add_systems(Startup, spawn::spawn_background)
            .add_systems(Update, receive_server_frames.in_set(FrameSet::Receive))
            .add_systems(Update, spawn::apply_world_events.in_set(FrameSet::React))
            .add_systems(
                Update,
                step_arena
                    .in_set(FrameSet::Simulate)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (
                    sync::sync_players,
                    sync::sync_snowballs,
                    sync::sync_trees,
                )
                    .in_set(FrameSet::Sync),
            )
            .add_systems(Last, clear_arena_events);
    }
}

/// Per-frame ordering: decode server frames, react to what changed,
/// advance local motion, then mirror the model onto entities.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Receive,
    React,
    Simulate,
    Sync,
}

/// The match as the client currently sees it.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct ArenaState(pub Arena);

/// Arena events produced this frame. Consumers read them during
/// [`FrameSet::React`]; the queue is cleared in `Last`.
#[derive(Resource, Default)]
pub struct ArenaEventQueue {
    events: Vec<ArenaEvent>,
}

impl ArenaEventQueue {
    pub fn extend(&mut self, events: impl IntoIterator<Item = ArenaEvent>) {
        self.events.extend(events);
    }

    /// Events from the last [`ArenaEvent::Started`] on. Anything queued
    /// before it belongs to a match that no longer exists.
    pub fn current_match(&self) -> &[ArenaEvent] {
        let start = self
            .events
            .iter()
            .rposition(|e| matches!(e, ArenaEvent::Started { .. }))
            .unwrap_or(0);
        &self.events[start..]
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Everything belonging to one match; despawned when a new match starts.
#[derive(Component)]
pub struct MatchEntity;

#[derive(Component)]
pub struct PlayerSprite(pub PlayerId);

#[derive(Component)]
pub struct NameTag;

#[derive(Component)]
pub struct SnowballSprite(pub SlotIndex);

#[derive(Component)]
pub struct TreeSprite(pub usize);

/// Server coordinates (y down) to a Bevy translation (y up).
pub fn to_world(p: CoreVec2, z: f32) -> Vec3 {
    Vec3::new(p.x, -p.y, z)
}

/// Bevy world position back to server coordinates.
pub fn to_server(p: Vec2) -> CoreVec2 {
    CoreVec2::new(p.x, -p.y)
}

fn receive_server_frames(
    ws_client: NonSend<WsClient>,
    mut arena: ResMut<ArenaState>,
    mut queue: ResMut<ArenaEventQueue>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for frame in ws_client.drain_frames() {
        let msg = match decode_server_message(&frame) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Dropping server frame: {e}");
                continue;
            },
        };
        debug!("Received {}", msg.message_type().as_str());
        let events = arena.apply(msg);
        if *state.get() != AppState::InGame
            && events
                .iter()
                .any(|e| matches!(e, ArenaEvent::Started { .. }))
        {
            next_state.set(AppState::InGame);
        }
        queue.extend(events);
    }
}

fn step_arena(time: Res<Time>, mut arena: ResMut<ArenaState>) {
    arena.step(time.delta_secs());
}

fn clear_arena_events(mut queue: ResMut<ArenaEventQueue>) {
    queue.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::GameAssets;
    use crate::config::ClientConfig;

    #[test]
    fn coordinates_flip_y() {
        let world = to_world(CoreVec2::new(10.0, 20.0), 3.0);
        assert_eq!(world, Vec3::new(10.0, -20.0, 3.0));
        assert_eq!(to_server(world.truncate()), CoreVec2::new(10.0, 20.0));
    }

    #[test]
    fn queue_keeps_order_until_cleared() {
        let mut queue = ArenaEventQueue::default();
        queue.extend([ArenaEvent::StepsStarted, ArenaEvent::StepsStopped]);
        assert_eq!(
            queue.current_match(),
            &[ArenaEvent::StepsStarted, ArenaEvent::StepsStopped]
        );
        queue.clear();
        assert!(queue.current_match().is_empty());
    }

    #[test]
    fn current_match_starts_at_the_last_start() {
        let mut queue = ArenaEventQueue::default();
        queue.extend([ArenaEvent::StepsStarted]);

        let started = ArenaEvent::Started {
            bounds: CoreVec2::new(800.0, 600.0),
        };
        queue.extend([
            started.clone(),
            ArenaEvent::StepsStopped,
            started.clone(),
            ArenaEvent::ScoresChanged,
        ]);
        assert_eq!(queue.current_match(), &[started, ArenaEvent::ScoresChanged]);
    }

    #[test]
    fn game_started_frame_switches_to_in_game() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
            .init_state::<AppState>()
            .insert_non_send_resource(WsClient::new())
            .init_resource::<ArenaState>()
            .init_resource::<ArenaEventQueue>()
            .add_systems(Update, receive_server_frames);

        app.world()
            .non_send_resource::<WsClient>()
            .inject_frame(
                r#"{"type":"game-started","data":{"id":"me","width":800,"height":600,"playerName":"buggy","skin":"boy"}}"#,
            );
        app.world()
            .non_send_resource::<WsClient>()
            .inject_frame("not json");
        app.update();
        app.update();

        assert_eq!(
            *app.world().resource::<State<AppState>>().get(),
            AppState::InGame
        );
        assert!(app.world().resource::<ArenaState>().is_started());
    }

    fn world_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
            .init_state::<AppState>()
            .insert_non_send_resource(WsClient::new())
            .init_resource::<ArenaState>()
            .init_resource::<ArenaEventQueue>()
            .insert_resource(GameAssets::placeholder())
            .init_resource::<ClientConfig>()
            .add_systems(
                Update,
                (receive_server_frames, spawn::apply_world_events, sync::sync_players).chain(),
            )
            .add_systems(Last, clear_arena_events);
        app
    }

    fn send(app: &App, frames: &[&str]) {
        let ws_client = app.world().non_send_resource::<WsClient>();
        for frame in frames {
            ws_client.inject_frame(*frame);
        }
    }

    fn player_sprites(app: &mut App) -> Vec<PlayerId> {
        let mut query = app.world_mut().query::<&PlayerSprite>();
        let mut ids: Vec<_> = query.iter(app.world()).map(|p| p.0.clone()).collect();
        ids.sort();
        ids
    }

    const ENEMY: &str =
        r#"{"type":"enemy-connected","data":{"id":"you","x":10,"y":10,"name":"bob","skin":"girl"}}"#;
    const START: &str = r#"{"type":"game-started","data":{"id":"me","width":800,"height":600,"playerName":"buggy","skin":"boy","trees":[{"x":100,"y":100,"width":60,"height":90,"type":"pinale"}],"playersInfo":[{"id":"you","x":20,"y":20,"name":"bob","skin":"girl"}],"maxSnowballs":3}}"#;

    #[test]
    fn one_sprite_per_player_when_a_batch_restarts_the_match() {
        let mut app = world_app();
        send(&app, &[ENEMY, ENEMY, START]);
        app.update();
        assert_eq!(player_sprites(&mut app), vec!["me".to_string(), "you".to_string()]);

        let mut trees = app.world_mut().query::<&TreeSprite>();
        assert_eq!(trees.iter(app.world()).count(), 1);
    }

    #[test]
    fn reannounced_enemy_keeps_a_single_sprite() {
        let mut app = world_app();
        send(&app, &[START]);
        app.update();
        send(&app, &[ENEMY, ENEMY]);
        app.update();
        assert_eq!(player_sprites(&mut app), vec!["me".to_string(), "you".to_string()]);

        // A second start in one batch with the re-announce replaces everything.
        send(&app, &[ENEMY, START, START]);
        app.update();
        assert_eq!(player_sprites(&mut app), vec!["me".to_string(), "you".to_string()]);
        let mut balls = app.world_mut().query::<&SnowballSprite>();
        assert_eq!(
            balls.iter(app.world()).count(),
            app.world().resource::<ArenaState>().snowball_capacity()
        );
    }
}
