use bevy::ecs::system::NonSend;
use bevy::prelude::*;

use snowbox_core::animation::DirectionKeys;
use snowbox_core::net::messages::ClientMessage;

use crate::app::AppState;
use crate::camera::GameCamera;
use crate::game::{ArenaState, FrameSet, to_server};
use crate::net_client::WsClient;

const ARROWS: [KeyCode; 4] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (steer_local_player, throw_on_click)
                .in_set(FrameSet::React)
                .after(crate::game::spawn::apply_world_events)
                .run_if(in_state(AppState::InGame)),
        );
    }
}

/// Arrow keys currently held.
pub fn held_directions(keyboard: &ButtonInput<KeyCode>) -> DirectionKeys {
    DirectionKeys {
        up: keyboard.pressed(KeyCode::ArrowUp),
        down: keyboard.pressed(KeyCode::ArrowDown),
        left: keyboard.pressed(KeyCode::ArrowLeft),
        right: keyboard.pressed(KeyCode::ArrowRight),
    }
}

/// Whether any arrow changed state this frame.
pub fn arrows_changed(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_just_pressed(ARROWS) || keyboard.any_just_released(ARROWS)
}

/// Movement intents are only sent when the held arrows change.
fn steer_local_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut arena: ResMut<ArenaState>,
    ws_client: NonSend<WsClient>,
) {
    if !arrows_changed(&keyboard) {
        return;
    }
    let intent = arena.steer(held_directions(&keyboard));
    ws_client.send_message(&ClientMessage::PlayerMove(intent));
}

fn throw_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    buttons: Query<&Interaction>,
    arena: Res<ArenaState>,
    ws_client: NonSend<WsClient>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    // Clicks on HUD buttons never throw.
    if buttons.iter().any(|i| *i != Interaction::None) {
        return;
    }
    if let Ok(window) = windows.single()
        && let Some(cursor_pos) = window.cursor_position()
        && let Ok((camera, cam_transform)) = cameras.single()
        && let Ok(point) = camera.viewport_to_world_2d(cam_transform, cursor_pos)
        && let Some(throw) = arena.throw_at(to_server(point))
    {
        ws_client.send_message(&ClientMessage::ThrowBall(throw));
    }
}
