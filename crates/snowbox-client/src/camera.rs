use bevy::prelude::*;

use crate::game::{ArenaState, FrameSet, to_world};

pub struct GameCameraPlugin;

impl Plugin for GameCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            follow_local_player.in_set(FrameSet::Sync).after(crate::game::sync::sync_players),
        );
    }
}

/// Marker for the world camera.
#[derive(Component)]
pub struct GameCamera;

fn setup_camera(mut commands: Commands) {
    commands.spawn((GameCamera, Camera2d, Msaa::Off));
}

/// Keep the local player centered on screen.
fn follow_local_player(
    arena: Res<ArenaState>,
    mut camera: Query<&mut Transform, With<GameCamera>>,
) {
    let Some(view) = arena.local_player() else {
        return;
    };
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    let target = to_world(view.motion.center, transform.translation.z);
    transform.translation = target;
}
