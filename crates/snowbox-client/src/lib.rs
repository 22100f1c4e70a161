mod app;
pub mod assets;
mod audio;
mod camera;
pub mod config;
mod controls;
pub mod game;
mod hud;
mod login;
pub mod net_client;
mod nine_patch;
mod storage;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use wasm_bindgen::prelude::*;

use app::AppState;
use assets::GameAssetsPlugin;
use audio::GameAudioPlugin;
use camera::GameCameraPlugin;
use config::ConfigPlugin;
use controls::ControlsPlugin;
use game::GamePlugin;
use hud::HudPlugin;
use login::LoginPlugin;
use net_client::WsClient;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    console_error_panic_hook::set_once();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Snowbox".to_string(),
                        canvas: Some("#game-canvas".to_string()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .init_state::<AppState>()
        .insert_non_send_resource(WsClient::new())
        .add_plugins((ConfigPlugin, GameAssetsPlugin, GameAudioPlugin))
        .add_plugins((
            GamePlugin,
            GameCameraPlugin,
            ControlsPlugin,
            HudPlugin,
            LoginPlugin,
        ))
        .run();
}
