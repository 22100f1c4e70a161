use bevy::prelude::*;

/// Application state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, States)]
pub enum AppState {
    /// Start dialog (or waiting for the auto-started match).
    #[default]
    Login,
    InGame,
}
