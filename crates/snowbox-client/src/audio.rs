use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

use snowbox_core::arena::ArenaEvent;
use snowbox_core::tween::{Easing, Tween};

use crate::app::AppState;
use crate::assets::GameAssets;
use crate::config::ClientConfig;
use crate::game::{ArenaEventQueue, FrameSet};
use crate::storage;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AudioSettings::load())
            .add_systems(OnEnter(AppState::Login), start_login_music)
            .add_systems(
                Update,
                react_to_arena
                    .in_set(FrameSet::React)
                    .after(crate::game::spawn::apply_world_events),
            )
            .add_systems(Update, (advance_fades, apply_music_volume).chain());
    }
}

/// Music preference, persisted in localStorage.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioSettings {
    pub muted: bool,
}

impl AudioSettings {
    pub fn load() -> Self {
        Self {
            muted: storage::load_muted(),
        }
    }

    pub fn toggle(&mut self) {
        self.muted = !self.muted;
        storage::save_muted(self.muted);
    }

    /// Volume a music sink should play at for the given level.
    pub fn music_volume(&self, level: f32) -> f32 {
        if self.muted { 0.0 } else { level }
    }
}

#[derive(Component)]
pub struct LoginMusic;

#[derive(Component)]
pub struct BattleMusic;

#[derive(Component)]
pub struct StepsLoop;

/// Unmuted volume of a music entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MusicLevel(pub f32);

/// Volume ramp applied to a music entity's [`MusicLevel`].
#[derive(Component, Debug, Clone)]
pub struct MusicFade {
    /// Seconds to wait before the ramp begins.
    pub delay: f32,
    pub tween: Tween,
    pub despawn_on_finish: bool,
}

impl MusicFade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            delay: 0.0,
            tween: Tween::new(from, to, duration, Easing::Linear),
            despawn_on_finish: false,
        }
    }

    pub fn after(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn then_despawn(mut self) -> Self {
        self.despawn_on_finish = true;
        self
    }

    /// Advance by `dt` seconds and return the current level.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.delay > 0.0 {
            let spill = dt - self.delay;
            self.delay = (self.delay - dt).max(0.0);
            if spill <= 0.0 {
                return self.tween.value();
            }
            return self.tween.tick(spill);
        }
        self.tween.tick(dt)
    }

    pub fn is_finished(&self) -> bool {
        self.delay <= 0.0 && self.tween.is_finished()
    }
}

fn start_login_music(
    mut commands: Commands,
    assets: Res<GameAssets>,
    config: Res<ClientConfig>,
    settings: Res<AudioSettings>,
    existing: Query<(), Or<(With<LoginMusic>, With<BattleMusic>)>>,
) {
    if !existing.is_empty() {
        return;
    }
    let level = config.audio.music_volume;
    commands.spawn((
        LoginMusic,
        MusicLevel(level),
        AudioPlayer::new(assets.login_music.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(settings.music_volume(level))),
    ));
}

fn react_to_arena(
    mut commands: Commands,
    queue: Res<ArenaEventQueue>,
    assets: Res<GameAssets>,
    config: Res<ClientConfig>,
    login_music: Query<(Entity, &MusicLevel), (With<LoginMusic>, Without<MusicFade>)>,
    battle_music: Query<(), With<BattleMusic>>,
    steps: Query<Entity, With<StepsLoop>>,
) {
    let fade = config.audio.fade_secs;
    // Battle music may be spawned by a Started event earlier in this batch.
    let mut battle_playing = !battle_music.is_empty();

    for event in queue.current_match() {
        match event {
            ArenaEvent::Started { .. } => {
                for (entity, level) in &login_music {
                    commands
                        .entity(entity)
                        .insert(MusicFade::new(level.0, 0.0, fade).then_despawn());
                }
                for entity in &steps {
                    commands.entity(entity).despawn();
                }
                if !battle_playing {
                    battle_playing = true;
                    commands.spawn((
                        BattleMusic,
                        MusicLevel(0.0),
                        MusicFade::new(0.0, config.audio.music_volume, fade).after(fade),
                        AudioPlayer::new(assets.battle_music.clone()),
                        PlaybackSettings::LOOP.with_volume(Volume::Linear(0.0)),
                    ));
                }
            },
            ArenaEvent::StepsStarted => {
                if steps.is_empty() {
                    commands.spawn((
                        StepsLoop,
                        AudioPlayer::new(assets.steps.clone()),
                        PlaybackSettings::LOOP
                            .with_volume(Volume::Linear(config.audio.steps_volume)),
                    ));
                }
            },
            ArenaEvent::StepsStopped => {
                for entity in &steps {
                    commands.entity(entity).despawn();
                }
            },
            _ => {},
        }
    }
}

fn advance_fades(
    mut commands: Commands,
    time: Res<Time>,
    mut fades: Query<(Entity, &mut MusicFade, &mut MusicLevel)>,
) {
    let dt = time.delta_secs();
    for (entity, mut fade, mut level) in &mut fades {
        level.0 = fade.advance(dt);
        if fade.is_finished() {
            if fade.despawn_on_finish {
                commands.entity(entity).despawn();
            } else {
                commands.entity(entity).remove::<MusicFade>();
            }
        }
    }
}

/// Sinks appear a few frames after spawning, so volume is pushed every frame.
fn apply_music_volume(
    settings: Res<AudioSettings>,
    mut sinks: Query<(&MusicLevel, &mut AudioSink)>,
) {
    for (level, mut sink) in &mut sinks {
        sink.set_volume(Volume::Linear(settings.music_volume(level.0)));
    }
}
