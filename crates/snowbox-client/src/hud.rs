use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use snowbox_core::Vec2 as CoreVec2;
use snowbox_core::arena::ArenaEvent;
use snowbox_core::layout::{Anchor, align_in, ammo_alpha, centered_row, stack_offsets};
use snowbox_core::scoreboard::{DeltaTone, format_delta};
use snowbox_core::tween::{Easing, Tween};

use crate::assets::GameAssets;
use crate::audio::AudioSettings;
use crate::config::{ClientConfig, rgb};
use crate::game::{ArenaEventQueue, ArenaState, FrameSet, MatchEntity, to_world};
use crate::nine_patch::PatchPreset;

const AMMO_PANEL_SIZE: Vec2 = Vec2::new(190.0, 49.0);
const AMMO_ICON_SIZE: f32 = 20.0;
const AMMO_ICON_SPACING: f32 = 1.4;
const MUTE_ICON_SIZE: f32 = 32.0;

const SCORE_LIST_LEFT: f32 = 16.0;
const SCORE_LIST_TOP: f32 = 16.0;
const SCORE_LIST_GAP: f32 = 8.0;
/// Rendered line height relative to the font size.
const LINE_HEIGHT: f32 = 1.2;

const POPUP_LIFT: f32 = 16.0;
const POPUP_TRAVEL: f32 = 48.0;
const POPUP_SECS: f32 = 1.5;
const POPUP_Z: f32 = 700.0;
/// Outline width of popup text, drawn as offset copies behind it.
const POPUP_STROKE: f32 = 2.0;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_mute_button, spawn_fps_text))
            .add_systems(
                Update,
                react_to_arena
                    .in_set(FrameSet::React)
                    .after(crate::game::spawn::apply_world_events),
            )
            .add_systems(
                Update,
                (
                    toggle_mute,
                    refresh_mute_icon,
                    rise_score_popups,
                    update_fps_text,
                    position_hud,
                ),
            );
    }
}

/// Places an absolutely positioned node relative to the window.
#[derive(Component, Debug, Clone, Copy)]
pub struct HudAnchor {
    pub anchor: Anchor,
    pub size: Vec2,
    pub offset: Vec2,
}

impl HudAnchor {
    /// Top-left corner of the node in a window of `window` logical pixels.
    pub fn place(&self, window: Vec2) -> Vec2 {
        let at = align_in(
            CoreVec2::new(window.x, window.y),
            CoreVec2::new(self.size.x, self.size.y),
            self.anchor,
            CoreVec2::ZERO,
            CoreVec2::new(self.offset.x, self.offset.y),
        );
        Vec2::new(at.x, at.y)
    }
}

#[derive(Component)]
pub struct MuteButton;

#[derive(Component)]
struct MuteIcon;

#[derive(Component)]
struct AmmoIcon(usize);

#[derive(Component)]
struct ScoreRow;

#[derive(Component)]
struct FpsText;

/// Floating score delta drifting down from where the player stood.
#[derive(Component, Debug, Clone)]
pub struct ScorePopup {
    pub origin: CoreVec2,
    pub drift: Tween,
}

impl ScorePopup {
    pub fn new(player_center: CoreVec2) -> Self {
        Self {
            origin: player_center + CoreVec2::new(0.0, POPUP_LIFT),
            drift: Tween::new(0.0, POPUP_TRAVEL, POPUP_SECS, Easing::QuadraticOut),
        }
    }

    /// Server-space position after advancing `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> CoreVec2 {
        let dy = self.drift.tick(dt);
        self.origin + CoreVec2::new(0.0, dy)
    }
}

fn anchored_node(anchor: &HudAnchor) -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Px(anchor.size.x),
        height: Val::Px(anchor.size.y),
        ..default()
    }
}

fn spawn_mute_button(
    mut commands: Commands,
    assets: Res<GameAssets>,
    settings: Res<AudioSettings>,
) {
    let preset = PatchPreset::square_button();
    let anchor = HudAnchor {
        anchor: Anchor::TopRight,
        size: Vec2::new(preset.width, preset.height),
        offset: Vec2::new(-16.0, 16.0),
    };
    let icon = if settings.muted {
        assets.music_off.clone()
    } else {
        assets.music_on.clone()
    };
    let inset = (preset.width - MUTE_ICON_SIZE) / 2.0;

    commands
        .spawn((
            MuteButton,
            Button,
            anchor,
            anchored_node(&anchor),
            preset.image(&assets.field_patch),
        ))
        .with_children(|parent| {
            parent.spawn((
                MuteIcon,
                ImageNode::new(icon),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(inset),
                    top: Val::Px(inset),
                    width: Val::Px(MUTE_ICON_SIZE),
                    height: Val::Px(MUTE_ICON_SIZE),
                    ..default()
                },
            ));
        });
}

fn spawn_fps_text(mut commands: Commands, config: Res<ClientConfig>) {
    if !config.hud.show_fps {
        return;
    }
    let anchor = HudAnchor {
        anchor: Anchor::BottomLeft,
        size: Vec2::new(220.0, 20.0),
        offset: Vec2::new(8.0, -8.0),
    };
    commands.spawn((
        FpsText,
        anchor,
        anchored_node(&anchor),
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(rgb(&config.colors.dialog_text)),
    ));
}

fn toggle_mute(
    buttons: Query<&Interaction, (Changed<Interaction>, With<MuteButton>)>,
    mut settings: ResMut<AudioSettings>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            settings.toggle();
            info!("Music {}", if settings.muted { "muted" } else { "unmuted" });
        }
    }
}

fn refresh_mute_icon(
    settings: Res<AudioSettings>,
    assets: Res<GameAssets>,
    mut icons: Query<&mut ImageNode, With<MuteIcon>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut node in &mut icons {
        node.image = if settings.muted {
            assets.music_off.clone()
        } else {
            assets.music_on.clone()
        };
    }
}

#[allow(clippy::too_many_arguments)]
fn react_to_arena(
    mut commands: Commands,
    queue: Res<ArenaEventQueue>,
    arena: Res<ArenaState>,
    assets: Res<GameAssets>,
    config: Res<ClientConfig>,
    rows: Query<Entity, With<ScoreRow>>,
    mut icons: Query<(&AmmoIcon, &mut ImageNode)>,
) {
    let events = queue.current_match();
    for event in events {
        match event {
            ArenaEvent::AmmoReady { max } => {
                // Later count changes in this batch are already in the model.
                let count = arena.ammo().map_or(*max, |ammo| ammo.count);
                spawn_ammo_panel(&mut commands, &assets, *max, count);
            },
            ArenaEvent::AmmoChanged { count } => {
                for (icon, mut node) in &mut icons {
                    node.color = Color::WHITE.with_alpha(ammo_alpha(icon.0, *count));
                }
            },
            ArenaEvent::Scored { delta, at, .. } => {
                let (text, tone) = format_delta(*delta);
                let color = match tone {
                    DeltaTone::Gain => rgb(&config.colors.score_gain),
                    DeltaTone::Loss => rgb(&config.colors.score_loss),
                };
                let popup = ScorePopup::new(*at);
                let font = TextFont {
                    font_size: config.hud.popup_font_size,
                    ..default()
                };
                let stroke = rgb(&config.colors.score_stroke);
                commands
                    .spawn((
                        MatchEntity,
                        Text2d::new(text.clone()),
                        font.clone(),
                        TextColor(color),
                        Transform::from_translation(to_world(popup.origin, POPUP_Z)),
                        popup,
                    ))
                    .with_children(|parent| {
                        for offset in stroke_offsets(POPUP_STROKE) {
                            parent.spawn((
                                Text2d::new(text.clone()),
                                font.clone(),
                                TextColor(stroke),
                                Transform::from_translation(offset.extend(-0.1)),
                            ));
                        }
                    });
            },
            _ => {},
        }
    }

    // Rebuild once per frame no matter how many score events arrived.
    if events.iter().any(|e| matches!(e, ArenaEvent::ScoresChanged)) {
        for entity in &rows {
            commands.entity(entity).despawn();
        }
        spawn_score_rows(&mut commands, &arena, &config);
    }
}

/// Offsets of the outline copies: the eight compass directions at `width`.
fn stroke_offsets(width: f32) -> [Vec2; 8] {
    let d = width * std::f32::consts::FRAC_1_SQRT_2;
    [
        Vec2::new(width, 0.0),
        Vec2::new(-width, 0.0),
        Vec2::new(0.0, width),
        Vec2::new(0.0, -width),
        Vec2::new(d, d),
        Vec2::new(d, -d),
        Vec2::new(-d, d),
        Vec2::new(-d, -d),
    ]
}

fn spawn_ammo_panel(commands: &mut Commands, assets: &GameAssets, max: u32, count: u32) {
    let anchor = HudAnchor {
        anchor: Anchor::BottomRight,
        size: AMMO_PANEL_SIZE,
        offset: Vec2::new(2.0, -16.0),
    };
    let xs = centered_row(AMMO_PANEL_SIZE.x, AMMO_ICON_SIZE, max as usize, AMMO_ICON_SPACING);
    let top = (AMMO_PANEL_SIZE.y - AMMO_ICON_SIZE) / 2.0;

    commands
        .spawn((
            MatchEntity,
            anchor,
            anchored_node(&anchor),
            ImageNode::new(assets.ammo_panel.clone()),
        ))
        .with_children(|parent| {
            for (index, x) in xs.into_iter().enumerate() {
                parent.spawn((
                    AmmoIcon(index),
                    ImageNode::new(assets.large_snowball.clone())
                        .with_color(Color::WHITE.with_alpha(ammo_alpha(index, count))),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(x),
                        top: Val::Px(top),
                        width: Val::Px(AMMO_ICON_SIZE),
                        height: Val::Px(AMMO_ICON_SIZE),
                        ..default()
                    },
                ));
            }
        });
}

fn spawn_score_rows(commands: &mut Commands, arena: &ArenaState, config: &ClientConfig) {
    let ranking = arena.scoreboard().ranking();
    let row_height = config.hud.score_font_size * LINE_HEIGHT;
    let tops = stack_offsets(
        SCORE_LIST_TOP,
        ranking.iter().map(|_| row_height),
        SCORE_LIST_GAP,
    );
    for (entry, top) in ranking.into_iter().zip(tops) {
        let color = if arena.is_local(&entry.id) {
            rgb(&config.colors.local_label)
        } else {
            rgb(&config.colors.enemy_label)
        };
        commands.spawn((
            ScoreRow,
            Text::new(entry.label()),
            TextFont {
                font_size: config.hud.score_font_size,
                ..default()
            },
            TextColor(color),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(SCORE_LIST_LEFT),
                top: Val::Px(top),
                ..default()
            },
        ));
    }
}

fn rise_score_popups(
    mut commands: Commands,
    time: Res<Time>,
    mut popups: Query<(Entity, &mut ScorePopup, &mut Transform)>,
) {
    for (entity, mut popup, mut transform) in &mut popups {
        let at = popup.advance(time.delta_secs());
        transform.translation = to_world(at, POPUP_Z);
        if popup.drift.is_finished() {
            commands.entity(entity).despawn();
        }
    }
}

fn update_fps_text(diagnostics: Res<DiagnosticsStore>, mut text: Query<&mut Text, With<FpsText>>) {
    let Ok(mut text) = text.single_mut() else {
        return;
    };
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed());
    let frame_ms = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(|d| d.smoothed());
    if let (Some(fps), Some(frame_ms)) = (fps, frame_ms) {
        **text = format!("{fps:.0} fps  {frame_ms:.1} ms");
    }
}

fn position_hud(windows: Query<&Window>, mut nodes: Query<(&HudAnchor, &mut Node)>) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    for (anchor, mut node) in &mut nodes {
        let at = anchor.place(size);
        node.left = Val::Px(at.x);
        node.top = Val::Px(at.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mute_button_hugs_top_right() {
        let anchor = HudAnchor {
            anchor: Anchor::TopRight,
            size: Vec2::splat(48.0),
            offset: Vec2::new(-16.0, 16.0),
        };
        assert_eq!(anchor.place(Vec2::new(800.0, 600.0)), Vec2::new(736.0, 16.0));
    }

    #[test]
    fn ammo_panel_sits_bottom_right() {
        let anchor = HudAnchor {
            anchor: Anchor::BottomRight,
            size: AMMO_PANEL_SIZE,
            offset: Vec2::new(2.0, -16.0),
        };
        assert_eq!(anchor.place(Vec2::new(800.0, 600.0)), Vec2::new(612.0, 535.0));
    }

    #[test]
    fn stroke_surrounds_the_text_evenly() {
        let offsets = stroke_offsets(2.0);
        for offset in offsets {
            assert!((offset.length() - 2.0).abs() < 1e-5);
        }
        let sum: Vec2 = offsets.iter().sum();
        assert!(sum.length() < 1e-5);
    }

    #[test]
    fn popup_drifts_down_and_settles() {
        let mut popup = ScorePopup::new(CoreVec2::new(100.0, 200.0));
        assert_eq!(popup.origin, CoreVec2::new(100.0, 216.0));
        let halfway = popup.advance(0.75);
        assert!((halfway.y - 252.0).abs() < 1e-3);
        let end = popup.advance(5.0);
        assert_eq!(end, CoreVec2::new(100.0, 264.0));
        assert!(popup.drift.is_finished());
    }
}
