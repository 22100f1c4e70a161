use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use bevy::sprite::SpriteImageMode;

use snowbox_core::Vec2 as CoreVec2;
use snowbox_core::arena::{Arena, ArenaEvent, PLAYER_SIZE, SNOWBALL_RADIUS};
use snowbox_core::net::messages::PlayerId;

use crate::assets::GameAssets;
use crate::config::{ClientConfig, rgb};

use super::{
    ArenaEventQueue, ArenaState, MatchEntity, NameTag, PlayerSprite, SnowballSprite, TreeSprite,
    to_world,
};

/// The snow background covers a 4000x4000 area starting at (-1000, -1000).
const BACKGROUND_ORIGIN: f32 = -1000.0;
const BACKGROUND_SIZE: f32 = 4000.0;
const BACKGROUND_Z: f32 = -100.0;

pub const SNOWBALL_Z: f32 = 500.0;
const BORDER_Z: f32 = 600.0;
const BORDER_THICKNESS: f32 = 4.0;

/// Name tags sit this far above the top of the character frame.
const NAME_TAG_GAP: f32 = 12.0;

#[derive(Component)]
pub struct Background;

pub fn spawn_background(mut commands: Commands, assets: Res<GameAssets>) {
    let center = CoreVec2::splat(BACKGROUND_ORIGIN + BACKGROUND_SIZE / 2.0);
    commands.spawn((
        Background,
        Sprite {
            image: assets.background.clone(),
            custom_size: Some(Vec2::splat(BACKGROUND_SIZE)),
            image_mode: SpriteImageMode::Tiled {
                tile_x: true,
                tile_y: true,
                stretch_value: 1.0,
            },
            ..default()
        },
        Transform::from_translation(to_world(center, BACKGROUND_Z)),
    ));
}

/// Spawn and despawn entities for what the last server frames changed.
#[allow(clippy::too_many_arguments)]
pub fn apply_world_events(
    mut commands: Commands,
    queue: Res<ArenaEventQueue>,
    arena: Res<ArenaState>,
    assets: Res<GameAssets>,
    config: Res<ClientConfig>,
    match_entities: Query<Entity, With<MatchEntity>>,
    players: Query<(Entity, &PlayerSprite)>,
    trees: Query<Entity, With<TreeSprite>>,
) {
    let events = queue.current_match();
    // A start in this batch already despawned every entity the queries see.
    let restarted = matches!(events.first(), Some(ArenaEvent::Started { .. }));
    // Entities spawned earlier in this same batch are not visible to queries yet.
    let mut fresh_players: HashMap<PlayerId, Entity> = HashMap::new();
    let mut fresh_trees: Vec<Entity> = Vec::new();
    let mut gone: HashSet<Entity> = HashSet::new();

    for event in events {
        match event {
            ArenaEvent::Started { bounds } => {
                for entity in &match_entities {
                    commands.entity(entity).despawn();
                }
                spawn_border(&mut commands, *bounds, rgb(&config.colors.border));
                spawn_snowball_pool(&mut commands, &arena, &assets);
            },
            ArenaEvent::PlayerJoined { id } => {
                if let Some(entity) = spawn_player(&mut commands, &arena, &assets, &config, id) {
                    if let Some(stale) = fresh_players.insert(id.clone(), entity) {
                        commands.entity(stale).despawn();
                    }
                }
            },
            ArenaEvent::PlayerLeft { id } => {
                if let Some(entity) = fresh_players.remove(id) {
                    commands.entity(entity).despawn();
                }
                if !restarted {
                    for (entity, sprite) in &players {
                        if sprite.0 == *id && gone.insert(entity) {
                            commands.entity(entity).despawn();
                        }
                    }
                }
            },
            ArenaEvent::TreesPlanted { .. } => {
                for entity in fresh_trees.drain(..) {
                    commands.entity(entity).despawn();
                }
                if !restarted {
                    for entity in &trees {
                        commands.entity(entity).despawn();
                    }
                }
                fresh_trees = spawn_trees(&mut commands, &arena, &assets);
            },
            _ => {},
        }
    }
}

fn spawn_border(commands: &mut Commands, bounds: CoreVec2, color: Color) {
    let t = BORDER_THICKNESS;
    // (center, size) of each edge, drawn just outside the world.
    let edges = [
        (CoreVec2::new(bounds.x / 2.0, -t / 2.0), Vec2::new(bounds.x + 2.0 * t, t)),
        (
            CoreVec2::new(bounds.x / 2.0, bounds.y + t / 2.0),
            Vec2::new(bounds.x + 2.0 * t, t),
        ),
        (CoreVec2::new(-t / 2.0, bounds.y / 2.0), Vec2::new(t, bounds.y)),
        (
            CoreVec2::new(bounds.x + t / 2.0, bounds.y / 2.0),
            Vec2::new(t, bounds.y),
        ),
    ];
    for (center, size) in edges {
        commands.spawn((
            MatchEntity,
            Sprite::from_color(color, size),
            Transform::from_translation(to_world(center, BORDER_Z)),
        ));
    }
}

fn spawn_snowball_pool(commands: &mut Commands, arena: &Arena, assets: &GameAssets) {
    for slot in 0..arena.snowball_capacity() {
        commands.spawn((
            MatchEntity,
            SnowballSprite(slot),
            snowball_sprite(assets),
            Transform::from_xyz(0.0, 0.0, SNOWBALL_Z),
            Visibility::Hidden,
        ));
    }
}

/// In-flight snowballs are drawn at their collision size.
pub fn snowball_sprite(assets: &GameAssets) -> Sprite {
    Sprite {
        image: assets.snowball.clone(),
        custom_size: Some(Vec2::splat(SNOWBALL_RADIUS * 2.0)),
        ..default()
    }
}

fn spawn_player(
    commands: &mut Commands,
    arena: &Arena,
    assets: &GameAssets,
    config: &ClientConfig,
    id: &PlayerId,
) -> Option<Entity> {
    let view = arena.player(id)?;
    let label_color = if arena.is_local(id) {
        rgb(&config.colors.local_label)
    } else {
        rgb(&config.colors.enemy_label)
    };

    let entity = commands
        .spawn((
            MatchEntity,
            PlayerSprite(id.clone()),
            Sprite::from_atlas_image(
                assets.skin(view.skin),
                TextureAtlas {
                    layout: assets.character_layout.clone(),
                    index: 0,
                },
            ),
            Transform::from_translation(to_world(view.motion.center, 0.0)),
        ))
        .with_child((
            NameTag,
            Text2d::new(view.name.clone()),
            TextFont {
                font_size: config.hud.name_font_size,
                ..default()
            },
            TextColor(label_color),
            Transform::from_xyz(0.0, PLAYER_SIZE / 2.0 + NAME_TAG_GAP, 0.1),
        ))
        .id();
    Some(entity)
}

fn spawn_trees(commands: &mut Commands, arena: &Arena, assets: &GameAssets) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(arena.trees().len());
    for (index, tree) in arena.trees().iter().enumerate() {
        let sprite = tree.layout.sprite;
        let entity = commands
            .spawn((
                MatchEntity,
                TreeSprite(index),
                Sprite {
                    image: assets.tree(tree.layout.kind),
                    custom_size: Some(Vec2::new(sprite.width(), sprite.height())),
                    ..default()
                },
                Transform::from_translation(to_world(sprite.center(), arena.tree_depth(index))),
            ))
            .id();
        spawned.push(entity);
    }
    spawned
}
