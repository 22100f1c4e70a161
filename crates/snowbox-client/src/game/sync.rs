use bevy::prelude::*;

use snowbox_core::arena::SnowballState;

use crate::assets::GameAssets;

use super::spawn::{SNOWBALL_Z, snowball_sprite};
use super::{ArenaState, PlayerSprite, SnowballSprite, TreeSprite, to_world};

/// The splash sheet is drawn at half its native frame size.
const SPLASH_SCALE: f32 = 0.5;

pub fn sync_players(
    arena: Res<ArenaState>,
    mut players: Query<(&PlayerSprite, &mut Transform, &mut Sprite)>,
) {
    for (player, mut transform, mut sprite) in &mut players {
        let Some(view) = arena.player(&player.0) else {
            continue;
        };
        let depth = arena.player_depth(&player.0).unwrap_or_default();
        transform.translation = to_world(view.motion.center, depth);
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = view.animator.frame().unwrap_or(0);
        }
    }
}

pub fn sync_snowballs(
    arena: Res<ArenaState>,
    assets: Res<GameAssets>,
    mut balls: Query<(&SnowballSprite, &mut Transform, &mut Sprite, &mut Visibility)>,
) {
    for (ball, mut transform, mut sprite, mut visibility) in &mut balls {
        let Some(view) = arena.snowball(ball.0) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };
        visibility.set_if_neq(Visibility::Visible);
        transform.translation = to_world(view.motion.center, SNOWBALL_Z);

        let splashing = view.state == SnowballState::Splashing;
        if splashing != sprite.texture_atlas.is_some() {
            if splashing {
                *sprite = Sprite::from_atlas_image(
                    assets.splash.clone(),
                    TextureAtlas {
                        layout: assets.splash_layout.clone(),
                        index: 0,
                    },
                );
                transform.scale = Vec3::splat(SPLASH_SCALE);
            } else {
                *sprite = snowball_sprite(&assets);
                transform.scale = Vec3::ONE;
            }
        }
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = view.animator.frame().unwrap_or(0);
        }
    }
}

pub fn sync_trees(arena: Res<ArenaState>, mut trees: Query<(&TreeSprite, &mut Sprite)>) {
    for (tree, mut sprite) in &mut trees {
        if let Some(view) = arena.trees().get(tree.0) {
            sprite.color = Color::WHITE.with_alpha(view.alpha);
        }
    }
}
