use bevy::prelude::*;

use snowbox_core::animation::{
    CHARACTER_FRAME_SIZE, CHARACTER_SHEET_COLUMNS, CHARACTER_SHEET_ROWS, SPLASH_FRAME_COUNT,
};
use snowbox_core::net::messages::{Skin, TreeKind};

/// Side of one splash frame in the splash sheet.
pub const SPLASH_FRAME_SIZE: u32 = 64;

pub const BACKGROUND: &str = "snow_tile.jpg";
pub const BOY_SHEET: &str = "boy.png";
pub const GIRL_SHEET: &str = "girl.png";
pub const SNOWBALL: &str = "sprites/snowball.png";
pub const SNOWBALL_SPLASH: &str = "sprites/snowball_splash.png";
pub const LARGE_SNOWBALL: &str = "sprites/large_snowball.png";
pub const TREE: &str = "sprites/tree.png";
pub const PINE_TREE: &str = "sprites/pine_tree.png";
pub const DIALOG_PATCH: &str = "controls/panel_blue.png";
pub const FIELD_PATCH: &str = "controls/buttonSquare_grey_pressed.png";
pub const AMMO_PANEL: &str = "controls/buttonLong_beige_pressed.png";
pub const MUSIC_ON_ICON: &str = "controls/musicOn.png";
pub const MUSIC_OFF_ICON: &str = "controls/musicOff.png";
pub const LOGIN_MUSIC: &str = "music/Snowland.mp3";
pub const BATTLE_MUSIC: &str = "music/wintery loop.wav";
pub const STEPS_LOOP: &str = "music/snow_run.mp3";

/// Every file the client loads, relative to the asset root.
pub const ASSET_FILES: [&str; 16] = [
    BACKGROUND,
    BOY_SHEET,
    GIRL_SHEET,
    SNOWBALL,
    SNOWBALL_SPLASH,
    LARGE_SNOWBALL,
    TREE,
    PINE_TREE,
    DIALOG_PATCH,
    FIELD_PATCH,
    AMMO_PANEL,
    MUSIC_ON_ICON,
    MUSIC_OFF_ICON,
    LOGIN_MUSIC,
    BATTLE_MUSIC,
    STEPS_LOOP,
];

/// Handles to everything the game draws or plays.
#[derive(Resource)]
pub struct GameAssets {
    pub background: Handle<Image>,
    pub boy: Handle<Image>,
    pub girl: Handle<Image>,
    pub character_layout: Handle<TextureAtlasLayout>,
    pub snowball: Handle<Image>,
    pub splash: Handle<Image>,
    pub splash_layout: Handle<TextureAtlasLayout>,
    pub large_snowball: Handle<Image>,
    pub tree: Handle<Image>,
    pub pine_tree: Handle<Image>,
    pub dialog_patch: Handle<Image>,
    pub field_patch: Handle<Image>,
    pub ammo_panel: Handle<Image>,
    pub music_on: Handle<Image>,
    pub music_off: Handle<Image>,
    pub login_music: Handle<AudioSource>,
    pub battle_music: Handle<AudioSource>,
    pub steps: Handle<AudioSource>,
}

impl GameAssets {
    pub fn skin(&self, skin: Skin) -> Handle<Image> {
        match skin {
            Skin::Boy => self.boy.clone(),
            Skin::Girl => self.girl.clone(),
        }
    }

    /// Every handle points at the default asset; nothing is loaded.
    #[cfg(test)]
    pub fn placeholder() -> Self {
        Self {
            background: Handle::default(),
            boy: Handle::default(),
            girl: Handle::default(),
            character_layout: Handle::default(),
            snowball: Handle::default(),
            splash: Handle::default(),
            splash_layout: Handle::default(),
            large_snowball: Handle::default(),
            tree: Handle::default(),
            pine_tree: Handle::default(),
            dialog_patch: Handle::default(),
            field_patch: Handle::default(),
            ammo_panel: Handle::default(),
            music_on: Handle::default(),
            music_off: Handle::default(),
            login_music: Handle::default(),
            battle_music: Handle::default(),
            steps: Handle::default(),
        }
    }

    pub fn tree(&self, kind: TreeKind) -> Handle<Image> {
        match kind {
            TreeKind::Regular => self.tree.clone(),
            TreeKind::Pine => self.pine_tree.clone(),
        }
    }
}

/// Loads [`GameAssets`] while the app is built, so state-entry systems that
/// run before `Startup` can already use the handles.
pub struct GameAssetsPlugin;

impl Plugin for GameAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameAssets>();
    }
}

impl FromWorld for GameAssets {
    fn from_world(world: &mut World) -> Self {
        let mut layouts = world.resource_mut::<Assets<TextureAtlasLayout>>();
        let character_layout = layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(CHARACTER_FRAME_SIZE),
            CHARACTER_SHEET_COLUMNS,
            CHARACTER_SHEET_ROWS,
            None,
            None,
        ));
        let splash_layout = layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(SPLASH_FRAME_SIZE),
            SPLASH_FRAME_COUNT as u32,
            1,
            None,
            None,
        ));

        let asset_server = world.resource::<AssetServer>();
        Self {
            background: asset_server.load(BACKGROUND),
            boy: asset_server.load(BOY_SHEET),
            girl: asset_server.load(GIRL_SHEET),
            character_layout,
            snowball: asset_server.load(SNOWBALL),
            splash: asset_server.load(SNOWBALL_SPLASH),
            splash_layout,
            large_snowball: asset_server.load(LARGE_SNOWBALL),
            tree: asset_server.load(TREE),
            pine_tree: asset_server.load(PINE_TREE),
            dialog_patch: asset_server.load(DIALOG_PATCH),
            field_patch: asset_server.load(FIELD_PATCH),
            ammo_panel: asset_server.load(AMMO_PANEL),
            music_on: asset_server.load(MUSIC_ON_ICON),
            music_off: asset_server.load(MUSIC_OFF_ICON),
            login_music: asset_server.load(LOGIN_MUSIC),
            battle_music: asset_server.load(BATTLE_MUSIC),
            steps: asset_server.load(STEPS_LOOP),
        }
    }
}
