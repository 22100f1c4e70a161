use bevy::ecs::system::{NonSend, NonSendMut};
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use snowbox_core::net::messages::{ClientMessage, Skin, StartGameMsg};

use crate::app::AppState;
use crate::assets::GameAssets;
use crate::config::{ClientConfig, rgb};
use crate::net_client::WsClient;
use crate::nine_patch::PatchPreset;

/// Longest name the start dialog accepts.
pub const MAX_NAME_LEN: usize = 16;

const SELECTED_TINT: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);
const UNSELECTED_TINT: Color = Color::NONE;

pub struct LoginPlugin;

impl Plugin for LoginPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoginForm>()
            .add_systems(OnEnter(AppState::Login), setup_login)
            .add_systems(
                Update,
                (type_name, login_buttons, refresh_dialog)
                    .chain()
                    .run_if(in_state(AppState::Login)),
            )
            .add_systems(OnExit(AppState::Login), cleanup_login);
    }
}

/// Start dialog state.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub name: String,
    pub skin: Skin,
    pub submitted: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            skin: Skin::Boy,
            submitted: false,
        }
    }
}

impl LoginForm {
    pub fn push(&mut self, c: char) {
        if self.name.chars().count() < MAX_NAME_LEN {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    /// The start request, or `None` while the name is blank or the form
    /// was already sent.
    pub fn submit(&mut self) -> Option<StartGameMsg> {
        let name = self.name.trim();
        if self.submitted || name.is_empty() {
            return None;
        }
        self.submitted = true;
        Some(StartGameMsg {
            name: name.to_string(),
            skin: self.skin,
        })
    }

    /// Edit the name for one pressed key. Text comes from the keyboard
    /// layout, so any printable character the player types is accepted.
    /// Returns the start request when the key submits the form.
    pub fn apply_key(&mut self, key: &Key) -> Option<StartGameMsg> {
        if self.submitted {
            return None;
        }
        match key {
            Key::Character(text) => {
                for c in text.chars().filter(|c| !c.is_control()) {
                    self.push(c);
                }
            },
            Key::Space => self.push(' '),
            Key::Backspace => self.backspace(),
            Key::Enter => return self.submit(),
            _ => {},
        }
        None
    }
}

#[derive(Component)]
struct LoginUi;

#[derive(Component)]
struct NameText;

#[derive(Component)]
struct SkinButton(Skin);

#[derive(Component)]
struct PlayButton;

/// Page protocol, host (with port) and bare hostname.
fn page_location() -> (String, String, String) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            return (
                location.protocol().unwrap_or_default(),
                location.host().unwrap_or_default(),
                location.hostname().unwrap_or_default(),
            );
        }
    }
    ("http:".to_string(), "localhost:8080".to_string(), "localhost".to_string())
}

fn setup_login(
    mut commands: Commands,
    mut ws_client: NonSendMut<WsClient>,
    mut form: ResMut<LoginForm>,
    config: Res<ClientConfig>,
    assets: Res<GameAssets>,
) {
    let (protocol, host, hostname) = page_location();
    let url = config.ws_url(&protocol, &host);
    info!("Connecting to {url}");
    if let Err(e) = ws_client.connect(&url) {
        warn!("Connection failed: {e}");
    }

    if config.auto_starts(&hostname) {
        form.name = config.net.auto_start_name.clone();
        form.skin = if fastrand::bool() { Skin::Boy } else { Skin::Girl };
        if let Some(start) = form.submit() {
            ws_client.send_message(&ClientMessage::StartGame(start));
        }
        return;
    }

    spawn_dialog(&mut commands, &assets, &config);
}

fn spawn_dialog(commands: &mut Commands, assets: &GameAssets, config: &ClientConfig) {
    let dialog = PatchPreset::dialog();
    let field = PatchPreset::text_field();
    let square = PatchPreset::square_button();
    let play = PatchPreset {
        width: 120.0,
        ..square
    };
    let text_color = rgb(&config.colors.dialog_text);

    commands
        .spawn((
            LoginUi,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((dialog.node(), dialog.image(&assets.dialog_patch)))
                .with_children(|panel| {
                    panel.spawn(centered(24.0, dialog.width)).with_child((
                        Text::new("Snowball Fight"),
                        TextFont {
                            font_size: 32.0,
                            ..default()
                        },
                        TextColor(text_color),
                    ));

                    panel
                        .spawn((
                            Node {
                                left: Val::Px((dialog.width - field.width) / 2.0),
                                top: Val::Px(90.0),
                                ..field_node(&field)
                            },
                            field.image(&assets.field_patch),
                        ))
                        .with_children(|slot| {
                            slot.spawn((
                                NameText,
                                Text::new("_"),
                                TextFont {
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(text_color),
                                at(10.0, 8.0, None),
                            ));
                        });

                    let gap = 24.0;
                    let left = (dialog.width - 2.0 * square.width - gap) / 2.0;
                    for (i, skin) in Skin::ALL.into_iter().enumerate() {
                        panel
                            .spawn((
                                SkinButton(skin),
                                Button,
                                BackgroundColor(UNSELECTED_TINT),
                                Node {
                                    left: Val::Px(left + i as f32 * (square.width + gap)),
                                    top: Val::Px(150.0),
                                    ..field_node(&square)
                                },
                                square.image(&assets.field_patch),
                            ))
                            .with_children(|button| {
                                button.spawn((
                                    ImageNode::from_atlas_image(
                                        assets.skin(skin),
                                        TextureAtlas {
                                            layout: assets.character_layout.clone(),
                                            index: 0,
                                        },
                                    ),
                                    at(0.0, 0.0, Some(square.width)),
                                ));
                            });
                    }

                    panel
                        .spawn((
                            PlayButton,
                            Button,
                            Node {
                                left: Val::Px((dialog.width - play.width) / 2.0),
                                top: Val::Px(230.0),
                                ..field_node(&play)
                            },
                            play.image(&assets.field_patch),
                        ))
                        .with_children(|button| {
                            button.spawn(centered(10.0, play.width)).with_child((
                                Text::new("Play"),
                                TextFont {
                                    font_size: 22.0,
                                    ..default()
                                },
                                TextColor(text_color),
                            ));
                        });
                });
        });
}

/// Absolute node of a 9-patch preset's size.
fn field_node(preset: &PatchPreset) -> Node {
    Node {
        position_type: PositionType::Absolute,
        ..preset.node()
    }
}

/// Absolute node at (`left`, `top`), optionally with a fixed width.
fn at(left: f32, top: f32, width: Option<f32>) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(left),
        top: Val::Px(top),
        width: width.map_or(Val::Auto, Val::Px),
        ..default()
    }
}

/// Absolute row at `top` that centers its child horizontally.
fn centered(top: f32, width: f32) -> Node {
    Node {
        justify_content: JustifyContent::Center,
        ..at(0.0, top, Some(width))
    }
}

fn type_name(
    mut keys: MessageReader<KeyboardInput>,
    mut form: ResMut<LoginForm>,
    ws_client: NonSend<WsClient>,
) {
    for input in keys.read() {
        if input.state != ButtonState::Pressed || form.submitted {
            continue;
        }
        if let Some(start) = form.apply_key(&input.logical_key) {
            ws_client.send_message(&ClientMessage::StartGame(start));
        }
    }
}

fn login_buttons(
    skins: Query<(&Interaction, &SkinButton), Changed<Interaction>>,
    play: Query<&Interaction, (Changed<Interaction>, With<PlayButton>)>,
    mut form: ResMut<LoginForm>,
    ws_client: NonSend<WsClient>,
) {
    if form.submitted {
        return;
    }
    for (interaction, button) in &skins {
        if *interaction == Interaction::Pressed {
            form.skin = button.0;
        }
    }
    for interaction in &play {
        if *interaction == Interaction::Pressed
            && let Some(start) = form.submit()
        {
            ws_client.send_message(&ClientMessage::StartGame(start));
        }
    }
}

fn refresh_dialog(
    form: Res<LoginForm>,
    mut name_text: Query<&mut Text, With<NameText>>,
    mut skins: Query<(&SkinButton, &mut BackgroundColor)>,
) {
    if !form.is_changed() {
        return;
    }
    if let Ok(mut text) = name_text.single_mut() {
        **text = if form.submitted {
            format!("{} ...", form.name.trim())
        } else {
            format!("{}_", form.name)
        };
    }
    for (button, mut color) in &mut skins {
        color.0 = if button.0 == form.skin {
            SELECTED_TINT
        } else {
            UNSELECTED_TINT
        };
    }
}

fn cleanup_login(mut commands: Commands, ui_query: Query<Entity, With<LoginUi>>) {
    for entity in &ui_query {
        commands.entity(entity).despawn();
    }
}
