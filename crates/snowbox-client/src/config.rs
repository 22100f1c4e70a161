use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Client configuration, loaded from JSON at compile time.
/// Colors are stored as `[f32; 3]` (RGB).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ClientConfig {
    pub net: NetConfig,
    pub colors: ColorConfig,
    pub audio: AudioConfig,
    pub hud: HudConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetConfig {
    /// Explicit server URL. When absent the page's own host is used.
    pub server_url: Option<String>,
    pub ws_path: String,
    /// Hostnames that skip the start dialog.
    pub auto_start_hosts: Vec<String>,
    pub auto_start_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub clear: [f32; 3],
    pub local_label: [f32; 3],
    pub enemy_label: [f32; 3],
    pub score_gain: [f32; 3],
    pub score_loss: [f32; 3],
    pub score_stroke: [f32; 3],
    pub border: [f32; 3],
    pub dialog_text: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_volume: f32,
    pub steps_volume: f32,
    pub fade_secs: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub show_fps: bool,
    pub score_font_size: f32,
    pub name_font_size: f32,
    pub popup_font_size: f32,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            ws_path: "/ws".to_string(),
            auto_start_hosts: vec!["localhost".to_string()],
            auto_start_name: "buggy".to_string(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            clear: [0.85, 0.9, 0.95],
            local_label: [0.0, 0.0, 0.816],
            enemy_label: [0.816, 0.0, 0.0],
            score_gain: [0.0, 0.627, 0.0],
            score_loss: [0.753, 0.0, 0.0],
            score_stroke: [0.251, 0.251, 0.251],
            border: [0.2, 0.3, 0.45],
            dialog_text: [0.1, 0.1, 0.1],
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: 0.3,
            steps_volume: 1.0,
            fade_secs: 3.0,
        }
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            show_fps: true,
            score_font_size: 18.0,
            name_font_size: 14.0,
            popup_font_size: 16.0,
        }
    }
}

impl ClientConfig {
    /// Load config from embedded JSON, falling back to defaults.
    pub fn load() -> Self {
        let json = include_str!("../../../web/client_config.json");
        serde_json::from_str(json).unwrap_or_default()
    }

    /// WebSocket URL for a page served from `host` over `protocol`
    /// (`"http:"` or `"https:"`).
    pub fn ws_url(&self, protocol: &str, host: &str) -> String {
        if let Some(url) = &self.net.server_url {
            return url.clone();
        }
        let scheme = if protocol.contains("https") {
            "wss"
        } else {
            "ws"
        };
        format!("{scheme}://{host}{}", self.net.ws_path)
    }

    /// Whether a page on `hostname` starts playing without the dialog.
    pub fn auto_starts(&self, hostname: &str) -> bool {
        self.net.auto_start_hosts.iter().any(|h| h == hostname)
    }
}

/// Convert an RGB [f32; 3] array to a Bevy Color.
pub fn rgb(c: &[f32; 3]) -> Color {
    Color::srgb(c[0], c[1], c[2])
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let config = ClientConfig::load();
        app.insert_resource(ClearColor(rgb(&config.colors.clear)))
            .insert_resource(config);
    }
}
