//! UI panels drawn from 9-patch sources.

use bevy::prelude::*;

/// A 9-patch source paired with the size it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchPreset {
    /// Source pixels on each side that keep their size; the center stretches.
    pub corner: f32,
    pub width: f32,
    pub height: f32,
}

impl PatchPreset {
    /// `panel_blue.png`: 100x100 with a 10 px frame.
    pub fn dialog() -> Self {
        Self {
            corner: 10.0,
            width: 480.0,
            height: 320.0,
        }
    }

    /// `buttonSquare_grey_pressed.png`: 45x45 with a 5 px frame.
    pub fn text_field() -> Self {
        Self {
            corner: 5.0,
            width: 160.0,
            height: 40.0,
        }
    }

    pub fn square_button() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            ..Self::text_field()
        }
    }

    pub fn slicer(&self) -> TextureSlicer {
        TextureSlicer {
            border: BorderRect::all(self.corner),
            center_scale_mode: SliceScaleMode::Stretch,
            sides_scale_mode: SliceScaleMode::Stretch,
            max_corner_scale: 1.0,
        }
    }

    /// `image` drawn sliced across the whole node.
    pub fn image(&self, image: &Handle<Image>) -> ImageNode {
        ImageNode::new(image.clone()).with_mode(NodeImageMode::Sliced(self.slicer()))
    }

    /// Node sized to the preset.
    pub fn node(&self) -> Node {
        Node {
            width: Val::Px(self.width),
            height: Val::Px(self.height),
            ..default()
        }
    }
}
