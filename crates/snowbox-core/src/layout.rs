//! Anchor math for camera-fixed HUD elements.

use glam::Vec2;

/// Nine anchor points of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Fraction of the free space placed before the object on each axis.
    fn factors(self) -> Vec2 {
        let x = match self {
            Self::TopLeft | Self::LeftCenter | Self::BottomLeft => 0.0,
            Self::TopCenter | Self::Center | Self::BottomCenter => 0.5,
            Self::TopRight | Self::RightCenter | Self::BottomRight => 1.0,
        };
        let y = match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => 0.0,
            Self::LeftCenter | Self::Center | Self::RightCenter => 0.5,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => 1.0,
        };
        Vec2::new(x, y)
    }
}

/// Position of an object of size `object` inside a container of size
/// `container`.
///
/// `pivot` is the object's own anchor (0..1 on each axis): the result is
/// where that pivot point lands, so a centered pivot shifts the result by
/// half the object size. `offset` is added last.
pub fn align_in(container: Vec2, object: Vec2, anchor: Anchor, pivot: Vec2, offset: Vec2) -> Vec2 {
    (container - object) * anchor.factors() + object * pivot + offset
}

/// Vertical positions of a stack of rows starting at `start`, each row
/// `gap` below the previous row's bottom.
pub fn stack_offsets(start: f32, heights: impl IntoIterator<Item = f32>, gap: f32) -> Vec<f32> {
    let mut y = start;
    heights
        .into_iter()
        .map(|h| {
            let at = y;
            y += h + gap;
            at
        })
        .collect()
}

/// Horizontal positions of `count` items of `item_width`, spaced
/// `spacing * item_width` apart, with the row centered in `container_width`.
pub fn centered_row(container_width: f32, item_width: f32, count: usize, spacing: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = item_width * spacing;
    let row_width = step * (count - 1) as f32 + item_width;
    let shift = (container_width - row_width) / 2.0;
    (0..count).map(|i| shift + step * i as f32).collect()
}

/// Alpha of ammo icon `index` when `count` snowballs remain.
pub fn ammo_alpha(index: usize, count: u32) -> f32 {
    if index as u64 >= u64::from(count) {
        0.2
    } else {
        1.0
    }
}
