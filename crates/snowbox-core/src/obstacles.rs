//! Tree obstacles: trunk bodies players bump into, canopies that fade out
//! when someone walks behind them, and depth slots between trees.

use glam::Vec2;

use crate::geometry::Aabb;
use crate::net::messages::{TreeInfo, TreeKind};

/// A player is drawn in front of a tree once its bottom edge is within this
/// many pixels of the tree's bottom.
pub const DEPTH_MARGIN: f32 = 40.0;

/// Alpha of a tree whose canopy hides a player.
pub const HIDDEN_TREE_ALPHA: f32 = 0.4;

/// Trunk and canopy placement inside the tree image, as fractions of the
/// image size.
#[derive(Debug, Clone, Copy)]
struct Proportions {
    trunk_size: Vec2,
    /// Bottom of the trunk measured from the top of the image.
    trunk_bottom: f32,
    head_size: Vec2,
    head_top: f32,
}

impl Proportions {
    fn for_kind(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Regular => Self {
                trunk_size: Vec2::new(0.2, 0.12),
                trunk_bottom: 0.95,
                head_size: Vec2::new(0.9, 0.7),
                head_top: 0.05,
            },
            TreeKind::Pine => Self {
                trunk_size: Vec2::new(0.16, 0.1),
                trunk_bottom: 0.96,
                head_size: Vec2::new(0.8, 0.75),
                head_top: 0.04,
            },
        }
    }
}

/// World-space geometry of one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeLayout {
    pub kind: TreeKind,
    /// The whole image.
    pub sprite: Aabb,
    /// Immovable body.
    pub trunk: Aabb,
    /// Overlap zone that triggers transparency.
    pub head: Aabb,
}

impl TreeLayout {
    /// Lay out a tree so that its trunk is centered on the server position.
    pub fn place(info: &TreeInfo) -> Self {
        let size = Vec2::new(info.width, info.height);
        let p = Proportions::for_kind(info.kind);

        let trunk_size = size * p.trunk_size;
        let trunk_local = Aabb::from_min_size(
            Vec2::new(
                (size.x - trunk_size.x) / 2.0,
                size.y * p.trunk_bottom - trunk_size.y,
            ),
            trunk_size,
        );
        let head_size = size * p.head_size;
        let head_local = Aabb::from_min_size(
            Vec2::new((size.x - head_size.x) / 2.0, size.y * p.head_top),
            head_size,
        );

        let origin = Vec2::new(info.x, info.y) - trunk_local.center();
        Self {
            kind: info.kind,
            sprite: Aabb::from_min_size(origin, size),
            trunk: trunk_local.translate(origin),
            head: head_local.translate(origin),
        }
    }

    pub fn bottom(&self) -> f32 {
        self.sprite.bottom()
    }
}

/// Order trees by server `y`, back to front.
pub fn sort_trees(trees: &mut [TreeInfo]) {
    trees.sort_by(|a, b| a.y.total_cmp(&b.y));
}

/// Number of trees (sorted back to front) a sprite with bottom edge
/// `bottom` is drawn in front of.
pub fn depth_slot(bottom: f32, tree_bottoms: impl IntoIterator<Item = f32>) -> usize {
    let mut slot = 0;
    for tree_bottom in tree_bottoms {
        if bottom < tree_bottom - DEPTH_MARGIN {
            break;
        }
        slot += 1;
    }
    slot
}

/// Draw depth for a player in `slot`: between tree `slot - 1` and tree
/// `slot`.
pub fn player_depth(slot: usize) -> f32 {
    2.0 * slot as f32 + 0.5
}

pub fn tree_depth(index: usize) -> f32 {
    2.0 * index as f32 + 1.5
}
