use bevy::prelude::*;

use super::layout::Interior;
use super::layout::LayoutConfig;
use super::layout::PlacedShelf;

/// Separates colliding shelf footprints in place. Implementations may only move shelves
/// and must leave every footprint inside `interior`.
pub trait OverlapResolver {
    fn resolve(&self, shelves: &mut [PlacedShelf], interior: &Interior);
}

/// One pass over all pairs in catalog order. For a colliding pair the later shelf is
/// nudged a fixed step away from the store center on both axes and re-clamped.
/// Residual overlaps after the pass are accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePassNudge {
    pub clearance: f32,
    pub push_step: f32,
}

impl From<&LayoutConfig> for SinglePassNudge {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            clearance: config.clearance,
            push_step: config.push_step,
        }
    }
}

impl SinglePassNudge {
    fn collides(&self, first: &PlacedShelf, second: &PlacedShelf) -> bool {
        let distance = (first.position - second.position).abs();
        let reach = (first.footprint() + second.footprint()) / 2.0 + Vec2::splat(self.clearance);
        distance.x < reach.x && distance.y < reach.y
    }

    /// Outward direction per axis; a shelf exactly on an axis goes negative
    fn push(&self, position: Vec2) -> Vec2 {
        let away = |coordinate: f32| if coordinate > 0.0 { 1.0 } else { -1.0 };
        Vec2::new(away(position.x), away(position.y)) * self.push_step
    }
}

impl OverlapResolver for SinglePassNudge {
    fn resolve(&self, shelves: &mut [PlacedShelf], interior: &Interior) {
        for first_index in 0..shelves.len() {
            let (head, tail) = shelves.split_at_mut(first_index + 1);
            let first = &head[first_index];
            for second in tail.iter_mut() {
                if !self.collides(first, second) {
                    continue;
                }
                let nudged = second.position + self.push(second.position);
                second.position = interior.clamp_footprint(nudged, second.footprint());
                trace!("nudged shelf {} away from {}", second.id, first.id);
            }
        }
    }
}
