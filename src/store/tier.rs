use bevy::prelude::*;
use strum::EnumIter;

use super::constants::STORE_MAX_DEPTH;
use super::constants::STORE_MAX_WIDTH;
use super::constants::STORE_MIN_DEPTH;
use super::constants::STORE_MIN_WIDTH;
use super::constants::STORE_TIGHTEN_FACTOR;
use super::constants::STORE_TIGHTEN_FLOOR;

/// Store footprint in metres. `width` runs along z, `depth` along x.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct StoreDimensions {
    pub width: f32,
    pub depth: f32,
}

impl StoreDimensions {
    pub const fn new(width: f32, depth: f32) -> Self { Self { width, depth } }

    pub fn area(&self) -> f32 { self.width * self.depth }

    /// A store is "wide" when its width exceeds its depth
    pub fn is_wide(&self) -> bool { self.width > self.depth }
}

/// Inclusive bounds enforced on every dimension mutation
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct DimensionBounds {
    pub min_width: f32,
    pub max_width: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for DimensionBounds {
    fn default() -> Self {
        Self {
            min_width: STORE_MIN_WIDTH,
            max_width: STORE_MAX_WIDTH,
            min_depth: STORE_MIN_DEPTH,
            max_depth: STORE_MAX_DEPTH,
        }
    }
}

impl DimensionBounds {
    pub fn clamp(&self, dimensions: StoreDimensions) -> StoreDimensions {
        StoreDimensions {
            width: clamp_lower_wins(dimensions.width, self.min_width, self.max_width),
            depth: clamp_lower_wins(dimensions.depth, self.min_depth, self.max_depth),
        }
    }

    /// Sets the width and derives the depth that keeps the tier's maximum area
    pub fn with_width(&self, width: f32, max_area: f32) -> StoreDimensions {
        let width = clamp_lower_wins(width, self.min_width, self.max_width);
        let depth = clamp_lower_wins(max_area / width, self.min_depth, self.max_depth);
        StoreDimensions { width, depth }
    }

    /// Sets the depth and derives the width that keeps the tier's maximum area
    pub fn with_depth(&self, depth: f32, max_area: f32) -> StoreDimensions {
        let depth = clamp_lower_wins(depth, self.min_depth, self.max_depth);
        let width = clamp_lower_wins(max_area / depth, self.min_width, self.max_width);
        StoreDimensions { width, depth }
    }

    /// Shrinks both dimensions a little so shelves get pulled together
    pub fn tightened(&self, dimensions: StoreDimensions) -> StoreDimensions {
        self.clamp(StoreDimensions {
            width: (dimensions.width * STORE_TIGHTEN_FACTOR).max(STORE_TIGHTEN_FLOOR),
            depth: (dimensions.depth * STORE_TIGHTEN_FACTOR).max(STORE_TIGHTEN_FLOOR),
        })
    }
}

/// Store size presets. Picking one resets the dimensions to its default footprint.
#[derive(Reflect, EnumIter, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StoreTier {
    #[default]
    Small,
    Medium,
    Large,
}

impl StoreTier {
    pub const fn max_area(self) -> f32 {
        match self {
            Self::Small => 60.0,
            Self::Medium => 99.0,
            Self::Large => 120.0,
        }
    }

    pub const fn default_dimensions(self) -> StoreDimensions {
        match self {
            Self::Small => StoreDimensions::new(6.0, 10.0),
            Self::Medium => StoreDimensions::new(9.0, 11.0),
            Self::Large => StoreDimensions::new(10.0, 12.0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Loja P (Pequena)",
            Self::Medium => "Loja M (Média)",
            Self::Large => "Loja G (Grande)",
        }
    }

    /// Added to every catalog id so shelves of different tiers are distinguishable.
    /// Display/debugging only.
    pub const fn id_offset(self) -> u32 {
        match self {
            Self::Small => 0,
            Self::Medium => 100,
            Self::Large => 200,
        }
    }

    /// Outward stretch of shelf positions (x, z)
    pub const fn position_spread(self) -> Vec2 {
        match self {
            Self::Small => Vec2::ONE,
            Self::Medium => Vec2::new(1.15, 1.15),
            Self::Large => Vec2::new(1.3, 1.25),
        }
    }

    /// Growth of shelf size (length, height, depth)
    pub const fn size_growth(self) -> Vec3 {
        match self {
            Self::Small => Vec3::ONE,
            Self::Medium => Vec3::new(1.05, 1.02, 1.05),
            Self::Large => Vec3::new(1.1, 1.05, 1.08),
        }
    }
}

/// `clamp` that never panics: when `lo > hi` the lower bound wins.
pub fn clamp_lower_wins(value: f32, lo: f32, hi: f32) -> f32 { value.min(hi).max(lo) }
