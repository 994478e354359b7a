use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;

use super::catalog::CATALOG;
use super::catalog::Category;
use super::catalog::CategoryFilter;
use super::catalog::ShelfKind;
use super::catalog::ShelfSpec;
use super::constants::LAYOUT_MAX_DEPTH_FLOOR;
use super::constants::LAYOUT_MAX_DEPTH_FRACTION;
use super::constants::LAYOUT_MAX_HEIGHT;
use super::constants::LAYOUT_MAX_LENGTH_FLOOR;
use super::constants::LAYOUT_MAX_LENGTH_FRACTION;
use super::constants::LAYOUT_MIN_DEPTH;
use super::constants::LAYOUT_MIN_HEIGHT;
use super::constants::LAYOUT_MIN_LENGTH;
use super::constants::LAYOUT_REFERENCE_AREA;
use super::constants::LAYOUT_WALL_MARGIN;
use super::constants::OVERLAP_CLEARANCE;
use super::constants::OVERLAP_PUSH_STEP;
use super::constants::OVERLAP_TOLERANCE;
use super::overlap::OverlapResolver;
use super::overlap::SinglePassNudge;
use super::tier::DimensionBounds;
use super::tier::StoreDimensions;
use super::tier::StoreTier;
use super::tier::clamp_lower_wins;

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct LayoutConfig {
    #[inspector(min = 10.0, max = 200.0, display = NumberDisplay::Slider)]
    pub reference_area:      f32,
    #[inspector(min = 0.1, max = 2.0, display = NumberDisplay::Slider)]
    pub min_length:          f32,
    #[inspector(min = 0.1, max = 1.0, display = NumberDisplay::Slider)]
    pub max_length_fraction: f32,
    pub max_length_floor:    f32,
    #[inspector(min = 0.1, max = 2.0, display = NumberDisplay::Slider)]
    pub min_height:          f32,
    #[inspector(min = 0.5, max = 5.0, display = NumberDisplay::Slider)]
    pub max_height:          f32,
    #[inspector(min = 0.05, max = 1.0, display = NumberDisplay::Slider)]
    pub min_depth:           f32,
    #[inspector(min = 0.1, max = 1.0, display = NumberDisplay::Slider)]
    pub max_depth_fraction:  f32,
    pub max_depth_floor:     f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub clearance:           f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub push_step:           f32,
    #[inspector(min = 0.0, max = 0.5, display = NumberDisplay::Slider)]
    pub wall_margin:         f32,
    /// Per-axis penetration below which two footprints only touch
    pub overlap_tolerance:   f32,
    pub dimension_bounds:    DimensionBounds,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reference_area:      LAYOUT_REFERENCE_AREA,
            min_length:          LAYOUT_MIN_LENGTH,
            max_length_fraction: LAYOUT_MAX_LENGTH_FRACTION,
            max_length_floor:    LAYOUT_MAX_LENGTH_FLOOR,
            min_height:          LAYOUT_MIN_HEIGHT,
            max_height:          LAYOUT_MAX_HEIGHT,
            min_depth:           LAYOUT_MIN_DEPTH,
            max_depth_fraction:  LAYOUT_MAX_DEPTH_FRACTION,
            max_depth_floor:     LAYOUT_MAX_DEPTH_FLOOR,
            clearance:           OVERLAP_CLEARANCE,
            push_step:           OVERLAP_PUSH_STEP,
            wall_margin:         LAYOUT_WALL_MARGIN,
            overlap_tolerance:   OVERLAP_TOLERANCE,
            dimension_bounds:    DimensionBounds::default(),
        }
    }
}

impl LayoutConfig {
    /// Uniform growth factor of the catalog for a store of this size
    pub fn scale_for(&self, dimensions: StoreDimensions) -> f32 {
        (dimensions.area() / self.reference_area).sqrt()
    }

    /// Per-axis (length, height, depth) upper bounds for a store of this size
    pub fn max_size(&self, dimensions: StoreDimensions) -> Vec3 {
        Vec3::new(
            self.max_length_floor
                .max(dimensions.depth * self.max_length_fraction),
            self.max_height,
            self.max_depth_floor
                .max(dimensions.width * self.max_depth_fraction),
        )
    }

    pub const fn min_size(&self) -> Vec3 {
        Vec3::new(self.min_length, self.min_height, self.min_depth)
    }
}

/// The rectangle shelves (or the walking camera) must stay inside, centered on the origin.
/// `half_extents.x` runs along store depth, `half_extents.y` along store width (world z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interior {
    pub half_extents: Vec2,
}

impl Interior {
    pub fn new(dimensions: StoreDimensions, margin: f32) -> Self {
        Self {
            half_extents: Vec2::new(
                dimensions.depth / 2.0 - margin,
                dimensions.width / 2.0 - margin,
            ),
        }
    }

    /// Largest footprint that still fits
    pub fn max_footprint(&self) -> Vec2 { (self.half_extents * 2.0).max(Vec2::ZERO) }

    /// Moves `center` the least amount so a footprint of `footprint` lies inside.
    pub fn clamp_footprint(&self, center: Vec2, footprint: Vec2) -> Vec2 {
        let limit = self.half_extents - footprint / 2.0;
        Vec2::new(
            clamp_lower_wins(center.x, -limit.x, limit.x),
            clamp_lower_wins(center.y, -limit.y, limit.y),
        )
    }

    #[cfg(test)]
    pub fn contains_footprint(&self, center: Vec2, footprint: Vec2, epsilon: f32) -> bool {
        let reach = center.abs() + footprint / 2.0;
        reach.x <= self.half_extents.x + epsilon && reach.y <= self.half_extents.y + epsilon
    }
}

/// A catalog shelf after scaling, overlap resolution, tier spread and the final clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedShelf {
    pub id:               u32,
    /// Center of the footprint on the floor: (x, z)
    pub position:         Vec2,
    /// (length, height, depth)
    pub size:             Vec3,
    pub rotation_degrees: f32,
    pub label:            &'static str,
    pub category:         Category,
    pub kind:             ShelfKind,
    pub color:            [u8; 3],
}

impl PlacedShelf {
    fn from_spec(spec: &ShelfSpec, dimensions: StoreDimensions, size: Vec3) -> Self {
        Self {
            id: spec.id,
            position: spec.base_position(dimensions),
            size,
            rotation_degrees: spec.rotation.degrees(dimensions),
            label: spec.label,
            category: spec.category,
            kind: spec.kind,
            color: spec.color,
        }
    }

    /// Horizontal extent (length × depth), ignoring height and rotation
    pub const fn footprint(&self) -> Vec2 { Vec2::new(self.size.x, self.size.z) }

    pub const fn height(&self) -> f32 { self.size.y }

    /// World-space center of the shelf body
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.position.x, self.size.y / 2.0, self.position.y)
    }

    /// How far two footprints reach into each other per axis; negative means a gap
    pub fn penetration(&self, other: &Self) -> Vec2 {
        (self.footprint() + other.footprint()) / 2.0 - (self.position - other.position).abs()
    }
}

/// Shelf placements for one `(dimensions, tier)` pair, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub dimensions: StoreDimensions,
    pub tier:       StoreTier,
    shelves:        Vec<PlacedShelf>,
}

impl Layout {
    pub fn shelves(&self) -> &[PlacedShelf] { &self.shelves }

    pub fn shelf(&self, id: u32) -> Option<&PlacedShelf> {
        self.shelves.iter().find(|shelf| shelf.id == id)
    }

    pub fn visible(&self, filter: CategoryFilter) -> impl Iterator<Item = &PlacedShelf> {
        self.shelves
            .iter()
            .filter(move |shelf| filter.admits(shelf.category))
    }
}

/// Scales a base size to the store and clamps each axis into its configured range.
pub fn scale_size(base_size: Vec3, dimensions: StoreDimensions, config: &LayoutConfig) -> Vec3 {
    let scaled = base_size * config.scale_for(dimensions);
    let min = config.min_size();
    let max = config.max_size(dimensions);
    Vec3::new(
        clamp_lower_wins(scaled.x, min.x, max.x),
        clamp_lower_wins(scaled.y, min.y, max.y),
        clamp_lower_wins(scaled.z, min.z, max.z),
    )
}

pub fn compute_layout(
    dimensions: StoreDimensions,
    tier: StoreTier,
    config: &LayoutConfig,
) -> Layout {
    compute_layout_with(&SinglePassNudge::from(config), dimensions, tier, config)
}

/// Lays out the catalog with a caller-chosen overlap resolver. Never fails; every step
/// only clamps.
pub fn compute_layout_with(
    resolver: &impl OverlapResolver,
    dimensions: StoreDimensions,
    tier: StoreTier,
    config: &LayoutConfig,
) -> Layout {
    let interior = Interior::new(dimensions, config.wall_margin);

    let mut shelves: Vec<PlacedShelf> = CATALOG
        .iter()
        .map(|spec| {
            PlacedShelf::from_spec(spec, dimensions, scale_size(spec.base_size, dimensions, config))
        })
        .collect();

    resolver.resolve(&mut shelves, &interior);

    let spread = tier.position_spread();
    let growth = tier.size_growth();
    for shelf in &mut shelves {
        shelf.id += tier.id_offset();
        shelf.position *= spread;
        shelf.size *= growth;
    }

    // final clamp has the last word on legality
    let max_footprint = interior.max_footprint();
    for shelf in &mut shelves {
        shelf.size.x = shelf.size.x.min(max_footprint.x);
        shelf.size.z = shelf.size.z.min(max_footprint.y);
        shelf.position = interior.clamp_footprint(shelf.position, shelf.footprint());
    }

    debug!(
        "layout {:?} {:.2}x{:.2}: {} shelves, {} residual overlaps",
        tier,
        dimensions.width,
        dimensions.depth,
        shelves.len(),
        overlapping_pairs(&shelves, config.overlap_tolerance).len()
    );

    Layout {
        dimensions,
        tier,
        shelves,
    }
}

/// Id pairs whose footprints reach into each other by more than `tolerance` on both axes.
pub fn overlapping_pairs(shelves: &[PlacedShelf], tolerance: f32) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for (index, first) in shelves.iter().enumerate() {
        for second in &shelves[index + 1..] {
            let penetration = first.penetration(second);
            if penetration.x > tolerance && penetration.y > tolerance {
                pairs.push((first.id, second.id));
            }
        }
    }
    pairs
}
