//! The fixed shelf catalog of the baseline (Small) store.
//!
//! Positions are anchored to the store walls or center so the same catalog lays out in any
//! footprint: x resolves against store depth, z against store width.

use bevy::prelude::*;
use strum::EnumIter;

use super::tier::StoreDimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShelfKind {
    Wall,
    Gondola,
    Refrigerator,
    Checkout,
}

impl ShelfKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wall => "parede",
            Self::Gondola => "gondola",
            Self::Refrigerator => "geladeira",
            Self::Checkout => "caixa",
        }
    }
}

#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Cosmetics,
    Hygiene,
    Nutrition,
    Health,
    Kids,
    Promotions,
    Services,
    Refrigerated,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cosmetics => "Cosméticos",
            Self::Hygiene => "Higiene",
            Self::Nutrition => "Nutrição",
            Self::Health => "Saúde",
            Self::Kids => "Infantil",
            Self::Promotions => "Promoções",
            Self::Services => "Serviços",
            Self::Refrigerated => "Refrig.",
        }
    }
}

/// Display-time subset of the layout. Never affects placement or ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == category,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Todas",
            Self::Only(category) => category.label(),
        }
    }

    /// All → first category → ... → last category → All
    pub fn next(self) -> Self {
        use strum::IntoEnumIterator;

        match self {
            Self::All => Category::iter().next().map_or(Self::All, Self::Only),
            Self::Only(current) => Category::iter()
                .skip_while(|category| *category != current)
                .nth(1)
                .map_or(Self::All, Self::Only),
        }
    }
}

/// One coordinate expressed relative to a store extent: `fraction * extent + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAnchor {
    pub fraction: f32,
    pub offset:   f32,
}

impl AxisAnchor {
    pub const fn new(fraction: f32, offset: f32) -> Self { Self { fraction, offset } }

    pub const fn center() -> Self { Self::new(0.0, 0.0) }

    pub fn resolve(self, extent: f32) -> f32 { self.fraction.mul_add(extent, self.offset) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationRule {
    Fixed,
    /// Quarter turn unless the store is wide
    QuarterTurnUnlessWide,
}

impl RotationRule {
    pub fn degrees(self, dimensions: StoreDimensions) -> f32 {
        match self {
            Self::Fixed => 0.0,
            Self::QuarterTurnUnlessWide if dimensions.is_wide() => 0.0,
            Self::QuarterTurnUnlessWide => 90.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfSpec {
    pub id:        u32,
    pub anchor_x:  AxisAnchor,
    pub anchor_z:  AxisAnchor,
    /// (length, height, depth) for the 60 m² reference store
    pub base_size: Vec3,
    pub category:  Category,
    pub kind:      ShelfKind,
    pub rotation:  RotationRule,
    pub label:     &'static str,
    pub color:     [u8; 3],
}

impl ShelfSpec {
    pub fn base_position(&self, dimensions: StoreDimensions) -> Vec2 {
        Vec2::new(
            self.anchor_x.resolve(dimensions.depth),
            self.anchor_z.resolve(dimensions.width),
        )
    }
}

const WALL_SIZE: Vec3 = Vec3::new(1.8, 1.2, 0.3);
const GONDOLA_SIZE: Vec3 = Vec3::new(1.8, 1.2, 0.4);

const fn wall(
    id: u32,
    anchor_x: AxisAnchor,
    anchor_z: AxisAnchor,
    category: Category,
    label: &'static str,
    color: [u8; 3],
) -> ShelfSpec {
    ShelfSpec {
        id,
        anchor_x,
        anchor_z,
        base_size: WALL_SIZE,
        category,
        kind: ShelfKind::Wall,
        rotation: RotationRule::Fixed,
        label,
        color,
    }
}

const fn gondola(
    id: u32,
    anchor_x: AxisAnchor,
    anchor_z: AxisAnchor,
    category: Category,
    label: &'static str,
    color: [u8; 3],
) -> ShelfSpec {
    ShelfSpec {
        id,
        anchor_x,
        anchor_z,
        base_size: GONDOLA_SIZE,
        category,
        kind: ShelfKind::Gondola,
        rotation: RotationRule::Fixed,
        label,
        color,
    }
}

const fn turned(spec: ShelfSpec) -> ShelfSpec {
    ShelfSpec {
        rotation: RotationRule::QuarterTurnUnlessWide,
        ..spec
    }
}

const BACK_WALL: AxisAnchor = AxisAnchor::new(-0.5, 0.2);
const FRONT_WALL: AxisAnchor = AxisAnchor::new(0.5, -0.2);
const LEFT_ROW: AxisAnchor = AxisAnchor::new(-0.25, 0.0);
const RIGHT_ROW: AxisAnchor = AxisAnchor::new(0.25, 0.0);
const NEAR_LANE: AxisAnchor = AxisAnchor::new(-0.25, 0.0);
const FAR_LANE: AxisAnchor = AxisAnchor::new(0.25, 0.0);
const MIDDLE: AxisAnchor = AxisAnchor::center();

pub const CATALOG: [ShelfSpec; 17] = [
    // back wall
    wall(1, AxisAnchor::new(-0.5, 0.9), BACK_WALL, Category::Cosmetics, "DERMOCOSMÉTICOS", [0xe3, 0xf2, 0xfd]),
    wall(2, AxisAnchor::new(-0.5, 2.7), BACK_WALL, Category::Cosmetics, "PROTEÇÃO SOLAR", [0xbb, 0xde, 0xfb]),
    wall(3, AxisAnchor::new(-0.5, 4.5), BACK_WALL, Category::Cosmetics, "CABELOS", [0x90, 0xca, 0xf9]),
    // left gondola row
    turned(gondola(6, LEFT_ROW, NEAR_LANE, Category::Hygiene, "HIGIENE ÍNTIMA", [0xf3, 0xe5, 0xf5])),
    turned(gondola(7, LEFT_ROW, MIDDLE, Category::Hygiene, "SABONETES", [0xe1, 0xbe, 0xe7])),
    turned(gondola(8, LEFT_ROW, FAR_LANE, Category::Hygiene, "PÉS/CUTELARIA", [0xce, 0x93, 0xd8])),
    // center row
    gondola(10, MIDDLE, NEAR_LANE, Category::Nutrition, "NUTRIÇÃO ESPORTIVA", [0xe8, 0xf5, 0xe9]),
    gondola(11, MIDDLE, MIDDLE, Category::Nutrition, "NUTRIÇÃO ADULTA", [0xc8, 0xe6, 0xc9]),
    gondola(12, MIDDLE, FAR_LANE, Category::Nutrition, "DESODORANTES FEM", [0xa5, 0xd6, 0xa7]),
    // right row
    gondola(15, RIGHT_ROW, NEAR_LANE, Category::Hygiene, "CUIDADO ADULTO", [0xff, 0xf3, 0xe0]),
    gondola(16, RIGHT_ROW, MIDDLE, Category::Health, "PRIMEIROS SOCORROS", [0xff, 0xeb, 0xee]),
    gondola(17, RIGHT_ROW, FAR_LANE, Category::Health, "BANHO E TROCA", [0xff, 0xcd, 0xd2]),
    // wall opposite the entrance
    wall(19, AxisAnchor::new(-0.5, 0.9), FRONT_WALL, Category::Health, "VITAMINAS", [0xe8, 0xea, 0xf6]),
    wall(20, AxisAnchor::new(-0.5, 2.7), FRONT_WALL, Category::Health, "OTC MIP", [0xc5, 0xca, 0xe9]),
    ShelfSpec {
        id:        23,
        anchor_x:  AxisAnchor::new(0.5, -1.2),
        anchor_z:  MIDDLE,
        base_size: Vec3::new(1.2, 1.6, 0.8),
        category:  Category::Refrigerated,
        kind:      ShelfKind::Refrigerator,
        rotation:  RotationRule::Fixed,
        label:     "GELADEIRA",
        color:     [0xb3, 0xe5, 0xfc],
    },
    // promotions mark the open entrance side
    ShelfSpec {
        id:        24,
        anchor_x:  AxisAnchor::new(-0.5, 0.8),
        anchor_z:  AxisAnchor::new(-0.5, 1.0),
        base_size: Vec3::new(1.3, 0.6, 1.2),
        category:  Category::Promotions,
        kind:      ShelfKind::Gondola,
        rotation:  RotationRule::Fixed,
        label:     "PROMOÇÕES (ENTRADA)",
        color:     [0xa5, 0xd6, 0xa7],
    },
    ShelfSpec {
        id:        26,
        anchor_x:  AxisAnchor::new(-0.5, 1.2),
        anchor_z:  AxisAnchor::new(-0.5, 2.4),
        base_size: Vec3::new(1.6, 1.2, 1.4),
        category:  Category::Services,
        kind:      ShelfKind::Checkout,
        rotation:  RotationRule::Fixed,
        label:     "CAIXA",
        color:     [0xee, 0xee, 0xee],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<u32> = CATALOG.iter().map(|spec| spec.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn anchors_resolve_against_store_extents() {
        let dimensions = StoreDimensions::new(6.0, 10.0);
        let dermo = CATALOG[0].base_position(dimensions);
        assert!((dermo.x - -4.1).abs() < 1e-5);
        assert!((dermo.y - -2.8).abs() < 1e-5);

        let fridge = CATALOG
            .iter()
            .find(|spec| spec.id == 23)
            .map(|spec| spec.base_position(dimensions))
            .unwrap_or(Vec2::NAN);
        assert!(fridge.abs_diff_eq(Vec2::new(3.8, 0.0), 1e-5));
    }

    #[test]
    fn left_row_turns_only_in_narrow_stores() {
        let rule = RotationRule::QuarterTurnUnlessWide;
        assert!((rule.degrees(StoreDimensions::new(6.0, 10.0)) - 90.0).abs() < f32::EPSILON);
        assert!(rule.degrees(StoreDimensions::new(12.0, 5.0)).abs() < f32::EPSILON);
        assert!(RotationRule::Fixed.degrees(StoreDimensions::new(6.0, 10.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn category_filter_cycles_back_to_all() {
        let mut filter = CategoryFilter::All;
        let mut seen = 0;
        loop {
            filter = filter.next();
            if filter == CategoryFilter::All {
                break;
            }
            seen += 1;
        }
        assert_eq!(seen, 8);
    }

    #[test]
    fn category_filter_admits_matching_category_only() {
        assert!(CategoryFilter::All.admits(Category::Health));
        assert!(CategoryFilter::Only(Category::Health).admits(Category::Health));
        assert!(!CategoryFilter::Only(Category::Health).admits(Category::Services));
    }
}
