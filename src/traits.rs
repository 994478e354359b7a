use bevy::prelude::*;

/// Extension trait for `Transform` to build camera poses from a position and a look target
pub trait TransformExt {
    /// Places the transform at `position` facing `target`. A straight-down view keeps -Z at
    /// the top of the screen instead of spinning arbitrarily.
    fn from_pose(position: Vec3, target: Vec3) -> Self;
}

impl TransformExt for Transform {
    fn from_pose(position: Vec3, target: Vec3) -> Self {
        let direction = (target - position).normalize_or(Vec3::NEG_Z);
        let up = if direction.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        Self::from_translation(position).looking_to(direction, up)
    }
}

/// Extension trait for the `[u8; 3]` sRGB triples the shelf catalog stores
pub trait Srgb8Ext {
    fn to_color(self) -> Color;
}

impl Srgb8Ext for [u8; 3] {
    fn to_color(self) -> Color { Color::srgb_u8(self[0], self[1], self[2]) }
}
