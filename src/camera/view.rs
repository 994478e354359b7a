//! Target camera pose and the transitions that change it.
//!
//! `CameraView` is where the live camera is heading, not where it is. Only explicit intents
//! change it; the per-frame step in `live.rs` eases the real camera toward it.

use bevy::prelude::*;

use super::config::CameraConfig;
use crate::store::PlacedShelf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Overview,
    ShelfFocus {
        shelf_id: u32,
    },
}

/// Orthogonal to `ViewMode`: which input scheme drives the live camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationMode {
    #[default]
    Orbit,
    Walk,
}

impl NavigationMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Orbit => Self::Walk,
            Self::Walk => Self::Orbit,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Orbit => "aérea",
            Self::Walk => "cliente",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoom {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub mode:             ViewMode,
    pub desired_position: Vec3,
    pub desired_target:   Vec3,
}

impl CameraView {
    pub const fn overview(config: &CameraConfig) -> Self {
        Self {
            mode:             ViewMode::Overview,
            desired_position: config.overview_position,
            desired_target:   config.overview_target,
        }
    }

    /// Frames a shelf from in front of and above it, looking at its vertical midpoint.
    pub fn focus(shelf: &PlacedShelf, config: &CameraConfig) -> Self {
        let standoff = config
            .focus_min_distance
            .max(shelf.size.z * config.focus_depth_factor);
        Self {
            mode:             ViewMode::ShelfFocus { shelf_id: shelf.id },
            desired_position: Vec3::new(
                shelf.position.x,
                shelf.height() + config.focus_height_offset,
                shelf.position.y + standoff,
            ),
            desired_target:   shelf.center(),
        }
    }

    /// Moves only the altitude of the desired position, within the configured limits.
    pub fn zoomed(self, zoom: Zoom, config: &CameraConfig) -> Self {
        let step = match zoom {
            Zoom::In => -config.zoom_step,
            Zoom::Out => config.zoom_step,
        };
        let altitude = (self.desired_position.y + step)
            .min(config.max_altitude)
            .max(config.min_altitude);
        Self {
            desired_position: self.desired_position.with_y(altitude),
            ..self
        }
    }

    pub const fn focused_shelf(&self) -> Option<u32> {
        match self.mode {
            ViewMode::Overview => None,
            ViewMode::ShelfFocus { shelf_id } => Some(shelf_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LayoutConfig;
    use crate::store::StoreTier;
    use crate::store::compute_layout;

    fn adult_nutrition() -> Option<PlacedShelf> {
        let layout = compute_layout(
            StoreTier::Small.default_dimensions(),
            StoreTier::Small,
            &LayoutConfig::default(),
        );
        layout.shelf(11).copied()
    }

    #[test]
    fn focus_looks_at_half_the_shelf_height() {
        let config = CameraConfig::default();
        let Some(shelf) = adult_nutrition() else {
            panic!("shelf 11 missing from the default layout");
        };
        let view = CameraView::focus(&shelf, &config);

        assert_eq!(view.mode, ViewMode::ShelfFocus { shelf_id: 11 });
        assert!((view.desired_target.y - 0.6).abs() < 1e-6);
        assert!(view.desired_target.xz().abs_diff_eq(shelf.position, 1e-6));
    }

    #[test]
    fn focus_stands_behind_and_above_the_shelf() {
        let config = CameraConfig::default();
        let Some(shelf) = adult_nutrition() else {
            panic!("shelf 11 missing from the default layout");
        };
        let view = CameraView::focus(&shelf, &config);

        // depth 0.4 * 1.8 = 0.72 is under the 1.2 minimum standoff
        assert!(view.desired_position.abs_diff_eq(Vec3::new(0.0, 2.6, 1.2), 1e-5));
    }

    #[test]
    fn deep_shelves_push_the_camera_further_back() {
        let config = CameraConfig::default();
        let layout = compute_layout(
            StoreTier::Small.default_dimensions(),
            StoreTier::Small,
            &LayoutConfig::default(),
        );
        let Some(checkout) = layout.shelf(26) else {
            panic!("checkout missing from the default layout");
        };
        let view = CameraView::focus(checkout, &config);
        let standoff = view.desired_position.z - checkout.position.y;
        assert!((standoff - 1.4 * 1.8).abs() < 1e-5);
    }

    #[test]
    fn zoom_only_changes_altitude_within_limits() {
        let config = CameraConfig::default();
        let overview = CameraView::overview(&config);

        let closer = overview.zoomed(Zoom::In, &config);
        assert!((closer.desired_position.y - 15.0).abs() < 1e-6);
        assert_eq!(closer.desired_target, overview.desired_target);
        assert_eq!(closer.mode, ViewMode::Overview);

        let mut view = overview;
        for _ in 0..20 {
            view = view.zoomed(Zoom::In, &config);
        }
        assert!((view.desired_position.y - config.min_altitude).abs() < 1e-6);

        for _ in 0..20 {
            view = view.zoomed(Zoom::Out, &config);
        }
        assert!((view.desired_position.y - config.max_altitude).abs() < 1e-6);
    }

    #[test]
    fn walk_toggle_round_trips() {
        assert_eq!(NavigationMode::Orbit.toggled(), NavigationMode::Walk);
        assert_eq!(NavigationMode::Orbit.toggled().toggled(), NavigationMode::Orbit);
    }
}
