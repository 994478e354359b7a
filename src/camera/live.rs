use bevy::prelude::*;

use super::config::CameraConfig;
use super::constants::CAMERA_MAX_WALK_PITCH;
use super::constants::CAMERA_OVERVIEW_POSITION;
use super::constants::CAMERA_OVERVIEW_TARGET;
use super::constants::CAMERA_REFERENCE_FPS;
use super::view::CameraView;
use super::view::NavigationMode;
use super::view::ViewMode;
use crate::store::Interior;

/// The pose the rendered camera actually has this frame.
/// Written only by the frame step (easing, manual input, walk clamp) and by hard resets.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LiveCamera {
    pub position:    Vec3,
    pub look_target: Vec3,
}

impl Default for LiveCamera {
    fn default() -> Self {
        Self {
            position:    CAMERA_OVERVIEW_POSITION,
            look_target: CAMERA_OVERVIEW_TARGET,
        }
    }
}

impl LiveCamera {
    pub const fn snapped_to(view: &CameraView) -> Self {
        Self {
            position:    view.desired_position,
            look_target: view.desired_target,
        }
    }

    /// The larger of the position and look-target gaps to `view`
    pub fn distance_to(&self, view: &CameraView) -> f32 {
        self.position
            .distance(view.desired_position)
            .max(self.look_target.distance(view.desired_target))
    }
}

/// Converts a per-frame rate tuned at the reference frame rate into a factor for `delta_secs`.
/// At exactly the reference rate this returns `rate`.
pub fn ease_factor(rate: f32, delta_secs: f32) -> f32 {
    let rate = rate.clamp(0.0, 1.0);
    1.0 - (1.0 - rate).powf(delta_secs.max(0.0) * CAMERA_REFERENCE_FPS)
}

/// One easing step of the live camera toward the target pose.
///
/// With the auto-return lock on, the overview leaves the position to manual control. The
/// orbit pivot still drifts back to the overview target; a walking camera is left alone.
pub fn ease_toward(
    live: LiveCamera,
    view: &CameraView,
    navigation: NavigationMode,
    lock_auto_return: bool,
    config: &CameraConfig,
    delta_secs: f32,
) -> LiveCamera {
    let (position_rate, look_rate) = match (view.mode, lock_auto_return, navigation) {
        (ViewMode::ShelfFocus { .. }, ..) => (config.focus_position_rate, config.focus_look_rate),
        (ViewMode::Overview, false, _) => {
            (config.overview_position_rate, config.overview_look_rate)
        },
        (ViewMode::Overview, true, NavigationMode::Orbit) => (0.0, config.overview_look_rate),
        (ViewMode::Overview, true, NavigationMode::Walk) => return live,
    };

    LiveCamera {
        position:    live
            .position
            .lerp(view.desired_position, ease_factor(position_rate, delta_secs)),
        look_target: live
            .look_target
            .lerp(view.desired_target, ease_factor(look_rate, delta_secs)),
    }
}

/// Drops the camera to eye height and levels its gaze, keeping the heading.
/// A camera looking straight down faces -z.
pub fn at_eye_height(live: LiveCamera, eye_height: f32) -> LiveCamera {
    let heading = (live.look_target - live.position)
        .xz()
        .try_normalize()
        .unwrap_or(Vec2::NEG_Y);
    let position = live.position.with_y(eye_height);
    LiveCamera {
        position,
        look_target: position + Vec3::new(heading.x, 0.0, heading.y),
    }
}

/// Keeps the camera's floor position inside `bounds`, leaving its height alone.
/// The look target moves by the same correction so the heading is unchanged.
pub fn clamp_to_walk_bounds(live: LiveCamera, bounds: &Interior) -> LiveCamera {
    let floor = bounds.clamp_footprint(live.position.xz(), Vec2::ZERO);
    let correction = Vec3::new(floor.x - live.position.x, 0.0, floor.y - live.position.z);
    LiveCamera {
        position:    live.position + correction,
        look_target: live.look_target + correction,
    }
}

/// First-person step: `look` turns the head, `movement` walks on the floor plane
/// (x strafes right, y walks forward). Height never changes.
pub fn walk(
    live: LiveCamera,
    movement: Vec2,
    look: Vec2,
    delta_secs: f32,
    config: &CameraConfig,
) -> LiveCamera {
    let gaze = live.look_target - live.position;
    let reach = gaze.length().max(1.0);
    let direction = gaze.normalize_or(Vec3::NEG_Z);

    let yaw = direction.x.atan2(-direction.z) + look.x * config.look_sensitivity;
    let pitch = (direction.y.clamp(-1.0, 1.0).asin() - look.y * config.look_sensitivity)
        .clamp(-CAMERA_MAX_WALK_PITCH, CAMERA_MAX_WALK_PITCH);

    let direction = Vec3::new(yaw.sin() * pitch.cos(), pitch.sin(), -yaw.cos() * pitch.cos());
    let forward = Vec3::new(yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, yaw.sin());
    let step = (forward * movement.y + right * movement.x) * config.walk_speed * delta_secs;

    let position = live.position + step;
    LiveCamera {
        position,
        look_target: position + direction * reach,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LayoutConfig;
    use crate::store::StoreDimensions;
    use crate::store::StoreTier;
    use crate::store::compute_layout;

    const FRAME: f32 = 1.0 / 60.0;

    fn shelf_view(id: u32) -> CameraView {
        let layout = compute_layout(
            StoreTier::Small.default_dimensions(),
            StoreTier::Small,
            &LayoutConfig::default(),
        );
        let Some(shelf) = layout.shelf(id) else {
            panic!("shelf {id} missing from the default layout");
        };
        CameraView::focus(shelf, &CameraConfig::default())
    }

    #[test]
    fn ease_factor_matches_rate_at_reference_frame_rate() {
        assert!((ease_factor(0.07, FRAME) - 0.07).abs() < 1e-5);
        assert!(ease_factor(0.07, 0.0).abs() < f32::EPSILON);
        // two half frames cover the same ground as one full frame
        let half = ease_factor(0.07, FRAME / 2.0);
        assert!(((1.0 - half) * (1.0 - half) - 0.93).abs() < 1e-5);
    }

    #[test]
    fn focus_easing_converges_monotonically() {
        let config = CameraConfig::default();
        let view = shelf_view(11);
        let mut live = LiveCamera::default();
        let mut previous = live.distance_to(&view);

        let mut ticks = 0;
        while previous >= 1e-3 {
            live = ease_toward(live, &view, NavigationMode::Orbit, true, &config, FRAME);
            let distance = live.distance_to(&view);
            assert!(distance < previous, "stalled at tick {ticks}: {distance}");
            previous = distance;
            ticks += 1;
            assert!(ticks <= 300, "still {distance} away after 300 ticks");
        }
    }

    #[test]
    fn locked_overview_holds_position_but_recenters_the_pivot() {
        let config = CameraConfig::default();
        let view = CameraView::overview(&config);
        let live = LiveCamera {
            position:    Vec3::new(4.0, 6.0, 2.0),
            look_target: Vec3::new(1.0, 0.0, 1.0),
        };

        let locked = ease_toward(live, &view, NavigationMode::Orbit, true, &config, FRAME);
        assert_eq!(locked.position, live.position);
        assert!(locked.look_target.length() < live.look_target.length());

        let walking = ease_toward(live, &view, NavigationMode::Walk, true, &config, FRAME);
        assert_eq!(walking, live);

        let unlocked = ease_toward(live, &view, NavigationMode::Orbit, false, &config, FRAME);
        assert!(unlocked.distance_to(&view) < live.distance_to(&view));
    }

    #[test]
    fn back_to_overview_after_a_focus_turns_toward_the_store_center() {
        let config = CameraConfig::default();
        let focus = shelf_view(11);
        let mut live = LiveCamera::default();
        for _ in 0..300 {
            live = ease_toward(live, &focus, NavigationMode::Orbit, true, &config, FRAME);
        }
        assert!(live.distance_to(&focus) < 1e-3);

        let overview = CameraView::overview(&config);
        let framed = live;
        for _ in 0..60 {
            live = ease_toward(live, &overview, NavigationMode::Orbit, true, &config, FRAME);
        }
        assert_eq!(live.position, framed.position);
        assert!(live.look_target.distance(overview.desired_target) < 0.01);
    }

    #[test]
    fn overview_eases_position_slower_than_look() {
        let config = CameraConfig::default();
        let view = CameraView::overview(&config);
        let live = LiveCamera {
            position:    view.desired_position + Vec3::X * 10.0,
            look_target: view.desired_target + Vec3::X * 10.0,
        };
        let next = ease_toward(live, &view, NavigationMode::Orbit, false, &config, FRAME);
        assert!((next.position.x - 9.5).abs() < 1e-4);
        assert!((next.look_target.x - 8.8).abs() < 1e-4);
    }

    #[test]
    fn walking_starts_at_eye_height_facing_the_same_way() {
        let live = LiveCamera {
            position:    Vec3::new(2.0, 9.0, 6.0),
            look_target: Vec3::new(2.0, 0.0, 0.0),
        };
        let walker = at_eye_height(live, 1.7);
        assert!(walker.position.abs_diff_eq(Vec3::new(2.0, 1.7, 6.0), 1e-6));
        assert!(walker.look_target.abs_diff_eq(Vec3::new(2.0, 1.7, 5.0), 1e-6));

        // straight down has no heading of its own
        let overhead = at_eye_height(LiveCamera::default(), 1.7);
        assert!(overhead.position.abs_diff_eq(Vec3::new(0.0, 1.7, 0.0), 1e-6));
        assert!(overhead.look_target.abs_diff_eq(Vec3::new(0.0, 1.7, -1.0), 1e-6));
    }

    #[test]
    fn walk_clamp_keeps_height_and_heading() {
        let bounds = Interior::new(StoreDimensions::new(6.0, 10.0), 0.2);
        let live = LiveCamera {
            position:    Vec3::new(8.0, 1.7, -5.0),
            look_target: Vec3::new(9.0, 1.5, -5.0),
        };
        let clamped = clamp_to_walk_bounds(live, &bounds);
        assert!(clamped.position.abs_diff_eq(Vec3::new(4.8, 1.7, -2.8), 1e-5));
        assert!(
            (clamped.look_target - clamped.position).abs_diff_eq(live.look_target - live.position, 1e-5)
        );
    }

    #[test]
    fn arbitrary_walking_never_leaves_the_store() {
        let config = CameraConfig::default();
        let dimensions = StoreDimensions::new(6.0, 10.0);
        let bounds = Interior::new(dimensions, config.walk_margin);
        let mut live = LiveCamera {
            position:    Vec3::new(0.0, 1.7, 0.0),
            look_target: Vec3::new(0.0, 1.7, -1.0),
        };

        for tick in 0..600_u16 {
            let phase = f32::from(tick) * 0.37;
            let movement = Vec2::new(phase.sin(), phase.cos().signum());
            let look = Vec2::new(phase.cos() * 40.0, (phase * 0.5).sin() * 10.0);
            live = walk(live, movement, look, 0.1, &config);
            live = clamp_to_walk_bounds(live, &bounds);

            assert!(live.position.x.abs() <= 4.8 + 1e-5, "x escaped at tick {tick}");
            assert!(live.position.z.abs() <= 2.8 + 1e-5, "z escaped at tick {tick}");
            assert!((live.position.y - 1.7).abs() < 1e-4);
        }
    }

    #[test]
    fn walking_forward_follows_the_gaze() {
        let config = CameraConfig::default();
        let live = LiveCamera {
            position:    Vec3::new(0.0, 1.7, 0.0),
            look_target: Vec3::new(2.0, 1.7, 0.0),
        };
        let moved = walk(live, Vec2::Y, Vec2::ZERO, 0.5, &config);
        assert!(moved.position.abs_diff_eq(Vec3::new(2.0, 1.7, 0.0), 1e-4));
        assert!(moved.look_target.abs_diff_eq(Vec3::new(4.0, 1.7, 0.0), 1e-4));
    }
}
