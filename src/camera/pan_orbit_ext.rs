use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use super::constants::CAMERA_MAX_ORBIT_PITCH;
use super::constants::CAMERA_MIN_ORBIT_PITCH;
use super::live::LiveCamera;
use super::view::CameraView;

/// Slack on the pitch limits so a clamped pose survives the trip through Cartesian space
const ORBIT_PITCH_TOLERANCE: f32 = 1e-4;

/// A pose in `PanOrbitCamera` terms: yaw around +y measured from +z, pitch up from the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTargets {
    pub focus:  Vec3,
    pub yaw:    f32,
    pub pitch:  f32,
    pub radius: f32,
}

impl OrbitTargets {
    /// `None` when the camera sits on its own look target
    pub fn from_pose(live: LiveCamera) -> Option<Self> {
        let offset = live.position - live.look_target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return None;
        }
        Some(Self {
            focus: live.look_target,
            yaw: offset.x.atan2(offset.z),
            pitch: offset.y.atan2(offset.x.hypot(offset.z)),
            radius,
        })
    }

    pub fn pose(self) -> LiveCamera {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.radius;
        LiveCamera {
            position:    self.focus + offset,
            look_target: self.focus,
        }
    }

    pub fn within_pitch_limits(&self) -> bool {
        (CAMERA_MIN_ORBIT_PITCH - ORBIT_PITCH_TOLERANCE
            ..=CAMERA_MAX_ORBIT_PITCH + ORBIT_PITCH_TOLERANCE)
            .contains(&self.pitch)
    }
}

/// The closest pose manual orbiting can hold: same pivot, radius and yaw with the pitch
/// clamped. Poses already inside the limits come back untouched.
pub fn within_orbit_limits(live: LiveCamera) -> LiveCamera {
    match OrbitTargets::from_pose(live) {
        Some(targets) if !targets.within_pitch_limits() => OrbitTargets {
            pitch: targets
                .pitch
                .clamp(CAMERA_MIN_ORBIT_PITCH, CAMERA_MAX_ORBIT_PITCH),
            ..targets
        }
        .pose(),
        _ => live,
    }
}

/// `view` with its desired position moved to where the orbit controller can actually hold it
pub fn orbit_reachable(view: &CameraView) -> CameraView {
    CameraView {
        desired_position: within_orbit_limits(LiveCamera::snapped_to(view)).position,
        ..*view
    }
}

/// Extension trait for `PanOrbitCamera` providing convenience methods.
pub trait PanOrbitCameraExt {
    /// The live camera does its own easing, so the controller applies targets immediately.
    fn disable_interpolation(&mut self);

    fn orbit_targets(&self) -> OrbitTargets;

    fn set_orbit_targets(&mut self, targets: OrbitTargets);

    /// Places the camera before its first update, current values and targets alike.
    fn start_at(&mut self, targets: OrbitTargets);
}

impl PanOrbitCameraExt for PanOrbitCamera {
    fn disable_interpolation(&mut self) {
        self.zoom_smoothness = 0.0;
        self.pan_smoothness = 0.0;
        self.orbit_smoothness = 0.0;
    }

    fn orbit_targets(&self) -> OrbitTargets {
        OrbitTargets {
            focus:  self.target_focus,
            yaw:    self.target_yaw,
            pitch:  self.target_pitch,
            radius: self.target_radius,
        }
    }

    fn set_orbit_targets(&mut self, targets: OrbitTargets) {
        self.target_focus = targets.focus;
        self.target_yaw = targets.yaw;
        self.target_pitch = targets.pitch;
        self.target_radius = targets.radius;
        self.force_update = true;
    }

    fn start_at(&mut self, targets: OrbitTargets) {
        self.focus = targets.focus;
        self.yaw = Some(targets.yaw);
        self.pitch = Some(targets.pitch);
        self.radius = Some(targets.radius);
        self.set_orbit_targets(targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;

    #[test]
    fn overhead_overview_is_tilted_to_the_highest_orbit_pitch() {
        let overview = CameraView::overview(&CameraConfig::default());
        let reachable = orbit_reachable(&overview);

        assert!(
            reachable
                .desired_position
                .abs_diff_eq(Vec3::new(0.0, 18.0 * 30_f32.to_radians().cos(), 9.0), 1e-3)
        );
        assert_eq!(reachable.desired_target, overview.desired_target);
        assert_eq!(reachable.mode, overview.mode);
    }

    #[test]
    fn poses_inside_the_limits_are_untouched() {
        let live = LiveCamera {
            position:    Vec3::new(1.0, 2.6, 2.2),
            look_target: Vec3::new(1.0, 0.6, 1.0),
        };
        assert_eq!(within_orbit_limits(live), live);
    }

    #[test]
    fn targets_describe_the_same_pose() {
        let live = LiveCamera {
            position:    Vec3::new(-3.0, 4.0, 2.0),
            look_target: Vec3::new(1.0, 0.5, -1.0),
        };
        let Some(targets) = OrbitTargets::from_pose(live) else {
            panic!("pose has a radius");
        };
        let pose = targets.pose();
        assert!(pose.position.abs_diff_eq(live.position, 1e-4));
        assert_eq!(pose.look_target, live.look_target);

        let degenerate = LiveCamera {
            position:    Vec3::ONE,
            look_target: Vec3::ONE,
        };
        assert_eq!(OrbitTargets::from_pose(degenerate), None);
    }

    #[test]
    fn setting_targets_forces_a_controller_update() {
        let mut pan_orbit = PanOrbitCamera::default();
        let targets = OrbitTargets {
            focus:  Vec3::new(0.0, 0.6, 0.0),
            yaw:    0.5,
            pitch:  0.4,
            radius: 6.0,
        };
        pan_orbit.start_at(targets);

        assert_eq!(pan_orbit.orbit_targets(), targets);
        assert_eq!(pan_orbit.yaw, Some(0.5));
        assert!(pan_orbit.force_update);
    }
}
