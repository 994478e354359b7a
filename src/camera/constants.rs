use std::f32::consts::FRAC_PI_2;
use std::f32::consts::PI;

use bevy::color::Color;
use bevy::math::Vec3;

/// Aerial pose straight above the store center
pub const CAMERA_OVERVIEW_POSITION: Vec3 = Vec3::new(0.0, 18.0, 0.0);
pub const CAMERA_OVERVIEW_TARGET: Vec3 = Vec3::ZERO;

/// Height added above a shelf's top when framing it
pub const CAMERA_FOCUS_HEIGHT_OFFSET: f32 = 1.4;

/// Framing distance in front of a shelf is `max(min, depth * factor)`
pub const CAMERA_FOCUS_MIN_DISTANCE: f32 = 1.2;
pub const CAMERA_FOCUS_DEPTH_FACTOR: f32 = 1.8;

/// Altitude change per zoom step and its limits
pub const CAMERA_ZOOM_STEP: f32 = 3.0;
pub const CAMERA_MIN_ALTITUDE: f32 = 3.0;
pub const CAMERA_MAX_ALTITUDE: f32 = 40.0;

/// Fraction of the remaining distance covered per frame at the reference frame rate
pub const CAMERA_FOCUS_POSITION_RATE: f32 = 0.07;
pub const CAMERA_FOCUS_LOOK_RATE: f32 = 0.07;
pub const CAMERA_OVERVIEW_POSITION_RATE: f32 = 0.05;
pub const CAMERA_OVERVIEW_LOOK_RATE: f32 = 0.12;

/// Below this gap to the target pose the live camera counts as arrived
pub const CAMERA_SETTLE_DISTANCE: f32 = 1e-4;

/// Ease rates are tuned per frame at this rate
pub const CAMERA_REFERENCE_FPS: f32 = 60.0;

/// Gap between the walking camera and the walls
pub const CAMERA_WALK_MARGIN: f32 = 0.2;

/// Height the walking camera drops to when walk mode starts
pub const CAMERA_EYE_HEIGHT: f32 = 1.7;

/// Walking speed in metres per second
pub const CAMERA_WALK_SPEED: f32 = 4.0;

/// Radians per pixel of mouse movement
pub const CAMERA_LOOK_SENSITIVITY: f32 = 0.003;

/// Elevation limits for manual orbiting, measured up from the floor plane.
/// Equivalent to polar angles of π/6 and π/1.05 from straight up.
pub const CAMERA_MAX_ORBIT_PITCH: f32 = FRAC_PI_2 - PI / 6.0;
pub const CAMERA_MIN_ORBIT_PITCH: f32 = FRAC_PI_2 - PI / 1.05;

/// Keeps walk-mode look away from straight up/down
pub const CAMERA_MAX_WALK_PITCH: f32 = 1.45;

pub const CAMERA_FOV_DEGREES: f32 = 50.0;

pub const CAMERA_CLEAR_COLOR: Color = Color::srgb(0.973, 0.98, 0.988);
