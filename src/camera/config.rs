use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use super::constants::CAMERA_CLEAR_COLOR;
use super::constants::CAMERA_EYE_HEIGHT;
use super::constants::CAMERA_FOCUS_DEPTH_FACTOR;
use super::constants::CAMERA_FOCUS_HEIGHT_OFFSET;
use super::constants::CAMERA_FOCUS_LOOK_RATE;
use super::constants::CAMERA_FOCUS_MIN_DISTANCE;
use super::constants::CAMERA_FOCUS_POSITION_RATE;
use super::constants::CAMERA_FOV_DEGREES;
use super::constants::CAMERA_LOOK_SENSITIVITY;
use super::constants::CAMERA_MAX_ALTITUDE;
use super::constants::CAMERA_MIN_ALTITUDE;
use super::constants::CAMERA_OVERVIEW_LOOK_RATE;
use super::constants::CAMERA_OVERVIEW_POSITION;
use super::constants::CAMERA_OVERVIEW_POSITION_RATE;
use super::constants::CAMERA_OVERVIEW_TARGET;
use super::constants::CAMERA_WALK_MARGIN;
use super::constants::CAMERA_WALK_SPEED;
use super::constants::CAMERA_ZOOM_STEP;
use crate::viewer_input::ViewerAction;
use crate::viewer_input::toggle_active;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraConfig>()
            .add_plugins(
                ResourceInspectorPlugin::<CameraConfig>::default()
                    .run_if(toggle_active(false, ViewerAction::CameraInspector)),
            )
            .init_resource::<CameraConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct CameraConfig {
    pub clear_color:            Color,
    #[inspector(min = 20.0, max = 90.0, display = NumberDisplay::Slider)]
    pub fov_degrees:            f32,
    pub overview_position:      Vec3,
    pub overview_target:        Vec3,
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub focus_height_offset:    f32,
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub focus_min_distance:     f32,
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub focus_depth_factor:     f32,
    #[inspector(min = 0.5, max = 10.0, display = NumberDisplay::Slider)]
    pub zoom_step:              f32,
    pub min_altitude:           f32,
    pub max_altitude:           f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub focus_position_rate:    f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub focus_look_rate:        f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub overview_position_rate: f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub overview_look_rate:     f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub walk_margin:            f32,
    #[inspector(min = 0.5, max = 3.0, display = NumberDisplay::Slider)]
    pub eye_height:             f32,
    #[inspector(min = 0.5, max = 10.0, display = NumberDisplay::Slider)]
    pub walk_speed:             f32,
    #[inspector(min = 0.0005, max = 0.01, display = NumberDisplay::Slider)]
    pub look_sensitivity:       f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            clear_color:            CAMERA_CLEAR_COLOR,
            fov_degrees:            CAMERA_FOV_DEGREES,
            overview_position:      CAMERA_OVERVIEW_POSITION,
            overview_target:        CAMERA_OVERVIEW_TARGET,
            focus_height_offset:    CAMERA_FOCUS_HEIGHT_OFFSET,
            focus_min_distance:     CAMERA_FOCUS_MIN_DISTANCE,
            focus_depth_factor:     CAMERA_FOCUS_DEPTH_FACTOR,
            zoom_step:              CAMERA_ZOOM_STEP,
            min_altitude:           CAMERA_MIN_ALTITUDE,
            max_altitude:           CAMERA_MAX_ALTITUDE,
            focus_position_rate:    CAMERA_FOCUS_POSITION_RATE,
            focus_look_rate:        CAMERA_FOCUS_LOOK_RATE,
            overview_position_rate: CAMERA_OVERVIEW_POSITION_RATE,
            overview_look_rate:     CAMERA_OVERVIEW_LOOK_RATE,
            walk_margin:            CAMERA_WALK_MARGIN,
            eye_height:             CAMERA_EYE_HEIGHT,
            walk_speed:             CAMERA_WALK_SPEED,
            look_sensitivity:       CAMERA_LOOK_SENSITIVITY,
        }
    }
}
