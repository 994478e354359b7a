//! Farmácia 3D - an interactive floor-plan visualizer for retail pharmacies built with Bevy 0.16
//!
//! - Parametric store footprint with small/medium/large presets
//! - Deterministic, in-bounds shelf layout scaled to the store
//! - Aerial orbit camera and a walk-through mode clamped to the store interior

mod camera;
mod hud;
mod schedule;
mod store;
mod traits;
mod viewer;
mod viewer_input;

use bevy::dev_tools::fps_overlay::FpsOverlayConfig;
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::camera::CameraPlugin;
use crate::hud::HudPlugin;
use crate::schedule::SchedulePlugin;
use crate::store::StorePlugin;
use crate::viewer::ViewerPlugin;
use crate::viewer_input::ViewerInputPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "farmacia3d".to_string(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        EguiPlugin {
            enable_multipass_for_primary_context: true,
        },
        MeshPickingPlugin,
        FpsOverlayPlugin {
            config: FpsOverlayConfig {
                text_config: TextFont {
                    font_size: 12.0,
                    ..default()
                },
                ..default()
            },
        },
    ))
    .add_plugins((
        SchedulePlugin,
        ViewerInputPlugin,
        StorePlugin,
        CameraPlugin,
        ViewerPlugin,
        HudPlugin,
    ))
    .run();
}
