mod cameras;
mod config;
mod constants;
mod live;
mod pan_orbit_ext;
mod view;

use bevy::prelude::*;
use cameras::CamerasPlugin;
use config::CameraConfigPlugin;

pub use config::CameraConfig;
pub use live::LiveCamera;
pub use view::CameraView;
pub use view::NavigationMode;
pub use view::ViewMode;
pub use view::Zoom;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(CamerasPlugin);
    }
}
