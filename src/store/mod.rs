//! The store being visualized: its size presets, the fixed shelf catalog, the layout engine
//! that places the catalog inside the store, and the 3D scene built from a layout.

mod catalog;
mod constants;
mod layout;
mod overlap;
mod scene;
mod tier;

use bevy::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
pub use catalog::Category;
pub use catalog::CategoryFilter;
pub use catalog::ShelfKind;
pub use constants::STORE_RESIZE_STEP;
pub use layout::Interior;
pub use layout::Layout;
pub use layout::LayoutConfig;
pub use layout::PlacedShelf;
pub use layout::compute_layout;
pub use layout::overlapping_pairs;
use scene::StoreScenePlugin;
pub use tier::StoreDimensions;
pub use tier::StoreTier;

use crate::viewer_input::ViewerAction;
use crate::viewer_input::toggle_active;

pub struct StorePlugin;

impl Plugin for StorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<LayoutConfig>()
            .add_plugins(
                ResourceInspectorPlugin::<LayoutConfig>::default()
                    .run_if(toggle_active(false, ViewerAction::LayoutInspector)),
            )
            .init_resource::<LayoutConfig>()
            .add_plugins(StoreScenePlugin);
    }
}
