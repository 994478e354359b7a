mod state;

use bevy::prelude::*;
pub use state::ViewerIntent;
pub use state::ViewerState;

use crate::camera::CameraConfig;
use crate::camera::LiveCamera;
use crate::schedule::ViewerSet;
use crate::store::LayoutConfig;

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ViewerIntent>()
            .init_resource::<ViewerState>()
            .add_systems(
                Update,
                (
                    relayout_on_config_change.run_if(resource_changed::<LayoutConfig>),
                    apply_viewer_intents,
                )
                    .chain()
                    .in_set(ViewerSet::Intents),
            );
    }
}

fn apply_viewer_intents(
    mut intents: EventReader<ViewerIntent>,
    mut viewer: ResMut<ViewerState>,
    mut live_camera: ResMut<LiveCamera>,
    layout_config: Res<LayoutConfig>,
    camera_config: Res<CameraConfig>,
) {
    for intent in intents.read() {
        let next = viewer
            .clone()
            .reduce(*intent, &layout_config, &camera_config);
        if intent.snaps_camera() {
            *live_camera = LiveCamera::snapped_to(next.view());
        }
        debug!("{intent:?} -> {:?} {:?}", next.view().mode, next.navigation());
        viewer.set_if_neq(next);
    }
}

fn relayout_on_config_change(mut viewer: ResMut<ViewerState>, layout_config: Res<LayoutConfig>) {
    let next = viewer.clone().retuned(&layout_config);
    if viewer.set_if_neq(next) {
        info!("layout tuning changed, recomputed {} shelves", viewer.layout().shelves().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ViewMode;
    use crate::store::StoreTier;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<LayoutConfig>()
            .init_resource::<CameraConfig>()
            .init_resource::<LiveCamera>()
            .add_plugins(ViewerPlugin);
        app
    }

    #[test]
    fn intents_reach_the_state_in_the_same_frame() {
        let mut app = app();
        app.world_mut().send_event(ViewerIntent::SelectShelf(11));
        app.update();

        let viewer = app.world().resource::<ViewerState>();
        assert_eq!(viewer.view().mode, ViewMode::ShelfFocus { shelf_id: 11 });
        // a plain selection eases, so the live camera has not jumped
        assert_eq!(*app.world().resource::<LiveCamera>(), LiveCamera::default());
    }

    #[test]
    fn tier_selection_snaps_the_live_camera() {
        let mut app = app();
        app.world_mut().insert_resource(LiveCamera {
            position:    Vec3::new(3.0, 1.7, 2.0),
            look_target: Vec3::new(3.0, 1.7, 1.0),
        });
        app.world_mut()
            .send_event(ViewerIntent::SelectTier(StoreTier::Large));
        app.update();

        let viewer = app.world().resource::<ViewerState>();
        let live = app.world().resource::<LiveCamera>();
        assert_eq!(viewer.tier(), StoreTier::Large);
        assert_eq!(*live, LiveCamera::snapped_to(viewer.view()));
    }

    #[test]
    fn layout_tuning_changes_relayout_the_current_store() {
        let mut app = app();
        app.update();

        let before = app.world().resource::<ViewerState>().layout().clone();
        app.world_mut().resource_mut::<LayoutConfig>().max_height = 1.0;
        app.update();

        let after = app.world().resource::<ViewerState>().layout();
        assert_ne!(&before, after);
        assert!(after.shelves().iter().all(|shelf| shelf.height() <= 1.0));
    }

    #[test]
    fn tightened_dimension_bounds_clamp_the_current_store() {
        let mut app = app();
        app.update();

        app.world_mut()
            .resource_mut::<LayoutConfig>()
            .dimension_bounds
            .max_depth = 8.0;
        app.update();

        let viewer = app.world().resource::<ViewerState>();
        assert!((viewer.dimensions().depth - 8.0).abs() < f32::EPSILON);
        assert_eq!(viewer.layout().dimensions, viewer.dimensions());
    }
}
