use bevy::prelude::*;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum ViewerSet {
    UserInput,
    Intents,
    SceneSync,
    CameraMotion,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        // input becomes intents, intents become a new state snapshot, and only then
        // do the scene and the live camera follow that snapshot within the same frame
        app.configure_sets(
            Update,
            (
                ViewerSet::UserInput,
                ViewerSet::Intents,
                ViewerSet::SceneSync,
                ViewerSet::CameraMotion,
            )
                .chain(),
        );
    }
}
