use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use leafwing_input_manager::prelude::*;

use super::config::CameraConfig;
use super::constants::CAMERA_MAX_ORBIT_PITCH;
use super::constants::CAMERA_MIN_ORBIT_PITCH;
use super::constants::CAMERA_SETTLE_DISTANCE;
use super::live::LiveCamera;
use super::live::at_eye_height;
use super::live::clamp_to_walk_bounds;
use super::live::ease_toward;
use super::live::walk;
use super::pan_orbit_ext::OrbitTargets;
use super::pan_orbit_ext::PanOrbitCameraExt;
use super::pan_orbit_ext::orbit_reachable;
use super::pan_orbit_ext::within_orbit_limits;
use super::view::NavigationMode;
use crate::schedule::ViewerSet;
use crate::store::Interior;
use crate::traits::TransformExt;
use crate::viewer::ViewerState;
use crate::viewer_input::ViewerAction;

pub struct CamerasPlugin;

impl Plugin for CamerasPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanOrbitCameraPlugin)
            .init_resource::<LiveCamera>()
            .add_systems(Startup, (snap_to_initial_view, spawn_viewer_camera).chain())
            .add_systems(Startup, spawn_lights)
            .add_systems(
                Update,
                (
                    switch_navigation,
                    follow_pan_orbit,
                    steer_walker,
                    ease_live_camera,
                    keep_walker_inside,
                    apply_live_camera,
                )
                    .chain()
                    .in_set(ViewerSet::CameraMotion),
            )
            .add_systems(
                Update,
                (update_clear_color, update_field_of_view)
                    .run_if(resource_changed::<CameraConfig>),
            );
    }
}

#[derive(Component, Debug)]
pub struct ViewerCamera;

/// The orbit targets last handed to the controller. Anything else found on the controller
/// came from the user dragging or scrolling.
#[derive(Component, Debug, Default)]
struct WrittenOrbitTargets(Option<OrbitTargets>);

fn snap_to_initial_view(viewer: Res<ViewerState>, mut live_camera: ResMut<LiveCamera>) {
    *live_camera = within_orbit_limits(LiveCamera::snapped_to(viewer.view()));
}

fn spawn_viewer_camera(
    mut commands: Commands,
    camera_config: Res<CameraConfig>,
    live_camera: Res<LiveCamera>,
) {
    commands.insert_resource(ClearColor(camera_config.clear_color));

    // left drag orbits, right drag pans, the wheel dollies
    let mut pan_orbit = PanOrbitCamera {
        button_orbit: MouseButton::Left,
        button_pan: MouseButton::Right,
        pitch_upper_limit: Some(CAMERA_MAX_ORBIT_PITCH),
        pitch_lower_limit: Some(CAMERA_MIN_ORBIT_PITCH),
        zoom_upper_limit: Some(camera_config.max_altitude),
        ..default()
    };
    pan_orbit.disable_interpolation();
    let targets = OrbitTargets::from_pose(*live_camera);
    if let Some(targets) = targets {
        pan_orbit.start_at(targets);
    }

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera_config.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_pose(live_camera.position, live_camera.look_target),
        pan_orbit,
        WrittenOrbitTargets(targets),
        ViewerCamera,
        Name::new("ViewerCamera"),
    ));
}

fn spawn_lights(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 600.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));

    // soft blue fill from above the store center
    commands.spawn((
        PointLight {
            color: Color::srgb(0.6, 0.757, 1.0),
            intensity: 250_000.0,
            range: 40.0,
            ..default()
        },
        Transform::from_xyz(0.0, 12.0, 0.0),
        Name::new("FillLight"),
    ));
}

/// Hands the camera to the orbit controller or takes it back for walking.
fn switch_navigation(
    viewer: Res<ViewerState>,
    camera_config: Res<CameraConfig>,
    mut live_camera: ResMut<LiveCamera>,
    mut pan_orbit: Single<&mut PanOrbitCamera, With<ViewerCamera>>,
    mut navigation: Local<NavigationMode>,
) {
    let current = viewer.navigation();
    if *navigation == current {
        return;
    }
    *navigation = current;
    pan_orbit.enabled = current == NavigationMode::Orbit;

    match current {
        NavigationMode::Walk => {
            *live_camera = at_eye_height(*live_camera, camera_config.eye_height);
        },
        // the controller still holds the targets from before the walk
        NavigationMode::Orbit => live_camera.set_changed(),
    }
    debug!("navigation {current:?} from {:?}", live_camera.position);
}

/// Picks up whatever the user did to the orbit controller since the last write, then keeps
/// the live pose inside the pitch range the controller enforces.
fn follow_pan_orbit(
    viewer: Res<ViewerState>,
    mut live_camera: ResMut<LiveCamera>,
    camera: Single<(&PanOrbitCamera, &WrittenOrbitTargets), With<ViewerCamera>>,
) {
    if viewer.navigation() != NavigationMode::Orbit {
        return;
    }
    let (pan_orbit, written) = *camera;
    let current = pan_orbit.orbit_targets();
    let next = if written.0 == Some(current) {
        within_orbit_limits(*live_camera)
    } else {
        current.pose()
    };
    live_camera.set_if_neq(next);
}

/// Right-drag turns the head, WASD walks.
fn steer_walker(
    action_state: Res<ActionState<ViewerAction>>,
    viewer: Res<ViewerState>,
    camera_config: Res<CameraConfig>,
    mut live_camera: ResMut<LiveCamera>,
    time: Res<Time>,
) {
    if viewer.navigation() != NavigationMode::Walk {
        return;
    }
    let look = if action_state.pressed(&ViewerAction::Drag) {
        action_state.axis_pair(&ViewerAction::Look)
    } else {
        Vec2::ZERO
    };
    let movement = action_state.clamped_axis_pair(&ViewerAction::Walk);
    if movement == Vec2::ZERO && look == Vec2::ZERO {
        return;
    }
    *live_camera = walk(*live_camera, movement, look, time.delta_secs(), &camera_config);
}

fn ease_live_camera(
    viewer: Res<ViewerState>,
    camera_config: Res<CameraConfig>,
    mut live_camera: ResMut<LiveCamera>,
    time: Res<Time>,
) {
    let view = match viewer.navigation() {
        NavigationMode::Orbit => orbit_reachable(viewer.view()),
        NavigationMode::Walk => *viewer.view(),
    };
    if live_camera.distance_to(&view) < CAMERA_SETTLE_DISTANCE {
        return;
    }
    let next = ease_toward(
        *live_camera,
        &view,
        viewer.navigation(),
        viewer.lock_auto_return(),
        &camera_config,
        time.delta_secs(),
    );
    live_camera.set_if_neq(next);
}

fn keep_walker_inside(
    viewer: Res<ViewerState>,
    camera_config: Res<CameraConfig>,
    mut live_camera: ResMut<LiveCamera>,
) {
    if viewer.navigation() != NavigationMode::Walk {
        return;
    }
    let bounds = Interior::new(viewer.dimensions(), camera_config.walk_margin);
    let next = clamp_to_walk_bounds(*live_camera, &bounds);
    if live_camera.set_if_neq(next) {
        trace!("walker clamped to {:?}", next.position);
    }
}

/// Orbiting goes through the controller's targets; walking writes the transform directly.
fn apply_live_camera(
    viewer: Res<ViewerState>,
    live_camera: Res<LiveCamera>,
    camera: Single<
        (&mut Transform, &mut PanOrbitCamera, &mut WrittenOrbitTargets),
        With<ViewerCamera>,
    >,
) {
    if !live_camera.is_changed() {
        return;
    }
    let (mut transform, mut pan_orbit, mut written) = camera.into_inner();
    match viewer.navigation() {
        NavigationMode::Walk => {
            *transform = Transform::from_pose(live_camera.position, live_camera.look_target);
        },
        NavigationMode::Orbit => {
            let Some(targets) = OrbitTargets::from_pose(*live_camera) else {
                return;
            };
            pan_orbit.set_orbit_targets(targets);
            written.0 = Some(targets);
        },
    }
}

fn update_clear_color(camera_config: Res<CameraConfig>, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = camera_config.clear_color;
}

fn update_field_of_view(
    camera_config: Res<CameraConfig>,
    mut projection: Single<&mut Projection, With<ViewerCamera>>,
) {
    if let Projection::Perspective(perspective) = &mut **projection {
        perspective.fov = camera_config.fov_degrees.to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LayoutConfig;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<LayoutConfig>()
            .init_resource::<CameraConfig>()
            .init_resource::<ViewerState>()
            .init_resource::<LiveCamera>()
            .add_systems(Startup, (snap_to_initial_view, spawn_viewer_camera).chain())
            .add_systems(Update, (follow_pan_orbit, apply_live_camera).chain());
        app.update();
        app
    }

    fn controller_targets(app: &mut App) -> OrbitTargets {
        let mut query = app
            .world_mut()
            .query_filtered::<&PanOrbitCamera, With<ViewerCamera>>();
        let Ok(pan_orbit) = query.single(app.world()) else {
            panic!("viewer camera was not spawned");
        };
        pan_orbit.orbit_targets()
    }

    #[test]
    fn starts_at_the_reachable_overview() {
        let mut app = app();
        let live = *app.world().resource::<LiveCamera>();
        assert!(live.position.abs_diff_eq(Vec3::new(0.0, 15.588, 9.0), 1e-3));
        assert_eq!(Some(controller_targets(&mut app)), OrbitTargets::from_pose(live));
    }

    #[test]
    fn user_orbit_and_pan_are_adopted_by_the_live_camera() {
        let mut app = app();
        let mut query = app
            .world_mut()
            .query_filtered::<&mut PanOrbitCamera, With<ViewerCamera>>();
        let Ok(mut pan_orbit) = query.single_mut(app.world_mut()) else {
            panic!("viewer camera was not spawned");
        };
        pan_orbit.target_yaw += 0.5;
        pan_orbit.target_focus += Vec3::new(1.0, 0.0, -2.0);
        let moved = pan_orbit.orbit_targets();

        app.update();

        let live = *app.world().resource::<LiveCamera>();
        let expected = moved.pose();
        assert!(live.position.abs_diff_eq(expected.position, 1e-4));
        assert_eq!(live.look_target, Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn programmatic_moves_reach_the_controller() {
        let mut app = app();
        let framed = LiveCamera {
            position:    Vec3::new(1.0, 2.6, 2.2),
            look_target: Vec3::new(1.0, 0.6, 1.0),
        };
        app.world_mut().insert_resource(framed);
        app.update();

        assert_eq!(*app.world().resource::<LiveCamera>(), framed);
        assert_eq!(
            Some(controller_targets(&mut app)),
            OrbitTargets::from_pose(framed)
        );
    }
}
