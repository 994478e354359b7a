use std::collections::HashSet;
use std::iter;

use bevy::prelude::*;

use super::catalog::Category;
use super::catalog::ShelfKind;
use super::constants::CHECKOUT_TOP_COLOR;
use super::constants::FLOOR_COLOR;
use super::constants::FOOTPRINT_COLOR;
use super::constants::FRIDGE_DOOR_COLOR;
use super::constants::GRID_COLOR;
use super::constants::OVERLAP_COLOR;
use super::constants::SELECTED_SHELF_COLOR;
use super::constants::SHELF_BOARD_COLOR;
use super::constants::SHELF_BOARD_FACTORS;
use super::constants::SHELF_DIVIDER_COLOR;
use super::constants::SHELF_DIVIDER_FACTORS;
use super::constants::WALL_COLOR;
use super::constants::WALL_HEIGHT;
use super::constants::WALL_THICKNESS;
use super::layout::Layout;
use super::layout::LayoutConfig;
use super::layout::PlacedShelf;
use super::layout::overlapping_pairs;
use super::tier::StoreDimensions;
use crate::schedule::ViewerSet;
use crate::traits::Srgb8Ext;
use crate::viewer::ViewerIntent;
use crate::viewer::ViewerState;
use crate::viewer_input::ViewerAction;
use crate::viewer_input::toggle_active;

pub struct StoreScenePlugin;

impl Plugin for StoreScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<FloorGridGizmo>()
            .init_gizmo_group::<FootprintGizmo>()
            .add_systems(
                Update,
                (
                    rebuild_store_scene,
                    (sync_shelf_visibility, sync_shelf_highlight),
                )
                    .chain()
                    .run_if(resource_changed::<ViewerState>)
                    .in_set(ViewerSet::SceneSync),
            )
            .add_systems(
                Update,
                (
                    draw_floor_grid,
                    draw_footprints.run_if(toggle_active(false, ViewerAction::Footprints)),
                )
                    .in_set(ViewerSet::SceneSync),
            );
    }
}

#[derive(Default, Reflect, GizmoConfigGroup)]
struct FloorGridGizmo {}

#[derive(Default, Reflect, GizmoConfigGroup)]
struct FootprintGizmo {}

/// Root of everything rebuilt when the layout changes
#[derive(Component, Debug)]
struct StoreScene;

/// Floor-level parent of one shelf; carries its placement and rotation
#[derive(Component, Debug)]
pub struct ShelfUnit {
    pub id:       u32,
    pub category: Category,
}

/// The solid, clickable body of a shelf
#[derive(Component, Debug)]
struct ShelfBody {
    id:    u32,
    color: Color,
}

/// Purely visual part of a shelf, relative to its floor-level origin
#[derive(Debug, Clone, Copy, PartialEq)]
struct DetailPiece {
    offset: Vec3,
    size:   Vec3,
    color:  Color,
}

fn shelf_details(shelf: &PlacedShelf) -> Vec<DetailPiece> {
    let Vec3 {
        x: length,
        y: height,
        z: depth,
    } = shelf.size;

    let mut pieces = Vec::new();
    if shelf.kind != ShelfKind::Checkout {
        pieces.extend(SHELF_BOARD_FACTORS.iter().map(|factor| DetailPiece {
            offset: Vec3::new(0.0, height * factor, 0.0),
            size:   Vec3::new(length * 0.92, 0.02, depth * 0.92),
            color:  SHELF_BOARD_COLOR,
        }));
    }

    match shelf.kind {
        ShelfKind::Gondola => {
            pieces.extend(SHELF_DIVIDER_FACTORS.iter().map(|factor| DetailPiece {
                offset: Vec3::new(length * (factor - 0.5), height * 0.45, 0.0),
                size:   Vec3::new(0.02, height * 0.85, depth * 0.92),
                color:  SHELF_DIVIDER_COLOR,
            }));
        },
        ShelfKind::Refrigerator => pieces.push(DetailPiece {
            offset: Vec3::new(length / 2.0 - 0.06, height / 2.0, 0.0),
            size:   Vec3::new(0.12, height - 0.24, depth - 0.12),
            color:  FRIDGE_DOOR_COLOR,
        }),
        ShelfKind::Checkout => pieces.push(DetailPiece {
            offset: Vec3::new(0.0, height + 0.25, depth * 0.05),
            size:   Vec3::new(length * 0.9, 0.1, depth * 0.4),
            color:  CHECKOUT_TOP_COLOR,
        }),
        ShelfKind::Wall => {},
    }
    pieces
}

/// Offsets of one-metre grid lines from the near edge of an extent
fn grid_offsets(extent: f32) -> impl Iterator<Item = f32> {
    let last = extent.round();
    iter::successors(Some(0.0_f32), |offset| Some(offset + 1.0))
        .take_while(move |offset| *offset <= last)
}

const fn filter_visibility(admitted: bool) -> Visibility {
    if admitted {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn rebuild_store_scene(
    mut commands: Commands,
    viewer: Res<ViewerState>,
    scenes: Query<Entity, With<StoreScene>>,
    mut built: Local<Option<Layout>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let layout = viewer.layout();
    if built.as_ref() == Some(layout) {
        return;
    }

    for scene in &scenes {
        commands.entity(scene).despawn();
    }

    commands
        .spawn((
            StoreScene,
            Transform::default(),
            Visibility::default(),
            Name::new("StoreScene"),
        ))
        .with_children(|store| {
            spawn_floor_and_walls(store, layout.dimensions, &mut meshes, &mut materials);
            for shelf in layout.shelves() {
                spawn_shelf(store, shelf, &viewer, &mut meshes, &mut materials);
            }
        });

    info!(
        "built {} {:.2} x {:.2} m with {} shelves",
        layout.tier.label(),
        layout.dimensions.width,
        layout.dimensions.depth,
        layout.shelves().len()
    );
    *built = Some(layout.clone());
}

fn spawn_floor_and_walls(
    store: &mut ChildSpawnerCommands,
    dimensions: StoreDimensions,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let StoreDimensions { width, depth } = dimensions;

    store.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(depth, width))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: FLOOR_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.01, 0.0),
        Name::new("Floor"),
    ));

    // the front side (+z) stays open as the entrance
    let wall_material = materials.add(StandardMaterial {
        base_color: WALL_COLOR,
        ..default()
    });
    let walls = [
        (
            "BackWall",
            Vec3::new(depth, WALL_HEIGHT, WALL_THICKNESS),
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -width / 2.0),
        ),
        (
            "LeftWall",
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, width),
            Vec3::new(-depth / 2.0, WALL_HEIGHT / 2.0, 0.0),
        ),
        (
            "RightWall",
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, width),
            Vec3::new(depth / 2.0, WALL_HEIGHT / 2.0, 0.0),
        ),
    ];
    for (name, size, translation) in walls {
        store.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(translation),
            Pickable::IGNORE,
            Name::new(name),
        ));
    }
}

fn spawn_shelf(
    store: &mut ChildSpawnerCommands,
    shelf: &PlacedShelf,
    viewer: &ViewerState,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let color = shelf.color.to_color();
    let selected = viewer.view().focused_shelf() == Some(shelf.id);
    let body_material = materials.add(StandardMaterial {
        base_color: if selected { SELECTED_SHELF_COLOR } else { color },
        metallic: 0.1,
        perceptual_roughness: 0.6,
        ..default()
    });
    let details: Vec<_> = shelf_details(shelf)
        .into_iter()
        .map(|piece| {
            (
                Mesh3d(meshes.add(Cuboid::from_size(piece.size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: piece.color,
                    perceptual_roughness: 0.8,
                    ..default()
                })),
                Transform::from_translation(piece.offset),
            )
        })
        .collect();
    let body_mesh = meshes.add(Cuboid::from_size(shelf.size));

    store
        .spawn((
            ShelfUnit {
                id:       shelf.id,
                category: shelf.category,
            },
            Transform::from_xyz(shelf.position.x, 0.0, shelf.position.y)
                .with_rotation(Quat::from_rotation_y(shelf.rotation_degrees.to_radians())),
            filter_visibility(viewer.category_filter().admits(shelf.category)),
            Name::new(format!("{} {}", shelf.id, shelf.label)),
        ))
        .observe(select_clicked_shelf)
        .with_children(|unit| {
            unit.spawn((
                ShelfBody { id: shelf.id, color },
                Mesh3d(body_mesh),
                MeshMaterial3d(body_material),
                Transform::from_xyz(0.0, shelf.height() / 2.0, 0.0),
            ));
            for detail in details {
                unit.spawn(detail);
            }
        });
}

fn select_clicked_shelf(
    mut trigger: Trigger<Pointer<Click>>,
    units: Query<&ShelfUnit>,
    mut intents: EventWriter<ViewerIntent>,
) {
    if trigger.event().event.button != PointerButton::Primary {
        return;
    }
    trigger.propagate(false);
    if let Ok(unit) = units.get(trigger.target()) {
        intents.write(ViewerIntent::SelectShelf(unit.id));
    }
}

fn sync_shelf_visibility(viewer: Res<ViewerState>, mut units: Query<(&ShelfUnit, &mut Visibility)>) {
    let filter = viewer.category_filter();
    for (unit, mut visibility) in &mut units {
        visibility.set_if_neq(filter_visibility(filter.admits(unit.category)));
    }
}

fn sync_shelf_highlight(
    viewer: Res<ViewerState>,
    bodies: Query<(&ShelfBody, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let focused = viewer.view().focused_shelf();
    for (body, material) in &bodies {
        let color = if focused == Some(body.id) {
            SELECTED_SHELF_COLOR
        } else {
            body.color
        };
        let unchanged = materials
            .get(&material.0)
            .is_none_or(|current| current.base_color == color);
        if unchanged {
            continue;
        }
        if let Some(current) = materials.get_mut(&material.0) {
            current.base_color = color;
        }
    }
}

fn draw_floor_grid(mut gizmos: Gizmos<FloorGridGizmo>, viewer: Res<ViewerState>) {
    let StoreDimensions { width, depth } = viewer.dimensions();
    for offset in grid_offsets(width) {
        let z = -width / 2.0 + offset;
        gizmos.line(
            Vec3::new(-depth / 2.0, 0.01, z),
            Vec3::new(depth / 2.0, 0.01, z),
            GRID_COLOR,
        );
    }
    for offset in grid_offsets(depth) {
        let x = -depth / 2.0 + offset;
        gizmos.line(
            Vec3::new(x, 0.01, -width / 2.0),
            Vec3::new(x, 0.01, width / 2.0),
            GRID_COLOR,
        );
    }
}

/// Axis-aligned footprints as the layout engine sees them, overlapping ones in red
fn draw_footprints(
    mut gizmos: Gizmos<FootprintGizmo>,
    viewer: Res<ViewerState>,
    layout_config: Res<LayoutConfig>,
) {
    let layout = viewer.layout();
    let overlapping: HashSet<u32> =
        overlapping_pairs(layout.shelves(), layout_config.overlap_tolerance)
            .into_iter()
            .flat_map(|(first, second)| [first, second])
            .collect();

    for shelf in layout.visible(viewer.category_filter()) {
        let color = if overlapping.contains(&shelf.id) {
            OVERLAP_COLOR
        } else {
            FOOTPRINT_COLOR
        };
        let half = shelf.footprint() / 2.0;
        let corner = |x: f32, z: f32| Vec3::new(shelf.position.x + x, 0.02, shelf.position.y + z);
        gizmos.linestrip(
            [
                corner(-half.x, -half.y),
                corner(half.x, -half.y),
                corner(half.x, half.y),
                corner(-half.x, half.y),
                corner(-half.x, -half.y),
            ],
            color,
        );
    }
}
