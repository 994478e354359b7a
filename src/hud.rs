use bevy::prelude::*;

use crate::camera::ViewMode;
use crate::schedule::ViewerSet;
use crate::store::LayoutConfig;
use crate::store::overlapping_pairs;
use crate::viewer::ViewerState;
use crate::viewer_input::ViewerAction;
use crate::viewer_input::just_pressed;

const HUD_FONT_SIZE: f32 = 13.0;
const HUD_TEXT_COLOR: Color = Color::srgb(0.122, 0.227, 0.4);
const HUD_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.92);

const KEY_HELP: &str = "1/2/3 loja  [ ] largura  - = comprimento  , . prateleira  Esc voltar\n\
                        O visão geral  PgUp/PgDn zoom  F cliente  L bloqueio  C/0 categoria\n\
                        R recalibrar  T ajustar  H menu\n\
                        aérea: esquerdo gira, direito arrasta, roda aproxima\n\
                        cliente: WASD anda, direito olha";

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (
                    toggle_hud.run_if(just_pressed(ViewerAction::ToggleHud)),
                    update_hud.run_if(resource_changed::<ViewerState>),
                )
                    .in_set(ViewerSet::SceneSync),
            );
    }
}

#[derive(Component)]
struct Hud;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Hud,
        Text::default(),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
        BackgroundColor(HUD_BACKGROUND),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        Name::new("Hud"),
    ));
}

fn toggle_hud(mut hud: Single<&mut Visibility, With<Hud>>) {
    **hud = match **hud {
        Visibility::Hidden => Visibility::Inherited,
        _ => Visibility::Hidden,
    };
}

fn update_hud(
    viewer: Res<ViewerState>,
    layout_config: Res<LayoutConfig>,
    mut hud: Single<&mut Text, With<Hud>>,
) {
    let overlaps =
        overlapping_pairs(viewer.layout().shelves(), layout_config.overlap_tolerance).len();
    hud.0 = hud_text(&viewer, overlaps);
}

fn hud_text(viewer: &ViewerState, overlaps: usize) -> String {
    let tier = viewer.tier();
    let dimensions = viewer.dimensions();
    let focused = viewer.view().focused_shelf();

    let view = match viewer.view().mode {
        ViewMode::Overview => String::from("visão geral"),
        ViewMode::ShelfFocus { shelf_id } => viewer
            .layout()
            .shelf(shelf_id)
            .map_or_else(|| format!("prateleira {shelf_id}"), |shelf| shelf.label.to_string()),
    };
    let lock = if viewer.lock_auto_return() {
        "bloqueado"
    } else {
        "ativo"
    };

    let mut lines = vec![
        String::from("Farmácia 3D"),
        format!("{} (até {} m²)", tier.label(), tier.max_area()),
        format!(
            "Largura: {:.2} m  Comprimento: {:.2} m",
            dimensions.width, dimensions.depth
        ),
        format!("Área: {:.1} m²  Máximo: {} m²", dimensions.area(), tier.max_area()),
        format!("Categoria: {}", viewer.category_filter().label()),
        format!("Câmera: {} / {view}", viewer.navigation().label()),
        format!("Retorno automático: {lock}"),
    ];
    if overlaps > 0 {
        lines.push(format!("Sobreposições: {overlaps}"));
    }

    lines.push(String::from("\nPrateleiras"));
    lines.extend(
        viewer
            .layout()
            .visible(viewer.category_filter())
            .map(|shelf| {
                let marker = if focused == Some(shelf.id) { '>' } else { ' ' };
                format!(
                    "{marker} {:>3} {} ({})",
                    shelf.id,
                    shelf.label,
                    shelf.kind.label()
                )
            }),
    );

    lines.push(format!("\n{KEY_HELP}"));
    lines.join("\n")
}
