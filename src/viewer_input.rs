use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use strum::EnumIter;
use strum::IntoEnumIterator;

use crate::schedule::ViewerSet;
use crate::store::CategoryFilter;
use crate::store::STORE_RESIZE_STEP;
use crate::store::StoreTier;
use crate::viewer::ViewerIntent;
use crate::viewer::ViewerState;

pub struct ViewerInputPlugin;

impl Plugin for ViewerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<ViewerAction>::default())
            .init_resource::<ActionState<ViewerAction>>()
            .insert_resource(ViewerAction::input_map())
            .add_systems(Update, dispatch_viewer_intents.in_set(ViewerSet::UserInput));
    }
}

// This is the list of "things the user can ask the viewer to do"
#[derive(Actionlike, EnumIter, PartialEq, Eq, Clone, Copy, Hash, Debug, Reflect)]
pub enum ViewerAction {
    SelectSmallStore,
    SelectMediumStore,
    SelectLargeStore,
    NarrowStore,
    WidenStore,
    ShortenStore,
    LengthenStore,
    PreviousShelf,
    NextShelf,
    BackToOverview,
    GeneralView,
    ZoomIn,
    ZoomOut,
    ToggleWalkMode,
    ToggleAutoReturnLock,
    CycleCategory,
    AllCategories,
    Recalibrate,
    TightenLayout,
    #[actionlike(DualAxis)]
    Walk,
    // head turning while walking; the orbit controller reads the mouse itself
    #[actionlike(DualAxis)]
    Look,
    Drag,
    CameraInspector,
    LayoutInspector,
    Footprints,
    ToggleHud,
}

impl ViewerAction {
    pub fn input_map() -> InputMap<Self> {
        Self::iter().fold(InputMap::default(), |input_map, action| match action {
            Self::SelectSmallStore => input_map.with(action, KeyCode::Digit1),
            Self::SelectMediumStore => input_map.with(action, KeyCode::Digit2),
            Self::SelectLargeStore => input_map.with(action, KeyCode::Digit3),
            Self::NarrowStore => input_map.with(action, KeyCode::BracketLeft),
            Self::WidenStore => input_map.with(action, KeyCode::BracketRight),
            Self::ShortenStore => input_map.with(action, KeyCode::Minus),
            Self::LengthenStore => input_map.with(action, KeyCode::Equal),
            Self::PreviousShelf => input_map.with(action, KeyCode::Comma),
            Self::NextShelf => input_map.with(action, KeyCode::Period),
            Self::BackToOverview => input_map.with(action, KeyCode::Escape),
            Self::GeneralView => input_map.with(action, KeyCode::KeyO),
            Self::ZoomIn => input_map.with(action, KeyCode::PageUp),
            Self::ZoomOut => input_map.with(action, KeyCode::PageDown),
            Self::ToggleWalkMode => input_map.with(action, KeyCode::KeyF),
            Self::ToggleAutoReturnLock => input_map.with(action, KeyCode::KeyL),
            Self::CycleCategory => input_map.with(action, KeyCode::KeyC),
            Self::AllCategories => input_map.with(action, KeyCode::Digit0),
            Self::Recalibrate => input_map.with(action, KeyCode::KeyR),
            Self::TightenLayout => input_map.with(action, KeyCode::KeyT),
            Self::Walk => input_map
                .with_dual_axis(action, VirtualDPad::wasd())
                .with_dual_axis(action, VirtualDPad::arrow_keys()),
            Self::Look => input_map.with_dual_axis(action, MouseMove::default()),
            Self::Drag => input_map.with(action, MouseButton::Right),
            Self::CameraInspector => input_map.with(action, KeyCode::F1),
            Self::LayoutInspector => input_map.with(action, KeyCode::F2),
            Self::Footprints => input_map.with(action, KeyCode::F3),
            Self::ToggleHud => input_map.with(action, KeyCode::KeyH),
        })
    }

    /// The one-shot intent this action fires, given the current state. Continuous and
    /// toggle-only actions have none.
    pub fn intent(self, viewer: &ViewerState) -> Option<ViewerIntent> {
        let dimensions = viewer.dimensions();
        match self {
            Self::SelectSmallStore => Some(ViewerIntent::SelectTier(StoreTier::Small)),
            Self::SelectMediumStore => Some(ViewerIntent::SelectTier(StoreTier::Medium)),
            Self::SelectLargeStore => Some(ViewerIntent::SelectTier(StoreTier::Large)),
            Self::NarrowStore => Some(ViewerIntent::SetWidth(dimensions.width - STORE_RESIZE_STEP)),
            Self::WidenStore => Some(ViewerIntent::SetWidth(dimensions.width + STORE_RESIZE_STEP)),
            Self::ShortenStore => Some(ViewerIntent::SetDepth(dimensions.depth - STORE_RESIZE_STEP)),
            Self::LengthenStore => Some(ViewerIntent::SetDepth(dimensions.depth + STORE_RESIZE_STEP)),
            Self::PreviousShelf => Some(ViewerIntent::CycleShelf(-1)),
            Self::NextShelf => Some(ViewerIntent::CycleShelf(1)),
            Self::BackToOverview => Some(ViewerIntent::BackToOverview),
            Self::GeneralView => Some(ViewerIntent::GeneralView),
            Self::ZoomIn => Some(ViewerIntent::ZoomIn),
            Self::ZoomOut => Some(ViewerIntent::ZoomOut),
            Self::ToggleWalkMode => Some(ViewerIntent::ToggleWalkMode),
            Self::ToggleAutoReturnLock => Some(ViewerIntent::ToggleAutoReturnLock),
            Self::CycleCategory => Some(ViewerIntent::CycleCategoryFilter),
            Self::AllCategories => Some(ViewerIntent::SetCategoryFilter(CategoryFilter::All)),
            Self::Recalibrate => Some(ViewerIntent::Recalibrate),
            Self::TightenLayout => Some(ViewerIntent::TightenLayout),
            Self::Walk
            | Self::Look
            | Self::Drag
            | Self::CameraInspector
            | Self::LayoutInspector
            | Self::Footprints
            | Self::ToggleHud => None,
        }
    }
}

/// Run condition: true on the frame `action` was pressed
pub fn just_pressed(
    action: ViewerAction,
) -> impl Fn(Res<ActionState<ViewerAction>>) -> bool + Clone {
    move |action_state: Res<ActionState<ViewerAction>>| action_state.just_pressed(&action)
}

/// Run condition that flips every time `action` is pressed, starting at `default`
pub fn toggle_active(
    default: bool,
    action: ViewerAction,
) -> impl FnMut(Res<ActionState<ViewerAction>>) -> bool + Clone {
    let mut active = default;
    move |action_state: Res<ActionState<ViewerAction>>| {
        active ^= action_state.just_pressed(&action);
        active
    }
}

fn dispatch_viewer_intents(
    action_state: Res<ActionState<ViewerAction>>,
    viewer: Res<ViewerState>,
    mut intents: EventWriter<ViewerIntent>,
) {
    for action in ViewerAction::iter() {
        let Some(intent) = action.intent(&viewer) else {
            continue;
        };
        if action_state.just_pressed(&action) {
            debug!("{action:?} -> {intent:?}");
            intents.write(intent);
        }
    }
}
