//! The viewer's explicit state and the pure reducer that moves it forward.
//!
//! Every user-visible change goes through [`ViewerState::reduce`]. When the tier or the store
//! dimensions change, the layout is recomputed inside the reducer so a `ViewerState` is always
//! a consistent snapshot: the layout always matches `(dimensions, tier)` and a focused shelf
//! id always exists in that layout.

use bevy::prelude::*;

use crate::camera::CameraConfig;
use crate::camera::CameraView;
use crate::camera::NavigationMode;
use crate::camera::Zoom;
use crate::store::CategoryFilter;
use crate::store::Layout;
use crate::store::LayoutConfig;
use crate::store::StoreDimensions;
use crate::store::StoreTier;
use crate::store::compute_layout;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum ViewerIntent {
    SelectTier(StoreTier),
    /// Depth follows from the tier's maximum area
    SetWidth(f32),
    /// Width follows from the tier's maximum area
    SetDepth(f32),
    SelectShelf(u32),
    /// Steps through the shelves the category filter admits, wrapping at either end
    CycleShelf(i32),
    BackToOverview,
    /// Overview pose plus a forced return to orbit navigation
    GeneralView,
    ZoomIn,
    ZoomOut,
    ToggleWalkMode,
    ToggleAutoReturnLock,
    SetCategoryFilter(CategoryFilter),
    CycleCategoryFilter,
    /// Tier default dimensions and the overview
    Recalibrate,
    /// Shrinks the store slightly so shelves are pulled together
    TightenLayout,
}

impl ViewerIntent {
    /// Hard resets move the live camera to the new target at once instead of easing there
    pub const fn snaps_camera(&self) -> bool {
        matches!(
            self,
            Self::SelectTier(_) | Self::Recalibrate | Self::GeneralView
        )
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerState {
    tier:             StoreTier,
    dimensions:       StoreDimensions,
    layout:           Layout,
    view:             CameraView,
    navigation:       NavigationMode,
    lock_auto_return: bool,
    category_filter:  CategoryFilter,
}

impl FromWorld for ViewerState {
    fn from_world(world: &mut World) -> Self {
        let layout_config = world
            .get_resource::<LayoutConfig>()
            .copied()
            .unwrap_or_default();
        let camera_config = world
            .get_resource::<CameraConfig>()
            .copied()
            .unwrap_or_default();
        Self::new(&layout_config, &camera_config)
    }
}

impl ViewerState {
    pub fn new(layout_config: &LayoutConfig, camera_config: &CameraConfig) -> Self {
        let tier = StoreTier::default();
        let dimensions = layout_config
            .dimension_bounds
            .clamp(tier.default_dimensions());
        Self {
            tier,
            dimensions,
            layout: compute_layout(dimensions, tier, layout_config),
            view: CameraView::overview(camera_config),
            navigation: NavigationMode::default(),
            lock_auto_return: true,
            category_filter: CategoryFilter::default(),
        }
    }

    pub const fn tier(&self) -> StoreTier { self.tier }

    pub const fn dimensions(&self) -> StoreDimensions { self.dimensions }

    pub const fn layout(&self) -> &Layout { &self.layout }

    pub const fn view(&self) -> &CameraView { &self.view }

    pub const fn navigation(&self) -> NavigationMode { self.navigation }

    pub const fn lock_auto_return(&self) -> bool { self.lock_auto_return }

    pub const fn category_filter(&self) -> CategoryFilter { self.category_filter }

    pub fn reduce(
        self,
        intent: ViewerIntent,
        layout_config: &LayoutConfig,
        camera_config: &CameraConfig,
    ) -> Self {
        let bounds = layout_config.dimension_bounds;
        match intent {
            ViewerIntent::SelectTier(tier) => Self {
                tier,
                dimensions: bounds.clamp(tier.default_dimensions()),
                view: CameraView::overview(camera_config),
                ..self
            }
            .relayout(layout_config),
            ViewerIntent::SetWidth(width) => Self {
                dimensions: bounds.with_width(width, self.tier.max_area()),
                ..self
            }
            .relayout(layout_config),
            ViewerIntent::SetDepth(depth) => Self {
                dimensions: bounds.with_depth(depth, self.tier.max_area()),
                ..self
            }
            .relayout(layout_config),
            ViewerIntent::SelectShelf(id) => self.focus(id, camera_config),
            ViewerIntent::CycleShelf(step) => self.cycle_shelf(step, camera_config),
            ViewerIntent::BackToOverview => Self {
                view: CameraView::overview(camera_config),
                ..self
            },
            ViewerIntent::GeneralView => Self {
                view: CameraView::overview(camera_config),
                navigation: NavigationMode::Orbit,
                ..self
            },
            ViewerIntent::ZoomIn => Self {
                view: self.view.zoomed(Zoom::In, camera_config),
                ..self
            },
            ViewerIntent::ZoomOut => Self {
                view: self.view.zoomed(Zoom::Out, camera_config),
                ..self
            },
            ViewerIntent::ToggleWalkMode => Self {
                navigation: self.navigation.toggled(),
                ..self
            },
            ViewerIntent::ToggleAutoReturnLock => Self {
                lock_auto_return: !self.lock_auto_return,
                ..self
            },
            ViewerIntent::SetCategoryFilter(category_filter) => Self {
                category_filter,
                ..self
            },
            ViewerIntent::CycleCategoryFilter => Self {
                category_filter: self.category_filter.next(),
                ..self
            },
            ViewerIntent::Recalibrate => Self {
                dimensions: bounds.clamp(self.tier.default_dimensions()),
                view: CameraView::overview(camera_config),
                ..self
            }
            .relayout(layout_config),
            ViewerIntent::TightenLayout => Self {
                dimensions: bounds.tightened(self.dimensions),
                ..self
            }
            .relayout(layout_config),
        }
    }

    /// Follows a runtime change of the layout tuning. Dimensions are pulled back inside the
    /// possibly narrower bounds before the layout is recomputed.
    pub fn retuned(self, layout_config: &LayoutConfig) -> Self {
        Self {
            dimensions: layout_config.dimension_bounds.clamp(self.dimensions),
            ..self
        }
        .relayout(layout_config)
    }

    /// Recomputes the layout for the current tier and dimensions.
    fn relayout(self, layout_config: &LayoutConfig) -> Self {
        Self {
            layout: compute_layout(self.dimensions, self.tier, layout_config),
            ..self
        }
    }

    fn focus(self, id: u32, camera_config: &CameraConfig) -> Self {
        let Some(shelf) = self.layout.shelf(id) else {
            warn!("ignoring selection of unknown shelf {id}");
            return self;
        };
        let view = CameraView::focus(shelf, camera_config);
        debug!("focusing shelf {id} ({})", shelf.label);
        Self { view, ..self }
    }

    fn cycle_shelf(self, step: i32, camera_config: &CameraConfig) -> Self {
        let visible: Vec<u32> = self
            .layout
            .visible(self.category_filter)
            .map(|shelf| shelf.id)
            .collect();
        let Some(count) = i64::try_from(visible.len()).ok().filter(|count| *count > 0) else {
            debug!("no shelves to cycle through for {:?}", self.category_filter);
            return self;
        };

        let current = self
            .view
            .focused_shelf()
            .and_then(|id| visible.iter().position(|visible_id| *visible_id == id))
            .and_then(|index| i64::try_from(index).ok());
        let next = match current {
            Some(index) => (index + i64::from(step)).rem_euclid(count),
            None if step < 0 => count - 1,
            None => 0,
        };

        let id = usize::try_from(next)
            .ok()
            .and_then(|index| visible.get(index).copied());
        match id {
            Some(id) => self.focus(id, camera_config),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ViewMode;
    use crate::store::Category;

    fn configs() -> (LayoutConfig, CameraConfig) {
        (LayoutConfig::default(), CameraConfig::default())
    }

    fn initial() -> ViewerState {
        let (layout_config, camera_config) = configs();
        ViewerState::new(&layout_config, &camera_config)
    }

    fn apply(state: ViewerState, intents: &[ViewerIntent]) -> ViewerState {
        let (layout_config, camera_config) = configs();
        intents.iter().fold(state, |state, intent| {
            state.reduce(*intent, &layout_config, &camera_config)
        })
    }

    #[test]
    fn starts_small_in_overview_with_lock_on() {
        let state = initial();
        assert_eq!(state.tier(), StoreTier::Small);
        assert_eq!(state.dimensions(), StoreDimensions::new(6.0, 10.0));
        assert_eq!(state.layout().shelves().len(), 17);
        assert_eq!(state.view().mode, ViewMode::Overview);
        assert_eq!(state.navigation(), NavigationMode::Orbit);
        assert!(state.lock_auto_return());
    }

    #[test]
    fn selecting_adult_nutrition_frames_its_midpoint() {
        let state = apply(initial(), &[ViewerIntent::SelectShelf(11)]);
        assert_eq!(state.view().mode, ViewMode::ShelfFocus { shelf_id: 11 });
        assert!((state.view().desired_target.y - 0.6).abs() < 1e-6);
    }

    #[test]
    fn unknown_shelf_is_ignored() {
        let before = apply(initial(), &[ViewerIntent::SelectShelf(11)]);
        let after = apply(before.clone(), &[ViewerIntent::SelectShelf(111)]);
        assert_eq!(after, before);
    }

    #[test]
    fn tier_change_clears_selection_and_resets_dimensions() {
        let state = apply(
            initial(),
            &[
                ViewerIntent::SetWidth(8.0),
                ViewerIntent::SelectShelf(11),
                ViewerIntent::SelectTier(StoreTier::Medium),
            ],
        );
        assert_eq!(state.view().mode, ViewMode::Overview);
        assert_eq!(state.dimensions(), StoreDimensions::new(9.0, 11.0));
        assert!(state.layout().shelf(111).is_some());

        let state = apply(state, &[ViewerIntent::SelectTier(StoreTier::Small)]);
        assert!(state.layout().shelf(11).is_some());
        assert!(state.layout().shelf(111).is_none());
    }

    #[test]
    fn resizing_keeps_focus_on_a_shelf_that_still_exists() {
        let state = apply(
            initial(),
            &[
                ViewerIntent::SelectShelf(16),
                ViewerIntent::SetWidth(4.0),
                ViewerIntent::SetDepth(13.0),
                ViewerIntent::TightenLayout,
            ],
        );
        let focused = state.view().focused_shelf();
        assert_eq!(focused, Some(16));
        assert!(focused.and_then(|id| state.layout().shelf(id)).is_some());
    }

    #[test]
    fn width_change_derives_depth_and_relayouts() {
        let state = apply(initial(), &[ViewerIntent::SetWidth(5.0)]);
        assert_eq!(state.dimensions(), StoreDimensions::new(5.0, 12.0));
        assert_eq!(state.layout().dimensions, state.dimensions());
    }

    #[test]
    fn out_of_range_dimensions_are_clamped() {
        let state = apply(initial(), &[ViewerIntent::SetDepth(100.0)]);
        assert!((state.dimensions().depth - 15.0).abs() < f32::EPSILON);
        assert!((state.dimensions().width - 4.0).abs() < 1e-5);
    }

    #[test]
    fn narrowed_bounds_pull_the_store_back_inside() {
        let mut layout_config = LayoutConfig::default();
        layout_config.dimension_bounds.max_width = 5.0;
        layout_config.dimension_bounds.min_depth = 11.0;

        let state = initial().retuned(&layout_config);
        assert_eq!(state.dimensions(), StoreDimensions::new(5.0, 11.0));
        assert_eq!(state.layout().dimensions, state.dimensions());
    }

    #[test]
    fn general_view_forces_orbit_but_back_keeps_walking() {
        let walking = apply(
            initial(),
            &[ViewerIntent::ToggleWalkMode, ViewerIntent::SelectShelf(7)],
        );
        let back = apply(walking.clone(), &[ViewerIntent::BackToOverview]);
        assert_eq!(back.navigation(), NavigationMode::Walk);
        assert_eq!(back.view().mode, ViewMode::Overview);

        let general = apply(walking, &[ViewerIntent::GeneralView]);
        assert_eq!(general.navigation(), NavigationMode::Orbit);
        assert_eq!(general.view().mode, ViewMode::Overview);
    }

    #[test]
    fn recalibrate_restores_tier_defaults() {
        let state = apply(
            initial(),
            &[
                ViewerIntent::SelectTier(StoreTier::Large),
                ViewerIntent::SetWidth(11.5),
                ViewerIntent::SelectShelf(211),
                ViewerIntent::Recalibrate,
            ],
        );
        assert_eq!(state.dimensions(), StoreDimensions::new(10.0, 12.0));
        assert_eq!(state.view().mode, ViewMode::Overview);
        assert_eq!(state.tier(), StoreTier::Large);
    }

    #[test]
    fn zoom_moves_only_the_desired_altitude() {
        let state = apply(initial(), &[ViewerIntent::ZoomIn, ViewerIntent::ZoomIn]);
        assert!((state.view().desired_position.y - 12.0).abs() < 1e-6);
        assert_eq!(state.view().mode, ViewMode::Overview);
    }

    #[test]
    fn cycling_walks_the_filtered_shelves_and_wraps() {
        let state = apply(
            initial(),
            &[ViewerIntent::SetCategoryFilter(CategoryFilter::Only(
                Category::Health,
            ))],
        );
        let forward = apply(state.clone(), &[ViewerIntent::CycleShelf(1)]);
        assert_eq!(forward.view().focused_shelf(), Some(16));

        let wrapped = apply(
            forward,
            &[
                ViewerIntent::CycleShelf(1),
                ViewerIntent::CycleShelf(1),
                ViewerIntent::CycleShelf(1),
                ViewerIntent::CycleShelf(1),
            ],
        );
        assert_eq!(wrapped.view().focused_shelf(), Some(16));

        let backward = apply(state, &[ViewerIntent::CycleShelf(-1)]);
        assert_eq!(backward.view().focused_shelf(), Some(20));
    }

    #[test]
    fn cycling_an_empty_filter_changes_nothing() {
        let state = apply(
            initial(),
            &[ViewerIntent::SetCategoryFilter(CategoryFilter::Only(
                Category::Kids,
            ))],
        );
        let cycled = apply(state.clone(), &[ViewerIntent::CycleShelf(1)]);
        assert_eq!(cycled, state);
    }

    #[test]
    fn filter_never_changes_the_layout() {
        let state = initial();
        let filtered = apply(state.clone(), &[ViewerIntent::CycleCategoryFilter]);
        assert_eq!(filtered.layout(), state.layout());
        assert_eq!(
            filtered.category_filter(),
            CategoryFilter::Only(Category::Cosmetics)
        );
    }

    #[test]
    fn only_hard_resets_snap_the_camera() {
        assert!(ViewerIntent::SelectTier(StoreTier::Small).snaps_camera());
        assert!(ViewerIntent::Recalibrate.snaps_camera());
        assert!(ViewerIntent::GeneralView.snaps_camera());
        assert!(!ViewerIntent::BackToOverview.snaps_camera());
        assert!(!ViewerIntent::SelectShelf(11).snaps_camera());
    }
}
