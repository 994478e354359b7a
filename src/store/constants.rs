//! Constants for the store module
//! Layout tuning defaults and tier presets used within store/

use bevy::color::Color;

// =============================================================================
// Layout Scaling
// =============================================================================

/// Nominal area of the baseline (Small) store; shelves are sized for this area
pub const LAYOUT_REFERENCE_AREA: f32 = 60.0;

/// Smallest length a scaled shelf may have
pub const LAYOUT_MIN_LENGTH: f32 = 0.4;

/// Smallest height a scaled shelf may have
pub const LAYOUT_MIN_HEIGHT: f32 = 0.4;

/// Tallest a scaled shelf may get, regardless of store size
pub const LAYOUT_MAX_HEIGHT: f32 = 2.5;

/// Smallest depth a scaled shelf may have
pub const LAYOUT_MIN_DEPTH: f32 = 0.25;

/// Maximum shelf length as a fraction of store depth
pub const LAYOUT_MAX_LENGTH_FRACTION: f32 = 0.9;

/// Floor for the maximum shelf length in very small stores
pub const LAYOUT_MAX_LENGTH_FLOOR: f32 = 0.5;

/// Maximum shelf depth as a fraction of store width
pub const LAYOUT_MAX_DEPTH_FRACTION: f32 = 0.5;

/// Floor for the maximum shelf depth in very narrow stores
pub const LAYOUT_MAX_DEPTH_FLOOR: f32 = 0.3;

// =============================================================================
// Overlap Resolution
// =============================================================================

/// Extra gap required between two footprints before they count as colliding
pub const OVERLAP_CLEARANCE: f32 = 0.2;

/// Distance a colliding shelf is pushed away from the store center per axis
pub const OVERLAP_PUSH_STEP: f32 = 0.15;

/// Penetration (per axis) below which two footprints are considered touching, not overlapping
pub const OVERLAP_TOLERANCE: f32 = 0.01;

/// Gap kept between a shelf footprint and the store walls
pub const LAYOUT_WALL_MARGIN: f32 = 0.1;

// =============================================================================
// Store Dimensions
// =============================================================================

/// Narrowest store the width control allows
pub const STORE_MIN_WIDTH: f32 = 3.0;

/// Widest store the width control allows
pub const STORE_MAX_WIDTH: f32 = 12.0;

/// Shallowest store the depth control allows
pub const STORE_MIN_DEPTH: f32 = 4.0;

/// Deepest store the depth control allows
pub const STORE_MAX_DEPTH: f32 = 15.0;

/// Increment applied per width/depth key press
pub const STORE_RESIZE_STEP: f32 = 0.5;

/// Shrink factor applied by "tighten layout"
pub const STORE_TIGHTEN_FACTOR: f32 = 0.98;

/// Neither dimension is tightened below this
pub const STORE_TIGHTEN_FLOOR: f32 = 4.0;

// =============================================================================
// Scene
// =============================================================================

/// Height of the three solid walls
pub const WALL_HEIGHT: f32 = 5.0;

/// Thickness of the three solid walls
pub const WALL_THICKNESS: f32 = 0.12;

/// Floor color
pub const FLOOR_COLOR: Color = Color::srgb(0.98, 0.988, 1.0);

/// Wall color
pub const WALL_COLOR: Color = Color::srgb(0.953, 0.957, 0.965);

/// Color of the floor grid lines (one metre cells)
pub const GRID_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);

/// Body color of the currently focused shelf
pub const SELECTED_SHELF_COLOR: Color = Color::srgb(1.0, 0.835, 0.31);

/// Color of the thin internal shelf boards
pub const SHELF_BOARD_COLOR: Color = Color::srgb(0.918, 0.918, 0.918);

/// Heights (as a fraction of shelf height) of the internal boards
pub const SHELF_BOARD_FACTORS: [f32; 3] = [0.22, 0.45, 0.68];

/// Horizontal offsets (as a fraction of shelf length, from its left end) of gondola dividers
pub const SHELF_DIVIDER_FACTORS: [f32; 3] = [0.2, 0.5, 0.8];

/// Color of the vertical gondola dividers
pub const SHELF_DIVIDER_COLOR: Color = Color::srgb(0.812, 0.812, 0.812);

/// Color of the refrigerator door panel
pub const FRIDGE_DOOR_COLOR: Color = Color::srgb(0.69, 0.745, 0.773);

/// Color of the checkout counter top
pub const CHECKOUT_TOP_COLOR: Color = Color::srgb(0.878, 0.878, 0.878);

/// Color of the footprint debug overlay
pub const FOOTPRINT_COLOR: Color = Color::srgb(0.13, 0.55, 0.13);

/// Color of footprints that overlap another shelf in the debug overlay
pub const OVERLAP_COLOR: Color = Color::srgb(0.86, 0.15, 0.15);
