//! Shared types and constants.
//!
//! Pure data with no dependencies, usable from the simulation core, the
//! terminal renderer, and the input layer alike.
//!
//! # Board dimensions
//!
//! The playfield is 10 columns wide and 22 rows tall: 20 visible rows plus 2
//! hidden buffer rows above them (rows 0 and 1). Pieces spawn in the hidden
//! region and enter the visible region as they descend. Rows above the grid
//! (negative row indices) are tolerated transiently during spawns and
//! rotations but are never stored.

/// Number of columns on the board.
pub const BOARD_COLS: i8 = 10;

/// Number of rows shown to the player.
pub const VISIBLE_ROWS: i8 = 20;

/// Hidden buffer rows above the visible region.
pub const HIDDEN_ROWS: i8 = 2;

/// Total grid height, hidden rows included.
pub const TOTAL_ROWS: i8 = VISIBLE_ROWS + HIDDEN_ROWS;

/// Frame budget for the render/input loop, in milliseconds (~50 fps).
pub const FRAME_MS: u64 = 20;

/// Logic clock rate at the start of a game, in cycles per second.
pub const BASE_GAME_SPEED: f32 = 1.0;

/// Added to the game speed every time a piece locks.
pub const SPEED_STEP: f32 = 0.035;

/// Level is the game speed scaled by this factor, truncated.
pub const LEVEL_FACTOR: f32 = 1.70;

/// Logic clock rate while soft-drop is held, in cycles per second.
pub const SOFT_DROP_CYCLES_PER_SECOND: f32 = 25.0;

/// Logic cycles skipped after a lock before the next piece starts falling.
pub const DROP_COOLDOWN_TICKS: u32 = 25;

/// Points awarded per cleared line.
pub const POINTS_PER_LINE: u32 = 100;

/// Identity of a tile shape.
///
/// The discriminant doubles as the index into the piece catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TileKind {
    /// Number of tile kinds.
    pub const COUNT: usize = 7;

    /// Every kind, in catalog order.
    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::I,
        TileKind::J,
        TileKind::L,
        TileKind::O,
        TileKind::S,
        TileKind::T,
        TileKind::Z,
    ];

    /// Index of this kind in the catalog tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A board cell: empty, or holding the identity of the piece that locked
/// there. The identity only matters for rendering color.
pub type Cell = Option<TileKind>;

/// A discrete player command, one per physical key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    SoftDropPress,
    SoftDropRelease,
    TogglePause,
    Start,
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
