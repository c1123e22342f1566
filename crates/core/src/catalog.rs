//! Piece catalog: static shape, inset, spawn, and color tables.
//!
//! Every table is indexed by [`TileKind`] — a closed set of seven shapes —
//! with no dispatch. The four occupancy masks of a kind are generated at
//! compile time as the clockwise rotations of a single base silhouette, and
//! the insets are derived from the masks, so rotation index `r + 1` is always
//! the clockwise image of index `r` and the insets can never drift out of
//! sync with the cells.
//!
//! Rotation arguments are a caller contract: they must already be reduced
//! modulo [`ROTATION_COUNT`]. The catalog does not wrap them.

use arrayvec::ArrayVec;

use gridfall_types::{Rgb, TileKind, BOARD_COLS};

/// Number of rotation states per piece.
pub const ROTATION_COUNT: usize = 4;

/// Largest bounding-box dimension in the catalog.
pub const MAX_DIMENSION: i8 = 4;

/// Box-relative filled cells of one rotation state, without allocating.
pub type PieceCells = ArrayVec<(i8, i8), { (MAX_DIMENSION * MAX_DIMENSION) as usize }>;

/// Display colors for one tile kind. Pass-through data for the renderer;
/// the simulation never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileColors {
    pub base: Rgb,
    pub light: Rgb,
    pub dark: Rgb,
}

/// Empty margins inside the bounding box, one per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Insets {
    top: i8,
    left: i8,
    right: i8,
    bottom: i8,
}

struct TileInfo {
    dimension: i8,
    spawn_col: i8,
    spawn_row: i8,
    /// Row-major occupancy bitmasks, one per rotation state.
    masks: [u16; ROTATION_COUNT],
    insets: [Insets; ROTATION_COUNT],
    colors: TileColors,
}

const fn cell_bit(x: i8, y: i8, dim: i8) -> u16 {
    1u16 << ((y * dim + x) as u32)
}

const fn mask_from_cells(cells: [(i8, i8); 4], dim: i8) -> u16 {
    let mut mask = 0u16;
    let mut i = 0;
    while i < cells.len() {
        let (x, y) = cells[i];
        mask |= cell_bit(x, y, dim);
        i += 1;
    }
    mask
}

/// Clockwise quarter turn within the bounding box: (x, y) -> (dim-1-y, x).
const fn rotate_cw(mask: u16, dim: i8) -> u16 {
    let mut out = 0u16;
    let mut y = 0;
    while y < dim {
        let mut x = 0;
        while x < dim {
            if mask & cell_bit(x, y, dim) != 0 {
                out |= cell_bit(dim - 1 - y, x, dim);
            }
            x += 1;
        }
        y += 1;
    }
    out
}

const fn rotations_of(base: u16, dim: i8) -> [u16; ROTATION_COUNT] {
    let r1 = rotate_cw(base, dim);
    let r2 = rotate_cw(r1, dim);
    let r3 = rotate_cw(r2, dim);
    [base, r1, r2, r3]
}

const fn insets_of(mask: u16, dim: i8) -> Insets {
    let mut min_x = dim - 1;
    let mut max_x = 0;
    let mut min_y = dim - 1;
    let mut max_y = 0;
    let mut y = 0;
    while y < dim {
        let mut x = 0;
        while x < dim {
            if mask & cell_bit(x, y, dim) != 0 {
                if x < min_x {
                    min_x = x;
                }
                if x > max_x {
                    max_x = x;
                }
                if y < min_y {
                    min_y = y;
                }
                if y > max_y {
                    max_y = y;
                }
            }
            x += 1;
        }
        y += 1;
    }
    Insets {
        top: min_y,
        left: min_x,
        right: dim - 1 - max_x,
        bottom: dim - 1 - max_y,
    }
}

const fn brighten(c: u8) -> u8 {
    let v = c as u16 * 10 / 7;
    if v > 255 {
        255
    } else {
        v as u8
    }
}

const fn darken(c: u8) -> u8 {
    (c as u16 * 7 / 10) as u8
}

const fn shades(base: Rgb) -> TileColors {
    TileColors {
        base,
        light: Rgb::new(brighten(base.r), brighten(base.g), brighten(base.b)),
        dark: Rgb::new(darken(base.r), darken(base.g), darken(base.b)),
    }
}

const fn tile(dim: i8, base_cells: [(i8, i8); 4], base_color: Rgb) -> TileInfo {
    let masks = rotations_of(mask_from_cells(base_cells, dim), dim);
    TileInfo {
        dimension: dim,
        // Box centered horizontally, top edge on the first hidden row.
        spawn_col: (BOARD_COLS - dim) / 2,
        spawn_row: 0,
        masks,
        insets: [
            insets_of(masks[0], dim),
            insets_of(masks[1], dim),
            insets_of(masks[2], dim),
            insets_of(masks[3], dim),
        ],
        colors: shades(base_color),
    }
}

const COLOR_MIN: u8 = 35;
const COLOR_MAX: u8 = 255;

/// One entry per [`TileKind`], in `TileKind::ALL` order.
static CATALOG: [TileInfo; TileKind::COUNT] = [
    // I
    tile(
        4,
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        Rgb::new(COLOR_MIN, COLOR_MAX, COLOR_MAX),
    ),
    // J
    tile(
        3,
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rgb::new(COLOR_MIN, COLOR_MIN, COLOR_MAX),
    ),
    // L
    tile(
        3,
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rgb::new(COLOR_MAX, 127, COLOR_MIN),
    ),
    // O
    tile(
        2,
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        Rgb::new(COLOR_MAX, COLOR_MAX, COLOR_MIN),
    ),
    // S
    tile(
        3,
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rgb::new(COLOR_MIN, COLOR_MAX, COLOR_MIN),
    ),
    // T
    tile(
        3,
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rgb::new(128, COLOR_MIN, 128),
    ),
    // Z
    tile(
        3,
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rgb::new(COLOR_MAX, COLOR_MIN, COLOR_MIN),
    ),
];

/// Bounding-box dimension of a kind (2 for O, 4 for I, 3 otherwise).
pub fn dimension(kind: TileKind) -> i8 {
    CATALOG[kind.index()].dimension
}

/// Whether the box-relative cell (x, y) is filled at the given rotation.
/// Cells outside the bounding box are reported empty.
pub fn is_filled(kind: TileKind, x: i8, y: i8, rotation: usize) -> bool {
    let info = &CATALOG[kind.index()];
    if x < 0 || y < 0 || x >= info.dimension || y >= info.dimension {
        return false;
    }
    info.masks[rotation] & cell_bit(x, y, info.dimension) != 0
}

pub fn top_inset(kind: TileKind, rotation: usize) -> i8 {
    CATALOG[kind.index()].insets[rotation].top
}

pub fn left_inset(kind: TileKind, rotation: usize) -> i8 {
    CATALOG[kind.index()].insets[rotation].left
}

pub fn right_inset(kind: TileKind, rotation: usize) -> i8 {
    CATALOG[kind.index()].insets[rotation].right
}

pub fn bottom_inset(kind: TileKind, rotation: usize) -> i8 {
    CATALOG[kind.index()].insets[rotation].bottom
}

/// Column of the bounding box's left edge at spawn.
pub fn spawn_column(kind: TileKind) -> i8 {
    CATALOG[kind.index()].spawn_col
}

/// Row of the bounding box's top edge at spawn.
pub fn spawn_row(kind: TileKind) -> i8 {
    CATALOG[kind.index()].spawn_row
}

pub fn colors(kind: TileKind) -> TileColors {
    CATALOG[kind.index()].colors
}

/// Box-relative coordinates of every filled cell at the given rotation.
///
/// Zero-allocation helper for the board's placement loops; the capacity
/// covers a full bounding box even though tetromino masks fill four cells.
pub fn filled_cells(kind: TileKind, rotation: usize) -> PieceCells {
    let dim = dimension(kind);
    let mut cells = PieceCells::new();
    for y in 0..dim {
        for x in 0..dim {
            if is_filled(kind, x, y, rotation) {
                cells.push((x, y));
            }
        }
    }
    cells
}
