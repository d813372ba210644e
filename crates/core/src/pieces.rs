//! Pieces module - tetromino shapes and rotation with wall kicks
//!
//! Shapes are stored as a table of mino offsets inside a 4x4 box, one entry
//! per kind and rotation. Rotation tries a short list of kick offsets and
//! takes the first one that fits.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// `SHAPES[kind.index()][rotation.index()]`, rotations in N, E, S, W order.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// Kick offsets tried in order when a rotation collides.
///
/// Horizontal nudges first (two columns covers the I bar against a wall),
/// then one row up for rotations against the floor or the stack.
pub const WALL_KICKS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0), (0, -1)];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Try to rotate a piece, kicking it off walls and the stack if needed.
///
/// Returns the new rotation and the kick offset that was applied, or `None`
/// if no kick fits. O pieces never rotate.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    is_valid: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    if kind == PieceKind::O {
        return None;
    }

    let target = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };
    let shape = get_shape(kind, target);

    WALL_KICKS
        .iter()
        .copied()
        .find(|&(dx, dy)| {
            shape
                .iter()
                .all(|&(mx, my)| is_valid(x + dx + mx, y + dy + my))
        })
        .map(|kick| (target, kick))
}
