//! Neighborhood offsets for lattice queries

/// Moore neighborhood: the 8 cells surrounding a center, diagonals included.
///
/// ```text
/// ┌───┬───┬───┐
/// │ X │ X │ X │
/// ├───┼───┼───┤
/// │ X │ · │ X │
/// ├───┼───┼───┤
/// │ X │ X │ X │
/// └───┴───┴───┘
/// ```
///
/// Offsets are `(d_row, d_col)`. The center `(0, 0)` is never included.
pub const MOORE: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
