//! Flat-index grid addressing and bounds logic

use crate::action::Action;

/// Check whether taking `action` from `index` stays on a `rows` x `cols` board.
///
/// Reconstructs (row, col) from the flat index and applies the action's
/// offset; a raw `index +/- 1` would silently wrap across row boundaries.
/// Must hold before [`index_from_action`] is trusted.
pub fn in_bounds(index: usize, action: Action, rows: usize, cols: usize) -> bool {
    let (dc, dr) = action.offset();
    let col = (index % cols) as i64 + dc as i64;
    let row = (index / cols) as i64 + dr as i64;
    col >= 0 && col < cols as i64 && row >= 0 && row < rows as i64
}

/// Flat index reached by taking `action` from `index`.
///
/// Only meaningful when [`in_bounds`] holds for the same arguments.
pub fn index_from_action(index: usize, action: Action, cols: usize) -> usize {
    let (dc, dr) = action.offset();
    (index as i64 + dr as i64 * cols as i64 + dc as i64) as usize
}

/// Bounds-checked neighbour lookup: both of the above in one call.
pub fn neighbor(index: usize, action: Action, rows: usize, cols: usize) -> Option<usize> {
    if in_bounds(index, action, rows, cols) {
        Some(index_from_action(index, action, cols))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_moves() {
        // 3x4 board, index 5 = (row 1, col 1)
        assert_eq!(neighbor(5, Action::Up, 3, 4), Some(1));
        assert_eq!(neighbor(5, Action::Right, 3, 4), Some(6));
        assert_eq!(neighbor(5, Action::Down, 3, 4), Some(9));
        assert_eq!(neighbor(5, Action::Left, 3, 4), Some(4));
    }

    #[test]
    fn test_use_targets_self() {
        assert_eq!(neighbor(5, Action::Use, 3, 4), Some(5));
        assert_eq!(neighbor(0, Action::Use, 1, 1), Some(0));
    }

    #[test]
    fn test_no_row_wrap() {
        // Index 4 = (row 1, col 0): moving left must not wrap to index 3.
        assert!(!in_bounds(4, Action::Left, 3, 4));
        assert_eq!(neighbor(4, Action::Left, 3, 4), None);
        // Index 3 = (row 0, col 3): moving right must not wrap to index 4.
        assert_eq!(neighbor(3, Action::Right, 3, 4), None);
    }

    #[test]
    fn test_edges() {
        assert_eq!(neighbor(1, Action::Up, 3, 4), None);
        assert_eq!(neighbor(9, Action::Down, 3, 4), None);
        assert_eq!(neighbor(0, Action::Left, 3, 4), None);
        assert_eq!(neighbor(11, Action::Right, 3, 4), None);
    }
}
