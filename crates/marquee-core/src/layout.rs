//! Grid placement math
//!
//! The grid has a fixed column count; the visible subset of tiles fills it
//! left-to-right, top-to-bottom. Placement is recomputed from scratch on
//! every visibility change; catalog sizes are tens of entries, so a full
//! rebuild wins over incremental diffing.

/// One grid position, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

/// Assign a (row, col) cell to each of `visible_count` tiles, filling
/// row-major with `columns` per row.
pub fn assign_cells(visible_count: usize, columns: u32) -> Vec<GridCell> {
    let columns = columns.max(1) as usize;

    (0..visible_count)
        .map(|i| GridCell {
            row: (i / columns) as i32,
            col: (i % columns) as i32,
        })
        .collect()
}

/// Status label for the visible/total count pair. All-or-none visible
/// shows the total alone.
pub fn count_label(visible: usize, total: usize) -> String {
    if visible == total || visible == 0 {
        format!("Games: {}", total)
    } else {
        format!("Games: {} / {}", visible, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fills_row_major() {
        let cells = assign_cells(7, 5);
        assert_eq!(cells[0], GridCell { row: 0, col: 0 });
        assert_eq!(cells[4], GridCell { row: 0, col: 4 });
        assert_eq!(cells[5], GridCell { row: 1, col: 0 });
        assert_eq!(cells[6], GridCell { row: 1, col: 1 });
    }

    #[test]
    fn one_cell_per_tile_no_overlap() {
        for count in [0, 1, 4, 5, 6, 23] {
            let cells = assign_cells(count, 5);
            assert_eq!(cells.len(), count);

            let unique: HashSet<_> = cells.iter().map(|c| (c.row, c.col)).collect();
            assert_eq!(unique.len(), count);
            assert!(cells.iter().all(|c| c.col < 5 && c.col >= 0 && c.row >= 0));
        }
    }

    #[test]
    fn single_column_grid() {
        let cells = assign_cells(3, 1);
        assert_eq!(
            cells,
            vec![
                GridCell { row: 0, col: 0 },
                GridCell { row: 1, col: 0 },
                GridCell { row: 2, col: 0 },
            ]
        );
    }

    #[test]
    fn count_label_total_only_when_all_or_none() {
        assert_eq!(count_label(2, 2), "Games: 2");
        assert_eq!(count_label(0, 2), "Games: 2");
        assert_eq!(count_label(0, 0), "Games: 0");
    }

    #[test]
    fn count_label_pair_when_filtered() {
        assert_eq!(count_label(1, 2), "Games: 1 / 2");
        assert_eq!(count_label(3, 10), "Games: 3 / 10");
    }
}
