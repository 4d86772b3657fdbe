//! Row placement.

use super::types::{LayoutNode, NodeKind};

/// A box waiting for a position.
pub struct Pending {
    pub kind: NodeKind,
    pub width: f64,
    pub height: f64,
}

pub struct RowPlacement {
    pub nodes: Vec<LayoutNode>,
    pub width: f64,
    pub height: f64,
}

/// Lay rows top to bottom, boxes left to right, each row centered on the widest.
pub fn place_rows(
    rows: Vec<Vec<Pending>>,
    node_gap_x: f64,
    row_gap: f64,
    margin: f64,
) -> RowPlacement {
    let row_widths: Vec<f64> = rows
        .iter()
        .map(|row| {
            let boxes: f64 = row.iter().map(|p| p.width).sum();
            boxes + row.len().saturating_sub(1) as f64 * node_gap_x
        })
        .collect();
    let max_row_width = row_widths.iter().copied().fold(0.0, f64::max);

    let mut nodes = Vec::new();
    let mut y = margin;

    for (row_idx, (row, row_width)) in rows.into_iter().zip(row_widths).enumerate() {
        let mut x = margin + (max_row_width - row_width) / 2.0;
        let mut max_height: f64 = 0.0;

        for pending in row {
            max_height = max_height.max(pending.height);
            nodes.push(LayoutNode {
                kind: pending.kind,
                row: row_idx,
                x,
                y,
                width: pending.width,
                height: pending.height,
            });
            x += pending.width + node_gap_x;
        }

        y += max_height + row_gap;
    }

    let height = if nodes.is_empty() { margin * 2.0 } else { y - row_gap + margin };

    RowPlacement {
        nodes,
        width: max_row_width + margin * 2.0,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Summary;

    fn pending(width: f64) -> Pending {
        Pending {
            kind: NodeKind::Summary(Summary {
                parent: "p".to_string(),
                depth: 1,
                count: 1,
            }),
            width,
            height: 50.0,
        }
    }

    #[test]
    fn test_rows_centered() {
        let placement = place_rows(
            vec![vec![pending(100.0)], vec![pending(100.0), pending(100.0)]],
            20.0,
            60.0,
            40.0,
        );

        assert_eq!(placement.width, 220.0 + 80.0);
        assert_eq!(placement.nodes[0].x, 40.0 + 60.0);
        assert_eq!(placement.nodes[1].x, 40.0);
        assert_eq!(placement.nodes[2].x, 40.0 + 120.0);
        assert_eq!(placement.nodes[2].row, 1);
    }

    #[test]
    fn test_rows_stack_vertically() {
        let rows = vec![vec![pending(100.0)], vec![pending(100.0)]];
        let placement = place_rows(rows, 20.0, 60.0, 40.0);

        assert_eq!(placement.nodes[0].y, 40.0);
        assert_eq!(placement.nodes[1].y, 40.0 + 50.0 + 60.0);
        assert_eq!(placement.height, 40.0 + 50.0 + 60.0 + 50.0 + 40.0);
    }
}
