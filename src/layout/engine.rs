//! Scene layout: boxes per row and the lines between them.

use crate::card::{Card, current_year};
use crate::measure::TextMetrics;
use crate::model::Dataset;
use crate::scene::{EdgeKind, Entry, Scene};
use std::collections::HashMap;

use super::placement::{Pending, place_rows};
use super::types::{EdgePath, Layout, LayoutEdge, LayoutNode, NodeKind};

/// Layout engine configuration and computation.
pub struct LayoutEngine {
    pub(crate) metrics: TextMetrics,
    pub(crate) node_gap_x: f64,
    pub(crate) row_gap: f64,
    pub(crate) margin: f64,
    pub(crate) current_year: i32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
            node_gap_x: 40.0,
            row_gap: 80.0,
            margin: 40.0,
            current_year: current_year(),
        }
    }
}

impl LayoutEngine {
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Compute layout for the given scene.
    pub fn layout(&self, scene: &Scene, dataset: &Dataset) -> Layout {
        let rows: Vec<Vec<Pending>> = scene
            .rows
            .iter()
            .map(|row| {
                row.entries
                    .iter()
                    .filter_map(|entry| self.pending(entry, dataset))
                    .collect()
            })
            .collect();

        let placement = place_rows(rows, self.node_gap_x, self.row_gap, self.margin);

        let positions: HashMap<&str, &LayoutNode> =
            placement.nodes.iter().rev().filter_map(|n| Some((n.person_id()?, n))).collect();

        let edges = scene
            .edges
            .iter()
            .filter_map(|edge| {
                let from = positions.get(edge.from.as_str())?;
                let to = positions.get(edge.to.as_str())?;
                let path = match edge.kind {
                    EdgeKind::Spouse => EdgePath::Line {
                        from: from.center(),
                        to: to.center(),
                    },
                    EdgeKind::ParentChild => {
                        let start = (from.x + from.width / 2.0, from.y + from.height);
                        let end = (to.x + to.width / 2.0, to.y);
                        EdgePath::Curve {
                            from: start,
                            control: (start.0, (start.1 + end.1) / 2.0),
                            to: end,
                        }
                    }
                };
                Some(LayoutEdge {
                    kind: edge.kind,
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    union_kind: edge.union_kind.clone(),
                    path,
                })
            })
            .collect();

        Layout {
            nodes: placement.nodes,
            edges,
            width: placement.width,
            height: placement.height,
        }
    }

    fn pending(&self, entry: &Entry, dataset: &Dataset) -> Option<Pending> {
        match entry {
            Entry::Person { id, role } => {
                let Some(person) = dataset.person(id) else {
                    log::warn!("scene references unknown person {}", id);
                    return None;
                };
                let card = Card::for_person(person, self.current_year);
                let (width, height) = self.metrics.card_size(&card);
                Some(Pending {
                    kind: NodeKind::Person {
                        id: id.clone(),
                        role: role.clone(),
                        card,
                    },
                    width,
                    height,
                })
            }
            Entry::More(summary) => {
                let (width, height) = self.metrics.label_size(&summary.label());
                Some(Pending {
                    kind: NodeKind::Summary(summary.clone()),
                    width,
                    height,
                })
            }
        }
    }
}
