//! Data structures for layout computation.

use crate::card::Card;
use crate::model::UnionKind;
use crate::resolver::Summary;
use crate::scene::{EdgeKind, Role};

/// What a positioned box stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Person { id: String, role: Role, card: Card },
    Summary(Summary),
}

/// A positioned box in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub kind: NodeKind,
    /// Index of the scene row this box belongs to
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutNode {
    pub fn person_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Person { id, .. } => Some(id.as_str()),
            NodeKind::Summary(_) => None,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgePath {
    Line {
        from: (f64, f64),
        to: (f64, f64),
    },
    /// Quadratic curve
    Curve {
        from: (f64, f64),
        control: (f64, f64),
        to: (f64, f64),
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub kind: EdgeKind,
    pub from: String,
    pub to: String,
    pub union_kind: Option<UnionKind>,
    pub path: EdgePath,
}

/// The complete layout result.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    /// First box drawn for `id`.
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.person_id() == Some(id))
    }

    /// Person under a point in layout coordinates. Summary boxes are not selectable.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&str> {
        self.nodes
            .iter()
            .filter(|n| n.contains(x, y))
            .find_map(LayoutNode::person_id)
    }
}
