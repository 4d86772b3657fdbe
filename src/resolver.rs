//! Ancestor, descendant and spouse queries over a [`FamilyIndex`].
//!
//! Every traversal is depth bounded, so cyclic data (a person listed as
//! their own ancestor) still terminates.

use crate::index::FamilyIndex;
use crate::model::{Dataset, UnionKind};
use std::collections::HashSet;

/// Traversal bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    pub max_ancestor_depth: usize,
    /// Generations of descendants shown before collapsing into a summary.
    /// `None` shows every generation up to `safety_depth`.
    pub visible_descendant_depth: Option<usize>,
    pub safety_depth: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_ancestor_depth: 10,
            visible_descendant_depth: Some(2),
            safety_depth: 64,
        }
    }
}

/// A relative at a given distance from the queried person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineal {
    pub id: String,
    pub depth: usize,
}

/// Stand-in for the children of a person at the visibility cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub parent: String,
    pub depth: usize,
    pub count: usize,
}

impl Summary {
    pub const ID: &'static str = "more";

    pub fn label(&self) -> String {
        format!("+{} more", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descendant {
    Person(Lineal),
    More(Summary),
}

impl Descendant {
    pub fn id(&self) -> &str {
        match self {
            Self::Person(l) => &l.id,
            Self::More(_) => Summary::ID,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Person(l) => l.depth,
            Self::More(s) => s.depth,
        }
    }
}

struct DescendantWalk {
    max_depth: usize,
    summarize: bool,
    on_path: HashSet<String>,
    listed: HashSet<(String, usize)>,
    out: Vec<Descendant>,
}

pub struct Resolver<'a> {
    dataset: &'a Dataset,
    index: &'a FamilyIndex,
    safety_depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(dataset: &'a Dataset, index: &'a FamilyIndex) -> Self {
        Self {
            dataset,
            index,
            safety_depth: TraversalLimits::default().safety_depth,
        }
    }

    pub fn with_safety_depth(mut self, depth: usize) -> Self {
        self.safety_depth = depth;
        self
    }

    /// Ancestors up to `max_depth` generations back, flattened.
    ///
    /// Both parents of a person are listed before either branch is expanded.
    /// The same ancestor may appear more than once when lines converge.
    pub fn ancestors_of(&self, person: &str, max_depth: usize) -> Vec<Lineal> {
        let mut out = Vec::new();
        self.collect_ancestors(person, 0, max_depth, &mut out);
        out
    }

    fn collect_ancestors(
        &self,
        person: &str,
        depth: usize,
        max_depth: usize,
        out: &mut Vec<Lineal>,
    ) {
        if depth >= max_depth {
            return;
        }
        let Some(parents) = self.index.parents_of(person) else {
            return;
        };

        for id in parents.iter() {
            out.push(Lineal {
                id: id.to_string(),
                depth: depth + 1,
            });
        }
        for id in parents.iter() {
            self.collect_ancestors(id, depth + 1, max_depth, out);
        }
    }

    /// Descendants up to `max_visible_depth`; children below the cutoff are
    /// collapsed into one [`Summary`] per cutoff person.
    ///
    /// A person is listed once per depth even when several lines lead to
    /// them, and a child already on the current line (malformed data) is
    /// skipped.
    pub fn descendants_of(&self, person: &str, max_visible_depth: usize) -> Vec<Descendant> {
        self.walk_descendants(person, max_visible_depth.min(self.safety_depth), true)
    }

    /// Every descendant down to the safety depth, without summaries.
    pub fn all_descendants_of(&self, person: &str) -> Vec<Lineal> {
        self.walk_descendants(person, self.safety_depth, false)
            .into_iter()
            .filter_map(|d| match d {
                Descendant::Person(l) => Some(l),
                Descendant::More(_) => None,
            })
            .collect()
    }

    fn walk_descendants(&self, person: &str, max_depth: usize, summarize: bool) -> Vec<Descendant> {
        if max_depth == 0 {
            return Vec::new();
        }
        let mut walk = DescendantWalk {
            max_depth,
            summarize,
            on_path: HashSet::new(),
            listed: HashSet::new(),
            out: Vec::new(),
        };
        self.collect_descendants(person, 0, &mut walk);
        walk.out
    }

    fn collect_descendants(&self, person: &str, depth: usize, walk: &mut DescendantWalk) {
        let children = self.index.children_of(person);

        if depth < walk.max_depth {
            walk.on_path.insert(person.to_string());
            let mut fresh = Vec::new();
            for id in children {
                if walk.on_path.contains(id) || !walk.listed.insert((id.clone(), depth + 1)) {
                    continue;
                }
                walk.out.push(Descendant::Person(Lineal {
                    id: id.clone(),
                    depth: depth + 1,
                }));
                fresh.push(id);
            }
            for id in fresh {
                self.collect_descendants(id, depth + 1, walk);
            }
            walk.on_path.remove(person);
        } else if walk.summarize && !children.is_empty() {
            walk.out.push(Descendant::More(Summary {
                parent: person.to_string(),
                depth: depth + 1,
                count: children.len(),
            }));
        }
    }

    /// Partners across every union of `person`, in union order.
    pub fn spouses_of(&self, person: &str) -> Vec<String> {
        self.index
            .unions_of(person)
            .iter()
            .filter_map(|id| self.index.union(id))
            .flat_map(|u| u.partners())
            .filter(|p| *p != person && self.dataset.contains(p))
            .map(str::to_string)
            .collect()
    }

    /// Kind of the first union `a` shares with `b`.
    pub fn union_type_between(&self, a: &str, b: &str) -> UnionKind {
        let theirs = self.index.unions_of(b);
        self.index
            .unions_of(a)
            .iter()
            .find(|id| theirs.contains(id))
            .and_then(|id| self.index.union(id))
            .map(|u| u.kind.clone())
            .unwrap_or(UnionKind::Unknown)
    }
}
