//! Tree assembly: the data-only description of what to draw around a focal person.

use crate::index::FamilyIndex;
use crate::model::{Dataset, UnionKind};
use crate::resolver::{Descendant, Lineal, Resolver, Summary, TraversalLimits};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Unknown person: {0}")]
    UnknownPerson(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Ancestors(usize),
    Center,
    Descendants(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Focus,
    /// Partner of the focal person, with the kind of their first shared union.
    Spouse(UnionKind),
    Relative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Person { id: String, role: Role },
    More(Summary),
}

impl Entry {
    pub fn person_id(&self) -> Option<&str> {
        match self {
            Self::Person { id, .. } => Some(id.as_str()),
            Self::More(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub band: Band,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Spouse,
    ParentChild,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneEdge {
    pub kind: EdgeKind,
    pub from: String,
    pub to: String,
    pub union_kind: Option<UnionKind>,
}

/// Rows in render order (deepest ancestors first, descendants last) plus
/// the edges connecting the people in them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub focus: String,
    pub rows: Vec<Row>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn person_ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .flat_map(|r| r.entries.iter())
            .filter_map(Entry::person_id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.person_ids().any(|p| p == id)
    }

    pub fn center(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.band == Band::Center)
    }
}

pub struct TreeAssembler<'a> {
    dataset: &'a Dataset,
    index: &'a FamilyIndex,
    limits: TraversalLimits,
}

impl<'a> TreeAssembler<'a> {
    pub fn new(dataset: &'a Dataset, index: &'a FamilyIndex, limits: TraversalLimits) -> Self {
        Self {
            dataset,
            index,
            limits,
        }
    }

    /// Build the scene around `focus`. `None` if the id is not in the dataset.
    pub fn assemble(&self, focus: &str) -> Option<Scene> {
        if !self.dataset.contains(focus) {
            return None;
        }
        let resolver =
            Resolver::new(self.dataset, self.index).with_safety_depth(self.limits.safety_depth);

        let mut rows = Vec::new();

        let ancestors =
            group_by_depth(resolver.ancestors_of(focus, self.limits.max_ancestor_depth));
        for (depth, ids) in ancestors.into_iter().rev() {
            rows.push(Row {
                band: Band::Ancestors(depth),
                entries: ids
                    .into_iter()
                    .map(|id| Entry::Person {
                        id,
                        role: Role::Relative,
                    })
                    .collect(),
            });
        }

        let mut center = vec![Entry::Person {
            id: focus.to_string(),
            role: Role::Focus,
        }];
        let mut seen_spouses = HashSet::new();
        for spouse in resolver.spouses_of(focus) {
            if seen_spouses.insert(spouse.clone()) {
                let kind = resolver.union_type_between(focus, &spouse);
                center.push(Entry::Person {
                    id: spouse,
                    role: Role::Spouse(kind),
                });
            }
        }
        rows.push(Row {
            band: Band::Center,
            entries: center,
        });

        let descendants = match self.limits.visible_descendant_depth {
            Some(depth) => resolver.descendants_of(focus, depth),
            None => resolver
                .all_descendants_of(focus)
                .into_iter()
                .map(Descendant::Person)
                .collect(),
        };
        let mut by_depth: BTreeMap<usize, Vec<Entry>> = BTreeMap::new();
        let mut seen: HashSet<(usize, String)> = HashSet::new();
        let mut summarized: HashSet<(usize, String)> = HashSet::new();
        for descendant in descendants {
            let depth = descendant.depth();
            let entry = match descendant {
                Descendant::Person(Lineal { id, .. }) => {
                    if !seen.insert((depth, id.clone())) {
                        continue;
                    }
                    Entry::Person {
                        id,
                        role: Role::Relative,
                    }
                }
                Descendant::More(summary) => {
                    if !summarized.insert((depth, summary.parent.clone())) {
                        continue;
                    }
                    Entry::More(summary)
                }
            };
            by_depth.entry(depth).or_default().push(entry);
        }
        for (depth, entries) in by_depth {
            rows.push(Row {
                band: Band::Descendants(depth),
                entries,
            });
        }

        let edges = self.connect(&rows);
        log::debug!(
            "assembled scene for {}: {} rows, {} edges",
            focus,
            rows.len(),
            edges.len()
        );

        Some(Scene {
            focus: focus.to_string(),
            rows,
            edges,
        })
    }

    fn connect(&self, rows: &[Row]) -> Vec<SceneEdge> {
        let rendered: HashSet<&str> = rows
            .iter()
            .flat_map(|r| r.entries.iter())
            .filter_map(Entry::person_id)
            .collect();
        let mut edges = Vec::new();

        // First union between a pair decides the line style.
        let mut paired: HashSet<(&str, &str)> = HashSet::new();
        for union in &self.dataset.unions {
            let (Some(a), Some(b)) = (union.partner1.as_deref(), union.partner2.as_deref()) else {
                continue;
            };
            if a == b || !rendered.contains(a) || !rendered.contains(b) {
                continue;
            }
            let key = if a < b { (a, b) } else { (b, a) };
            if paired.insert(key) {
                edges.push(SceneEdge {
                    kind: EdgeKind::Spouse,
                    from: a.to_string(),
                    to: b.to_string(),
                    union_kind: Some(union.kind.clone()),
                });
            }
        }

        let mut linked: HashSet<(&str, &str)> = HashSet::new();
        for parent in rows
            .iter()
            .flat_map(|r| r.entries.iter())
            .filter_map(Entry::person_id)
        {
            for child in self.index.children_of(parent) {
                if rendered.contains(child.as_str()) && linked.insert((parent, child.as_str())) {
                    edges.push(SceneEdge {
                        kind: EdgeKind::ParentChild,
                        from: parent.to_string(),
                        to: child.clone(),
                        union_kind: None,
                    });
                }
            }
        }

        edges
    }
}

/// Ids per depth, first occurrence order, no repeats within a depth.
fn group_by_depth(lineals: Vec<Lineal>) -> BTreeMap<usize, Vec<String>> {
    let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for Lineal { id, depth } in lineals {
        let ids = groups.entry(depth).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    groups
}

/// The tree as currently shown: one dataset, one focal person.
///
/// Every focus change re-assembles the whole scene.
pub struct Session {
    dataset: Dataset,
    index: FamilyIndex,
    limits: TraversalLimits,
    scene: Scene,
}

impl Session {
    pub fn new(dataset: Dataset, focus: &str, limits: TraversalLimits) -> Result<Self, TreeError> {
        let index = FamilyIndex::build(&dataset);
        let scene = TreeAssembler::new(&dataset, &index, limits)
            .assemble(focus)
            .ok_or_else(|| TreeError::UnknownPerson(focus.to_string()))?;

        Ok(Self {
            dataset,
            index,
            limits,
            scene,
        })
    }

    pub fn focus(&self) -> &str {
        &self.scene.focus
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &FamilyIndex {
        &self.index
    }

    pub fn limits(&self) -> TraversalLimits {
        self.limits
    }

    /// Center the tree on `id`. Unknown ids leave the session untouched.
    pub fn refocus(&mut self, id: &str) -> bool {
        match TreeAssembler::new(&self.dataset, &self.index, self.limits).assemble(id) {
            Some(scene) => {
                log::debug!("refocus {} -> {}", self.scene.focus, id);
                self.scene = scene;
                true
            }
            None => {
                log::debug!("refocus ignored, unknown person {}", id);
                false
            }
        }
    }

    /// Swap in a new dataset, keeping the current focus.
    pub fn reload(&mut self, dataset: Dataset) -> Result<(), TreeError> {
        let index = FamilyIndex::build(&dataset);
        let scene = TreeAssembler::new(&dataset, &index, self.limits)
            .assemble(self.focus())
            .ok_or_else(|| TreeError::UnknownPerson(self.focus().to_string()))?;

        self.dataset = dataset;
        self.index = index;
        self.scene = scene;
        Ok(())
    }
}
