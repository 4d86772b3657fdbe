//! Generation depth and grid placement for the flat lineage format.
//!
//! A person's generation is 0 without parents, otherwise one more than the
//! deepest parent. Results are memoized per person, so the whole lineage is
//! resolved in O(people + parent links).

use crate::model::{Lineage, LineagePerson};
use std::collections::{HashMap, HashSet};

pub fn generations(lineage: &Lineage) -> HashMap<String, usize> {
    let by_id: HashMap<&str, &LineagePerson> =
        lineage.people.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut memo: HashMap<&str, usize> = HashMap::new();
    let mut visiting: HashSet<&str> = HashSet::new();

    for person in &lineage.people {
        generation_of(person, &by_id, &mut memo, &mut visiting);
    }

    memo.into_iter().map(|(id, g)| (id.to_string(), g)).collect()
}

fn generation_of<'a>(
    person: &'a LineagePerson,
    by_id: &HashMap<&'a str, &'a LineagePerson>,
    memo: &mut HashMap<&'a str, usize>,
    visiting: &mut HashSet<&'a str>,
) -> usize {
    if let Some(&generation) = memo.get(person.id.as_str()) {
        return generation;
    }
    visiting.insert(person.id.as_str());

    let mut generation = 0;
    for parent_id in &person.parents {
        let Some(&parent) = by_id.get(parent_id.as_str()) else {
            log::warn!("{} lists unknown parent {}", person.id, parent_id);
            continue;
        };
        if visiting.contains(parent.id.as_str()) {
            log::warn!("parent link {} -> {} closes a cycle, skipped", parent.id, person.id);
            continue;
        }
        generation = generation.max(generation_of(parent, by_id, memo, visiting) + 1);
    }

    visiting.remove(person.id.as_str());
    memo.insert(person.id.as_str(), generation);
    generation
}

/// Grid spacing for lineage placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSpacing {
    pub x_gap: f64,
    pub y_gap: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for GenerationSpacing {
    fn default() -> Self {
        Self {
            x_gap: 200.0,
            y_gap: 150.0,
            x_offset: 150.0,
            y_offset: 100.0,
        }
    }
}

/// A lineage member with its grid position. `(x, y)` is the box center.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPerson {
    pub id: String,
    pub name: String,
    pub generation: usize,
    pub slot: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineageLayout {
    pub people: Vec<PlacedPerson>,
    /// (parent, child)
    pub links: Vec<(String, String)>,
    pub width: f64,
    pub height: f64,
}

impl LineageLayout {
    /// People keep their input order inside a generation; no attempt is made
    /// to reduce crossings or center children under parents.
    pub fn compute(lineage: &Lineage, spacing: &GenerationSpacing) -> Self {
        let generation = generations(lineage);
        let mut next_slot: HashMap<usize, usize> = HashMap::new();

        let people: Vec<PlacedPerson> = lineage
            .people
            .iter()
            .map(|p| {
                let g = generation.get(&p.id).copied().unwrap_or(0);
                let slot = next_slot.entry(g).or_insert(0);
                let placed = PlacedPerson {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    generation: g,
                    slot: *slot,
                    x: *slot as f64 * spacing.x_gap + spacing.x_offset,
                    y: g as f64 * spacing.y_gap + spacing.y_offset,
                };
                *slot += 1;
                placed
            })
            .collect();

        let mut links = Vec::new();
        for child in &lineage.people {
            for parent in &child.parents {
                if *parent != child.id && generation.contains_key(parent) {
                    links.push((parent.clone(), child.id.clone()));
                }
            }
        }

        let width = people.iter().map(|p| p.x).fold(0.0, f64::max) + spacing.x_offset;
        let height = people.iter().map(|p| p.y).fold(0.0, f64::max) + spacing.y_offset;

        Self {
            people,
            links,
            width,
            height,
        }
    }

    pub fn person(&self, id: &str) -> Option<&PlacedPerson> {
        self.people.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_lineage;

    const LINEAGE: &str = r#"{ "people": [
        { "id": "gf", "name": "Grandfather" },
        { "id": "gm", "name": "Grandmother" },
        { "id": "f", "name": "Father", "parents": ["gf", "gm"] },
        { "id": "m", "name": "Mother" },
        { "id": "c", "name": "Child", "parents": ["f", "m"] },
        { "id": "s", "name": "Sibling", "parents": ["f", "m"] }
    ] }"#;

    #[test]
    fn test_generation_is_longest_parent_chain() {
        let g = generations(&load_lineage(LINEAGE).unwrap());

        assert_eq!(g["gf"], 0);
        assert_eq!(g["m"], 0);
        assert_eq!(g["f"], 1);
        // max(f = 1, m = 0) + 1
        assert_eq!(g["c"], 2);
        assert_eq!(g["s"], 2);
    }

    #[test]
    fn test_generation_holds_for_every_person() {
        let lineage = load_lineage(LINEAGE).unwrap();
        let g = generations(&lineage);

        for person in &lineage.people {
            let expected = person.parents.iter().map(|p| g[p] + 1).max().unwrap_or(0);
            assert_eq!(g[&person.id], expected, "generation of {}", person.id);
        }
    }

    #[test]
    fn test_child_listed_before_parent() {
        let lineage = load_lineage(
            r#"{ "people": [
                { "id": "c", "name": "C", "parents": ["p"] },
                { "id": "p", "name": "P", "parents": ["gp"] },
                { "id": "gp", "name": "GP" }
            ] }"#,
        )
        .unwrap();
        let g = generations(&lineage);

        assert_eq!(g["c"], 2);
        assert_eq!(g["p"], 1);
    }

    #[test]
    fn test_unknown_parent_and_cycle() {
        let lineage = load_lineage(
            r#"{ "people": [
                { "id": "a", "name": "A", "parents": ["b", "ghost"] },
                { "id": "b", "name": "B", "parents": ["a"] }
            ] }"#,
        )
        .unwrap();
        let g = generations(&lineage);

        assert_eq!(g["b"], 0);
        assert_eq!(g["a"], 1);
        assert!(!g.contains_key("ghost"));
    }

    #[test]
    fn test_grid_positions() {
        let lineage = load_lineage(LINEAGE).unwrap();
        let layout = LineageLayout::compute(&lineage, &GenerationSpacing::default());

        let gm = layout.person("gm").unwrap();
        assert_eq!((gm.slot, gm.x, gm.y), (1, 350.0, 100.0));

        let m = layout.person("m").unwrap();
        assert_eq!((m.generation, m.slot, m.x), (0, 2, 550.0));

        let s = layout.person("s").unwrap();
        assert_eq!((s.slot, s.x, s.y), (1, 350.0, 400.0));

        assert_eq!(layout.width, 550.0 + 150.0);
        assert_eq!(layout.height, 400.0 + 100.0);
    }

    #[test]
    fn test_links() {
        let lineage = load_lineage(LINEAGE).unwrap();
        let layout = LineageLayout::compute(&lineage, &GenerationSpacing::default());

        assert_eq!(layout.links.len(), 6);
        assert_eq!(layout.links[0], ("gf".to_string(), "f".to_string()));
    }

    #[test]
    fn test_layout_deterministic() {
        let lineage = load_lineage(LINEAGE).unwrap();
        let spacing = GenerationSpacing::default();
        assert_eq!(
            LineageLayout::compute(&lineage, &spacing),
            LineageLayout::compute(&lineage, &spacing)
        );
    }
}
