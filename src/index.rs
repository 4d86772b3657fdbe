//! Derived lookup tables over a dataset.

use crate::model::{Dataset, Union};
use std::collections::{HashMap, HashSet};

/// Father/mother pair of a person. `partner1` of the union is the father.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parents {
    pub father: Option<String>,
    pub mother: Option<String>,
}

impl Parents {
    /// Present parents, father first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.father.as_deref().into_iter().chain(self.mother.as_deref())
    }
}

/// Relationship indexes. Immutable once built; a new dataset means a new index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyIndex {
    pub unions_by_person: HashMap<String, Vec<String>>,
    pub children_by_person: HashMap<String, Vec<String>>,
    pub parents_by_person: HashMap<String, Parents>,
    pub unions_by_id: HashMap<String, Union>,
}

impl FamilyIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let mut index = FamilyIndex::default();
        let mut seen_children: HashMap<&str, HashSet<&str>> = HashMap::new();

        for union in &dataset.unions {
            index.unions_by_id.insert(union.id.clone(), union.clone());

            let partners: Vec<&str> = union
                .partners()
                .filter(|p| {
                    let known = dataset.contains(p);
                    if !known {
                        log::warn!("union {} references unknown partner {}", union.id, p);
                    }
                    known
                })
                .collect();

            for &partner in &partners {
                let unions = index.unions_by_person.entry(partner.to_string()).or_default();
                if !unions.contains(&union.id) {
                    unions.push(union.id.clone());
                }
            }

            for child in &union.children {
                if !dataset.contains(child) {
                    log::warn!("union {} references unknown child {}", union.id, child);
                    continue;
                }

                for &partner in &partners {
                    if seen_children.entry(partner).or_default().insert(child.as_str()) {
                        index
                            .children_by_person
                            .entry(partner.to_string())
                            .or_default()
                            .push(child.clone());
                    }
                }

                let parents = index.parents_by_person.entry(child.clone()).or_default();
                if let Some(father) = union.partner1.as_deref().filter(|p| partners.contains(p)) {
                    parents.father = Some(father.to_string());
                }
                if let Some(mother) = union.partner2.as_deref().filter(|p| partners.contains(p)) {
                    parents.mother = Some(mother.to_string());
                }
            }
        }

        index
    }

    pub fn unions_of(&self, person: &str) -> &[String] {
        self.unions_by_person
            .get(person)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn children_of(&self, person: &str) -> &[String] {
        self.children_by_person
            .get(person)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn parents_of(&self, person: &str) -> Option<&Parents> {
        self.parents_by_person.get(person)
    }

    pub fn union(&self, id: &str) -> Option<&Union> {
        self.unions_by_id.get(id)
    }
}
