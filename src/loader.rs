//! Dataset loading from JSON.

use crate::model::{Dataset, Lineage};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Dataset has no people")]
    Empty,
    #[error("Duplicate person id in lineage: {0}")]
    DuplicateId(String),
}

/// Parse the people/unions format.
pub fn load_dataset(source: &str) -> Result<Dataset, LoadError> {
    let dataset: Dataset = serde_json::from_str(source)?;
    if dataset.people.is_empty() {
        return Err(LoadError::Empty);
    }
    log::debug!(
        "loaded {} people and {} unions",
        dataset.people.len(),
        dataset.unions.len()
    );
    Ok(dataset)
}

/// Parse the flat format where each person lists its parents.
pub fn load_lineage(source: &str) -> Result<Lineage, LoadError> {
    let lineage: Lineage = serde_json::from_str(source)?;
    if lineage.people.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut seen = std::collections::HashSet::new();
    for person in &lineage.people {
        if !seen.insert(person.id.as_str()) {
            return Err(LoadError::DuplicateId(person.id.clone()));
        }
    }

    log::debug!("loaded lineage of {} people", lineage.people.len());
    Ok(lineage)
}
