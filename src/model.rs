use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn from_code(code: &str) -> Self {
        match code {
            "M" => Self::Male,
            "F" => Self::Female,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Unknown",
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(Gender::from_code).unwrap_or_default())
    }
}

/// Kind of partnership. Drives the line style of spouse edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnionKind {
    Married,
    Partnered,
    #[default]
    Unknown,
    Other(String),
}

impl UnionKind {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "married" => Self::Married,
            "partnered" => Self::Partnered,
            "unknown" | "" => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Married => "married",
            Self::Partnered => "partnered",
            Self::Unknown => "unknown",
            Self::Other(s) => s,
        }
    }
}

impl<'de> Deserialize<'de> for UnionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kind = Option::<String>::deserialize(deserializer)?;
        Ok(kind.as_deref().map(UnionKind::from_str).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, deserialize_with = "text_or_number")]
    pub birth: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub death: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Union {
    pub id: String,
    #[serde(default)]
    pub partner1: Option<String>,
    #[serde(default)]
    pub partner2: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: UnionKind,
    #[serde(default)]
    pub children: Vec<String>,
}

impl Union {
    /// Present partners, `partner1` first.
    pub fn partners(&self) -> impl Iterator<Item = &str> {
        self.partner1
            .as_deref()
            .into_iter()
            .chain(self.partner2.as_deref())
    }
}

/// People keyed by id plus the unions connecting them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub people: HashMap<String, Person>,
    #[serde(default)]
    pub unions: Vec<Union>,
}

impl Dataset {
    pub fn contains(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    /// Where to start when no focus is given: the first partner of the first
    /// union, else the smallest person id.
    pub fn default_focus(&self) -> Option<&str> {
        self.unions
            .iter()
            .flat_map(|u| u.partners())
            .find(|p| self.contains(p))
            .or_else(|| self.people.keys().map(String::as_str).min())
    }
}

/// A person in the flat lineage format, linked directly to parents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineagePerson {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, deserialize_with = "text_or_number")]
    pub birth: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub death: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Lineage {
    #[serde(default)]
    pub people: Vec<LineagePerson>,
}

/// Years show up both as `"1950"` and `1950` in hand-written data files.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
