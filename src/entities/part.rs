//! Catalog entry types - priced spheres and flanges

use serde::{Deserialize, Serialize};

/// Which catalog collection an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    /// Rubber joint body
    Sphere,
    /// Connector; every quotation line uses two
    Flange,
}

impl PartKind {
    /// Both kinds, in display order
    pub const ALL: [PartKind; 2] = [PartKind::Sphere, PartKind::Flange];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Sphere => "sphere",
            PartKind::Flange => "flange",
        }
    }

    /// Name of the data file holding this collection
    pub fn file_name(&self) -> &'static str {
        match self {
            PartKind::Sphere => "spheres.json",
            PartKind::Flange => "flanges.json",
        }
    }
}

impl std::fmt::Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sphere" | "spheres" => Ok(PartKind::Sphere),
            "flange" | "flanges" => Ok(PartKind::Flange),
            _ => Err(format!("Invalid part kind: {}. Use 'sphere' or 'flange'", s)),
        }
    }
}

/// A priced catalog entry, identified by `(type_name, model)`
///
/// Spheres and flanges share this shape; the owning collection decides the kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Type name (e.g. "DN50")
    #[serde(default)]
    pub type_name: String,

    /// Model designation within the type
    #[serde(default)]
    pub model: String,

    /// Purchase cost of one unit
    #[serde(default)]
    pub cost_price: f64,
}

impl CatalogEntry {
    pub fn new(type_name: impl Into<String>, model: impl Into<String>, cost_price: f64) -> Self {
        Self {
            type_name: type_name.into(),
            model: model.into(),
            cost_price,
        }
    }

    /// Zero-cost stand-in used when a quotation line is built without a component
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// True if this entry has the given identity key
    pub fn matches(&self, type_name: &str, model: &str) -> bool {
        self.key() == (type_name, model)
    }

    /// Identity key
    pub fn key(&self) -> (&str, &str) {
        (&self.type_name, &self.model)
    }
}

impl std::fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} (cost: {:.2})", self.type_name, self.model, self.cost_price)
    }
}
