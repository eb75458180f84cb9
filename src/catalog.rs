//! Pokemon catalog - loaded once, read-only afterwards

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::atlas::{AtlasGrid, AtlasOffset};

/// Catalog failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog unavailable ({path}): {reason}")]
    DataUnavailable { path: String, reason: String },
    #[error("record {position} rejected{}: {reason}", id_suffix(.id))]
    RecordInvalid {
        position: usize,
        id: Option<u32>,
        reason: String,
    },
    #[error("no pokemon with id {0}")]
    NotFound(u32),
}

fn id_suffix(id: &Option<u32>) -> String {
    id.map(|id| format!(" (id {id})")).unwrap_or_default()
}

/// A single catalog entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDescriptor {
    pub id: u32,
    pub name: String,
    pub sprite_url: String,
    #[serde(default)]
    pub type_label: Option<String>,
    /// Display position inside the catalog
    pub index: usize,
    pub atlas_offset: AtlasOffset,
}

/// A source record that could not become a descriptor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub position: usize,
    pub id: Option<u32>,
    pub reason: String,
}

impl RejectedRecord {
    pub fn to_error(&self) -> CatalogError {
        CatalogError::RecordInvalid {
            position: self.position,
            id: self.id,
            reason: self.reason.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    grid: AtlasGrid,
    entries: Vec<PokemonDescriptor>,
    rejected: Vec<RejectedRecord>,
}

impl Catalog {
    /// Read and map the data file at `path`.
    ///
    /// Only a missing or structurally broken file fails the whole load;
    /// individual bad records are skipped and kept in [`Catalog::rejected`].
    pub fn load(path: &Path, grid: AtlasGrid) -> Result<Self, CatalogError> {
        let unavailable = |reason: String| CatalogError::DataUnavailable {
            path: path.display().to_string(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let catalog = Self::from_json_str(&text, grid).map_err(|e| match e {
            CatalogError::DataUnavailable { reason, .. } => unavailable(reason),
            other => other,
        })?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            rejected = catalog.rejected.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json_str(text: &str, grid: AtlasGrid) -> Result<Self, CatalogError> {
        let unavailable = |reason: String| CatalogError::DataUnavailable {
            path: "<inline>".into(),
            reason,
        };
        let value: Value = serde_json::from_str(text).map_err(|e| unavailable(e.to_string()))?;
        let records = match value {
            Value::Array(records) => records,
            Value::Object(mut map) => match map
                .remove("pokemon")
                .or_else(|| map.remove("results"))
            {
                Some(Value::Array(records)) => records,
                _ => return Err(unavailable("expected a list of pokemon records".into())),
            },
            _ => return Err(unavailable("expected a list of pokemon records".into())),
        };
        Ok(Self::from_records(records, grid))
    }

    /// Map raw records in order, skipping the malformed ones.
    pub fn from_records(records: Vec<Value>, grid: AtlasGrid) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();
        let mut seen = HashSet::new();

        for (position, record) in records.iter().enumerate() {
            match parse_record(record) {
                Ok(raw) if !seen.insert(raw.id) => rejected.push(RejectedRecord {
                    position,
                    id: Some(raw.id),
                    reason: "duplicate id".into(),
                }),
                Ok(raw) => {
                    let index = entries.len();
                    entries.push(PokemonDescriptor {
                        id: raw.id,
                        name: raw.name,
                        sprite_url: raw.sprite_url,
                        type_label: raw.type_label,
                        index,
                        atlas_offset: grid.offset_for(index),
                    });
                }
                Err((id, reason)) => rejected.push(RejectedRecord {
                    position,
                    id,
                    reason,
                }),
            }
        }

        for record in &rejected {
            tracing::debug!(position = record.position, id = ?record.id, reason = %record.reason, "record skipped");
        }

        Self {
            grid,
            entries,
            rejected,
        }
    }

    /// Re-address every entry against a new sheet layout.
    pub fn with_grid(mut self, grid: AtlasGrid) -> Self {
        for entry in &mut self.entries {
            entry.atlas_offset = grid.offset_for(entry.index);
        }
        self.grid = grid;
        self
    }

    pub fn lookup(&self, id: u32) -> Result<&PokemonDescriptor, CatalogError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn get(&self, index: usize) -> Option<&PokemonDescriptor> {
        self.entries.get(index)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.lookup(id).is_ok()
    }

    pub fn entries(&self) -> &[PokemonDescriptor] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PokemonDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn grid(&self) -> AtlasGrid {
        self.grid
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// Ids of rejected records that carried a usable id
    pub fn rejected_ids(&self) -> Vec<u32> {
        self.rejected.iter().filter_map(|record| record.id).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PokemonDescriptor;
    type IntoIter = std::slice::Iter<'a, PokemonDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

struct RawRecord {
    id: u32,
    name: String,
    sprite_url: String,
    type_label: Option<String>,
}

fn parse_record(record: &Value) -> Result<RawRecord, (Option<u32>, String)> {
    let id = match record.get("id") {
        None | Some(Value::Null) => return Err((None, "missing id".into())),
        Some(value) => value
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| (None, format!("invalid id {value}")))?,
    };
    let name = pointer_string(record, "/name")
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| (Some(id), "missing name".to_string()))?;
    let sprite_url = pointer_string(record, "/sprites/front_default")
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| (Some(id), "missing sprite".to_string()))?;
    let type_label = pointer_string(record, "/types/0/type/name");

    Ok(RawRecord {
        id,
        name,
        sprite_url,
        type_label,
    })
}

fn pointer_string(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
