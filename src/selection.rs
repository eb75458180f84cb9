//! Selection state and the views derived from it
//!
//! `Selection` is the only mutable shared value in the app. Everything the
//! list and detail panels show is recomputed from (catalog, selection).

use serde::{Deserialize, Serialize};

use crate::atlas::AtlasOffset;
use crate::catalog::{Catalog, PokemonDescriptor};

/// Which entry is currently selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(u32),
}

impl Selection {
    pub fn id(&self) -> Option<u32> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.id() == Some(id)
    }

    /// Next state after the user activates `id`.
    pub fn activate(self, id: u32, policy: RepeatPolicy) -> Selection {
        match (self, policy) {
            (Selection::Selected(current), RepeatPolicy::Deselect) if current == id => {
                Selection::NoSelection
            }
            _ => Selection::Selected(id),
        }
    }
}

/// What activating the already-selected entry does
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatPolicy {
    /// Stay selected (no-op)
    #[default]
    Keep,
    /// Clear the selection
    Deselect,
}

impl RepeatPolicy {
    pub fn from_flag(deselect_on_repeat: bool) -> Self {
        if deselect_on_repeat {
            RepeatPolicy::Deselect
        } else {
            RepeatPolicy::Keep
        }
    }
}

/// What the detail panel shows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DetailView {
    /// Nothing selected: blank sprite, blank fields
    #[default]
    Empty,
    Entry {
        name: String,
        sprite_url: String,
        id: u32,
        type_label: String,
    },
}

impl DetailView {
    /// Derive the panel contents. An id missing from the catalog yields
    /// `Empty`, same as no selection.
    pub fn derive(catalog: &Catalog, selection: Selection) -> Self {
        let Some(id) = selection.id() else {
            return DetailView::Empty;
        };
        match catalog.lookup(id) {
            Ok(entry) => DetailView::from_descriptor(entry),
            Err(_) => DetailView::Empty,
        }
    }

    pub fn from_descriptor(entry: &PokemonDescriptor) -> Self {
        DetailView::Entry {
            name: entry.name.clone(),
            sprite_url: entry.sprite_url.clone(),
            id: entry.id,
            type_label: entry.type_label.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DetailView::Empty)
    }
}

/// One rendered cell of the sprite list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListCell<'a> {
    pub descriptor: &'a PokemonDescriptor,
    pub selected: bool,
    pub cursor: bool,
}

impl ListCell<'_> {
    pub fn id(&self) -> u32 {
        self.descriptor.id
    }

    pub fn offset(&self) -> AtlasOffset {
        self.descriptor.atlas_offset
    }
}

/// One cell per descriptor, in catalog order.
pub fn list_cells(catalog: &Catalog, selection: Selection, cursor: usize) -> Vec<ListCell<'_>> {
    catalog
        .iter()
        .map(|descriptor| ListCell {
            descriptor,
            selected: selection.is_selected(descriptor.id),
            cursor: descriptor.index == cursor,
        })
        .collect()
}
