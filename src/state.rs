//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog::{Catalog, CatalogError, PokemonDescriptor};
use crate::config::{Config, DEFAULT_ATLAS_PATH};
use crate::selection::{list_cells, DetailView, ListCell, RepeatPolicy, Selection};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Loaded once at startup; `Failed` when the data file is unusable
    pub catalog: DataResource<Catalog>,
    /// Sprite sheet shown in the header, never modified
    pub atlas_path: String,
    pub selection: Selection,
    pub repeat_policy: RepeatPolicy,
    /// Keyboard cursor (catalog position), independent of the selection
    pub cursor: usize,
    pub terminal_size: (u16, u16),
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: DataResource::Empty,
            atlas_path: DEFAULT_ATLAS_PATH.to_string(),
            selection: Selection::NoSelection,
            repeat_policy: RepeatPolicy::Keep,
            cursor: 0,
            terminal_size: (80, 24),
            message: None,
        }
    }
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: DataResource::Loaded(catalog),
            ..Default::default()
        }
    }

    /// State after the startup load, successful or not.
    pub fn from_load(loaded: Result<Catalog, CatalogError>, config: &Config) -> Self {
        let catalog = match loaded {
            Ok(catalog) => DataResource::Loaded(catalog),
            Err(error) => DataResource::Failed(error.to_string()),
        };
        Self {
            catalog,
            atlas_path: config.atlas.display().to_string(),
            repeat_policy: config.repeat_policy(),
            ..Default::default()
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.data()
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog().map_or(0, Catalog::len)
    }

    pub fn selected_descriptor(&self) -> Option<&PokemonDescriptor> {
        let id = self.selection.id()?;
        self.catalog()?.lookup(id).ok()
    }

    pub fn cursor_descriptor(&self) -> Option<&PokemonDescriptor> {
        self.catalog()?.get(self.cursor)
    }

    pub fn detail_view(&self) -> DetailView {
        match self.catalog() {
            Some(catalog) => DetailView::derive(catalog, self.selection),
            None => DetailView::Empty,
        }
    }

    pub fn list_cells(&self) -> Vec<ListCell<'_>> {
        match self.catalog() {
            Some(catalog) => list_cells(catalog, self.selection, self.cursor),
            None => Vec::new(),
        }
    }

    pub fn rejected_count(&self) -> usize {
        self.catalog().map_or(0, |catalog| catalog.rejected().len())
    }

    /// Clamp `index` into the catalog; returns whether the cursor moved.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        let len = self.catalog_len();
        if len == 0 {
            self.cursor = 0;
            return false;
        }
        let bounded = index.min(len - 1);
        if bounded != self.cursor {
            self.cursor = bounded;
            return true;
        }
        false
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("entries", ron_string(&self.catalog_len()))
                .entry("rejected", ron_string(&self.rejected_count()))
                .entry("grid", ron_string(&self.catalog().map(Catalog::grid)))
                .entry("error", ron_string(&self.catalog.error())),
            DebugSection::new("Selection")
                .entry("selected", ron_string(&self.selection))
                .entry("policy", ron_string(&self.repeat_policy))
                .entry("cursor", ron_string(&self.cursor)),
            DebugSection::new("Status")
                .entry("atlas", ron_string(&self.atlas_path))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
