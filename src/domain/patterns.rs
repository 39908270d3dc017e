use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::config::{PresetOptions, StageConfig};
use crate::error::ConfigError;

/// A named board setup: configuration plus seed pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    pub options: PresetOptions,
}

impl Preset {
    /// Build a preset on a `width * height` board from alive cell coordinates
    pub fn from_cells(
        name: impl Into<String>,
        config: StageConfig,
        cells: &[(usize, usize)],
    ) -> Self {
        let mut pattern = vec![vec![false; config.n_x_cells]; config.n_y_cells];
        for &(x, y) in cells {
            if let Some(cell) = pattern.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = true;
            }
        }
        Self {
            name: name.into(),
            options: PresetOptions::from_config(config).with_pattern(pattern),
        }
    }
}

/// Presets grouped by category, kept in insertion order.
///
/// Entries are shared templates: lookups hand out clones.
#[derive(Clone, Debug, Default)]
pub struct PresetCatalog {
    categories: Vec<(String, Vec<Preset>)>,
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a preset
    pub fn insert(&mut self, category: &str, preset: Preset) {
        let index = match self.categories.iter().position(|(name, _)| name == category) {
            Some(index) => index,
            None => {
                self.categories.push((category.to_string(), Vec::new()));
                self.categories.len() - 1
            }
        };
        let presets = &mut self.categories[index].1;
        match presets.iter_mut().find(|existing| existing.name == preset.name) {
            Some(existing) => *existing = preset,
            None => presets.push(preset),
        }
    }

    /// Owned copy of a preset's options
    pub fn get(&self, category: &str, name: &str) -> Option<PresetOptions> {
        self.categories
            .iter()
            .find(|(cat, _)| cat == category)
            .and_then(|(_, presets)| presets.iter().find(|preset| preset.name == name))
            .map(|preset| preset.options.clone())
    }

    /// Look up a `"Category/Name"` path
    pub fn find(&self, path: &str) -> Option<PresetOptions> {
        let (category, name) = path.split_once('/')?;
        self.get(category.trim(), name.trim())
    }

    /// Category names with their preset names
    pub fn names(&self) -> Vec<(&str, Vec<&str>)> {
        self.categories
            .iter()
            .map(|(cat, presets)| {
                (cat.as_str(), presets.iter().map(|p| p.name.as_str()).collect())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, presets)| presets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge presets from a `{category: {name: options}}` JSON document.
    /// Entries that are not objects are skipped.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, ConfigError> {
        let document: BTreeMap<String, BTreeMap<String, Value>> = serde_json::from_str(json)?;
        let mut added = 0;
        for (category, entries) in document {
            for (name, value) in entries {
                match PresetOptions::from_value(&value) {
                    Some(options) => {
                        self.insert(&category, Preset { name, options });
                        added += 1;
                    }
                    None => warn!(%category, %name, "skipping preset that is not an object"),
                }
            }
        }
        Ok(added)
    }

    /// Load extra presets from a JSON file
    pub fn extend_from_file(
        &mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<usize, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        self.extend_from_json(&text)
    }
}

/// Classic patterns on 10×10 boards
pub mod presets {
    use super::*;

    fn board(enable_guides: bool) -> StageConfig {
        StageConfig {
            n_x_cells: 10,
            n_y_cells: 10,
            cell_w: 15,
            cell_h: 15,
            guide_width: 1,
            enable_guides,
            speed: 6,
        }
    }

    /// Four blocks
    pub fn block() -> Preset {
        Preset::from_cells(
            "Block",
            board(true),
            &[
                (1, 1), (2, 1), (7, 1), (8, 1),
                (1, 2), (2, 2), (7, 2), (8, 2),
                (1, 5), (2, 5),
                (1, 6), (2, 6), (6, 6), (7, 6),
                (6, 7), (7, 7),
            ],
        )
    }

    /// Two beehives
    pub fn beehive() -> Preset {
        Preset::from_cells(
            "Beehive",
            board(true),
            &[
                (4, 2), (5, 2),
                (3, 3), (6, 3),
                (4, 4), (5, 4),
                (2, 6), (3, 6),
                (1, 7), (4, 7),
                (2, 8), (3, 8),
            ],
        )
    }

    /// Two loaves
    pub fn loaf() -> Preset {
        Preset::from_cells(
            "Loaf",
            board(true),
            &[
                (1, 1), (2, 1),
                (0, 2), (3, 2),
                (1, 3), (3, 3),
                (2, 4),
                (6, 6), (7, 6),
                (5, 7), (8, 7),
                (6, 8), (8, 8),
                (7, 9),
            ],
        )
    }

    /// Period 2 oscillator
    pub fn toad() -> Preset {
        Preset::from_cells(
            "Toad",
            board(false),
            &[
                (4, 4), (5, 4), (6, 4),
                (3, 5), (4, 5), (5, 5),
            ],
        )
    }

    /// Period 2 oscillator
    pub fn beacon() -> Preset {
        Preset::from_cells(
            "Beacon",
            board(true),
            &[
                (2, 2), (3, 2),
                (2, 3), (3, 3),
                (4, 4), (5, 4),
                (4, 5), (5, 5),
            ],
        )
    }

    /// Two gliders heading south-east
    pub fn glider() -> Preset {
        Preset::from_cells(
            "Glider",
            board(true),
            &[
                (2, 1),
                (3, 2),
                (1, 3), (2, 3), (3, 3),
                (6, 5),
                (7, 6),
                (5, 7), (6, 7), (7, 7),
            ],
        )
    }

    /// Lightweight spaceship
    pub fn lwss() -> Preset {
        Preset::from_cells(
            "Lightweight spaceship",
            board(true),
            &[
                (3, 2), (6, 2),
                (7, 3),
                (3, 4), (7, 4),
                (4, 5), (5, 5), (6, 5), (7, 5),
            ],
        )
    }

    /// Built-in catalog
    pub fn catalog() -> PresetCatalog {
        let mut catalog = PresetCatalog::new();
        for preset in [block(), beehive(), loaf()] {
            catalog.insert("Still lifes", preset);
        }
        for preset in [toad(), beacon()] {
            catalog.insert("Oscillators", preset);
        }
        for preset in [glider(), lwss()] {
            catalog.insert("Spaceships", preset);
        }
        catalog
    }
}
