//! Palette of element kinds and the factory that instantiates them.
//!
//! A palette entry is a template: the kind tag, a default label, whether the
//! element holds children, and the default properties a freshly dropped
//! element starts with. Palettes can be loaded from JSON so that products can
//! ship their own catalog.

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::element::{Element, Properties};
use crate::id::IdGenerator;

/// Template for one element kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Kind tag given to created elements
    #[serde(rename = "type")]
    pub kind: String,

    /// Default label
    pub label: String,

    /// Whether created elements are containers
    #[serde(default)]
    pub container: bool,

    /// Default properties
    #[serde(default)]
    pub properties: Properties,
}

impl PaletteEntry {
    /// Create a leaf template with no default properties
    pub fn leaf(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            container: false,
            properties: Properties::new(),
        }
    }

    /// Create a container template with no default properties
    pub fn container(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            container: true,
            ..Self::leaf(kind, label)
        }
    }

    /// Replace the default properties
    ///
    /// Anything other than a JSON object leaves the properties empty.
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = match properties {
            Value::Object(map) => map,
            _ => Properties::new(),
        };
        self
    }
}

/// Ordered catalog of element kinds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the crate
    pub fn builtin() -> Self {
        let entries = vec![
            PaletteEntry::leaf("text", "Text").with_properties(json!({
                "placeholder": "",
                "required": false,
                "maxLength": null,
            })),
            PaletteEntry::leaf("textarea", "Long Text").with_properties(json!({
                "placeholder": "",
                "required": false,
                "rows": 4,
            })),
            PaletteEntry::leaf("email", "Email").with_properties(json!({
                "placeholder": "name@example.com",
                "required": false,
            })),
            PaletteEntry::leaf("number", "Number").with_properties(json!({
                "required": false,
                "min": null,
                "max": null,
                "step": 1,
            })),
            PaletteEntry::leaf("checkbox", "Checkbox").with_properties(json!({
                "required": false,
                "defaultChecked": false,
            })),
            PaletteEntry::leaf("select", "Dropdown").with_properties(json!({
                "required": false,
                "options": ["Option 1", "Option 2"],
            })),
            PaletteEntry::leaf("date", "Date").with_properties(json!({
                "required": false,
            })),
            PaletteEntry::leaf("heading", "Heading").with_properties(json!({
                "text": "Heading",
                "level": 2,
            })),
            PaletteEntry::leaf("paragraph", "Paragraph").with_properties(json!({
                "text": "",
            })),
            PaletteEntry::leaf("image", "Image").with_properties(json!({
                "src": "",
                "alt": "",
            })),
            PaletteEntry::leaf("divider", "Divider"),
            PaletteEntry::container("section", "Section").with_properties(json!({
                "columns": 1,
            })),
            PaletteEntry::container("columns", "Columns").with_properties(json!({
                "columns": 2,
            })),
        ];
        Self { entries }
    }

    /// Parse a palette from JSON
    ///
    /// Rejects catalogs that list the same kind twice.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let palette: Palette = serde_json::from_str(json).context("Failed to parse palette")?;

        let mut kinds = HashSet::new();
        for entry in &palette.entries {
            if entry.kind.is_empty() {
                bail!("Palette entry with label {:?} has an empty type", entry.label);
            }
            if !kinds.insert(entry.kind.as_str()) {
                bail!("Palette lists type {:?} more than once", entry.kind);
            }
        }

        Ok(palette)
    }

    /// Load a palette from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read palette at {}", path.display()))?;
        let palette = Self::from_json_str(&json)
            .with_context(|| format!("Invalid palette at {}", path.display()))?;
        debug!("loaded {} palette entries from {}", palette.len(), path.display());
        Ok(palette)
    }

    /// Add an entry, replacing any entry of the same kind in place
    pub fn insert(&mut self, entry: PaletteEntry) {
        match self.entries.iter_mut().find(|e| e.kind == entry.kind) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Get the entry for a kind
    pub fn get(&self, kind: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// All kinds, in catalog order
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.kind.as_str())
    }

    /// All entries, in catalog order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiate a new element of the given kind
    ///
    /// The element gets a fresh id from `generator`, the entry's label and a
    /// copy of its default properties. Container kinds start with an empty
    /// children sequence.
    pub fn create<G>(&self, kind: &str, generator: &mut G) -> Result<Element>
    where
        G: IdGenerator + ?Sized,
    {
        let entry = self
            .get(kind)
            .ok_or_else(|| anyhow!("Unknown element type {:?}", kind))?;

        let id = generator.next_id();
        let element = if entry.container {
            Element::container(id, &entry.kind, &entry.label)
        } else {
            Element::leaf(id, &entry.kind, &entry.label)
        };
        debug!("created {} element {}", entry.kind, element.id);
        Ok(element.with_properties(entry.properties.clone()))
    }
}
