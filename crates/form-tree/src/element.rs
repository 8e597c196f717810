//! Core element types for the form tree

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Schemaless key-value bag attached to every element.
///
/// The editor never interprets its contents; only the rendering layer gives
/// meaning to the keys of a particular kind.
pub type Properties = serde_json::Map<String, Value>;

/// Top-level keys with a dedicated field on [`Element`].
///
/// They are skipped when the flattened `fields` map is applied or serialized,
/// so a patch cannot change an id or turn a leaf into a container and a
/// serialized element never repeats a key.
const RESERVED_KEYS: [&str; 5] = ["id", "type", "label", "properties", "children"];

/// Property read by [`Element::column_count`].
const COLUMNS_PROPERTY: &str = "columns";

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

fn serialize_fields<S>(fields: &Properties, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(fields.iter().filter(|(key, _)| !is_reserved(key)))
}

/// Stored forms may carry `null` where a value is absent
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unique identifier of an element within a tree
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new ElementId
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId(id)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId(id.to_string())
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// Structural shape of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ElementShape {
    /// Has a children sequence (possibly empty)
    #[display(fmt = "Container")]
    Container,

    /// Has no children sequence
    #[display(fmt = "Leaf")]
    Leaf,
}

/// A single node of the form tree
///
/// The JSON shape is the one the persistence layer stores: `id`, `type`,
/// `label`, `properties`, an optional `children` array and any number of
/// additional top-level fields such as `placeholder` or `required`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique id, assigned at creation time
    pub id: ElementId,

    /// Open-ended kind tag ("text", "section", "image", ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,

    /// Kind-specific configuration
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,

    /// Present for containers, absent for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Element>>,

    /// Any other top-level fields
    #[serde(flatten, serialize_with = "serialize_fields")]
    pub fields: Properties,
}

impl Element {
    fn new(
        id: impl Into<ElementId>,
        kind: impl Into<String>,
        label: impl Into<String>,
        children: Option<Vec<Element>>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: label.into(),
            properties: Properties::new(),
            children,
            fields: Properties::new(),
        }
    }

    /// Create a new leaf element
    pub fn leaf(
        id: impl Into<ElementId>,
        kind: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(id, kind, label, None)
    }

    /// Create a new container element with no children
    pub fn container(
        id: impl Into<ElementId>,
        kind: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self::new(id, kind, label, Some(Vec::new()))
    }

    /// Replace the properties bag
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set a single property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set an additional top-level field; reserved keys are ignored
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Replace the children, turning the element into a container
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = Some(children);
        self
    }

    /// Returns the structural shape of this element
    pub fn shape(&self) -> ElementShape {
        if self.children.is_some() {
            ElementShape::Container
        } else {
            ElementShape::Leaf
        }
    }

    /// Returns true if this element has a children sequence
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Returns true if this element has no children sequence
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The children of a container, or an empty slice for a leaf
    pub fn children(&self) -> &[Element] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of layout columns, read from the `columns` property
    ///
    /// Falls back to 1 when the property is missing or not a positive integer.
    pub fn column_count(&self) -> usize {
        self.properties
            .get(COLUMNS_PROPERTY)
            .and_then(Value::as_u64)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(1)
    }

    /// Column a child at `index` renders in
    pub fn column_of(&self, index: usize) -> usize {
        index % self.column_count()
    }

    /// Children rendered in the given column, in order
    pub fn column_children(&self, column: usize) -> Vec<&Element> {
        self.children()
            .iter()
            .enumerate()
            .filter(|(index, _)| self.column_of(*index) == column)
            .map(|(_, child)| child)
            .collect()
    }
}

/// A partial update for a single element
///
/// `label`, `kind` and every entry of `fields` replace the matching top-level
/// value. `properties` is merged key by key into the existing bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// New kind tag
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Property entries to merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// Other top-level fields to overwrite
    #[serde(flatten, serialize_with = "serialize_fields")]
    pub fields: Properties,
}

impl ElementPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the kind
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Add a property entry to merge
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add a top-level field to overwrite
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns true if applying this patch cannot change anything
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.kind.is_none()
            && self.properties.as_ref().map_or(true, |p| p.is_empty())
            && self.fields.keys().all(|key| is_reserved(key))
    }

    /// Apply the patch to an element in place
    pub fn apply(&self, element: &mut Element) {
        if let Some(label) = &self.label {
            element.label = label.clone();
        }
        if let Some(kind) = &self.kind {
            element.kind = kind.clone();
        }
        if let Some(properties) = &self.properties {
            for (key, value) in properties {
                element.properties.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in &self.fields {
            if !is_reserved(key) {
                element.fields.insert(key.clone(), value.clone());
            }
        }
    }
}
