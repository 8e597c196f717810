//! Form Tree
//!
//! In-memory editing of the nested element tree behind a drag-and-drop form
//! builder. The tree is a plain `Vec<Element>` owned by the caller; every
//! editing operation takes the current tree by reference and returns a new one.
//!
//! # Core Concepts
//!
//! - **Element**: a node in the tree, either a leaf or a container
//! - **TreeEditor**: insert, update, delete, duplicate and move operations
//! - **IdGenerator**: source of fresh element ids
//! - **Palette**: catalog of element kinds used to create new elements
//!
//! # Example
//!
//! ```
//! use form_tree::prelude::*;
//!
//! let editor = TreeEditor::new();
//! let mut ids = SequentialIdGenerator::new("f");
//!
//! let tree = editor.insert_at_root(&[], Element::leaf("name", "text", "Name"), None);
//! let tree = editor.insert_at_root(&tree, Element::container("sec", "section", "Section"), None);
//! let age = Element::leaf("age", "number", "Age");
//! let tree = editor.insert_into_container(&tree, &"sec".into(), age, None);
//! let tree = editor.duplicate_by_id(&tree, &"sec".into(), &mut ids);
//!
//! assert_eq!(count_elements(&tree), 5);
//! ```

mod editor;
mod element;
mod id;
mod options;
mod palette;
pub mod query;
mod validate;

pub use editor::{count_elements, DropTarget, TreeEditor};
pub use element::{Element, ElementId, ElementPatch, ElementShape, Properties};
pub use id::{fresh_id, IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
pub use options::EditorOptions;
pub use palette::{Palette, PaletteEntry};
pub use query::{find_by_id, outline, stats, TreeStats};
pub use validate::{ensure_valid, violations, Violation};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::{count_elements, DropTarget, TreeEditor};
    pub use crate::element::{Element, ElementId, ElementPatch, Properties};
    pub use crate::id::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
    pub use crate::options::EditorOptions;
    pub use crate::palette::Palette;
    pub use crate::query::{find_by_id, outline};
}
