/*!
 * KWIC index export pipeline.
 *
 * This module contains the core functionality for turning a sequence of
 * context entries into a keyword-in-context index document. It is split
 * into several submodules:
 *
 * - `key`: Grouping key policies
 * - `item`: Projection of context entries into export items
 * - `index`: Sublist aggregation and the document root
 * - `xml`: Serialization to the legacy kwiclist XML format
 * - `json`: Serialization to JSON
 */

// Re-export main types for easier usage
pub use self::index::{KwicDocument, SubList};
pub use self::item::KwicItem;
pub use self::key::GroupingPolicy;
pub use self::json::JsonExporter;
pub use self::xml::XmlExporter;

// Submodules
pub mod index;
pub mod item;
pub mod json;
pub mod key;
pub mod xml;
