/*!
 * # kwicindex - KWIC index export for annotated corpus contexts
 *
 * A Rust library for building keyword-in-context index documents from
 * annotated corpus contexts.
 *
 * ## Features
 *
 * - Read context XML files (keyword-in-context records with lemma and
 *   part of speech annotations)
 * - Group contexts into keyed sublists with configurable grouping policies
 * - Export index documents in the legacy kwiclist XML format or as JSON
 * - Validate punctuation ordering and required attributes on import
 * - Batch processing of whole corpus directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `context_processor`: Context record model and XML import
 * - `export`: Index aggregation and serialization:
 *   - `export::key`: Grouping key policies
 *   - `export::item`: Projection of contexts into export items
 *   - `export::index`: Sublist aggregation and the document root
 *   - `export::xml`: Legacy kwiclist XML serialization
 *   - `export::json`: JSON serialization
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod context_processor;
pub mod errors;
pub mod export;
pub mod file_utils;

// Re-export main types for easier usage
pub use app_config::{Config, ExportFormat};
pub use app_controller::Controller;
pub use context_processor::{ContextCollection, ContextEntry, ContextKind, Lemma, PartOfSpeech};
pub use export::{GroupingPolicy, KwicDocument, KwicItem, SubList};
pub use errors::{AppError, ExportError, ValidationError, XmlError};
