use crate::context_processor::ContextEntry;
use crate::errors::ExportError;
use crate::export::index::KwicDocument;

// @module: JSON serialization of index documents and context lists

// @struct: JSON writer
pub struct JsonExporter {
    // @field: Emit pretty-printed output
    pretty: bool,
}

impl JsonExporter {
    /// Creates an exporter.
    pub fn new(pretty: bool) -> Self {
        JsonExporter { pretty }
    }

    /// Serializes an index document to JSON.
    pub fn write_document(&self, document: &KwicDocument) -> Result<String, ExportError> {
        let mut output = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        output.push('\n');
        Ok(output)
    }

    /// Serializes a flat list of context entries to JSON.
    ///
    /// This is the shape of the legacy context download: an array of records
    /// in input order, annotations inlined, checksums omitted.
    pub fn write_contexts(&self, entries: &[ContextEntry]) -> Result<String, ExportError> {
        let mut output = if self.pretty {
            serde_json::to_string_pretty(entries)?
        } else {
            serde_json::to_string(entries)?
        };
        output.push('\n');
        Ok(output)
    }
}
