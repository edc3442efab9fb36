/*!
 * Common test utilities for the kwicindex test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

use kwicindex::context_processor::{ContextEntry, ContextKind, Lemma, PartOfSpeech, SpeechKind};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample context XML file for testing
pub fn create_test_context_xml(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_CONTEXT_XML)
}

/// Sample context XML with three annotated items over two keywords
pub const SAMPLE_CONTEXT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<contexts>
  <item following="et terra autem" location="1ra1" n="1" preceding="In principio creauit deus" type="seg_item" sp="" lemma="celum" lemmaPos="noun" pos="noun">
    <string>celum</string>
    <punctuation type="end">.</punctuation>
  </item>
  <item following="erat inanis et uacua" location="1ra2" n="1" preceding="terra autem" type="seg_item" sp="direct">
    <punctuation type="init">,</punctuation>
    <string>terra</string>
  </item>
  <item following="super faciem abyssi" location="1rb1" n="2" preceding="et tenebre erant" type="rubric_item" sp="">
    <string>celum</string>
  </item>
</contexts>
"#;

/// Builds the in-memory entries matching the sample context XML
pub fn sample_entries() -> Vec<ContextEntry> {
    vec![
        ContextEntry::new(
            "1ra1",
            1,
            ContextKind::Segment,
            "celum",
            "In principio creauit deus",
            "et terra autem",
            None,
            Some(".".to_string()),
            SpeechKind::None,
        )
        .with_lemma(Lemma::with_pos("celum", "noun"))
        .with_pos(PartOfSpeech::new("noun")),
        ContextEntry::new(
            "1ra2",
            1,
            ContextKind::Segment,
            "terra",
            "terra autem",
            "erat inanis et uacua",
            Some(",".to_string()),
            None,
            SpeechKind::Direct,
        ),
        ContextEntry::new(
            "1rb1",
            2,
            ContextKind::Rubric,
            "celum",
            "et tenebre erant",
            "super faciem abyssi",
            None,
            None,
            SpeechKind::None,
        ),
    ]
}

/// Builds a minimal segment context entry for a keyword and location
pub fn segment_entry(keyword: &str, location: &str, number: u32) -> ContextEntry {
    ContextEntry::new(
        location,
        number,
        ContextKind::Segment,
        keyword,
        "before",
        "after",
        None,
        None,
        SpeechKind::None,
    )
}
