/*!
 * Tests for index document serialization
 */

use anyhow::Result;
use kwicindex::context_processor::ContextCollection;
use kwicindex::export::{GroupingPolicy, JsonExporter, KwicDocument, XmlExporter};
use crate::common;

/// Test the exact compact XML output of a single-item document
#[test]
fn test_write_document_withSingleItem_shouldMatchLegacyShape() -> Result<()> {
    let context = common::segment_entry("cat", "p.3", 1);
    let document = KwicDocument::from_contexts(&[context], GroupingPolicy::Initial)?;

    let output = XmlExporter::new(false).write_document(&document)?;

    assert_eq!(
        output,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <kwiclist>\
         <sublist key=\"c\">\
         <item following=\"after\" location=\"p.3\" n=\"1\" preceding=\"before\" type=\"seg_item\">\
         <string>cat</string>\
         </item>\
         </sublist>\
         </kwiclist>\n"
    );

    Ok(())
}

/// Test annotated items emit optional attributes and punctuation elements
#[test]
fn test_write_document_withAnnotatedItems_shouldEmitOptionalParts() -> Result<()> {
    let contexts = common::sample_entries();
    let document = KwicDocument::from_contexts(&contexts, GroupingPolicy::Keyword)?;

    let output = XmlExporter::new(true).write_document(&document)?;

    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(output.contains("<kwiclist>"));
    assert!(output.contains("<sublist key=\"celum\">"));
    assert!(output.contains("<sublist key=\"terra\">"));
    assert!(output.contains("lemma=\"celum\""));
    assert!(output.contains("lemmaPos=\"noun\""));
    assert!(output.contains("pos=\"noun\""));
    assert!(output.contains("type=\"seg_item\""));
    assert!(output.contains("type=\"rubric_item\""));
    assert!(output.contains("<punctuation type=\"init\">,</punctuation>"));
    assert!(output.contains("<punctuation type=\"end\">.</punctuation>"));
    assert!(output.contains("<string>celum</string>"));
    assert!(output.contains("</kwiclist>"));

    // Unannotated items carry no lemma or pos attributes
    let terra_item = output
        .lines()
        .find(|line| line.contains("location=\"1ra2\""))
        .expect("terra item missing");
    assert!(!terra_item.contains("lemma="));
    assert!(!terra_item.contains("pos="));

    Ok(())
}

/// Test XML output escapes markup characters
#[test]
fn test_write_document_withMarkupCharacters_shouldEscape() -> Result<()> {
    let mut context = common::segment_entry("ioseph & maria", "1ra1", 1);
    context.preceding = "a <b>".to_string();
    context.refresh_checksum();

    let document = KwicDocument::from_contexts(&[context], GroupingPolicy::Keyword)?;
    let output = XmlExporter::new(false).write_document(&document)?;

    assert!(output.contains("preceding=\"a &lt;b&gt;\""));
    assert!(output.contains("<string>ioseph &amp; maria</string>"));

    Ok(())
}

/// Test the exported XML parses back into the same context fields
#[test]
fn test_write_document_roundTrip_shouldPreserveFields() -> Result<()> {
    let contexts = common::sample_entries();
    let document = KwicDocument::from_contexts(&contexts, GroupingPolicy::Keyword)?;

    let output = XmlExporter::new(true).write_document(&document)?;
    let reread = ContextCollection::parse_xml_string(&output)?;

    assert_eq!(reread.len(), contexts.len());

    // Keyword grouping leaves items ordered celum, celum, terra
    assert_eq!(reread[0].location, "1ra1");
    assert_eq!(reread[1].location, "1rb1");
    assert_eq!(reread[2].location, "1ra2");
    assert_eq!(reread[0].lemma, contexts[0].lemma);
    assert_eq!(reread[0].pos, contexts[0].pos);
    assert_eq!(reread[0].end_punctuation, contexts[0].end_punctuation);
    assert_eq!(reread[2].init_punctuation, contexts[1].init_punctuation);
    assert_eq!(reread[2].speech, Default::default());

    Ok(())
}

/// Test the JSON document shape
#[test]
fn test_write_json_document_withSampleEntries_shouldMatchShape() -> Result<()> {
    let contexts = common::sample_entries();
    let document = KwicDocument::from_contexts(&contexts, GroupingPolicy::Keyword)?;

    let output = JsonExporter::new(false).write_document(&document)?;
    let value: serde_json::Value = serde_json::from_str(&output)?;

    let sublists = value["sublists"].as_array().expect("sublists array");
    assert_eq!(sublists.len(), 2);
    assert_eq!(sublists[0]["key"], "celum");
    assert_eq!(sublists[1]["key"], "terra");

    let first_item = &sublists[0]["items"][0];
    assert_eq!(first_item["location"], "1ra1");
    assert_eq!(first_item["n"], 1);
    assert_eq!(first_item["type"], "seg_item");
    assert_eq!(first_item["lemma"], "celum");
    assert_eq!(first_item["lemmaPos"], "noun");
    assert_eq!(first_item["endPunctuation"], ".");
    assert!(first_item.get("initPunctuation").is_none());

    Ok(())
}

/// Test the flat context list JSON shape
#[test]
fn test_write_json_contexts_withSampleEntries_shouldSerializeRecords() -> Result<()> {
    let contexts = common::sample_entries();

    let output = JsonExporter::new(true).write_contexts(&contexts)?;
    let value: serde_json::Value = serde_json::from_str(&output)?;

    let records = value.as_array().expect("context array");
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["keyword"], "celum");
    assert_eq!(records[0]["type"], "SEGMENT");
    assert_eq!(records[1]["speech"], "DIRECT");
    assert_eq!(records[2]["type"], "RUBRIC");

    // Checksums never leave the process
    assert!(records[0].get("checksum").is_none());

    Ok(())
}
