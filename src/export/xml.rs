use std::io::Write;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::ExportError;
use crate::export::index::{KwicDocument, SubList};
use crate::export::item::KwicItem;

// @module: Legacy kwiclist XML serialization

// @struct: XML document writer
pub struct XmlExporter {
    // @field: Emit two-space indentation
    indent: bool,
}

impl XmlExporter {
    /// Creates an exporter.
    pub fn new(indent: bool) -> Self {
        XmlExporter { indent }
    }

    /// Serializes a document to a kwiclist XML string.
    pub fn write_document(&self, document: &KwicDocument) -> Result<String, ExportError> {
        let mut buffer = Vec::new();

        if self.indent {
            let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);
            self.write_events(&mut writer, document)?;
        } else {
            let mut writer = Writer::new(&mut buffer);
            self.write_events(&mut writer, document)?;
        }

        let mut output = String::from_utf8(buffer)?;
        output.push('\n');
        Ok(output)
    }

    // @writes: Document event stream
    fn write_events<W: Write>(
        &self,
        writer: &mut Writer<W>,
        document: &KwicDocument,
    ) -> Result<(), ExportError> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("kwiclist")))?;

        for sublist in &document.sublists {
            self.write_sublist(writer, sublist)?;
        }

        writer.write_event(Event::End(BytesEnd::new("kwiclist")))?;
        Ok(())
    }

    // @writes: One sublist element with its key attribute
    fn write_sublist<W: Write>(
        &self,
        writer: &mut Writer<W>,
        sublist: &SubList,
    ) -> Result<(), ExportError> {
        let mut element = BytesStart::new("sublist");
        element.push_attribute(("key", sublist.key.as_str()));
        writer.write_event(Event::Start(element))?;

        for item in &sublist.items {
            self.write_item(writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("sublist")))?;
        Ok(())
    }

    // @writes: One item element, attributes in legacy order
    fn write_item<W: Write>(
        &self,
        writer: &mut Writer<W>,
        item: &KwicItem,
    ) -> Result<(), ExportError> {
        let number = item.number.to_string();
        let mut element = BytesStart::new("item");
        element.push_attribute(("following", item.following.as_str()));
        if let Some(lemma) = &item.lemma {
            element.push_attribute(("lemma", lemma.as_str()));
        }
        if let Some(lemma_pos) = &item.lemma_pos {
            element.push_attribute(("lemmaPos", lemma_pos.as_str()));
        }
        element.push_attribute(("location", item.location.as_str()));
        element.push_attribute(("n", number.as_str()));
        if let Some(pos) = &item.pos {
            element.push_attribute(("pos", pos.as_str()));
        }
        element.push_attribute(("preceding", item.preceding.as_str()));
        element.push_attribute(("type", item.tag.as_str()));
        writer.write_event(Event::Start(element))?;

        if let Some(init) = &item.init_punctuation {
            Self::write_punctuation(writer, "init", init)?;
        }

        writer.write_event(Event::Start(BytesStart::new("string")))?;
        writer.write_event(Event::Text(BytesText::new(&item.keyword)))?;
        writer.write_event(Event::End(BytesEnd::new("string")))?;

        if let Some(end) = &item.end_punctuation {
            Self::write_punctuation(writer, "end", end)?;
        }

        writer.write_event(Event::End(BytesEnd::new("item")))?;
        Ok(())
    }

    // @writes: One punctuation element with its type attribute
    fn write_punctuation<W: Write>(
        writer: &mut Writer<W>,
        punctuation_type: &str,
        value: &str,
    ) -> Result<(), ExportError> {
        let mut element = BytesStart::new("punctuation");
        element.push_attribute(("type", punctuation_type));
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new("punctuation")))?;
        Ok(())
    }
}
