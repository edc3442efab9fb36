use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{warn, debug};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::errors::{ValidationError, XmlError};

// @module: Context record model and XML import

// @const: Separator between text fragments when hashing a context
const CHECKSUM_SEPARATOR: &str = "\u{1F}\u{1F}";

/// Kind of a context occurrence.
///
/// Each kind maps to a fixed item tag in the export format. The mapping is
/// total so that the required `type` attribute is always emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContextKind {
    /// Group of contexts
    Group,
    /// Rubric item
    Rubric,
    /// Segment item
    Segment,
    /// Verse item
    Verse,
}

impl ContextKind {
    /// Returns the item tag used in the export format.
    pub fn export_tag(&self) -> &'static str {
        match self {
            Self::Group => "group_item",
            Self::Rubric => "rubric_item",
            Self::Segment => "seg_item",
            Self::Verse => "verse_item",
        }
    }

    /// Parses an item tag from the import format.
    pub fn from_export_tag(tag: &str) -> Option<Self> {
        match tag {
            "group_item" => Some(Self::Group),
            "rubric_item" => Some(Self::Rubric),
            "seg_item" => Some(Self::Segment),
            "verse_item" => Some(Self::Verse),
            _ => None,
        }
    }
}

/// Group state of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupKind {
    /// Parent of a context group
    Group,
    /// Member of a context group
    Member,
    /// Not part of a group
    #[default]
    None,
}

/// Speech type of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpeechKind {
    /// Direct speech
    Direct,
    /// Indirect speech
    Indirect,
    /// No speech marking
    #[default]
    None,
}

impl SpeechKind {
    /// Parses the `sp` attribute of the import format.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "direct" => Some(Self::Direct),
            "indirect" => Some(Self::Indirect),
            "" => Some(Self::None),
            _ => None,
        }
    }
}

/// Lemma annotation of a context keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lemma {
    // @field: Dictionary form of the keyword
    pub name: String,

    // @field: Denormalized part of speech of the lemma
    pub pos: Option<String>,
}

impl Lemma {
    /// Creates a lemma annotation without a part of speech.
    pub fn new(name: impl Into<String>) -> Self {
        Lemma {
            name: name.into(),
            pos: None,
        }
    }

    /// Creates a lemma annotation with a part of speech.
    pub fn with_pos(name: impl Into<String>, pos: impl Into<String>) -> Self {
        Lemma {
            name: name.into(),
            pos: Some(pos.into()),
        }
    }
}

/// Part of speech annotation of a context keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartOfSpeech {
    // @field: Display name of the part of speech
    pub name: String,
}

impl PartOfSpeech {
    /// Creates a part of speech annotation.
    pub fn new(name: impl Into<String>) -> Self {
        PartOfSpeech { name: name.into() }
    }
}

// @struct: Single context occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    // @field: Source position (page/line reference)
    pub location: String,

    // @field: Ordinal within the location
    pub number: u32,

    // @field: Context kind
    #[serde(rename = "type")]
    pub kind: ContextKind,

    // @field: Keyword of the context
    pub keyword: String,

    // @field: Text preceding the keyword
    pub preceding: String,

    // @field: Text following the keyword
    pub following: String,

    // @field: Punctuation preceding the keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_punctuation: Option<String>,

    // @field: Punctuation following the keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_punctuation: Option<String>,

    // @field: Speech marking
    #[serde(default)]
    pub speech: SpeechKind,

    // @field: Lemma annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<Lemma>,

    // @field: Part of speech annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<PartOfSpeech>,

    // @field: Group state
    #[serde(default)]
    pub group_kind: GroupKind,

    // @field: SHA-512 hash of the text fragments
    #[serde(skip)]
    pub checksum: String,
}

impl ContextEntry {
    /// Creates a new context entry without annotations.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location: impl Into<String>,
        number: u32,
        kind: ContextKind,
        keyword: impl Into<String>,
        preceding: impl Into<String>,
        following: impl Into<String>,
        init_punctuation: Option<String>,
        end_punctuation: Option<String>,
        speech: SpeechKind,
    ) -> Self {
        let mut entry = ContextEntry {
            location: location.into(),
            number,
            kind,
            keyword: keyword.into(),
            preceding: preceding.into(),
            following: following.into(),
            init_punctuation,
            end_punctuation,
            speech,
            lemma: None,
            pos: None,
            group_kind: GroupKind::None,
            checksum: String::new(),
        };
        entry.refresh_checksum();
        entry
    }

    // @creates: Validated context entry
    // @validates: Non-empty location
    #[allow(clippy::too_many_arguments)]
    pub fn new_validated(
        location: impl Into<String>,
        number: u32,
        kind: ContextKind,
        keyword: impl Into<String>,
        preceding: impl Into<String>,
        following: impl Into<String>,
        init_punctuation: Option<String>,
        end_punctuation: Option<String>,
        speech: SpeechKind,
    ) -> Result<Self, ValidationError> {
        let location = location.into();
        if location.is_empty() {
            return Err(ValidationError::MissingField("location"));
        }

        Ok(Self::new(
            location,
            number,
            kind,
            keyword,
            preceding,
            following,
            init_punctuation,
            end_punctuation,
            speech,
        ))
    }

    /// Attaches a lemma annotation.
    pub fn with_lemma(mut self, lemma: Lemma) -> Self {
        self.lemma = Some(lemma);
        self
    }

    /// Attaches a part of speech annotation.
    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Marks the entry as parent of a context group.
    pub fn with_group_kind(mut self, group_kind: GroupKind) -> Self {
        self.group_kind = group_kind;
        self
    }

    /// Recomputes the checksum from the current text fragments.
    ///
    /// Must be called after mutating any of the hashed fields.
    pub fn refresh_checksum(&mut self) {
        self.checksum = Self::checksum_of(
            &self.preceding,
            self.init_punctuation.as_deref(),
            &self.keyword,
            self.end_punctuation.as_deref(),
            &self.following,
        );
    }

    /// Returns a SHA-512 hash of the unit-separator-joined text fragments.
    pub fn checksum_of(
        preceding: &str,
        init_punctuation: Option<&str>,
        keyword: &str,
        end_punctuation: Option<&str>,
        following: &str,
    ) -> String {
        let joined = [
            preceding,
            init_punctuation.unwrap_or(""),
            keyword,
            end_punctuation.unwrap_or(""),
            following,
        ]
        .join(CHECKSUM_SEPARATOR);

        let mut hasher = Sha512::new();
        hasher.update(joined.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Display for ContextEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}: {}", self.location, self.number, self.preceding)?;
        if let Some(init) = &self.init_punctuation {
            write!(f, " {}", init)?;
        }
        write!(f, " [{}]", self.keyword)?;
        if let Some(end) = &self.end_punctuation {
            write!(f, " {}", end)?;
        }
        write!(f, " {}", self.following)
    }
}

// @struct: Partially read context item
#[derive(Debug, Default)]
struct ContextDraft {
    location: Option<String>,
    number: Option<u32>,
    kind: Option<ContextKind>,
    keyword: Option<String>,
    preceding: Option<String>,
    following: Option<String>,
    init_punctuation: Option<String>,
    end_punctuation: Option<String>,
    speech: SpeechKind,
    lemma_name: Option<String>,
    lemma_pos: Option<String>,
    pos_name: Option<String>,
}

impl ContextDraft {
    // @creates: Context entry from the accumulated fields
    // @validates: All required item attributes present
    fn finish(self) -> Result<ContextEntry, ValidationError> {
        let location = self.location.ok_or(ValidationError::MissingField("location"))?;
        let number = self.number.ok_or(ValidationError::MissingField("n"))?;
        let kind = self.kind.ok_or(ValidationError::MissingField("type"))?;
        let keyword = self.keyword.ok_or(ValidationError::MissingField("keyword"))?;
        let preceding = self.preceding.ok_or(ValidationError::MissingField("preceding"))?;
        let following = self.following.ok_or(ValidationError::MissingField("following"))?;

        let mut entry = ContextEntry::new_validated(
            location,
            number,
            kind,
            keyword,
            preceding,
            following,
            self.init_punctuation,
            self.end_punctuation,
            self.speech,
        )?;

        if let Some(name) = self.lemma_name {
            entry.lemma = Some(Lemma {
                name,
                pos: self.lemma_pos,
            });
        } else if self.lemma_pos.is_some() {
            warn!("Ignoring lemmaPos attribute without a lemma attribute");
        }

        if let Some(name) = self.pos_name {
            entry.pos = Some(PartOfSpeech { name });
        }

        if entry.kind == ContextKind::Group {
            entry.group_kind = GroupKind::Group;
        }

        Ok(entry)
    }
}

// @enum: Child element currently being read
#[derive(Debug, PartialEq)]
enum CurrentElement {
    None,
    Punctuation,
    Keyword,
}

/// Collection of context entries read from one source.
#[derive(Debug)]
pub struct ContextCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of context entries in document order
    pub entries: Vec<ContextEntry>,
}

impl ContextCollection {
    /// Create an empty context collection
    pub fn new(source_file: PathBuf) -> Self {
        ContextCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Read and validate a context XML file
    pub fn read_from_xml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context file: {}", path.display()))?;

        let entries = Self::parse_xml_string(&content)
            .with_context(|| format!("Failed to parse context file: {}", path.display()))?;

        debug!("Read {} context entries from {}", entries.len(), path.display());

        Ok(ContextCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse context XML content into entries, preserving document order.
    ///
    /// Every `item` element yields one entry. Punctuation children are checked
    /// for ordering violations the same way the interchange schema demands:
    /// at most one `init` and one `end` punctuation per item, `init` before
    /// the keyword and `end` after it.
    pub fn parse_xml_string(content: &str) -> Result<Vec<ContextEntry>, XmlError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut entries = Vec::new();
        let mut draft: Option<ContextDraft> = None;
        let mut current_element = CurrentElement::None;
        // Punctuation type last seen within the current item
        let mut last_punctuation = String::new();
        // Type of the punctuation element currently open
        let mut open_punctuation = String::new();

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|error| XmlError::parse(error, reader.buffer_position()))?;

            match event {
                Event::Start(start) => match start.name().as_ref() {
                    b"item" => {
                        draft = Some(Self::draft_from_attributes(&start, position)?);
                        last_punctuation.clear();
                    }
                    b"punctuation" => {
                        let Some(current) = draft.as_ref() else {
                            return Err(XmlError::UnexpectedContent {
                                message: "punctuation element outside of an item".to_string(),
                                position,
                            });
                        };

                        let punctuation_type = Self::attribute_value(&start, b"type", position)?
                            .ok_or_else(|| XmlError::UnexpectedContent {
                                message: "punctuation element without a type attribute".to_string(),
                                position,
                            })?;

                        Self::validate_punctuation(current, &last_punctuation, &punctuation_type, position)?;
                        last_punctuation = punctuation_type.clone();
                        open_punctuation = punctuation_type;
                        current_element = CurrentElement::Punctuation;
                    }
                    b"string" => {
                        if draft.is_none() {
                            return Err(XmlError::UnexpectedContent {
                                message: "string element outside of an item".to_string(),
                                position,
                            });
                        }
                        current_element = CurrentElement::Keyword;
                    }
                    _ => {}
                },
                Event::End(end) => {
                    match end.name().as_ref() {
                        b"item" => {
                            let Some(current) = draft.take() else {
                                return Err(XmlError::UnexpectedContent {
                                    message: "unmatched item end tag".to_string(),
                                    position,
                                });
                            };
                            entries.push(current.finish()?);
                            last_punctuation.clear();
                        }
                        b"punctuation" | b"string" => {
                            // A keyword element may legitimately be empty
                            if current_element == CurrentElement::Keyword {
                                if let Some(current) = draft.as_mut() {
                                    current.keyword.get_or_insert_with(String::new);
                                }
                            }
                            current_element = CurrentElement::None;
                        }
                        _ => {}
                    }
                }
                Event::Text(text) => {
                    let value = text
                        .unescape()
                        .map_err(|error| XmlError::parse(error, position))?;

                    if let Some(current) = draft.as_mut() {
                        match current_element {
                            CurrentElement::Punctuation => match open_punctuation.as_str() {
                                "init" => Self::append(&mut current.init_punctuation, &value),
                                "end" => Self::append(&mut current.end_punctuation, &value),
                                other => {
                                    warn!("Ignoring punctuation of unknown type '{}'", other);
                                }
                            },
                            CurrentElement::Keyword => Self::append(&mut current.keyword, &value),
                            CurrentElement::None => {}
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if entries.is_empty() {
            warn!("No context items found in XML content");
        }

        Ok(entries)
    }

    // @reads: Item attributes into a draft
    fn draft_from_attributes(element: &BytesStart, position: u64) -> Result<ContextDraft, XmlError> {
        let mut draft = ContextDraft::default();

        for attribute in element.attributes() {
            let attribute = attribute.map_err(|error| XmlError::parse(error, position))?;
            let value = attribute
                .unescape_value()
                .map_err(|error| XmlError::parse(error, position))?
                .into_owned();

            match attribute.key.as_ref() {
                b"following" => draft.following = Some(value),
                b"location" => draft.location = Some(value),
                b"n" => {
                    let number = value
                        .parse()
                        .map_err(|_| ValidationError::InvalidNumber { value, position })?;
                    draft.number = Some(number);
                }
                b"preceding" => draft.preceding = Some(value),
                b"type" => {
                    let kind = ContextKind::from_export_tag(&value)
                        .ok_or(ValidationError::UnknownItemType { value, position })?;
                    draft.kind = Some(kind);
                }
                b"sp" => match SpeechKind::from_attribute(&value) {
                    Some(speech) => draft.speech = speech,
                    None => warn!("Ignoring unknown speech type '{}'", value),
                },
                b"lemma" => draft.lemma_name = Some(value),
                b"lemmaPos" => draft.lemma_pos = Some(value),
                b"pos" => draft.pos_name = Some(value),
                _ => {}
            }
        }

        Ok(draft)
    }

    // @reads: Single attribute value from an element
    fn attribute_value(
        element: &BytesStart,
        name: &[u8],
        position: u64,
    ) -> Result<Option<String>, XmlError> {
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|error| XmlError::parse(error, position))?;
            if attribute.key.as_ref() == name {
                let value = attribute
                    .unescape_value()
                    .map_err(|error| XmlError::parse(error, position))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    // @validates: Order of punctuation tags within an item
    fn validate_punctuation(
        draft: &ContextDraft,
        last_type: &str,
        current_type: &str,
        position: u64,
    ) -> Result<(), ValidationError> {
        if last_type == current_type {
            Err(ValidationError::DuplicatePunctuation {
                punctuation_type: current_type.to_string(),
                position,
            })
        } else if last_type == "end" && current_type == "init" {
            Err(ValidationError::PunctuationOrder { position })
        } else if draft.keyword.is_some() && current_type == "init" {
            Err(ValidationError::InitPunctuationAfterKeyword { position })
        } else if draft.keyword.is_none() && current_type == "end" {
            Err(ValidationError::EndPunctuationBeforeKeyword { position })
        } else {
            Ok(())
        }
    }

    fn append(target: &mut Option<String>, value: &str) {
        match target {
            Some(existing) => existing.push_str(value),
            None => *target = Some(value.to_string()),
        }
    }

    /// Sort entries by keyword, location and number.
    ///
    /// Reproduces the ordering of the legacy export resource. The export
    /// pipeline itself never reorders, so this must run before aggregation.
    pub fn sort_for_export(&mut self) {
        self.entries.sort_by(|a, b| {
            (a.keyword.as_str(), a.location.as_str(), a.number)
                .cmp(&(b.keyword.as_str(), b.location.as_str(), b.number))
        });
    }

    /// Count of distinct keywords in the collection
    pub fn distinct_keyword_count(&self) -> usize {
        let mut keywords: Vec<&str> = self.entries.iter().map(|e| e.keyword.as_str()).collect();
        keywords.sort_unstable();
        keywords.dedup();
        keywords.len()
    }
}

impl fmt::Display for ContextCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Context Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
