/*!
 * Projection of context entries into export items.
 *
 * A [`KwicItem`] is the immutable, serializable shape of one context
 * occurrence inside an index sublist. Projection resolves optional lemma
 * and part of speech annotations to their display names and maps the
 * context kind to the item tag of the export format.
 */

use serde::Serialize;

use crate::context_processor::{ContextEntry, GroupKind};
use crate::errors::ValidationError;

/// One entry of an index sublist.
///
/// Field order matches the attribute order of the legacy export format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KwicItem {
    /// Text following the keyword
    pub following: String,

    /// Lemma name, when the context was annotated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,

    /// Part of speech of the lemma, when the lemma carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemma_pos: Option<String>,

    /// Source position of the context
    pub location: String,

    /// Ordinal of the context within its location
    #[serde(rename = "n")]
    pub number: u32,

    /// Part of speech name, when the context was annotated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,

    /// Text preceding the keyword
    pub preceding: String,

    /// Item tag of the export format
    #[serde(rename = "type")]
    pub tag: String,

    /// Punctuation preceding the keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_punctuation: Option<String>,

    /// Keyword of the context
    pub keyword: String,

    /// Punctuation following the keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_punctuation: Option<String>,
}

impl KwicItem {
    /// Projects a context entry into an export item.
    ///
    /// The location is the one required attribute whose absence the type
    /// system cannot rule out (an empty string models an absent value);
    /// projection rejects it so that no partial document can be produced
    /// from an incomplete record.
    pub fn from_context(context: &ContextEntry) -> Result<Self, ValidationError> {
        if context.location.is_empty() {
            return Err(ValidationError::MissingField("location"));
        }

        // Group parents export with the group tag regardless of their kind
        let tag = if context.group_kind == GroupKind::Group {
            "group_item".to_string()
        } else {
            context.kind.export_tag().to_string()
        };

        Ok(KwicItem {
            following: context.following.clone(),
            lemma: context.lemma.as_ref().map(|lemma| lemma.name.clone()),
            lemma_pos: context.lemma.as_ref().and_then(|lemma| lemma.pos.clone()),
            location: context.location.clone(),
            number: context.number,
            pos: context.pos.as_ref().map(|pos| pos.name.clone()),
            preceding: context.preceding.clone(),
            tag,
            init_punctuation: context.init_punctuation.clone(),
            keyword: context.keyword.clone(),
            end_punctuation: context.end_punctuation.clone(),
        })
    }
}
