/*!
 * Sublist aggregation and the index document root.
 *
 * The aggregator performs a single left-to-right scan over the input
 * sequence: a new grouping key opens a new sublist at the end of the
 * document, an already seen key appends to its existing sublist. Neither
 * sublists nor items are ever reordered or deduplicated, which makes the
 * transformation deterministic and export output reproducible.
 */

use std::collections::HashMap;
use serde::Serialize;

use crate::context_processor::ContextEntry;
use crate::errors::ValidationError;
use crate::export::item::KwicItem;
use crate::export::key::GroupingPolicy;

/// Bucket of index items sharing one grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubList {
    /// Grouping key of the sublist
    pub key: String,

    /// Items in insertion order
    pub items: Vec<KwicItem>,
}

impl SubList {
    /// Creates an empty sublist for a key.
    pub fn new(key: impl Into<String>) -> Self {
        SubList {
            key: key.into(),
            items: Vec::new(),
        }
    }

    /// Projects a context entry and appends it to the sublist.
    pub fn add_context(&mut self, context: &ContextEntry) -> Result<(), ValidationError> {
        self.items.push(KwicItem::from_context(context)?);
        Ok(())
    }
}

/// Root of an index document: sublists in first-occurrence key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct KwicDocument {
    /// Sublists of the document
    pub sublists: Vec<SubList>,
}

impl KwicDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates context entries into a document with a caller-supplied key function.
    ///
    /// Single pass; the first projection failure aborts the run and no
    /// document is produced.
    pub fn aggregate<F>(contexts: &[ContextEntry], key_fn: F) -> Result<Self, ValidationError>
    where
        F: Fn(&ContextEntry) -> String,
    {
        let mut document = Self::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for context in contexts {
            let key = key_fn(context);
            let position = match positions.get(&key) {
                Some(&position) => position,
                None => {
                    document.sublists.push(SubList::new(key.clone()));
                    let position = document.sublists.len() - 1;
                    positions.insert(key, position);
                    position
                }
            };
            document.sublists[position].add_context(context)?;
        }

        Ok(document)
    }

    /// Aggregates context entries with a named grouping policy.
    pub fn from_contexts(
        contexts: &[ContextEntry],
        policy: GroupingPolicy,
    ) -> Result<Self, ValidationError> {
        Self::aggregate(contexts, |context| policy.key_of(context))
    }

    /// Total number of items across all sublists
    pub fn item_count(&self) -> usize {
        self.sublists.iter().map(|sublist| sublist.items.len()).sum()
    }

    /// True when the document holds no sublists
    pub fn is_empty(&self) -> bool {
        self.sublists.is_empty()
    }
}
