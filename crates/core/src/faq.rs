//! FAQ domain types.
//!
//! A `QaPair` is one question/answer entry extracted from the FAQ page.
//! The `KnowledgeBase` is the ordered, immutable snapshot of all cached
//! pairs that the answer service grounds its prompts in.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single question/answer pair from the FAQ page.
///
/// Both fields are non-empty at write time: extraction skips source blocks
/// that are missing either the heading or the body element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The in-memory knowledge base.
///
/// Built once during bootstrap and shared by reference into the request
/// handlers and the console loop. There is no interior mutability: a
/// refresh replaces the whole snapshot rather than mutating it in place,
/// so concurrent readers never need a lock.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pairs: Arc<[QaPair]>,
}

impl KnowledgeBase {
    pub fn new(pairs: Vec<QaPair>) -> Self {
        Self {
            pairs: pairs.into(),
        }
    }

    /// Every cached pair, store insertion order preserved.
    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<QaPair>> for KnowledgeBase {
    fn from(pairs: Vec<QaPair>) -> Self {
        Self::new(pairs)
    }
}
