//! Memoization of parsed trees by expression text.
//!
//! The cache never owns a tree. Entries hold a [`Weak`] handle, so a tree
//! lives exactly as long as some [`Expression`](crate::api::Expression) or
//! caller keeps its [`Arc`]. Every insert sweeps entries whose tree is gone,
//! which bounds the map by the number of live trees plus the entries that
//! died since the last insert.

use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::parser::Expr;

/// Thread-safe map from expression text to a weakly held parsed tree.
#[derive(Debug, Default)]
pub struct ExpressionCache {
    entries: DashMap<String, Weak<Expr>>,
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live tree for `text`. A dead handle is a miss.
    pub fn try_get(&self, text: &str) -> Option<Arc<Expr>> {
        self.entries.get(text).and_then(|entry| entry.upgrade())
    }

    /// Records `ast` for `text`, then drops every entry whose tree is gone.
    pub fn set(&self, text: &str, ast: &Arc<Expr>) {
        self.entries.insert(text.to_string(), Arc::downgrade(ast));

        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.strong_count() > 0);
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.entries.len(), "Swept expression cache");
        }
    }

    /// Number of entries, counting ones that died since the last sweep.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
