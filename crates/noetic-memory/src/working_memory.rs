//! Working Memory buffer (spec section 4.2): a bounded ordered sequence of
//! Thoughts with importance-based eviction and a current-focus pointer.
//! Single-writer (its owning worker), many-reader via snapshot, per spec
//! section 5's shared-resource policy.

use std::collections::HashMap;

use thiserror::Error;

use crate::thought::Thought;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkingMemoryError {
    #[error("no resident thought with id {0}")]
    NotFound(String),
}

/// An immutable copy of the current buffer and focus, handed to readers
/// (engines, the Thought Generation Controller, the Persistence Adapter)
/// so they never observe a buffer mid-mutation.
#[derive(Debug, Clone)]
pub struct WorkingMemorySnapshot {
    pub thoughts: Vec<Thought>,
    pub focus: Option<String>,
}

/// Bounded ordered sequence of Thought (capacity K, default 7 per spec
/// section 6.5). On overflow the Thought with lowest importance is
/// evicted, ties broken by oldest timestamp (spec section 4.2).
pub struct WorkingMemory {
    capacity: usize,
    buffer: Vec<Thought>,
    focus: Option<String>,
    context: HashMap<String, String>,
}

impl WorkingMemory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "working memory capacity must be at least 1");
        Self {
            capacity,
            buffer: Vec::with_capacity(capacity),
            focus: None,
            context: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn context(&self) -> &HashMap<String, String> {
        &self.context
    }

    pub fn set_context(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.context.insert(key.into(), value.into());
    }

    /// Append `t`, setting focus to it. If this pushes the buffer over
    /// capacity, evict the Thought with minimum importance (oldest
    /// timestamp wins ties).
    pub fn add_thought(&mut self, t: Thought) {
        let new_id = t.id.clone();
        self.buffer.push(t);

        if self.buffer.len() > self.capacity {
            let evict_idx = self
                .buffer
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    a.importance()
                        .partial_cmp(&b.importance())
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| a.timestamp.cmp(&b.timestamp))
                })
                .map(|(idx, _)| idx)
                .expect("buffer is non-empty after push");

            let evicted = self.buffer.remove(evict_idx);
            if self.focus.as_deref() == Some(evicted.id.as_str()) {
                self.focus = None;
            }
        }

        self.focus = Some(new_id);
    }

    /// Immutable copy of the current buffer and focus.
    pub fn snapshot(&self) -> WorkingMemorySnapshot {
        WorkingMemorySnapshot {
            thoughts: self.buffer.clone(),
            focus: self.focus.clone(),
        }
    }

    /// Set focus to a resident Thought; fails with `NotFound` otherwise.
    pub fn set_focus(&mut self, id: &str) -> Result<(), WorkingMemoryError> {
        if self.buffer.iter().any(|t| t.id == id) {
            self.focus = Some(id.to_string());
            Ok(())
        } else {
            Err(WorkingMemoryError::NotFound(id.to_string()))
        }
    }

    /// Bounded tail for the Persistence Adapter (spec section 4.12).
    pub fn tail(&self, n: usize) -> Vec<Thought> {
        let start = self.buffer.len().saturating_sub(n);
        self.buffer[start..].to_vec()
    }

    pub fn get(&self, id: &str) -> Option<&Thought> {
        self.buffer.iter().find(|t| t.id == id)
    }
}
