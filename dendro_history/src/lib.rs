// Copyright 2026 the Dendro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dendro History: undo/redo snapshot stacks.
//!
//! This crate focuses on the _bookkeeping_ of history: two stacks of
//! full-state snapshots plus the branch-invalidation rule. It does **not**
//! know how to capture or restore state; callers snapshot their model into
//! some cheap-to-clone `S` and feed it through [`History`].
//!
//! The protocol mirrors how an interactive editor drives undo:
//!
//! 1. Immediately before every mutating operation, [`History::push`] the
//!    pre-operation snapshot. Pushing clears the redo stack — a new edit
//!    invalidates any forward history.
//! 2. To undo, hand [`History::undo`] the *current* snapshot; it goes onto
//!    the redo stack and the most recent undo snapshot is returned for the
//!    caller to restore.
//! 3. [`History::redo`] is symmetric.
//!
//! Both stacks are unbounded and start empty; [`History::can_undo`] and
//! [`History::can_redo`] drive button enablement.
//!
//! ## Minimal example
//!
//! ```rust
//! use dendro_history::History;
//!
//! // Using a number as a stand-in for an application snapshot.
//! let mut history = History::new();
//! let mut state = 1;
//!
//! // Mutate: push the pre-op snapshot first.
//! history.push(state);
//! state = 2;
//!
//! // Undo restores the snapshot taken before the mutation.
//! state = history.undo(state).unwrap();
//! assert_eq!(state, 1);
//!
//! // Redo brings the mutated state back.
//! state = history.redo(state).unwrap();
//! assert_eq!(state, 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Two-stack undo/redo history over full-state snapshots.
///
/// `History` never inspects `S`; it only moves snapshots between its two
/// stacks and the caller. Deep-copy snapshots keep the protocol simple; a
/// caller chasing memory can make `S` a persistent (structurally shared)
/// structure without changing anything here.
#[derive(Clone, Debug)]
pub struct History<S> {
    undo: Vec<S>,
    redo: Vec<S>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> History<S> {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Returns `true` if there is a snapshot to undo to.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns `true` if there is a snapshot to redo to.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of snapshots available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of snapshots available to redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Records the pre-operation snapshot and invalidates forward history.
    pub fn push(&mut self, snapshot: S) {
        self.undo.push(snapshot);
        self.redo.clear();
    }

    /// Discards the most recently pushed undo snapshot.
    ///
    /// For the caller whose operation failed after it had already pushed:
    /// the model was never touched, so the snapshot must not linger as a
    /// no-op undo step. The redo stack is left alone — it was already
    /// cleared by the push.
    pub fn discard_last_push(&mut self) -> Option<S> {
        self.undo.pop()
    }

    /// Exchanges `current` for the most recent undo snapshot.
    ///
    /// `current` is stored for redo. Returns `None` (leaving the stacks
    /// untouched) when there is nothing to undo.
    #[must_use]
    pub fn undo(&mut self, current: S) -> Option<S> {
        let snapshot = self.undo.pop()?;
        self.redo.push(current);
        Some(snapshot)
    }

    /// Exchanges `current` for the most recent redo snapshot.
    ///
    /// `current` is stored for undo. Returns `None` (leaving the stacks
    /// untouched) when there is nothing to redo.
    #[must_use]
    pub fn redo(&mut self, current: S) -> Option<S> {
        let snapshot = self.redo.pop()?;
        self.undo.push(current);
        Some(snapshot)
    }

    /// Drops all recorded history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
