//! # Invoice State
//!
//! The working invoice session and the bookkeeping around assist calls.
//!
//! ## Assist Bookkeeping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  magic_fill ──► try_begin_parsing() ──► Some(guard)  is_parsing = true  │
//! │                        │                                                │
//! │                        └──► None (already parsing) → ApiError::Busy     │
//! │                                                                         │
//! │  guard dropped (success, error or stale) ──────────► is_parsing = false │
//! │                                                                         │
//! │  sequencer: every assist call takes a token, every user edit            │
//! │  invalidates outstanding tokens                                         │
//! │                                                                         │
//! │  warnings: last validation result for the current draft                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use beshob_core::{InvoiceSession, Settings};

use crate::assist::RequestSequencer;

/// Managed invoice session.
#[derive(Debug)]
pub struct InvoiceState {
    session: Arc<Mutex<InvoiceSession>>,
    warnings: Arc<Mutex<Vec<String>>>,
    is_parsing: AtomicBool,
    sequencer: RequestSequencer,
}

impl InvoiceState {
    /// Starts with a fresh draft.
    pub fn new(settings: &Settings, today: NaiveDate) -> Self {
        InvoiceState {
            session: Arc::new(Mutex::new(InvoiceSession::new_draft(settings, today))),
            warnings: Arc::new(Mutex::new(Vec::new())),
            is_parsing: AtomicBool::new(false),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InvoiceSession) -> R,
    {
        let session = self.session.lock().expect("Invoice mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InvoiceSession) -> R,
    {
        let mut session = self.session.lock().expect("Invoice mutex poisoned");
        f(&mut session)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("Warnings mutex poisoned").clone()
    }

    pub fn set_warnings(&self, warnings: Vec<String>) {
        *self.warnings.lock().expect("Warnings mutex poisoned") = warnings;
    }

    pub fn is_parsing(&self) -> bool {
        self.is_parsing.load(Ordering::SeqCst)
    }

    /// Claims the busy flag, or `None` if a parse is already running.
    pub fn try_begin_parsing(&self) -> Option<ParsingGuard<'_>> {
        self.is_parsing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ParsingGuard { flag: &self.is_parsing })
    }

    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct ParsingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ParsingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InvoiceState {
        InvoiceState::new(
            &Settings::default(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_busy_flag_is_exclusive() {
        let state = state();

        let guard = state.try_begin_parsing().unwrap();
        assert!(state.is_parsing());
        assert!(state.try_begin_parsing().is_none());

        drop(guard);
        assert!(!state.is_parsing());
        assert!(state.try_begin_parsing().is_some());
    }

    #[test]
    fn test_session_accessors() {
        let state = state();
        let number = state.with_session(|s| s.document().invoice_number.clone());
        assert_eq!(number, "INV-1001");

        state.set_warnings(vec!["Phone looks short".to_string()]);
        assert_eq!(state.warnings().len(), 1);
    }
}
