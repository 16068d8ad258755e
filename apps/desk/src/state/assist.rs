//! # Assist State
//!
//! Holds the active [`AssistService`] implementation.

use std::sync::Arc;

use crate::assist::{AssistService, OfflineAssist};

/// Managed assist service.
#[derive(Clone)]
pub struct AssistState {
    service: Arc<dyn AssistService>,
}

impl AssistState {
    pub fn new(service: Arc<dyn AssistService>) -> Self {
        AssistState { service }
    }

    pub fn service(&self) -> &dyn AssistService {
        self.service.as_ref()
    }
}

impl Default for AssistState {
    fn default() -> Self {
        Self::new(Arc::new(OfflineAssist))
    }
}

impl std::fmt::Debug for AssistState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistState").finish_non_exhaustive()
    }
}
