//! Wizard draft persistence
//!
//! `DraftStore` is the storage boundary: the reconciler only talks to the
//! trait, so the in-memory and file backends are interchangeable.

mod file;
mod memory;
mod reconciler;

pub use file::FileDraftStore;
pub use memory::MemoryDraftStore;
pub use reconciler::{ContentPredicate, DraftReconciler, DraftState, LeaveOutcome};

use crate::config::DraftStoreConfig;
use async_trait::async_trait;
use screenwright_core::ScreenResult;
use screenwright_ir::WizardDraft;
use std::sync::Arc;
use uuid::Uuid;

/// Persisted drafts keyed by id; last write wins
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// `DraftNotFound` when the id is unknown
    async fn get(&self, id: Uuid) -> ScreenResult<WizardDraft>;

    /// Every draft, most recently updated first
    async fn list(&self) -> ScreenResult<Vec<WizardDraft>>;

    async fn create(&self, draft: WizardDraft) -> ScreenResult<WizardDraft>;

    /// `DraftNotFound` when the draft was deleted
    async fn update(&self, draft: WizardDraft) -> ScreenResult<WizardDraft>;

    /// Returns whether a draft was removed
    async fn delete(&self, id: Uuid) -> ScreenResult<bool>;

    /// Drafts for one wizard, most recently updated first
    async fn list_by_store_key(&self, store_key: &str) -> ScreenResult<Vec<WizardDraft>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|d| d.store_key == store_key)
            .collect())
    }
}

/// Open the backend named by the runtime configuration
pub fn open_store(config: &DraftStoreConfig) -> Arc<dyn DraftStore> {
    match config {
        DraftStoreConfig::Memory => Arc::new(MemoryDraftStore::new()),
        DraftStoreConfig::File { path } => Arc::new(FileDraftStore::new(path)),
    }
}

fn newest_first(drafts: &mut [WizardDraft]) {
    drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
}
