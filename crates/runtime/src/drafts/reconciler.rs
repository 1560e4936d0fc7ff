//! Wizard draft reconciliation
//!
//! Tracks the relationship between an open wizard and its saved draft:
//!
//! - leaving a wizard with meaningful content archives it as a draft
//! - leaving again after resuming updates that same draft
//! - identical unlinked content is never archived twice for one store key
//! - submitting validates every step and deletes the linked draft

use super::DraftStore;
use screenwright_core::{ScreenError, ScreenResult};
use screenwright_ir::{WizardConfig, WizardDraft};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Decides whether form content is worth archiving
pub type ContentPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Link between the open wizard and the draft store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    NoActiveDraft,
    /// Content was saved when the user left
    ArchivedAsDraft(Uuid),
    /// The user resumed this draft and is editing it
    ActiveDraft(Uuid),
    /// The wizard was submitted
    Cleared,
}

impl DraftState {
    /// Draft the wizard is linked to, if any
    pub fn draft_id(&self) -> Option<Uuid> {
        match self {
            DraftState::ArchivedAsDraft(id) | DraftState::ActiveDraft(id) => Some(*id),
            DraftState::NoActiveDraft | DraftState::Cleared => None,
        }
    }
}

/// What `leave` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    Archived(Uuid),
    Updated(Uuid),
    /// An existing draft already holds this exact content
    Duplicate(Uuid),
    Skipped,
}

/// Draft lifecycle for one wizard instance
pub struct DraftReconciler<S: DraftStore + ?Sized = dyn DraftStore> {
    config: WizardConfig,
    store: Arc<S>,
    predicate: Option<ContentPredicate>,
    state: DraftState,
}

impl<S: DraftStore + ?Sized> DraftReconciler<S> {
    pub fn new(config: WizardConfig, store: Arc<S>) -> Self {
        Self {
            config,
            store,
            predicate: None,
            state: DraftState::NoActiveDraft,
        }
    }

    /// Replace the default meaningful-content check
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn is_meaningful(&self, form_data: &Value) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(form_data),
            None => self.config.has_meaningful_content(form_data),
        }
    }

    /// Drafts saved for this wizard, newest first
    pub async fn drafts(&self) -> ScreenResult<Vec<WizardDraft>> {
        self.store.list_by_store_key(&self.config.store_key).await
    }

    /// The user navigates away from the wizard
    pub async fn leave(&mut self, form_data: Value, current_step: u32) -> ScreenResult<LeaveOutcome> {
        if self.state == DraftState::Cleared {
            return Ok(LeaveOutcome::Skipped);
        }

        if let Some(id) = self.state.draft_id() {
            match self.store.get(id).await {
                Ok(mut draft) => {
                    draft.update(&self.config, form_data, current_step);
                    self.store.update(draft).await?;
                    self.state = DraftState::ArchivedAsDraft(id);
                    debug!(draft = %id, "Updated linked draft");
                    return Ok(LeaveOutcome::Updated(id));
                }
                // deleted elsewhere; archive as new content
                Err(ScreenError::DraftNotFound(_)) => self.state = DraftState::NoActiveDraft,
                Err(err) => return Err(err),
            }
        }

        if !self.is_meaningful(&form_data) {
            debug!(store_key = %self.config.store_key, "Nothing worth archiving");
            return Ok(LeaveOutcome::Skipped);
        }

        if let Some(existing) = self.drafts().await?.into_iter().find(|d| d.holds(&form_data)) {
            debug!(draft = %existing.id, "Identical draft already archived");
            self.state = DraftState::ArchivedAsDraft(existing.id);
            return Ok(LeaveOutcome::Duplicate(existing.id));
        }

        let draft = self
            .store
            .create(WizardDraft::new(&self.config, form_data, current_step))
            .await?;
        info!(
            draft = %draft.id,
            store_key = %draft.store_key,
            name = %draft.display_name,
            "Archived wizard as draft"
        );
        self.state = DraftState::ArchivedAsDraft(draft.id);
        Ok(LeaveOutcome::Archived(draft.id))
    }

    /// Load a saved draft; the caller restores its form data and step
    pub async fn resume(&mut self, id: Uuid) -> ScreenResult<WizardDraft> {
        let draft = self.store.get(id).await?;
        if draft.store_key != self.config.store_key {
            return Err(ScreenError::validation(format!(
                "draft {} belongs to '{}', not '{}'",
                id, draft.store_key, self.config.store_key
            )));
        }
        self.state = DraftState::ActiveDraft(id);
        debug!(draft = %id, step = draft.current_step, "Resumed draft");
        Ok(draft)
    }

    /// Start over with an empty wizard
    pub fn start_new(&mut self) {
        self.state = DraftState::NoActiveDraft;
    }

    /// Validate the finished form and clear the linked draft
    ///
    /// Validation failures leave the state and the draft untouched.
    pub async fn submit(&mut self, form_data: &Value) -> ScreenResult<()> {
        self.config.validate_form(form_data)?;
        if let Some(id) = self.state.draft_id() {
            self.store.delete(id).await?;
            info!(draft = %id, "Submitted wizard; draft removed");
        }
        self.state = DraftState::Cleared;
        Ok(())
    }
}

impl<S: DraftStore + ?Sized> fmt::Debug for DraftReconciler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftReconciler")
            .field("store_key", &self.config.store_key)
            .field("state", &self.state)
            .field("custom_predicate", &self.predicate.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::MemoryDraftStore;
    use screenwright_ir::builtin::wizards;
    use serde_json::json;

    fn reconciler(store: &Arc<MemoryDraftStore>) -> DraftReconciler<MemoryDraftStore> {
        DraftReconciler::new(wizards::job_intake(), store.clone())
    }

    #[tokio::test]
    async fn test_archive_then_resume_round_trip() {
        let store = Arc::new(MemoryDraftStore::new());
        let form = json!({ "title": "ICU Nurse", "location": "Austin", "rates": { "billRate": 95 } });

        let mut wizard = reconciler(&store);
        let LeaveOutcome::Archived(id) = wizard.leave(form.clone(), 3).await.unwrap() else {
            panic!("expected an archive");
        };
        assert_eq!(wizard.state(), DraftState::ArchivedAsDraft(id));

        let mut later = reconciler(&store);
        let draft = later.resume(id).await.unwrap();
        assert_eq!(draft.form_data, form);
        assert_eq!(draft.current_step, 3);
        assert_eq!(draft.display_name, "ICU Nurse");
        assert_eq!(later.state(), DraftState::ActiveDraft(id));
    }

    #[tokio::test]
    async fn test_identical_content_archived_once() {
        let store = Arc::new(MemoryDraftStore::new());
        let form = json!({ "title": "Welder" });

        let first = reconciler(&store).leave(form.clone(), 0).await.unwrap();
        let second = reconciler(&store).leave(form, 0).await.unwrap();

        let LeaveOutcome::Archived(id) = first else {
            panic!("expected an archive");
        };
        assert_eq!(second, LeaveOutcome::Duplicate(id));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_leaving_resumed_draft_updates_it() {
        let store = Arc::new(MemoryDraftStore::new());
        let LeaveOutcome::Archived(id) = reconciler(&store)
            .leave(json!({ "title": "Welder" }), 0)
            .await
            .unwrap()
        else {
            panic!("expected an archive");
        };

        let mut wizard = reconciler(&store);
        wizard.resume(id).await.unwrap();
        let outcome = wizard
            .leave(json!({ "title": "Lead Welder", "location": "Tulsa" }), 1)
            .await
            .unwrap();

        assert_eq!(outcome, LeaveOutcome::Updated(id));
        assert_eq!(store.len(), 1);
        let saved = store.get(id).await.unwrap();
        assert_eq!(saved.display_name, "Lead Welder");
        assert_eq!(saved.current_step, 1);
        assert_eq!(wizard.state(), DraftState::ArchivedAsDraft(id));
    }

    #[tokio::test]
    async fn test_blank_form_is_not_archived() {
        let store = Arc::new(MemoryDraftStore::new());
        let outcome = reconciler(&store)
            .leave(json!({ "title": "   ", "location": "Austin" }), 1)
            .await
            .unwrap();
        assert_eq!(outcome, LeaveOutcome::Skipped);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_custom_predicate() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut wizard = reconciler(&store).with_predicate(|form| form.get("location").is_some());

        let outcome = wizard.leave(json!({ "location": "Austin" }), 1).await.unwrap();
        assert!(matches!(outcome, LeaveOutcome::Archived(_)));
        assert_eq!(store.list().await.unwrap()[0].display_name, "Untitled job");
    }

    #[tokio::test]
    async fn test_submit_reports_every_missing_field() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut wizard = reconciler(&store);
        let form = json!({ "title": "Welder", "rates": {} });
        wizard.leave(form.clone(), 0).await.unwrap();

        let err = wizard.submit(&form).await.unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(
            fields.fields().collect::<Vec<_>>(),
            vec!["accountId", "jobType", "location", "rates.billRate", "requiredSkills"]
        );
        assert_eq!(fields.get("rates.billRate"), ["Bill Rate is required".to_string()]);
        assert!(matches!(wizard.state(), DraftState::ArchivedAsDraft(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_clears_draft() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut wizard = reconciler(&store);
        let form = json!({
            "title": "Welder",
            "accountId": "acc-1",
            "location": "Tulsa",
            "jobType": "contract",
            "requiredSkills": ["TIG"],
            "rates": { "billRate": 70 }
        });
        wizard.leave(form.clone(), 4).await.unwrap();

        wizard.submit(&form).await.unwrap();
        assert_eq!(wizard.state(), DraftState::Cleared);
        assert!(store.is_empty());
        assert_eq!(wizard.leave(form, 4).await.unwrap(), LeaveOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_resume_rejects_other_wizard() {
        let store = Arc::new(MemoryDraftStore::new());
        let account = WizardDraft::new(&wizards::account_intake(), json!({ "name": "Acme" }), 0);
        let id = account.id;
        store.create(account).await.unwrap();

        let mut wizard = reconciler(&store);
        assert!(wizard.resume(id).await.unwrap_err().is_validation());
        assert_eq!(wizard.state(), DraftState::NoActiveDraft);
    }

    #[tokio::test]
    async fn test_deleted_linked_draft_is_recreated() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut wizard = reconciler(&store);
        let LeaveOutcome::Archived(id) = wizard.leave(json!({ "title": "Welder" }), 0).await.unwrap() else {
            panic!("expected an archive");
        };
        store.delete(id).await.unwrap();

        let outcome = wizard.leave(json!({ "title": "Welder II" }), 1).await.unwrap();
        assert!(matches!(outcome, LeaveOutcome::Archived(new_id) if new_id != id));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let store: Arc<dyn DraftStore> = Arc::new(MemoryDraftStore::new());
        let mut wizard: DraftReconciler = DraftReconciler::new(wizards::account_intake(), store);
        let outcome = wizard.leave(json!({ "legalName": "Acme Holdings LLC" }), 0).await.unwrap();
        assert!(matches!(outcome, LeaveOutcome::Archived(_)));
        assert_eq!(wizard.drafts().await.unwrap()[0].display_name, "Acme Holdings LLC");
    }
}
