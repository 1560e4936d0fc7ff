use super::{DraftStore, newest_first};
use async_trait::async_trait;
use parking_lot::Mutex;
use screenwright_core::{ScreenError, ScreenResult};
use screenwright_ir::WizardDraft;
use std::collections::HashMap;
use uuid::Uuid;

/// Process-local draft store
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<Uuid, WizardDraft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.lock().is_empty()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, id: Uuid) -> ScreenResult<WizardDraft> {
        self.drafts
            .lock()
            .get(&id)
            .cloned()
            .ok_or(ScreenError::DraftNotFound(id))
    }

    async fn list(&self) -> ScreenResult<Vec<WizardDraft>> {
        let mut drafts: Vec<WizardDraft> = self.drafts.lock().values().cloned().collect();
        newest_first(&mut drafts);
        Ok(drafts)
    }

    async fn create(&self, draft: WizardDraft) -> ScreenResult<WizardDraft> {
        self.drafts.lock().insert(draft.id, draft.clone());
        Ok(draft)
    }

    async fn update(&self, draft: WizardDraft) -> ScreenResult<WizardDraft> {
        let mut drafts = self.drafts.lock();
        let slot = drafts.get_mut(&draft.id).ok_or(ScreenError::DraftNotFound(draft.id))?;
        *slot = draft.clone();
        Ok(draft)
    }

    async fn delete(&self, id: Uuid) -> ScreenResult<bool> {
        Ok(self.drafts.lock().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_ir::builtin::wizards;
    use serde_json::json;

    #[tokio::test]
    async fn test_crud() {
        let store = MemoryDraftStore::new();
        let config = wizards::job_intake();
        let draft = WizardDraft::new(&config, json!({ "title": "Welder" }), 1);
        let id = draft.id;

        store.create(draft).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().display_name, "Welder");

        let mut changed = store.get(id).await.unwrap();
        changed.update(&config, json!({ "title": "Lead Welder" }), 2);
        store.update(changed).await.unwrap();
        assert_eq!(store.get(id).await.unwrap().current_step, 2);

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(matches!(store.get(id).await, Err(ScreenError::DraftNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_draft() {
        let store = MemoryDraftStore::new();
        let draft = WizardDraft::new(&wizards::job_intake(), json!({}), 0);
        assert!(matches!(store.update(draft).await, Err(ScreenError::DraftNotFound(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_store_key() {
        let store = MemoryDraftStore::new();
        let job = wizards::job_intake();
        let account = wizards::account_intake();
        store.create(WizardDraft::new(&job, json!({ "title": "A" }), 0)).await.unwrap();
        store.create(WizardDraft::new(&account, json!({ "name": "Acme" }), 0)).await.unwrap();
        store.create(WizardDraft::new(&job, json!({ "title": "B" }), 0)).await.unwrap();

        let jobs = store.list_by_store_key("job-intake").await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(jobs.iter().all(|d| d.store_key == "job-intake"));
        assert_eq!(store.len(), 3);
    }
}
