use super::{DraftStore, newest_first};
use async_trait::async_trait;
use screenwright_core::{ScreenError, ScreenResult};
use screenwright_ir::WizardDraft;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

const DRAFT_FILE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftFile {
    version: u32,
    drafts: Vec<WizardDraft>,
}

/// Drafts kept in a single JSON file
///
/// Every operation reads and rewrites the whole file under a lock.
#[derive(Debug)]
pub struct FileDraftStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> ScreenResult<Vec<WizardDraft>> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(Vec::new());
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ScreenError::FileRead {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: DraftFile = serde_json::from_str(&content)?;
        if file.version != DRAFT_FILE_VERSION {
            return Err(ScreenError::SchemaVersionMismatch {
                expected: DRAFT_FILE_VERSION,
                found: file.version,
            });
        }
        Ok(file.drafts)
    }

    async fn write(&self, mut drafts: Vec<WizardDraft>) -> ScreenResult<()> {
        newest_first(&mut drafts);
        let file = DraftFile {
            version: DRAFT_FILE_VERSION,
            drafts,
        };
        let json = serde_json::to_string_pretty(&file)?;

        let write_err = |e: std::io::Error| ScreenError::FileWrite {
            path: self.path.clone(),
            message: e.to_string(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(write_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_err)?;

        debug!(path = %self.path.display(), count = file.drafts.len(), "Wrote draft file");
        Ok(())
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    async fn get(&self, id: Uuid) -> ScreenResult<WizardDraft> {
        let _lock = self.lock.lock().await;
        self.read()
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or(ScreenError::DraftNotFound(id))
    }

    async fn list(&self) -> ScreenResult<Vec<WizardDraft>> {
        let _lock = self.lock.lock().await;
        let mut drafts = self.read().await?;
        newest_first(&mut drafts);
        Ok(drafts)
    }

    async fn create(&self, draft: WizardDraft) -> ScreenResult<WizardDraft> {
        let _lock = self.lock.lock().await;
        let mut drafts = self.read().await?;
        drafts.retain(|d| d.id != draft.id);
        drafts.push(draft.clone());
        self.write(drafts).await?;
        Ok(draft)
    }

    async fn update(&self, draft: WizardDraft) -> ScreenResult<WizardDraft> {
        let _lock = self.lock.lock().await;
        let mut drafts = self.read().await?;
        let slot = drafts
            .iter_mut()
            .find(|d| d.id == draft.id)
            .ok_or(ScreenError::DraftNotFound(draft.id))?;
        *slot = draft.clone();
        self.write(drafts).await?;
        Ok(draft)
    }

    async fn delete(&self, id: Uuid) -> ScreenResult<bool> {
        let _lock = self.lock.lock().await;
        let mut drafts = self.read().await?;
        let before = drafts.len();
        drafts.retain(|d| d.id != id);
        if drafts.len() == before {
            return Ok(false);
        }
        self.write(drafts).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_ir::builtin::wizards;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileDraftStore::new(dir.path().join("drafts.json"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("drafts.json");
        let config = wizards::account_intake();
        let draft = WizardDraft::new(&config, json!({ "name": "Acme", "industry": "Health" }), 2);
        let id = draft.id;

        FileDraftStore::new(&path).create(draft.clone()).await.unwrap();

        let reopened = FileDraftStore::new(&path);
        assert_eq!(reopened.get(id).await.unwrap(), draft);
        assert_eq!(reopened.list_by_store_key("account-intake").await.unwrap().len(), 1);

        assert!(reopened.delete(id).await.unwrap());
        assert!(FileDraftStore::new(&path).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drafts.json");
        std::fs::write(&path, r#"{ "version": 9, "drafts": [] }"#).unwrap();

        let err = FileDraftStore::new(&path).list().await.unwrap_err();
        assert!(matches!(err, ScreenError::SchemaVersionMismatch { found: 9, .. }));
    }
}
