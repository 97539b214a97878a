//! Scripted [`GalleryService`] double for store and handler tests.

use crate::domain::error::{GalleryError, Result};
use crate::domain::Entry;
use crate::service::{GalleryService, UploadFile, WriteSync};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Default)]
struct Script {
    entries: Vec<Entry>,
    fail_list: bool,
    fail_upsert: bool,
    fail_delete: bool,
    fail_upload: bool,
    calls: Vec<String>,
}

/// Holds `list` until released, signalling when it is entered.
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

/// Records every call as `"list"`, `"upsert:<id>"`, `"delete:<id>"` or
/// `"upload:<file name>"`. Clones share the same script.
#[derive(Clone)]
pub struct ScriptedGallery {
    script: Arc<Mutex<Script>>,
    sync: WriteSync,
    gate: Option<Gate>,
}

impl ScriptedGallery {
    pub fn new(sync: WriteSync) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script::default())),
            sync,
            gate: None,
        }
    }

    pub fn with_entries(self, entries: Vec<Entry>) -> Self {
        self.script.lock().unwrap().entries = entries;
        self
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn fail_list(&self, fail: bool) {
        self.script.lock().unwrap().fail_list = fail;
    }

    pub fn fail_upsert(&self, fail: bool) {
        self.script.lock().unwrap().fail_upsert = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.script.lock().unwrap().fail_delete = fail;
    }

    pub fn fail_upload(&self, fail: bool) {
        self.script.lock().unwrap().fail_upload = fail;
    }

    pub fn calls(&self) -> Vec<String> {
        self.script.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl GalleryService for ScriptedGallery {
    async fn list(&self) -> Result<Vec<Entry>> {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let mut script = self.script.lock().unwrap();
        script.calls.push("list".to_string());
        if script.fail_list {
            return Err(GalleryError::Load("scripted failure".to_string()));
        }
        Ok(script.entries.clone())
    }

    async fn upsert(&self, entry: &Entry) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(format!("upsert:{}", entry.id));
        if script.fail_upsert {
            return Err(GalleryError::Save("scripted failure".to_string()));
        }
        match script.entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => script.entries.push(entry.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(format!("delete:{id}"));
        if script.fail_delete {
            return Err(GalleryError::Delete("scripted failure".to_string()));
        }
        script.entries.retain(|entry| entry.id != id);
        Ok(())
    }

    async fn upload(&self, file: &UploadFile) -> Result<String> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(format!("upload:{}", file.file_name));
        if script.fail_upload {
            return Err(GalleryError::Upload("scripted failure".to_string()));
        }
        Ok(format!("/uploads/{}", file.file_name))
    }

    fn write_sync(&self) -> WriteSync {
        self.sync
    }
}
