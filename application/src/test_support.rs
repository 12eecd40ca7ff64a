//! Hand-written port doubles shared by the unit tests of this crate.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger};
use crate::ports::snapshot_storage::{SnapshotStorage, StorageError};
use crate::ports::text_generator::{GeneratorError, TextGenerator};
use async_trait::async_trait;
use genpool_domain::StoreSnapshot;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Records every persisted snapshot; can be told to fail.
#[derive(Default)]
pub(crate) struct RecordingStorage {
    pub initial: StoreSnapshot,
    pub persisted: Mutex<Vec<StoreSnapshot>>,
    pub fail: AtomicBool,
}

impl RecordingStorage {
    pub fn failing() -> Self {
        let storage = Self::default();
        storage.fail.store(true, Ordering::SeqCst);
        storage
    }

    pub fn persist_count(&self) -> usize {
        self.persisted.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<StoreSnapshot> {
        self.persisted.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SnapshotStorage for RecordingStorage {
    async fn load(&self) -> Result<StoreSnapshot, StorageError> {
        Ok(self.initial.clone())
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StorageError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Other("disk full".to_string()));
        }
        self.persisted.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

/// Generator that replays scripted responses, then echoes one text per request.
#[derive(Default)]
pub(crate) struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Vec<String>, GeneratorError>>>,
    pub prompts: Mutex<Vec<(String, usize)>>,
    pub delay: Option<Duration>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Result<Vec<String>, GeneratorError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, count: usize) -> Result<Vec<String>, GeneratorError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), count));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok((0..count).map(|i| format!("{} #{}", prompt, i)).collect()),
        }
    }
}

/// Keeps every activity event in memory.
#[derive(Default)]
pub(crate) struct RecordingActivityLogger {
    pub events: Mutex<Vec<ActivityEvent>>,
}

impl RecordingActivityLogger {
    pub fn types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }
}

impl ActivityLogger for RecordingActivityLogger {
    fn log(&self, event: ActivityEvent) {
        self.events.lock().unwrap().push(event);
    }
}
