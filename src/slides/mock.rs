use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Artifact, DocumentEditor, Substitution, presentation_url};
use crate::error::Result;

/// A recording editor for tests. Duplicates hand out fresh ids and every
/// batch is captured for inspection.
#[derive(Default)]
pub struct MockEditor {
    copies: AtomicUsize,
    batches: Mutex<Vec<(String, Vec<Substitution>)>>,
}

impl MockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded (document id, batch) pairs, in submission order.
    pub fn batches(&self) -> Vec<(String, Vec<Substitution>)> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentEditor for MockEditor {
    async fn duplicate(&self, template_id: &str) -> Result<Artifact> {
        let n = self.copies.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{template_id}-copy-{n}");
        let url = presentation_url(&id);
        Ok(Artifact { id, url })
    }

    async fn batch_update(&self, document_id: &str, batch: &[Substitution]) -> Result<()> {
        self.batches
            .lock()
            .unwrap()
            .push((document_id.to_string(), batch.to_vec()));
        Ok(())
    }
}
