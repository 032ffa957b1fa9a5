//! The document-editing capability: duplicate a template presentation
//! and apply one batch of substitutions to the copy.

pub mod google;
pub mod mock;

use async_trait::async_trait;

use crate::error::Result;

/// A single operation in a substitution batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// Replace every occurrence of `placeholder` with `text`.
    ReplaceText { placeholder: String, text: String },
    /// Replace every shape containing `placeholder` with the image at
    /// `image_url`.
    ReplaceImage {
        placeholder: String,
        image_url: String,
    },
}

impl Substitution {
    pub fn placeholder(&self) -> &str {
        match self {
            Substitution::ReplaceText { placeholder, .. } => placeholder,
            Substitution::ReplaceImage { placeholder, .. } => placeholder,
        }
    }
}

/// A generated presentation: opaque document id plus the externally
/// visible URL. Created per invocation, never reused, never deleted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: String,
    pub url: String,
}

/// Shareable edit URL for a presentation id.
pub fn presentation_url(id: &str) -> String {
    format!("https://docs.google.com/presentation/d/{id}/edit")
}

/// Document manipulation, abstracted so the card engine can run against
/// a recording mock in tests.
#[async_trait]
pub trait DocumentEditor: Send + Sync {
    /// Duplicate the template; the template itself is never mutated.
    async fn duplicate(&self, template_id: &str) -> Result<Artifact>;

    /// Apply all substitutions as a single batch. The batch succeeds or
    /// fails as a unit; there is no partial application and no rollback.
    async fn batch_update(&self, document_id: &str, batch: &[Substitution]) -> Result<()>;
}
