use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{Artifact, DocumentEditor, Substitution, presentation_url};
use crate::consts::{DRIVE_API_BASE, SLIDES_API_BASE};
use crate::error::{Error, Result};

/// A [`DocumentEditor`] over the Google Drive and Slides REST APIs.
///
/// The bearer token comes from configuration like the other secrets;
/// there is no refresh flow, and a missing token is a recoverable
/// configuration error at the point of use.
pub struct GoogleSlidesEditor {
    token: Option<String>,
    client: reqwest::Client,
    drive_base: String,
    slides_base: String,
}

impl GoogleSlidesEditor {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            client: reqwest::Client::new(),
            drive_base: DRIVE_API_BASE.to_string(),
            slides_base: SLIDES_API_BASE.to_string(),
        }
    }

    /// Point the editor at different API bases (tests).
    pub fn with_base_urls(
        mut self,
        drive_base: impl Into<String>,
        slides_base: impl Into<String>,
    ) -> Self {
        self.drive_base = drive_base.into();
        self.slides_base = slides_base.into();
        self
    }

    fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| Error::Config {
            message: "google_token is not set; run `slidecard config set google_token <token>`"
                .to_string(),
        })
    }
}

#[async_trait]
impl DocumentEditor for GoogleSlidesEditor {
    async fn duplicate(&self, template_id: &str) -> Result<Artifact> {
        let token = self.token()?;
        let url = format!("{}/files/{}/copy", self.drive_base, template_id);
        debug!(%url, "duplicating template");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                message: format!("drive copy failed ({status}): {text}"),
            });
        }

        let copy: DriveFile = resp.json().await?;
        let url = presentation_url(&copy.id);
        Ok(Artifact { id: copy.id, url })
    }

    async fn batch_update(&self, document_id: &str, batch: &[Substitution]) -> Result<()> {
        let token = self.token()?;
        let url = format!(
            "{}/presentations/{}:batchUpdate",
            self.slides_base, document_id
        );

        let requests: Vec<serde_json::Value> = batch.iter().map(to_request).collect();
        debug!(%url, count = requests.len(), "applying substitution batch");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "requests": requests }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                message: format!("batch update failed ({status}): {text}"),
            });
        }

        Ok(())
    }
}

/// One substitution as a Slides API request object.
fn to_request(substitution: &Substitution) -> serde_json::Value {
    match substitution {
        Substitution::ReplaceText { placeholder, text } => serde_json::json!({
            "replaceAllText": {
                "containsText": { "text": placeholder },
                "replaceText": text,
            }
        }),
        Substitution::ReplaceImage {
            placeholder,
            image_url,
        } => serde_json::json!({
            "replaceAllShapesWithImage": {
                "containsText": { "text": placeholder },
                "imageUrl": image_url,
            }
        }),
    }
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}
