//! The substitution engine: turn a profile + team schema into one batch
//! of operations and apply it to a fresh copy of the template.

use tracing::warn;

use crate::consts::{IMAGE_PLACEHOLDER, NAME_PLACEHOLDER, TITLE_PLACEHOLDER, field_placeholder};
use crate::error::Result;
use crate::slack::{TeamProfileSchema, UserProfile};
use crate::slides::{Artifact, DocumentEditor, Substitution};

/// Build the full substitution batch for one profile.
///
/// Placeholders are disjoint, so order does not affect correctness; the
/// batch is still built in a fixed order (name, title, image, then the
/// schema fields in team order). Every schema field gets exactly one
/// operation — an empty string when the user has no value — so field
/// placeholders never dangle in the output.
pub fn build_substitutions(
    profile: &UserProfile,
    schema: &TeamProfileSchema,
) -> Vec<Substitution> {
    let name = if profile.display_name.is_empty() {
        profile.real_name.clone()
    } else {
        profile.display_name.clone()
    };

    // 512px preferred, 192px fallback. When both are absent the
    // operation still goes out with an empty URL; the upstream batch
    // call will reject it or leave the shape untouched. Flagged for
    // product review rather than patched here.
    let image_url = if profile.image_512.is_empty() {
        profile.image_192.clone()
    } else {
        profile.image_512.clone()
    };
    if image_url.is_empty() {
        warn!("profile has no 512px or 192px image, issuing an empty image URL");
    }

    let mut batch = vec![
        Substitution::ReplaceText {
            placeholder: NAME_PLACEHOLDER.to_string(),
            text: name,
        },
        Substitution::ReplaceText {
            placeholder: TITLE_PLACEHOLDER.to_string(),
            text: profile.title.clone(),
        },
        Substitution::ReplaceImage {
            placeholder: IMAGE_PLACEHOLDER.to_string(),
            image_url,
        },
    ];

    for field in &schema.fields {
        let text = profile.field_value(&field.id).unwrap_or_default().to_string();
        batch.push(Substitution::ReplaceText {
            placeholder: field_placeholder(&field.label),
            text,
        });
    }

    batch
}

/// Duplicate the template, apply the batch to the copy, return the
/// artifact. The template itself is never mutated. Any editor error
/// propagates unmodified; no retry.
pub async fn create_card(
    editor: &dyn DocumentEditor,
    template_id: &str,
    profile: &UserProfile,
    schema: &TeamProfileSchema,
) -> Result<Artifact> {
    let artifact = editor.duplicate(template_id).await?;
    let batch = build_substitutions(profile, schema);
    editor.batch_update(&artifact.id, &batch).await?;
    Ok(artifact)
}
