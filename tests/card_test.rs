use std::collections::HashMap;

use slidecard::card::{build_substitutions, create_card};
use slidecard::slack::{FieldDefinition, FieldValue, TeamProfileSchema, UserProfile};
use slidecard::slides::mock::MockEditor;
use slidecard::slides::{DocumentEditor, Substitution};

fn profile() -> UserProfile {
    UserProfile {
        display_name: "ada".to_string(),
        real_name: "Ada Lovelace".to_string(),
        title: "Analyst".to_string(),
        image_512: "https://img.example/512.png".to_string(),
        image_192: "https://img.example/192.png".to_string(),
        image_72: "https://img.example/72.png".to_string(),
        fields: Some(HashMap::from([(
            "Xf01".to_string(),
            FieldValue {
                value: "she/her".to_string(),
                alt: String::new(),
            },
        )])),
    }
}

fn schema() -> TeamProfileSchema {
    TeamProfileSchema {
        fields: vec![
            FieldDefinition {
                id: "Xf01".to_string(),
                label: "Pronouns".to_string(),
            },
            FieldDefinition {
                id: "Xf02".to_string(),
                label: "Favorite food".to_string(),
            },
        ],
    }
}

#[tokio::test]
async fn card_is_built_on_a_copy_not_the_template() {
    let editor = MockEditor::new();
    let artifact = create_card(&editor, "template-1", &profile(), &schema())
        .await
        .unwrap();

    assert_ne!(artifact.id, "template-1");

    // The single batch targeted the copy, never the template.
    let batches = editor.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].0, artifact.id);
}

#[tokio::test]
async fn artifact_url_points_at_the_new_document() {
    let editor = MockEditor::new();
    let artifact = create_card(&editor, "template-1", &profile(), &schema())
        .await
        .unwrap();

    assert_eq!(
        artifact.url,
        format!("https://docs.google.com/presentation/d/{}/edit", artifact.id)
    );
}

#[tokio::test]
async fn every_invocation_creates_a_fresh_artifact() {
    let editor = MockEditor::new();
    let first = create_card(&editor, "template-1", &profile(), &schema())
        .await
        .unwrap();
    let second = create_card(&editor, "template-1", &profile(), &schema())
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(editor.batches().len(), 2);
}

#[tokio::test]
async fn batch_carries_fixed_and_schema_substitutions() {
    let editor = MockEditor::new();
    create_card(&editor, "template-1", &profile(), &schema())
        .await
        .unwrap();

    let batches = editor.batches();
    let batch = &batches[0].1;

    // name + title + image + two schema fields
    assert_eq!(batch.len(), 5);
    let placeholders: Vec<&str> = batch.iter().map(|s| s.placeholder()).collect();
    assert_eq!(
        placeholders,
        vec![
            "{{name}}",
            "{{title}}",
            "{{image}}",
            "{{Pronouns}}",
            "{{Favorite food}}",
        ]
    );
}

#[tokio::test]
async fn unknown_schema_field_resolves_to_empty_not_dangling() {
    // The user has no value for Xf02; the operation still goes out with
    // an empty string so the placeholder never survives in the output.
    let editor = MockEditor::new();
    create_card(&editor, "template-1", &profile(), &schema())
        .await
        .unwrap();

    let batches = editor.batches();
    let food = batches[0]
        .1
        .iter()
        .find(|s| s.placeholder() == "{{Favorite food}}")
        .unwrap();
    match food {
        Substitution::ReplaceText { text, .. } => assert_eq!(text, ""),
        _ => panic!("expected text substitution"),
    }
}

#[tokio::test]
async fn editor_error_propagates_unmodified() {
    struct FailingEditor;

    #[async_trait::async_trait]
    impl DocumentEditor for FailingEditor {
        async fn duplicate(
            &self,
            _template_id: &str,
        ) -> slidecard::error::Result<slidecard::slides::Artifact> {
            Err(slidecard::error::Error::Upstream {
                message: "quota exceeded".to_string(),
            })
        }

        async fn batch_update(
            &self,
            _document_id: &str,
            _batch: &[Substitution],
        ) -> slidecard::error::Result<()> {
            unreachable!("duplicate failed first")
        }
    }

    let err = create_card(&FailingEditor, "template-1", &profile(), &schema())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
}

#[test]
fn substitutions_without_schema_are_just_the_fixed_three() {
    let batch = build_substitutions(&profile(), &TeamProfileSchema::default());
    assert_eq!(batch.len(), 3);
}
