// =============================================================================
// GOOGLE DOCS / DRIVE WRITER
// =============================================================================
//
// Creates the sources doc, applies the planned edits in a single batchUpdate
// and moves the file into the sources folder through the Drive API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::auth::GoogleAuth;
use crate::core::sources::{DocumentService, Edit, ParagraphStyle, SourcesError, TextStyle};

const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";
const TITLE_SPACING_PT: f64 = 10.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedDocument {
    document_id: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    #[serde(default)]
    parents: Vec<String>,
}

/// Turns one core edit into a Docs API request object.
fn edit_to_request(edit: &Edit) -> Value {
    match edit {
        Edit::InsertText { index, text } => json!({
            "insertText": {
                "location": { "index": index },
                "text": text,
            }
        }),
        Edit::SetParagraphStyle { range, style } => match style {
            ParagraphStyle::Title => json!({
                "updateParagraphStyle": {
                    "range": { "startIndex": range.start, "endIndex": range.end },
                    "paragraphStyle": {
                        "namedStyleType": "TITLE",
                        "spaceAbove": { "magnitude": TITLE_SPACING_PT, "unit": "PT" },
                        "spaceBelow": { "magnitude": TITLE_SPACING_PT, "unit": "PT" },
                    },
                    "fields": "namedStyleType,spaceAbove,spaceBelow",
                }
            }),
        },
        Edit::SetTextStyle { range, style } => {
            let (text_style, fields) = match style {
                TextStyle::Bold => (json!({ "bold": true }), "bold"),
                TextStyle::Hyperlink(url) => (json!({ "link": { "url": url } }), "link"),
            };
            json!({
                "updateTextStyle": {
                    "range": { "startIndex": range.start, "endIndex": range.end },
                    "textStyle": text_style,
                    "fields": fields,
                }
            })
        }
        Edit::SetBullets { range } => json!({
            "createParagraphBullets": {
                "range": { "startIndex": range.start, "endIndex": range.end },
                "bulletPreset": BULLET_PRESET,
            }
        }),
    }
}

pub fn batch_update_body(edits: &[Edit]) -> Value {
    json!({ "requests": edits.iter().map(edit_to_request).collect::<Vec<_>>() })
}

pub struct GoogleDocsClient {
    client: Client,
    auth: Arc<GoogleAuth>,
    docs_url: String,
    drive_url: String,
}

impl GoogleDocsClient {
    pub fn new(auth: Arc<GoogleAuth>) -> Self {
        Self {
            client: Client::new(),
            auth,
            docs_url: "https://docs.googleapis.com/v1".to_string(),
            drive_url: "https://www.googleapis.com/drive/v3".to_string(),
        }
    }

    async fn check(response: Response, api: &str) -> Result<Response, SourcesError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(SourcesError::RemoteService(format!(
            "{} API error ({}): {}",
            api, status, text
        )))
    }

    async fn parents_of(&self, token: &str, file_id: &str) -> Result<Vec<String>, SourcesError> {
        let url = format!("{}/files/{}", self.drive_url, file_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("fields", "parents")])
            .send()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        let file: DriveFile = Self::check(response, "Google Drive")
            .await?
            .json()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;
        Ok(file.parents)
    }
}

#[async_trait]
impl DocumentService for GoogleDocsClient {
    async fn create(&self, title: &str) -> Result<String, SourcesError> {
        let token = self.auth.access_token().await?;
        let url = format!("{}/documents", self.docs_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "title": title }))
            .send()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        let doc: CreatedDocument = Self::check(response, "Google Docs")
            .await?
            .json()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        println!(
            "Created document with the title: {}",
            doc.title.as_deref().unwrap_or(title)
        );
        Ok(doc.document_id)
    }

    async fn batch_edit(&self, document_id: &str, edits: &[Edit]) -> Result<(), SourcesError> {
        let token = self.auth.access_token().await?;
        let url = format!("{}/documents/{}:batchUpdate", self.docs_url, document_id);

        tracing::debug!("Submitting {} edits to {}", edits.len(), document_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&batch_update_body(edits))
            .send()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        Self::check(response, "Google Docs").await?;
        Ok(())
    }

    async fn move_to_folder(&self, file_id: &str, folder_id: &str) -> Result<(), SourcesError> {
        let token = self.auth.access_token().await?;
        let previous_parents = self.parents_of(&token, file_id).await?.join(",");

        let url = format!("{}/files/{}", self.drive_url, file_id);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(&token)
            .query(&[
                ("addParents", folder_id),
                ("removeParents", previous_parents.as_str()),
                ("fields", "id, parents"),
            ])
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        Self::check(response, "Google Drive").await?;
        Ok(())
    }
}
