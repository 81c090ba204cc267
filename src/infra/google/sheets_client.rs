// =============================================================================
// GOOGLE SHEETS READER
// =============================================================================
//
// Fetches column A of one sheet with full grid data (values + formatting) and
// decodes it into core `Row`s. Google leaves out any field that isn't set, so
// every field below is optional and decoding never fails on missing format
// data: a cell with no `textFormat` is simply not bold and not struck through.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use super::auth::GoogleAuth;
use crate::core::sources::{
    ColumnRead, HyperlinkDisplay, Row, SheetService, SourcesError, TextRun,
};

// =============================================================================
// GOOGLE SHEETS API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetProperties {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sheet {
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    start_row: Option<usize>,
    #[serde(default)]
    row_data: Vec<RowData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowData {
    #[serde(default)]
    values: Vec<CellData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellData {
    user_entered_value: Option<ExtendedValue>,
    formatted_value: Option<String>,
    effective_format: Option<CellFormat>,
    #[serde(default)]
    text_format_runs: Vec<TextFormatRun>,
    hyperlink: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtendedValue {
    string_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellFormat {
    text_format: Option<TextFormat>,
    horizontal_alignment: Option<String>,
    hyperlink_display_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextFormat {
    bold: Option<bool>,
    strikethrough: Option<bool>,
    link: Option<LinkRef>,
}

#[derive(Debug, Deserialize)]
struct LinkRef {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextFormatRun {
    start_index: Option<usize>,
    format: Option<TextFormat>,
}

// =============================================================================
// DECODING
// =============================================================================

fn decode_spreadsheet(spreadsheet: Spreadsheet) -> ColumnRead {
    let spreadsheet_title = spreadsheet
        .properties
        .and_then(|p| p.title)
        .unwrap_or_default();

    let rows = spreadsheet
        .sheets
        .into_iter()
        .next()
        .and_then(|sheet| sheet.data.into_iter().next())
        .map(|grid| {
            let offset = grid.start_row.unwrap_or(0);
            grid.row_data
                .into_iter()
                .enumerate()
                .map(|(i, row)| decode_row(offset + i, row))
                .collect()
        })
        .unwrap_or_default();

    ColumnRead {
        spreadsheet_title,
        rows,
    }
}

fn decode_row(index: usize, row: RowData) -> Row {
    let Some(cell) = row.values.into_iter().next() else {
        return Row {
            index,
            ..Default::default()
        };
    };

    let text = cell
        .user_entered_value
        .and_then(|v| v.string_value)
        .or(cell.formatted_value)
        .unwrap_or_default();

    let format = cell.effective_format.unwrap_or_default();
    let text_format = format.text_format.unwrap_or_default();

    let hyperlink_display = match format.hyperlink_display_type.as_deref() {
        Some("LINKED") => Some(HyperlinkDisplay::Linked),
        Some("PLAIN_TEXT") => Some(HyperlinkDisplay::PlainText),
        _ => None,
    };

    let mut runs: Vec<TextRun> = cell
        .text_format_runs
        .into_iter()
        .map(|run| TextRun {
            start_offset: run.start_index.unwrap_or(0),
            uri: run.format.and_then(|f| f.link).and_then(|l| l.uri),
        })
        .collect();

    // Whole-cell links come back without runs.
    if runs.is_empty() {
        if let Some(uri) = cell.hyperlink {
            runs.push(TextRun {
                start_offset: 0,
                uri: Some(uri),
            });
        }
    }

    Row {
        index,
        text,
        is_bold: text_format.bold.unwrap_or(false),
        is_strikethrough: text_format.strikethrough.unwrap_or(false),
        is_centered: format.horizontal_alignment.as_deref() == Some("CENTER"),
        hyperlink_display,
        runs,
    }
}

/// A1 range for column A of `sheet_name`, quoted so names with spaces work.
fn column_a_range(sheet_name: &str) -> String {
    format!("'{}'!A:A", sheet_name.replace('\'', "''"))
}

// =============================================================================
// GOOGLE SHEETS CLIENT
// =============================================================================

pub struct GoogleSheetsClient {
    client: Client,
    auth: Arc<GoogleAuth>,
    base_url: String,
}

impl GoogleSheetsClient {
    pub fn new(auth: Arc<GoogleAuth>) -> Self {
        Self {
            client: Client::new(),
            auth,
            base_url: "https://sheets.googleapis.com/v4".to_string(),
        }
    }

    /// Accepts either a bare spreadsheet id or a full Sheets URL.
    pub fn extract_spreadsheet_id(url_or_id: &str) -> Option<String> {
        let url_or_id = url_or_id.trim();
        if url_or_id.contains("docs.google.com") {
            if let Some(start) = url_or_id.find("/spreadsheets/d/") {
                let after_d = &url_or_id[start + "/spreadsheets/d/".len()..];
                let end = after_d
                    .find(|c: char| c == '/' || c == '?' || c == '#')
                    .unwrap_or(after_d.len());
                let id = &after_d[..end];
                if !id.is_empty() {
                    return Some(id.to_string());
                }
            }
        } else if !url_or_id.is_empty() && !url_or_id.contains('/') && !url_or_id.contains(' ') {
            return Some(url_or_id.to_string());
        }
        None
    }
}

#[async_trait]
impl SheetService for GoogleSheetsClient {
    async fn read_column_a(
        &self,
        sheet_id: &str,
        sheet_name: &str,
    ) -> Result<ColumnRead, SourcesError> {
        let sheet_id = Self::extract_spreadsheet_id(sheet_id).ok_or_else(|| {
            SourcesError::RemoteService(format!("Could not extract sheet ID from: {}", sheet_id))
        })?;

        let token = self.auth.access_token().await?;
        let url = format!("{}/spreadsheets/{}", self.base_url, sheet_id);

        tracing::debug!("Fetching column A of '{}' from sheet {}", sheet_name, sheet_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("includeGridData", "true"),
                ("ranges", column_a_range(sheet_name).as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SourcesError::RemoteService(format!(
                "Google Sheets API error ({}): {}",
                status, text
            )));
        }

        let spreadsheet: Spreadsheet = response
            .json()
            .await
            .map_err(|e| SourcesError::RemoteService(e.to_string()))?;

        Ok(decode_spreadsheet(spreadsheet))
    }
}
