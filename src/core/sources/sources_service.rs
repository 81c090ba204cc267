// The sources pipeline: read the script sheet, group its links by heading,
// write them into a fresh doc and file that doc away.
//
// The service only talks to the outside world through the two ports below,
// so the whole run can be exercised with in-memory fakes.

use async_trait::async_trait;

use super::layout_planner::plan_layout;
use super::section_builder::extract_sections;
use super::sources_models::{ColumnRead, Edit, SourcesError, SourcesReport};

/// Appended to the script title to form the doc's heading line.
pub const TITLE_SUFFIX: &str = " Sources";

// ============================================================================
// PORTS
// ============================================================================

/// Read access to the script spreadsheet.
#[async_trait]
pub trait SheetService: Send + Sync {
    /// Returns every row of column A on `sheet_name`, in sheet order.
    async fn read_column_a(
        &self,
        sheet_id: &str,
        sheet_name: &str,
    ) -> Result<ColumnRead, SourcesError>;
}

/// Write access to documents and the folders they live in.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Creates an empty document and returns its id.
    async fn create(&self, title: &str) -> Result<String, SourcesError>;

    /// Applies all edits as one batch. The remote side applies all or none.
    async fn batch_edit(&self, document_id: &str, edits: &[Edit]) -> Result<(), SourcesError>;

    /// Moves a file out of its current parents and into `folder_id`.
    async fn move_to_folder(&self, file_id: &str, folder_id: &str) -> Result<(), SourcesError>;
}

// ============================================================================
// SERVICE
// ============================================================================

/// What to read and where to file the result.
#[derive(Debug, Clone)]
pub struct SourcesRequest {
    pub sheet_id: String,
    pub sheet_name: String,
    pub folder_id: String,
}

pub struct SourcesService<S: SheetService, D: DocumentService> {
    sheets: S,
    docs: D,
}

impl<S: SheetService, D: DocumentService> SourcesService<S, D> {
    pub fn new(sheets: S, docs: D) -> Self {
        Self { sheets, docs }
    }

    /// Runs the whole pipeline. Stops at the first failing stage; nothing after
    /// it runs.
    pub async fn run(&self, request: &SourcesRequest) -> Result<SourcesReport, SourcesError> {
        let column = self
            .sheets
            .read_column_a(&request.sheet_id, &request.sheet_name)
            .await
            .map_err(|e| {
                tracing::error!("An error occurred while reading the script from the sheet: {}", e);
                e
            })?;
        tracing::info!(
            sheet = %request.sheet_name,
            rows = column.rows.len(),
            "Read script column"
        );

        let (sections, title) = extract_sections(&column.rows).map_err(|e| {
            tracing::error!("An error occurred while processing the data: {}", e);
            e
        })?;
        let heading_text = format!("{}{}", title, TITLE_SUFFIX);

        let document_title = if column.spreadsheet_title.is_empty() {
            heading_text.clone()
        } else {
            column.spreadsheet_title.clone()
        };

        let document_id = self.docs.create(&document_title).await.map_err(|e| {
            tracing::error!("An error occurred while creating the doc: {}", e);
            e
        })?;
        tracing::info!(%document_id, title = %document_title, "Created document");

        let plan = plan_layout(&heading_text, &sections);
        self.docs
            .batch_edit(&document_id, &plan.edits)
            .await
            .map_err(|e| {
                tracing::error!("An error occurred while adding the data to the doc: {}", e);
                e
            })?;
        tracing::info!(
            edits = plan.edits.len(),
            cursor = plan.cursor,
            sections = sections.len(),
            "Added the data to the doc"
        );

        self.docs
            .move_to_folder(&document_id, &request.folder_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    "An error occurred while moving the doc to the sources folder: {}",
                    e
                );
                e
            })?;
        tracing::info!(folder_id = %request.folder_id, "Moved document to sources folder");

        Ok(SourcesReport {
            document_id,
            document_title,
            section_count: sections.len(),
            link_count: sections.link_count(),
        })
    }
}
