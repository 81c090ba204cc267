pub mod layout_planner;
pub mod row_classifier;
pub mod section_builder;
pub mod sources_models;
pub mod sources_service;

pub use sources_models::{
    ColumnRead, Edit, HyperlinkDisplay, ParagraphStyle, Row, SourcesError, TextRun, TextStyle,
};
pub use sources_service::{DocumentService, SheetService, SourcesRequest, SourcesService};
