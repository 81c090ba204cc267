// Domain models for turning a script sheet into a "sources" document.
// Nothing in here knows about HTTP or Google's JSON shapes; the infra layer
// decodes the raw grid data into these types once, at the boundary.

use thiserror::Error;

// ============================================================================
// ROWS (input side)
// ============================================================================

/// How the sheet says a cell's hyperlinks should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperlinkDisplay {
    Linked,
    PlainText,
}

/// One formatted run inside a cell. Only runs that carry a URI are links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRun {
    pub start_offset: usize,
    pub uri: Option<String>,
}

/// A single row of column A, with every formatting field already defaulted.
///
/// Missing formatting in the sheet simply means "not bold, not struck through,
/// not centered, no link display", so a `Row` can always be built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub index: usize,
    pub text: String,
    pub is_bold: bool,
    pub is_strikethrough: bool,
    pub is_centered: bool,
    pub hyperlink_display: Option<HyperlinkDisplay>,
    pub runs: Vec<TextRun>,
}

/// Everything we read from the sheet in one go.
#[derive(Debug, Clone, Default)]
pub struct ColumnRead {
    /// Title of the spreadsheet file itself (used to name the new doc).
    pub spreadsheet_title: String,
    pub rows: Vec<Row>,
}

// ============================================================================
// SECTIONS (middle)
// ============================================================================

/// A heading and the half-open row range `[start_row, end_row)` it owns.
/// `end_row == None` means "until the end of the sheet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
    pub start_row: usize,
    pub end_row: Option<usize>,
}

impl Heading {
    pub fn contains(&self, row: usize) -> bool {
        row >= self.start_row && self.end_row.map_or(true, |end| row < end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub uri: String,
    pub row: usize,
}

/// A heading plus its de-duplicated links, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub links: Vec<String>,
}

/// Heading text -> unique links, in the order headings appear in the sheet.
/// Never holds a section without links.
///
/// Two headings with the same text share one entry: the links of both are
/// merged under the first one's position. This is intentional, so a repeated
/// heading never drops the links found under an earlier copy of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds links under `heading`. A heading that was already seen keeps its
    /// original position and gains any links it didn't have yet.
    pub fn insert(&mut self, heading: &str, links: impl IntoIterator<Item = String>) {
        let mut incoming: Vec<String> = Vec::new();
        for link in links {
            if !incoming.contains(&link) {
                incoming.push(link);
            }
        }
        if incoming.is_empty() {
            return;
        }

        match self.sections.iter_mut().find(|s| s.heading == heading) {
            Some(section) => {
                for link in incoming {
                    if !section.links.contains(&link) {
                        section.links.push(link);
                    }
                }
            }
            None => self.sections.push(Section {
                heading: heading.to_string(),
                links: incoming,
            }),
        }
    }

    #[cfg(test)]
    pub fn get(&self, heading: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.heading == heading)
            .map(|s| s.links.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.sections.iter().map(|s| s.links.len()).sum()
    }
}

// ============================================================================
// EDITS (output side)
// ============================================================================

/// Half-open character range in the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextStyle {
    Bold,
    Hyperlink(String),
}

/// One positional edit. Indexes are only meaningful relative to every edit
/// emitted before it in the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    InsertText { index: usize, text: String },
    SetParagraphStyle { range: TextRange, style: ParagraphStyle },
    SetTextStyle { range: TextRange, style: TextStyle },
    SetBullets { range: TextRange },
}

/// The edits to submit plus where the cursor ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub edits: Vec<Edit>,
    pub cursor: usize,
}

/// What a finished run produced, for the CLI to report.
#[derive(Debug, Clone)]
pub struct SourcesReport {
    pub document_id: String,
    pub document_title: String,
    pub section_count: usize,
    pub link_count: usize,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum SourcesError {
    #[error("Malformed row data: {0}")]
    MalformedRowData(String),

    #[error("Remote service error: {0}")]
    RemoteService(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}
