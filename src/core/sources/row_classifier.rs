use super::sources_models::{HyperlinkDisplay, Row, TextRun};

/// What a single row means for the sources document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Struck-through rows are ignored no matter what else they carry.
    Skip,
    /// `(uri, row)` pairs in text order, one per run that actually has a URI.
    LinkLine(Vec<(String, usize)>),
    /// `(text, row)` of a bold, centered, non-link row.
    HeadingLine(String, usize),
    PlainLine,
}

/// Classifies one row.
///
/// Order matters: strikethrough wins over everything, then link display is
/// checked, and only rows without a linked display can be headings.
pub fn classify_row(row: &Row) -> RowKind {
    if row.is_strikethrough {
        return RowKind::Skip;
    }

    if row.hyperlink_display == Some(HyperlinkDisplay::Linked) {
        let mut runs: Vec<&TextRun> = row.runs.iter().collect();
        runs.sort_by_key(|run| run.start_offset);

        let links = runs
            .into_iter()
            .filter_map(|run| run.uri.as_deref())
            .filter(|uri| !uri.is_empty())
            .map(|uri| (uri.to_string(), row.index))
            .collect();
        return RowKind::LinkLine(links);
    }

    if row.is_bold && row.is_centered {
        return RowKind::HeadingLine(row.text.clone(), row.index);
    }

    RowKind::PlainLine
}
