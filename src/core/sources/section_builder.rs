// Turns classified rows into heading -> links groups.
//
// Each heading owns the rows from its own row up to (not including) the next
// heading's row; the last heading owns everything after it. Links are filed
// under whichever heading's range contains their row.

use super::row_classifier::{classify_row, RowKind};
use super::sources_models::{Heading, Link, Row, SectionMap, SourcesError};

/// Row the script title lives on. It never starts a section.
pub const TITLE_ROW: usize = 0;

/// Reads the title and builds the section map for a whole column.
pub fn extract_sections(rows: &[Row]) -> Result<(SectionMap, String), SourcesError> {
    let title = read_title(rows)?;

    let kinds: Vec<RowKind> = rows.iter().map(classify_row).collect();
    let sections = build_sections(&kinds);

    tracing::debug!(
        rows = rows.len(),
        sections = sections.len(),
        links = sections.link_count(),
        "Extracted sections from sheet"
    );

    Ok((sections, title))
}

fn read_title(rows: &[Row]) -> Result<String, SourcesError> {
    let first = rows
        .first()
        .ok_or_else(|| SourcesError::MalformedRowData("the sheet has no rows".to_string()))?;

    if first.index != TITLE_ROW || first.text.trim().is_empty() {
        return Err(SourcesError::MalformedRowData(
            "cell A1 does not contain the script title".to_string(),
        ));
    }

    Ok(first.text.clone())
}

/// Builds the map from already-classified rows (in sheet order).
pub fn build_sections(kinds: &[RowKind]) -> SectionMap {
    let mut found: Vec<(String, usize)> = Vec::new();
    let mut links: Vec<Link> = Vec::new();

    for kind in kinds {
        match kind {
            RowKind::HeadingLine(text, row) => found.push((text.clone(), *row)),
            RowKind::LinkLine(pairs) => links.extend(pairs.iter().map(|(uri, row)| Link {
                uri: uri.clone(),
                row: *row,
            })),
            RowKind::Skip | RowKind::PlainLine => {}
        }
    }

    let headings = heading_ranges(found);

    let mut sections = SectionMap::new();
    for heading in headings.iter().filter(|h| h.start_row != TITLE_ROW) {
        let under: Vec<String> = links
            .iter()
            .filter(|link| heading.contains(link.row))
            .map(|link| link.uri.clone())
            .collect();

        // Empty link lists are dropped by the map itself.
        sections.insert(&heading.text, under);
    }

    sections
}

/// Closes each heading's range at the next heading's row.
pub fn heading_ranges(found: Vec<(String, usize)>) -> Vec<Heading> {
    let starts: Vec<usize> = found.iter().map(|(_, row)| *row).collect();

    found
        .into_iter()
        .enumerate()
        .map(|(i, (text, start_row))| Heading {
            text,
            start_row,
            end_row: starts.get(i + 1).copied(),
        })
        .collect()
}
