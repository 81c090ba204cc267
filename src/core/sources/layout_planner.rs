//! Lays a [`SectionMap`] out as positional document edits.
//!
//! Every insertion happens at a running cursor. The title block is
//! `title + "\n\n\n"`, but the cursor stops before its last newline so each
//! section goes in ahead of a trailing blank paragraph. A section inserts
//! `heading + "\n\n"`, steps past the heading line, slots each link in as its
//! own line, then skips the remaining newline to leave a blank line before the
//! next heading.

use super::sources_models::{
    Edit, LayoutPlan, ParagraphStyle, SectionMap, TextRange, TextStyle,
};

/// First insertable position in a fresh document body.
pub const DOCUMENT_START: usize = 1;

/// Length as the document API counts it (UTF-16 code units).
pub fn doc_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn plan_layout(title: &str, sections: &SectionMap) -> LayoutPlan {
    let mut edits = Vec::new();
    let mut cursor = DOCUMENT_START;

    let title_len = doc_len(title);
    edits.push(Edit::InsertText {
        index: cursor,
        text: format!("{}\n\n\n", title),
    });
    edits.push(Edit::SetParagraphStyle {
        range: TextRange::new(cursor, cursor + title_len),
        style: ParagraphStyle::Title,
    });
    cursor += title_len + 2;

    for section in sections.iter() {
        let heading_len = doc_len(&section.heading);
        edits.push(Edit::InsertText {
            index: cursor,
            text: format!("{}\n\n", section.heading),
        });
        edits.push(Edit::SetTextStyle {
            range: TextRange::new(cursor, cursor + heading_len),
            style: TextStyle::Bold,
        });
        cursor += heading_len + 1;

        let bullet_start = cursor;
        for link in &section.links {
            let link_len = doc_len(link);
            edits.push(Edit::InsertText {
                index: cursor,
                text: format!("{}\n", link),
            });
            edits.push(Edit::SetTextStyle {
                range: TextRange::new(cursor, cursor + link_len),
                style: TextStyle::Hyperlink(link.clone()),
            });
            cursor += link_len + 1;
        }

        edits.push(Edit::SetBullets {
            range: TextRange::new(bullet_start, cursor),
        });

        // blank line between sections
        cursor += 1;
    }

    LayoutPlan { edits, cursor }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(entries: &[(&str, &[&str])]) -> SectionMap {
        let mut map = SectionMap::new();
        for (heading, links) in entries {
            map.insert(heading, links.iter().map(|l| l.to_string()));
        }
        map
    }

    fn expected_cursor(title: &str, map: &SectionMap) -> usize {
        let body: usize = map
            .iter()
            .map(|s| doc_len(&s.heading) + 2 + s.links.iter().map(|l| doc_len(l) + 1).sum::<usize>())
            .sum();
        1 + doc_len(title) + 2 + body
    }

    #[test]
    fn empty_map_only_writes_title() {
        let plan = plan_layout("My Script Sources", &SectionMap::new());

        assert_eq!(
            plan.edits,
            vec![
                Edit::InsertText {
                    index: 1,
                    text: "My Script Sources\n\n\n".into(),
                },
                Edit::SetParagraphStyle {
                    range: TextRange::new(1, 18),
                    style: ParagraphStyle::Title,
                },
            ]
        );
        assert_eq!(plan.cursor, 1 + 17 + 2);
    }

    #[test]
    fn lays_out_single_section() {
        let map = sections(&[("Intro", &["http://a", "http://bb"])]);
        let plan = plan_layout("T", &map);

        // title occupies 1..2, cursor moves to 4
        assert_eq!(
            &plan.edits[2..],
            &[
                Edit::InsertText {
                    index: 4,
                    text: "Intro\n\n".into(),
                },
                Edit::SetTextStyle {
                    range: TextRange::new(4, 9),
                    style: TextStyle::Bold,
                },
                Edit::InsertText {
                    index: 10,
                    text: "http://a\n".into(),
                },
                Edit::SetTextStyle {
                    range: TextRange::new(10, 18),
                    style: TextStyle::Hyperlink("http://a".into()),
                },
                Edit::InsertText {
                    index: 19,
                    text: "http://bb\n".into(),
                },
                Edit::SetTextStyle {
                    range: TextRange::new(19, 28),
                    style: TextStyle::Hyperlink("http://bb".into()),
                },
                Edit::SetBullets {
                    range: TextRange::new(10, 29),
                },
            ]
        );
        assert_eq!(plan.cursor, 30);
    }

    #[test]
    fn cursor_matches_closed_form() {
        let map = sections(&[
            ("Intro", &["http://a"]),
            ("Body", &["http://b", "http://a"]),
            ("Outro", &["https://example.com/x"]),
        ]);
        let plan = plan_layout("My Script Sources", &map);
        assert_eq!(plan.cursor, expected_cursor("My Script Sources", &map));
    }

    #[test]
    fn insert_positions_strictly_increase() {
        let map = sections(&[("A", &["http://1", "http://22"]), ("B", &["http://333"])]);
        let plan = plan_layout("Title", &map);

        let inserts: Vec<usize> = plan
            .edits
            .iter()
            .filter_map(|e| match e {
                Edit::InsertText { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert!(inserts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn style_ranges_cover_already_inserted_text() {
        let map = sections(&[("A", &["http://1"]), ("B", &["http://22", "http://3"])]);
        let plan = plan_layout("Title", &map);

        let mut inserted_end = 0;
        for edit in &plan.edits {
            match edit {
                Edit::InsertText { index, text } => {
                    inserted_end = inserted_end.max(index + doc_len(text));
                }
                Edit::SetParagraphStyle { range, .. }
                | Edit::SetTextStyle { range, .. }
                | Edit::SetBullets { range } => {
                    assert!(range.start < range.end);
                    assert!(range.end <= inserted_end, "{:?} outside inserted text", edit);
                }
            }
        }
    }

    #[test]
    fn lengths_count_utf16_units() {
        assert_eq!(doc_len("abc"), 3);
        assert_eq!(doc_len("é"), 1);
        assert_eq!(doc_len("🎬"), 2);

        let plan = plan_layout("🎬", &SectionMap::new());
        assert_eq!(plan.cursor, 1 + 2 + 2);
    }
}
