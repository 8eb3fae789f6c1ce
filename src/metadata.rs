use quick_xml::{events::Event, Reader};
use std::{fs, path::Path};

pub const METADATA_FILE_NAME: &str = "metadata.xml";

/// Extracts the sort index from a mod folder's `metadata.xml`.
///
/// Every failure mode collapses to `None` and the reason is discarded by
/// design: a mod without a readable index is still a perfectly valid mod,
/// it just has no declared ordering.
pub fn read_sort_index(mod_dir: &Path) -> Option<String> {
    let bytes = fs::read(mod_dir.join(METADATA_FILE_NAME)).ok()?;
    parse_name_index(&bytes)
}

/// Applies the leading-digits rule to the text of the FIRST `<name>` element
/// that is a direct child of the root. Later `<name>` siblings are never
/// consulted, and only the text before the first child node inside `<name>`
/// counts. A well-formedness error anywhere in the document discards the
/// whole result, including an element still open at end of input.
pub fn parse_name_index(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut in_name = false;
    let mut seen_name = false;
    let mut index: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if in_name {
                    // a child element ends the name text
                    in_name = false;
                } else if depth == 1 && !seen_name && e.name().as_ref() == b"name" {
                    seen_name = true;
                    in_name = true;
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if in_name {
                    in_name = false;
                } else if depth == 1 && !seen_name && e.name().as_ref() == b"name" {
                    // a self-closing <name/> is still the first name, with no text
                    seen_name = true;
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                in_name = false;
            }
            Ok(Event::Text(e)) => {
                if in_name && index.is_none() {
                    let text = e.unescape().ok()?;
                    index = leading_sort_number(&text);
                }
            }
            Ok(Event::Eof) => {
                if depth != 0 {
                    return None;
                }
                break;
            }
            Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }

    index
}

/// A run of ASCII digits at the very start of the text, terminated by a
/// whitespace character. `"10 Cool Mod"` yields `"10"`; `"Cool Mod 10"`
/// and a bare `"10"` yield nothing.
fn leading_sort_number(text: &str) -> Option<String> {
    let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let rest = &text[digits.len()..];
    if rest.chars().next().is_some_and(|c| c.is_whitespace()) {
        Some(digits)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_leading_index_from_name() {
        let xml = b"<metadata><name>10 Cool Mod</name></metadata>";
        assert_eq!(parse_name_index(xml), Some("10".to_string()));
    }

    #[test]
    fn name_without_index_yields_none() {
        let xml = b"<metadata><name>Cool Mod</name></metadata>";
        assert_eq!(parse_name_index(xml), None);
    }

    #[test]
    fn index_requires_trailing_whitespace() {
        assert_eq!(parse_name_index(b"<metadata><name>10</name></metadata>"), None);
        assert_eq!(
            parse_name_index(b"<metadata><name>10x Damage</name></metadata>"),
            None
        );
    }

    #[test]
    fn leading_whitespace_defeats_the_pattern() {
        let xml = b"<metadata><name> 10 Cool Mod</name></metadata>";
        assert_eq!(parse_name_index(xml), None);
    }

    #[test]
    fn name_must_be_a_direct_child_of_the_root() {
        let xml = b"<metadata><info><name>10 Nested</name></info></metadata>";
        assert_eq!(parse_name_index(xml), None);
    }

    #[test]
    fn first_name_element_wins() {
        let xml = b"<metadata><name>3 First</name><name>7 Second</name></metadata>";
        assert_eq!(parse_name_index(xml), Some("3".to_string()));
    }

    #[test]
    fn later_siblings_are_not_consulted_when_first_name_has_no_index() {
        let xml = b"<metadata><name>NoIndex</name><name>7 Second</name></metadata>";
        assert_eq!(parse_name_index(xml), None);
        let xml = b"<metadata><name/><name>7 Second</name></metadata>";
        assert_eq!(parse_name_index(xml), None);
    }

    #[test]
    fn only_text_before_the_first_child_counts() {
        let xml = b"<metadata><name><br/>10 X</name></metadata>";
        assert_eq!(parse_name_index(xml), None);
        let xml = b"<metadata><name><b>10 X</b></name></metadata>";
        assert_eq!(parse_name_index(xml), None);
        let xml = b"<metadata><name>10 X<br/>tail</name></metadata>";
        assert_eq!(parse_name_index(xml), Some("10".to_string()));
    }

    #[test]
    fn malformed_document_yields_none() {
        assert_eq!(parse_name_index(b"<metadata><name>10 Cool Mod</name>"), None);
        assert_eq!(parse_name_index(b"not xml at all"), None);
    }

    #[test]
    fn empty_name_yields_none() {
        assert_eq!(parse_name_index(b"<metadata><name/></metadata>"), None);
    }

    #[test]
    fn missing_file_yields_none() {
        assert_eq!(read_sort_index(Path::new("/nonexistent/mod")), None);
    }
}
