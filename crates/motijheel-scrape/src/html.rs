//! Minimal case-insensitive HTML table slicing.
//!
//! The source page is server-rendered and its markup is frequently
//! malformed, so these helpers slice tag blocks by pattern instead of
//! requiring a well-formed document. Only what the share-price table
//! needs is implemented: `<tr>` block iteration and `<td>` text content.

/// Returns the byte range of the next `<open ...> ... close` block at or
/// after `from`. `lower` is the ASCII-lowercased copy of `doc`, computed
/// once per document so block iteration stays linear; ASCII lowercasing
/// preserves byte offsets.
fn next_block(lower: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let start = lower.get(from..)?.find(open)? + from;
    let open_end = lower[start..].find('>')? + start + 1;
    let end = lower[open_end..].find(close)? + open_end + close.len();
    Some((start, end))
}

/// All `<tr>...</tr>` blocks in the document, in order.
pub(crate) fn row_blocks(doc: &str) -> Vec<&str> {
    let lower = doc.to_ascii_lowercase();
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((start, end)) = next_block(&lower, "<tr", "</tr>", pos) {
        rows.push(&doc[start..end]);
        pos = end;
    }
    rows
}

/// Text content of every `<td>...</td>` cell within a row block, in order.
pub(crate) fn cell_text(row: &str) -> Vec<String> {
    let lower = row.to_ascii_lowercase();
    let mut cells = Vec::new();
    let mut pos = 0usize;
    while let Some((start, end)) = next_block(&lower, "<td", "</td>", pos) {
        cells.push(inner_text(&row[start..end]));
        pos = end;
    }
    cells
}

/// Text content of a tag block: nested markup stripped, common entities
/// unescaped, whitespace collapsed.
fn inner_text(block: &str) -> String {
    let inner = match (block.find('>'), block.rfind('<')) {
        (Some(open_end), Some(close_start)) if close_start > open_end => {
            &block[open_end + 1..close_start]
        }
        _ => "",
    };
    let unescaped = inner.replace("&nbsp;", " ").replace("&amp;", "&");

    let mut text = String::with_capacity(unescaped.len());
    let mut in_tag = false;
    for ch in unescaped.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

/// Collapses whitespace runs to single spaces and trims the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_blocks_in_order() {
        let doc = "<table><TR><td>a</td></TR><tr><td>b</td></tr></table>";
        let rows = row_blocks(doc);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains('a'));
        assert!(rows[1].contains('b'));
    }

    #[test]
    fn test_cell_text_strips_nested_markup() {
        let row = "<tr><td><a href=\"x.php\">ABC</a></td><td> 10.50 </td></tr>";
        assert_eq!(cell_text(row), vec!["ABC".to_string(), "10.50".to_string()]);
    }

    #[test]
    fn test_cell_text_unescapes_entities() {
        let row = "<tr><td>A&amp;B</td><td>&nbsp;</td></tr>";
        assert_eq!(cell_text(row), vec!["A&B".to_string(), String::new()]);
    }

    #[test]
    fn test_full_page_of_mixed_case_rows() {
        // A full listing page is ~400 rows; tag case varies in the wild.
        let rows: String = (0..400)
            .map(|i| {
                let tag = if i % 2 == 0 { "tr" } else { "TR" };
                format!("<{tag}><td>{i}</td></{tag}>")
            })
            .collect();
        let doc = format!("<table>{rows}</table>");
        let blocks = row_blocks(&doc);
        assert_eq!(blocks.len(), 400);
        assert_eq!(cell_text(blocks[399]), vec!["399".to_string()]);
    }

    #[test]
    fn test_unclosed_row_is_ignored() {
        let doc = "<tr><td>a</td></tr><tr><td>dangling";
        assert_eq!(row_blocks(doc).len(), 1);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
