//! Paginated Document Composer: places title, author line and chapters onto fixed-size pages.
//!
//! # Algorithm
//! A single `Cursor` (page index + vertical offset) is threaded through `emit`, which
//! splits a block on explicit line breaks and places each line at the cursor. Before a
//! line is placed, a cursor at or below the bottom margin opens a new page and resets to
//! the top. Lines are never reflowed for width: a long line overflows the page to the right.
//!
//! Coordinates follow PDF user space: origin bottom-left, y grows upward.
//!
//! Each block is drawn at the cursor and its gap is applied afterwards, so the title
//! baseline sits exactly at `page_height - margin`. Applying the gap before drawing
//! instead would put the title at `top - 2 * font_size` and shift every later block
//! down by the same amount.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Input types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    /// Free-form body text; may contain embedded line breaks.
    #[serde(rename = "description", alias = "body")]
    pub body: String,
}

impl Chapter {
    /// Heading line for the chapter at 1-based `index`.
    pub fn heading(&self, index: usize) -> String {
        format!("Chapter {index}: {}", self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub author: String,
    #[serde(rename = "content", default)]
    pub chapters: Vec<Chapter>,
}

impl Document {
    pub fn byline(&self) -> String {
        format!("By: {}", self.author)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry and typography, in PDF points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub font_size: f64,
    pub margin: f64,
    pub line_height: f64,
    pub page_width: f64,
    pub page_height: f64,
}

impl Default for LayoutConfig {
    /// Times-Roman 12pt on A4 with 50pt margins and 14pt leading.
    fn default() -> Self {
        Self {
            font_size: 12.0,
            margin: 50.0,
            line_height: 14.0,
            page_width: 595.28,
            page_height: 841.89,
        }
    }
}

impl LayoutConfig {
    /// Baseline of the first line on a fresh page.
    pub fn top(&self) -> f64 {
        self.page_height - self.margin
    }

    /// Number of lines a fresh page holds, measured with the same decrements `emit` uses.
    pub fn lines_per_page(&self) -> usize {
        if self.line_height <= 0.0 {
            return usize::MAX;
        }
        let mut y = self.top();
        let mut count = 0;
        while y > self.margin {
            count += 1;
            y -= self.line_height;
        }
        count
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One line of text at an absolute position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub runs: Vec<TextRun>,
}

impl Page {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            width: config.page_width,
            height: config.page_height,
            runs: Vec::new(),
        }
    }
}

/// Current write position: index of the open page and the baseline of the next line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f64,
}

impl Cursor {
    pub fn top_of(page: usize, config: &LayoutConfig) -> Self {
        Self {
            page,
            y: config.top(),
        }
    }

    /// Moves the cursor down by `gap` points without placing anything.
    pub fn advance(self, gap: f64) -> Self {
        Self {
            y: self.y - gap,
            ..self
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Splits a block into physical lines on `\n`, dropping a trailing `\r` from each.
pub fn split_lines(block: &str) -> impl Iterator<Item = &str> {
    block
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Places every line of `block` starting at `cursor`, opening pages as needed.
///
/// `pages` must be non-empty and `cursor.page` must index its last page.
/// Returns the cursor positioned one line below the last placed line.
pub fn emit(pages: &mut Vec<Page>, cursor: Cursor, block: &str, config: &LayoutConfig) -> Cursor {
    split_lines(block).fold(cursor, |cursor, line| {
        let cursor = if cursor.y <= config.margin {
            pages.push(Page::new(config));
            Cursor::top_of(pages.len() - 1, config)
        } else {
            cursor
        };

        pages[cursor.page].runs.push(TextRun {
            text: line.to_string(),
            x: config.margin,
            y: cursor.y,
            font_size: config.font_size,
        });

        cursor.advance(config.line_height)
    })
}

/// Lays out the whole document. Always returns at least one page.
pub fn compose_pages(document: &Document, config: &LayoutConfig) -> Vec<Page> {
    let mut pages = vec![Page::new(config)];
    let mut cursor = Cursor::top_of(0, config);

    cursor = emit(&mut pages, cursor, &document.title, config).advance(config.font_size * 2.0);
    cursor = emit(&mut pages, cursor, &document.byline(), config)
        .advance(config.font_size * 1.5)
        .advance(config.line_height * 2.0);

    for (i, chapter) in document.chapters.iter().enumerate() {
        cursor = emit(&mut pages, cursor, &chapter.heading(i + 1), config)
            .advance(config.font_size * 2.0);
        cursor = emit(&mut pages, cursor, &chapter.body, config)
            .advance(config.font_size * 1.5)
            .advance(config.line_height * 2.0);
    }

    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, body: &str) -> Chapter {
        Chapter {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn document(chapters: Vec<Chapter>) -> Document {
        Document {
            title: "Test".to_string(),
            author: "A. Writer".to_string(),
            chapters,
        }
    }

    fn numbered_lines(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn all_texts(pages: &[Page]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.runs.iter().map(|r| r.text.clone()))
            .collect()
    }

    fn page_of(pages: &[Page], text: &str) -> usize {
        pages
            .iter()
            .position(|p| p.runs.iter().any(|r| r.text == text))
            .unwrap()
    }

    // ── config ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_page_holds_53_lines() {
        // (841.89 - 100) / 14 = 52.99 → 53 baselines above the bottom margin.
        assert_eq!(LayoutConfig::default().lines_per_page(), 53);
    }

    #[test]
    fn test_lines_per_page_exact_fit_excludes_margin_line() {
        let config = LayoutConfig {
            font_size: 10.0,
            margin: 10.0,
            line_height: 10.0,
            page_width: 100.0,
            page_height: 60.0,
        };
        // Baselines at 50, 40, 30, 20; 10 sits on the margin.
        assert_eq!(config.lines_per_page(), 4);
    }

    // ── split_lines ─────────────────────────────────────────────────────────

    #[test]
    fn test_split_lines_keeps_empty_and_strips_cr() {
        let lines: Vec<&str> = split_lines("a\r\n\nb\n").collect();
        assert_eq!(lines, vec!["a", "", "b", ""]);
    }

    // ── emit ────────────────────────────────────────────────────────────────

    #[test]
    fn test_emit_spills_into_ceil_n_over_k_pages() {
        let config = LayoutConfig::default();
        let k = config.lines_per_page();

        for n in [1, k - 1, k, k + 1, 2 * k, 2 * k + 7] {
            let lines = numbered_lines("L", n);
            let mut pages = vec![Page::new(&config)];
            emit(&mut pages, Cursor::top_of(0, &config), &lines.join("\n"), &config);

            assert_eq!(pages.len(), n.div_ceil(k), "n = {n}");
            assert_eq!(all_texts(&pages), lines, "n = {n}");
        }
    }

    #[test]
    fn test_emit_returns_cursor_below_last_line() {
        let config = LayoutConfig::default();
        let mut pages = vec![Page::new(&config)];
        let cursor = emit(&mut pages, Cursor::top_of(0, &config), "a\nb", &config);
        assert_eq!(cursor.page, 0);
        assert!((cursor.y - (config.top() - 2.0 * config.line_height)).abs() < 1e-9);
    }

    #[test]
    fn test_emit_opens_page_when_cursor_sits_on_margin() {
        let config = LayoutConfig::default();
        let mut pages = vec![Page::new(&config)];
        let cursor = Cursor {
            page: 0,
            y: config.margin,
        };
        let cursor = emit(&mut pages, cursor, "next", &config);

        assert_eq!(pages.len(), 2);
        assert!(pages[0].runs.is_empty());
        assert_eq!(pages[1].runs[0].y, config.top());
        assert_eq!(cursor.page, 1);
    }

    // ── compose_pages ───────────────────────────────────────────────────────

    #[test]
    fn test_single_chapter_scenario() {
        let doc = document(vec![chapter("One", "Line1\nLine2")]);
        let pages = compose_pages(&doc, &LayoutConfig::default());

        assert_eq!(pages.len(), 1);
        assert_eq!(
            all_texts(&pages),
            vec!["Test", "By: A. Writer", "Chapter 1: One", "Line1", "Line2"]
        );
    }

    #[test]
    fn test_zero_chapters_still_has_title_page() {
        let pages = compose_pages(&document(vec![]), &LayoutConfig::default());

        assert_eq!(pages.len(), 1);
        assert_eq!(all_texts(&pages), vec!["Test", "By: A. Writer"]);
    }

    #[test]
    fn test_block_gaps_match_layout_constants() {
        let config = LayoutConfig::default();
        let doc = document(vec![chapter("One", "Body")]);
        let pages = compose_pages(&doc, &config);
        let ys: Vec<f64> = pages[0].runs.iter().map(|r| r.y).collect();

        let lh = config.line_height;
        let fs = config.font_size;
        let expected = [
            config.top(),
            config.top() - lh - 2.0 * fs,
            config.top() - 2.0 * lh - 2.0 * fs - 1.5 * fs - 2.0 * lh,
            config.top() - 3.0 * lh - 4.0 * fs - 1.5 * fs - 2.0 * lh,
        ];
        for (actual, expected) in ys.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
        }
    }

    #[test]
    fn test_every_run_is_above_bottom_margin() {
        let config = LayoutConfig::default();
        let chapters = (0..6)
            .map(|i| chapter(&format!("C{i}"), &numbered_lines("x", 40 + i * 9).join("\n")))
            .collect();
        let pages = compose_pages(&document(chapters), &config);

        assert!(pages.len() > 1);
        for page in &pages {
            for run in &page.runs {
                assert!(run.y > config.margin, "run {:?} below margin", run.text);
                assert!(run.y <= config.top());
                assert_eq!(run.x, config.margin);
                assert_eq!(run.font_size, config.font_size);
            }
        }
    }

    #[test]
    fn test_no_line_dropped_or_duplicated() {
        let body_a = numbered_lines("a", 120);
        let body_b = numbered_lines("b", 3);
        let doc = document(vec![
            chapter("A", &body_a.join("\n")),
            chapter("B", &body_b.join("\n")),
        ]);
        let pages = compose_pages(&doc, &LayoutConfig::default());

        let mut expected = vec!["Test".to_string(), "By: A. Writer".to_string()];
        expected.push("Chapter 1: A".to_string());
        expected.extend(body_a);
        expected.push("Chapter 2: B".to_string());
        expected.extend(body_b);
        assert_eq!(all_texts(&pages), expected);
    }

    #[test]
    fn test_pages_are_filled_in_order() {
        let doc = document(vec![chapter("A", &numbered_lines("a", 200).join("\n"))]);
        let pages = compose_pages(&doc, &LayoutConfig::default());

        // Within each page baselines strictly descend; nothing is written back to an earlier page.
        for page in &pages {
            assert!(page.runs.windows(2).all(|w| w[0].y > w[1].y));
        }
        assert!(page_of(&pages, "a0") < page_of(&pages, "a199"));
    }

    /// Lines of the first chapter body that still fit on page one.
    fn first_body_capacity(config: &LayoutConfig) -> usize {
        let (lh, fs) = (config.line_height, config.font_size);
        let mut y = config.top() - 5.0 * lh - 5.5 * fs;
        let mut fit = 0;
        while y > config.margin {
            fit += 1;
            y -= lh;
        }
        fit
    }

    #[test]
    fn test_full_page_pushes_next_chapter_to_new_page() {
        let config = LayoutConfig::default();
        let fit = first_body_capacity(&config);

        let first_body = numbered_lines("a", fit);
        let doc = document(vec![
            chapter("Full", &first_body.join("\n")),
            chapter("Next", "spill"),
        ]);
        let pages = compose_pages(&doc, &config);

        assert_eq!(pages.len(), 2);
        assert_eq!(page_of(&pages, &format!("a{}", fit - 1)), 0);
        assert_eq!(page_of(&pages, "Chapter 2: Next"), 1);
        assert_eq!(page_of(&pages, "spill"), 1);
        assert_eq!(pages[1].runs[0].y, config.top());
    }

    #[test]
    fn test_one_line_past_capacity_spills_alone() {
        let config = LayoutConfig::default();
        let fit = first_body_capacity(&config);

        let doc = document(vec![chapter("Over", &numbered_lines("a", fit + 1).join("\n"))]);
        let pages = compose_pages(&doc, &config);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].runs.len(), 1);
        assert_eq!(pages[1].runs[0].text, format!("a{fit}"));
    }

    #[test]
    fn test_long_title_is_not_wrapped() {
        let title = "T".repeat(500);
        let doc = Document {
            title: title.clone(),
            author: "A".to_string(),
            chapters: vec![],
        };
        let pages = compose_pages(&doc, &LayoutConfig::default());
        assert_eq!(pages[0].runs[0].text, title);
    }

    #[test]
    fn test_chapter_accepts_body_alias() {
        let json = r#"{"title": "T", "author": "A", "content": [{"title": "One", "body": "x"}]}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.chapters[0].body, "x");

        let json = r#"{"title": "T", "author": "A"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.chapters.is_empty());
    }
}
