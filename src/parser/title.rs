//! Title detection from font sizes.

use crate::model::Line;

/// Lines recognized as the title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    /// Title lines joined with spaces, trimmed
    pub text: String,
    /// Indices of the contributing lines, ascending
    pub indices: Vec<usize>,
    /// Largest font size in the document
    pub max_font_size: f64,
}

impl TitleBlock {
    /// Index of the last title line.
    pub fn last_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Index of the first line after the title.
    ///
    /// Lines between scattered title lines are skipped, so a large-font line
    /// far down the document moves this point with it.
    pub fn next_index(&self) -> usize {
        self.last_index().map_or(0, |i| i + 1)
    }
}

/// Find the title: every line whose font size reaches `ratio` times the
/// largest font size in the document.
///
/// Returns `None` when there are no lines.
pub fn detect_title(lines: &[Line], ratio: f64) -> Option<TitleBlock> {
    let max_font_size = lines.iter().map(Line::font_size).reduce(f64::max)?;
    let threshold = max_font_size * ratio;

    let indices: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.font_size() >= threshold)
        .map(|(i, _)| i)
        .collect();

    let text = indices
        .iter()
        .map(|&i| lines[i].text())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    log::debug!(
        "Title: {} line(s) at >= {:.2}pt (max {:.2}pt), last index {:?}",
        indices.len(),
        threshold,
        max_font_size,
        indices.last()
    );

    Some(TitleBlock {
        text,
        indices,
        max_font_size,
    })
}
