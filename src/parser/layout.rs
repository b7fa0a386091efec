//! Line building: positioned characters to ordered text lines.
//!
//! Pages are processed independently and in ascending page order, so a
//! line never spans a page break. Within a page, characters are sorted by
//! their `top` rounded to one decimal, then by `x0`, and grouped into lines
//! by comparing each character with the first character of the current line.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{Character, Line};

/// Groups characters into lines.
#[derive(Debug, Clone)]
pub struct LineBuilder<'a> {
    tolerance: f64,
    bold_markers: &'a [String],
}

impl<'a> LineBuilder<'a> {
    /// Create a new line builder.
    pub fn new(tolerance: f64, bold_markers: &'a [String]) -> Self {
        Self {
            tolerance,
            bold_markers,
        }
    }

    /// Build the lines of a whole document in reading order.
    pub fn build(&self, chars: &[Character]) -> Vec<Line> {
        let mut pages: BTreeMap<u32, Vec<&Character>> = BTreeMap::new();
        for c in chars {
            pages.entry(c.page).or_default().push(c);
        }

        let mut lines = Vec::new();
        for (page, page_chars) in pages {
            let page_lines = self.build_page(page_chars);
            log::debug!("Page {}: {} lines", page, page_lines.len());
            lines.extend(page_lines);
        }
        lines
    }

    /// Simple Y-based line grouping for a single page.
    fn build_page(&self, chars: Vec<&Character>) -> Vec<Line> {
        let mut keyed: Vec<(f64, &Character)> =
            chars.into_iter().map(|c| (rounded_top(c.top), c)).collect();

        // Stable sort keeps extraction order for identical positions
        keyed.sort_by(|(a_top, a), (b_top, b)| {
            let y_cmp = a_top.total_cmp(b_top);
            if y_cmp == Ordering::Equal {
                a.x0.total_cmp(&b.x0)
            } else {
                y_cmp
            }
        });

        let mut lines: Vec<Line> = Vec::new();
        let mut current_line: Vec<Character> = Vec::new();
        let mut line_top: Option<f64> = None;

        for (_, c) in keyed {
            match line_top {
                Some(top) if (c.top - top).abs() < self.tolerance => {
                    current_line.push(c.clone());
                }
                _ => {
                    if !current_line.is_empty() {
                        lines.push(self.finish(std::mem::take(&mut current_line)));
                    }
                    line_top = Some(c.top);
                    current_line.push(c.clone());
                }
            }
        }

        // Don't forget the last line
        if !current_line.is_empty() {
            lines.push(self.finish(current_line));
        }

        lines
    }

    fn finish(&self, chars: Vec<Character>) -> Line {
        let line = Line::from_characters(&chars, self.bold_markers);
        log::trace!(
            "Line {:?} size={:.1} bold={}",
            line.text(),
            line.font_size(),
            line.is_bold()
        );
        line
    }
}

/// `top` rounded to one decimal.
///
/// Decimal formatting rounds the exact binary value half to even, so
/// `72.05` (stored just below) becomes `72.0` and `20.25` becomes `20.2`.
fn rounded_top(top: f64) -> f64 {
    format!("{:.1}", top).parse().unwrap_or(top)
}
