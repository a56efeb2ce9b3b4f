mod format;

#[cfg(test)]
mod tests;

pub use format::DiffFormatter;

use crate::diff::{diff_chars, LineDiff, Segment};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Which side of a changed line is being rendered
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

/// Decides which segments end up on the `-` and `+` line of a changed line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPolicy {
    /// The old side shows only the unchanged segments while the new side shows every segment,
    /// removed ones included.
    ///
    /// This is how the viewer has always rendered changes. It is most likely a defect since the
    /// new side mixes in text that was deleted, but it is kept as the default until confirmed.
    #[default]
    Legacy,
    /// The old side is the old line and the new side is the new line.
    Exact,
}

impl SegmentPolicy {
    /// Text shown on `side` of a changed line
    pub fn side_text(self, segments: &[Segment<'_>], side: Side) -> String {
        segments
            .iter()
            .filter(|segment| self.keeps(segment, side))
            .map(Segment::text)
            .collect()
    }

    fn keeps(self, segment: &Segment<'_>, side: Side) -> bool {
        match (self, side, segment) {
            (_, _, Segment::Unchanged(_)) => true,
            (SegmentPolicy::Legacy, Side::Old, _) => false,
            (SegmentPolicy::Legacy, Side::New, _) => true,
            (SegmentPolicy::Exact, Side::Old, Segment::Removed(_)) => true,
            (SegmentPolicy::Exact, Side::New, Segment::Added(_)) => true,
            (SegmentPolicy::Exact, _, _) => false,
        }
    }
}

/// What to do when the two texts have a different number of lines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Compare up to the longer text, treating missing lines as empty
    #[default]
    Pad,
    /// Compare only as many lines as the old text has; missing new lines are empty and extra new
    /// lines are ignored
    Truncate,
    /// Refuse to compare texts with different line counts
    Reject,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub segment_policy: SegmentPolicy,
    pub length_policy: LengthPolicy,
}

/// Returned by [`LengthPolicy::Reject`] when the line counts differ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("old text has {old} lines but new text has {new}")]
pub struct LengthMismatch {
    pub old: usize,
    pub new: usize,
}

/// The two shapes a rendering comes in
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    /// Only the changed lines, each prefixed with its line number. Returned on submission.
    Summary,
    /// Every line, unchanged ones included. Shown when a stored diff is viewed.
    Full,
}

/// One output line of a rendering
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    Unchanged { number: usize, text: String },
    Removed { number: usize, text: String },
    Added { number: usize, text: String },
}

impl DiffLine {
    pub fn number(&self) -> usize {
        match self {
            DiffLine::Unchanged { number, .. }
            | DiffLine::Removed { number, .. }
            | DiffLine::Added { number, .. } => *number,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            DiffLine::Unchanged { text, .. }
            | DiffLine::Removed { text, .. }
            | DiffLine::Added { text, .. } => text,
        }
    }
}

/// An ordered sequence of [`DiffLine`]s, formatted with [`DiffFormatter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendering {
    view: View,
    lines: Vec<DiffLine>,
}

impl Rendering {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Number of line pairs that differ
    pub fn changed_lines(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, DiffLine::Removed { .. }))
            .count()
    }

    /// Returns a `Display` impl of the rendering wrapped in `--- Old`/`+++ New` headers and a
    /// single hunk header, ready for a unified diff viewer.
    pub fn document(&self) -> impl fmt::Display + '_ {
        DiffFormatter::new().fmt_document(self)
    }

    // Line counts on the old and new side, as a unified diff hunk header counts them
    fn side_lens(&self) -> (usize, usize) {
        self.lines.iter().fold((0, 0), |count, line| match line {
            DiffLine::Unchanged { .. } => (count.0 + 1, count.1 + 1),
            DiffLine::Removed { .. } => (count.0 + 1, count.1),
            DiffLine::Added { .. } => (count.0, count.1 + 1),
        })
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DiffFormatter::new().fmt_rendering(self))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct HunkRange {
    /// The starting line number of a hunk
    start: usize,
    /// The hunk size (number of lines)
    len: usize,
}

impl HunkRange {
    pub(crate) fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }
}

impl fmt::Display for HunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if self.len != 1 {
            write!(f, ",{}", self.len)?;
        }
        Ok(())
    }
}

/// Turns pairs of line sequences into [`Rendering`]s.
///
/// ```
/// use diffkeep::{split_lines, Renderer};
///
/// let old = split_lines("a\nb\nc");
/// let new = split_lines("a\nx\nc");
///
/// let renderer = Renderer::default();
/// let full = renderer.render(&old, &new).unwrap();
/// assert_eq!(full.to_string(), " a\n-\n+bx\n c\n");
///
/// let summary = renderer.render_changes(&old, &new).unwrap().unwrap();
/// assert_eq!(summary.to_string(), "2 - \n2 + bx\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Diff the lines at each index, honouring the configured [`LengthPolicy`].
    pub fn line_diffs<'a>(
        &self,
        old_lines: &[&'a str],
        new_lines: &[&'a str],
    ) -> Result<Vec<LineDiff<'a>>, LengthMismatch> {
        let count = match self.options.length_policy {
            LengthPolicy::Pad => old_lines.len().max(new_lines.len()),
            LengthPolicy::Truncate => old_lines.len(),
            LengthPolicy::Reject if old_lines.len() != new_lines.len() => {
                return Err(LengthMismatch {
                    old: old_lines.len(),
                    new: new_lines.len(),
                });
            }
            LengthPolicy::Reject => old_lines.len(),
        };

        Ok((0..count)
            .map(|idx| {
                let old = old_lines.get(idx).copied().unwrap_or("");
                let new = new_lines.get(idx).copied().unwrap_or("");
                LineDiff::new(idx + 1, diff_chars(old, new))
            })
            .collect())
    }

    /// Render every line, unchanged ones included.
    pub fn render(
        &self,
        old_lines: &[&str],
        new_lines: &[&str],
    ) -> Result<Rendering, LengthMismatch> {
        let diffs = self.line_diffs(old_lines, new_lines)?;
        Ok(self.build(&diffs, View::Full))
    }

    /// Render only the changed lines, or `None` if no line changed.
    pub fn render_changes(
        &self,
        old_lines: &[&str],
        new_lines: &[&str],
    ) -> Result<Option<Rendering>, LengthMismatch> {
        let diffs = self.line_diffs(old_lines, new_lines)?;
        let rendering = self.build(&diffs, View::Summary);
        Ok((!rendering.lines.is_empty()).then_some(rendering))
    }

    fn build(&self, diffs: &[LineDiff<'_>], view: View) -> Rendering {
        let policy = self.options.segment_policy;
        let mut lines = Vec::new();

        for diff in diffs {
            let number = diff.number();
            match diff.segments() {
                [Segment::Unchanged(text)] => {
                    if view == View::Full {
                        lines.push(DiffLine::Unchanged {
                            number,
                            text: (*text).to_owned(),
                        });
                    }
                }
                segments => {
                    lines.push(DiffLine::Removed {
                        number,
                        text: policy.side_text(segments, Side::Old),
                    });
                    lines.push(DiffLine::Added {
                        number,
                        text: policy.side_text(segments, Side::New),
                    });
                }
            }
        }

        Rendering { view, lines }
    }
}
