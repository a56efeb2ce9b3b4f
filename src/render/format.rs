use super::{DiffLine, HunkRange, Rendering, View};
#[cfg(feature = "color")]
use anstyle::{AnsiColor, Style};
use std::fmt::{Display, Formatter, Result};

const DOCUMENT_HEADER: &str = "--- Old\n+++ New";

/// Struct used to adjust the formatting of a `Rendering`
#[derive(Copy, Clone, Debug)]
pub struct DiffFormatter {
    #[cfg(feature = "color")]
    with_color: bool,

    #[cfg(feature = "color")]
    unchanged: Style,
    #[cfg(feature = "color")]
    removed: Style,
    #[cfg(feature = "color")]
    added: Style,
    #[cfg(feature = "color")]
    hunk_header: Style,
    #[cfg(feature = "color")]
    document_header: Style,
}

#[derive(Copy, Clone, Debug)]
enum Part {
    Unchanged,
    Removed,
    Added,
    HunkHeader,
    DocumentHeader,
}

impl DiffFormatter {
    /// Construct a new formatter
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "color")]
            with_color: false,

            #[cfg(feature = "color")]
            unchanged: Style::new(),
            #[cfg(feature = "color")]
            removed: AnsiColor::Red.on_default(),
            #[cfg(feature = "color")]
            added: AnsiColor::Green.on_default(),
            #[cfg(feature = "color")]
            hunk_header: AnsiColor::Cyan.on_default(),
            #[cfg(feature = "color")]
            document_header: Style::new().bold(),
        }
    }

    /// Enable formatting with ANSI colors
    #[cfg(feature = "color")]
    pub fn with_color(mut self) -> Self {
        self.with_color = true;
        self
    }

    /// Returns a `Display` impl which prints the lines of a `Rendering`
    pub fn fmt_rendering<'a>(&'a self, rendering: &'a Rendering) -> impl Display + 'a {
        RenderingDisplay { f: self, rendering }
    }

    /// Returns a `Display` impl which prints a `Rendering` as a unified diff document with a
    /// single hunk
    pub fn fmt_document<'a>(&self, rendering: &'a Rendering) -> impl Display + use<'a> {
        DocumentDisplay {
            f: *self,
            rendering,
        }
    }

    fn fmt_line<'a>(&'a self, line: &'a DiffLine, view: View) -> impl Display + 'a {
        LineDisplay { f: self, line, view }
    }

    #[cfg(feature = "color")]
    fn paint(&self, f: &mut Formatter<'_>, part: Part, content: impl Display) -> Result {
        if !self.with_color {
            return write!(f, "{}", content);
        }

        let style = match part {
            Part::Unchanged => self.unchanged,
            Part::Removed => self.removed,
            Part::Added => self.added,
            Part::HunkHeader => self.hunk_header,
            Part::DocumentHeader => self.document_header,
        };
        write!(f, "{}{}{}", style.render(), content, style.render_reset())
    }

    #[cfg(not(feature = "color"))]
    fn paint(&self, f: &mut Formatter<'_>, _part: Part, content: impl Display) -> Result {
        write!(f, "{}", content)
    }
}

impl Default for DiffFormatter {
    fn default() -> Self {
        Self::new()
    }
}

struct RenderingDisplay<'a> {
    f: &'a DiffFormatter,
    rendering: &'a Rendering,
}

impl Display for RenderingDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for line in self.rendering.lines() {
            write!(f, "{}", self.f.fmt_line(line, self.rendering.view()))?;
        }

        Ok(())
    }
}

struct DocumentDisplay<'a> {
    f: DiffFormatter,
    rendering: &'a Rendering,
}

impl Display for DocumentDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (old_len, new_len) = self.rendering.side_lens();

        self.f.paint(f, Part::DocumentHeader, DOCUMENT_HEADER)?;
        writeln!(f)?;
        self.f.paint(
            f,
            Part::HunkHeader,
            format_args!(
                "@@ -{} +{} @@",
                HunkRange::new(1, old_len),
                HunkRange::new(1, new_len)
            ),
        )?;
        writeln!(f)?;

        write!(f, "{}", self.f.fmt_rendering(self.rendering))
    }
}

struct LineDisplay<'a> {
    f: &'a DiffFormatter,
    line: &'a DiffLine,
    view: View,
}

impl Display for LineDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let (sign, part) = match self.line {
            DiffLine::Unchanged { .. } => (' ', Part::Unchanged),
            DiffLine::Removed { .. } => ('-', Part::Removed),
            DiffLine::Added { .. } => ('+', Part::Added),
        };

        match self.view {
            View::Summary => self.f.paint(
                f,
                part,
                format_args!("{} {} {}", self.line.number(), sign, self.line.text()),
            )?,
            View::Full => self.f.paint(f, part, format_args!("{}{}", sign, self.line.text()))?,
        }

        writeln!(f)
    }
}
