use std::iter;

mod myers;


/// A maximal run of characters within a line sharing one tag.
///
/// `Unchanged` and `Removed` text borrows from the old line, `Added` text from the new line.
#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Unchanged(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

impl Copy for Segment<'_> {}

impl Clone for Segment<'_> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Unchanged(text) | Segment::Removed(text) | Segment::Added(text) => text,
        }
    }
}

/// The character-level difference of one pair of lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDiff<'a> {
    number: usize,
    segments: Vec<Segment<'a>>,
}

impl<'a> LineDiff<'a> {
    pub(crate) fn new(number: usize, segments: Vec<Segment<'a>>) -> Self {
        Self { number, segments }
    }

    /// The 1-based position of the line pair
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Returns `true` if the two lines were identical, i.e. the diff is a single `Unchanged`
    /// segment.
    pub fn is_unchanged(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::Unchanged(_)])
    }
}

/// Compute the character-level difference between two lines.
///
/// Concatenating the `Unchanged` and `Removed` segments in order gives back `old`, concatenating
/// the `Unchanged` and `Added` segments gives back `new`. Identical lines produce exactly one
/// `Unchanged` segment, even when they are empty.
///
/// ```
/// use diffkeep::{diff_chars, Segment};
///
/// assert_eq!(
///     diff_chars("The cat sat", "The bat sat"),
///     vec![
///         Segment::Unchanged("The "),
///         Segment::Removed("c"),
///         Segment::Added("b"),
///         Segment::Unchanged("at sat"),
///     ]
/// );
/// assert_eq!(diff_chars("same", "same"), vec![Segment::Unchanged("same")]);
/// ```
pub fn diff_chars<'a>(old: &'a str, new: &'a str) -> Vec<Segment<'a>> {
    if old == new {
        return vec![Segment::Unchanged(old)];
    }

    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let (old_marks, new_marks) = myers::changed_marks(&old_chars, &new_chars);

    // Byte offset of every char boundary, including the end of the line
    let old_bounds = char_bounds(old);
    let new_bounds = char_bounds(new);

    let mut runs = Runs::default();
    let (mut i, mut j) = (0, 0);
    while i < old_chars.len() || j < new_chars.len() {
        if i < old_chars.len() && old_marks[i] {
            runs.push(Kind::Removed, old_bounds[i], old_bounds[i + 1]);
            i += 1;
        } else if j < new_chars.len() && new_marks[j] {
            runs.push(Kind::Added, new_bounds[j], new_bounds[j + 1]);
            j += 1;
        } else {
            runs.push(Kind::Unchanged, old_bounds[i], old_bounds[i + 1]);
            i += 1;
            j += 1;
        }
    }

    runs.finish()
        .into_iter()
        .map(|(kind, start, end)| match kind {
            Kind::Unchanged => Segment::Unchanged(&old[start..end]),
            Kind::Removed => Segment::Removed(&old[start..end]),
            Kind::Added => Segment::Added(&new[start..end]),
        })
        .collect()
}

fn char_bounds(s: &str) -> Vec<usize> {
    s.char_indices()
        .map(|(idx, _)| idx)
        .chain(iter::once(s.len()))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Unchanged,
    Removed,
    Added,
}

// Collapses consecutive single-char steps of the same kind into byte ranges
#[derive(Default)]
struct Runs {
    done: Vec<(Kind, usize, usize)>,
    current: Option<(Kind, usize, usize)>,
}

impl Runs {
    fn push(&mut self, kind: Kind, start: usize, end: usize) {
        match &mut self.current {
            Some((k, _, run_end)) if *k == kind && *run_end == start => *run_end = end,
            current => {
                if let Some(run) = current.replace((kind, start, end)) {
                    self.done.push(run);
                }
            }
        }
    }

    fn finish(mut self) -> Vec<(Kind, usize, usize)> {
        self.done.extend(self.current.take());
        self.done
    }
}
