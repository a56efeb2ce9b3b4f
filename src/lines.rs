//! Splitting submitted text into lines

/// Split a text blob into the lines that get compared index by index.
///
/// Leading and trailing whitespace and byte order marks (U+FEFF) of the whole blob are trimmed
/// first, so blank lines at the very start or end disappear while blank lines in between are kept. Lines are split on `\n` only; a
/// `\r` before it stays part of the line. An empty (or all-whitespace) blob yields one empty line.
///
/// ```
/// use diffkeep::split_lines;
///
/// assert_eq!(split_lines("\n  a\n\nb  \n"), vec!["a", "", "b"]);
/// assert_eq!(split_lines(""), vec![""]);
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    trim_blob(text).split('\n').collect()
}

/// Strip leading and trailing whitespace and byte order marks (U+FEFF) from a whole text blob.
pub(crate) fn trim_blob(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
