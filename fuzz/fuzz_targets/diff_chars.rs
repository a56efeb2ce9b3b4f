#![no_main]
use diffkeep::{diff_chars, Segment};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (old, new) = input;
    let segments = diff_chars(old, new);

    let mut old_side = String::new();
    let mut new_side = String::new();
    for segment in &segments {
        match segment {
            Segment::Unchanged(text) => {
                old_side.push_str(text);
                new_side.push_str(text);
            }
            Segment::Removed(text) => old_side.push_str(text),
            Segment::Added(text) => new_side.push_str(text),
        }
    }

    assert_eq!(old_side, old);
    assert_eq!(new_side, new);
    assert_eq!(old == new, matches!(segments[..], [Segment::Unchanged(_)]));
});
