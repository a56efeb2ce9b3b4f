#![no_main]
use diffkeep::{split_lines, LengthPolicy, RenderOptions, Renderer, SegmentPolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str, bool)| {
    let (old, new, exact) = input;
    let renderer = Renderer::new(RenderOptions {
        segment_policy: if exact {
            SegmentPolicy::Exact
        } else {
            SegmentPolicy::Legacy
        },
        length_policy: LengthPolicy::Pad,
    });

    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let full = renderer.render(&old_lines, &new_lines).unwrap();
    let changes = renderer.render_changes(&old_lines, &new_lines).unwrap();

    assert_eq!(changes.is_none(), full.changed_lines() == 0);
    assert_eq!(full, renderer.render(&old_lines, &new_lines).unwrap());
    let _ = full.document().to_string();
});
