use super::*;
use crate::lines::split_lines;
use snapbox::assert_data_eq;

fn renderer(segment_policy: SegmentPolicy, length_policy: LengthPolicy) -> Renderer {
    Renderer::new(RenderOptions {
        segment_policy,
        length_policy,
    })
}

#[test]
fn full_view_of_one_changed_line() {
    let old = split_lines("a\nb\nc");
    let new = split_lines("a\nx\nc");
    let rendering = Renderer::default().render(&old, &new).unwrap();

    assert_eq!(rendering.view(), View::Full);
    assert_eq!(
        rendering.lines(),
        &[
            DiffLine::Unchanged {
                number: 1,
                text: "a".into()
            },
            DiffLine::Removed {
                number: 2,
                text: "".into()
            },
            DiffLine::Added {
                number: 2,
                text: "bx".into()
            },
            DiffLine::Unchanged {
                number: 3,
                text: "c".into()
            },
        ]
    );
    assert_eq!(rendering.changed_lines(), 1);
    assert_eq!(rendering.to_string(), " a\n-\n+bx\n c\n");
}

#[test]
fn summary_view_omits_unchanged_lines() {
    let old = split_lines("first line\nsecond line\nthird line");
    let new = split_lines("first line\nsecond lane\nthird line!");
    let summary = Renderer::default()
        .render_changes(&old, &new)
        .unwrap()
        .unwrap();

    assert_eq!(summary.view(), View::Summary);
    assert_eq!(summary.changed_lines(), 2);
    assert_data_eq!(
        summary.to_string(),
        "\
2 - second lne
2 + second liane
3 - third line
3 + third line!
"
    );
}

#[test]
fn exact_policy_shows_each_original_line() {
    let old = split_lines("first line\nsecond line\nthird line");
    let new = split_lines("first line\nsecond lane\nthird line!");
    let renderer = renderer(SegmentPolicy::Exact, LengthPolicy::Pad);

    let summary = renderer.render_changes(&old, &new).unwrap().unwrap();
    assert_data_eq!(
        summary.to_string(),
        "\
2 - second line
2 + second lane
3 - third line
3 + third line!
"
    );

    let full = renderer.render(&old, &new).unwrap();
    assert_data_eq!(
        full.to_string(),
        "\
 first line
-second line
+second lane
-third line
+third line!
"
    );
}

#[test]
fn side_text_per_policy() {
    let segments = [
        Segment::Unchanged("ab"),
        Segment::Removed("c"),
        Segment::Added("d"),
        Segment::Unchanged("e"),
    ];

    assert_eq!(SegmentPolicy::Legacy.side_text(&segments, Side::Old), "abe");
    assert_eq!(SegmentPolicy::Legacy.side_text(&segments, Side::New), "abcde");
    assert_eq!(SegmentPolicy::Exact.side_text(&segments, Side::Old), "abce");
    assert_eq!(SegmentPolicy::Exact.side_text(&segments, Side::New), "abde");
}

#[test]
fn no_changes() {
    let lines = split_lines("same\n\nlines");
    let renderer = Renderer::default();

    assert_eq!(renderer.render_changes(&lines, &lines).unwrap(), None);

    // The full view is still produced
    let full = renderer.render(&lines, &lines).unwrap();
    assert_eq!(full.changed_lines(), 0);
    assert_eq!(full.to_string(), " same\n \n lines\n");
}

#[test]
fn pad_compares_up_to_the_longer_side() {
    let old = split_lines("a\nb");
    let new = split_lines("a\nb\nc\nd");
    let renderer = renderer(SegmentPolicy::Exact, LengthPolicy::Pad);

    let diffs = renderer.line_diffs(&old, &new).unwrap();
    assert_eq!(diffs.len(), 4);
    assert_eq!(diffs[2].segments(), &[Segment::Added("c")]);

    let summary = renderer.render_changes(&old, &new).unwrap().unwrap();
    assert_eq!(summary.to_string(), "3 - \n3 + c\n4 - \n4 + d\n");

    // A shorter new text reads as removed lines
    let summary = renderer.render_changes(&new, &old).unwrap().unwrap();
    assert_eq!(summary.to_string(), "3 - c\n3 + \n4 - d\n4 + \n");
}

#[test]
fn truncate_follows_the_old_line_count() {
    let short = split_lines("a\nb");
    let long = split_lines("a\nb\nc");
    let renderer = renderer(SegmentPolicy::Exact, LengthPolicy::Truncate);

    // Extra new lines are dropped
    assert_eq!(renderer.line_diffs(&short, &long).unwrap().len(), 2);
    assert_eq!(renderer.render_changes(&short, &long).unwrap(), None);

    // Missing new lines are empty
    let summary = renderer.render_changes(&long, &short).unwrap().unwrap();
    assert_eq!(summary.to_string(), "3 - c\n3 + \n");
}

#[test]
fn reject_refuses_different_line_counts() {
    let renderer = renderer(SegmentPolicy::Legacy, LengthPolicy::Reject);
    let old = split_lines("a\nb");
    let new = split_lines("a\nb\nc");

    assert_eq!(
        renderer.render(&old, &new).unwrap_err(),
        LengthMismatch { old: 2, new: 3 }
    );
    assert_eq!(
        renderer.render_changes(&old, &new).unwrap_err().to_string(),
        "old text has 2 lines but new text has 3"
    );
    assert!(renderer.render(&old, &old).is_ok());
}

#[test]
fn document_has_headers_and_one_hunk() {
    let old = split_lines("a\nb\nc");
    let new = split_lines("a\nx\nc");
    let full = Renderer::default().render(&old, &new).unwrap();

    assert_data_eq!(
        full.document().to_string(),
        "\
--- Old
+++ New
@@ -1,3 +1,3 @@
 a
-
+bx
 c
"
    );
}

#[test]
fn single_line_document_omits_range_length() {
    let old = split_lines("only");
    let new = split_lines("only!");
    let full = Renderer::default().render(&old, &new).unwrap();

    assert_eq!(
        full.document().to_string(),
        "--- Old\n+++ New\n@@ -1 +1 @@\n-only\n+only!\n"
    );
}

#[test]
fn hunk_range_display() {
    assert_eq!(HunkRange::new(1, 1).to_string(), "1");
    assert_eq!(HunkRange::new(1, 0).to_string(), "1,0");
    assert_eq!(HunkRange::new(4, 7).to_string(), "4,7");
}

#[test]
fn options_deserialize_from_snake_case() {
    let options: RenderOptions =
        toml::from_str("segment_policy = \"exact\"\nlength_policy = \"reject\"").unwrap();
    assert_eq!(
        options,
        RenderOptions {
            segment_policy: SegmentPolicy::Exact,
            length_policy: LengthPolicy::Reject,
        }
    );

    let options: RenderOptions = toml::from_str("").unwrap();
    assert_eq!(options, RenderOptions::default());
}

#[cfg(feature = "color")]
#[test]
fn color_wraps_lines_in_escape_codes() {
    let old = split_lines("a");
    let new = split_lines("b");
    let full = Renderer::default().render(&old, &new).unwrap();

    let plain = DiffFormatter::new().fmt_rendering(&full).to_string();
    assert_eq!(plain, "-\n+ab\n");

    let colored = DiffFormatter::new().with_color().fmt_rendering(&full).to_string();
    assert!(colored.contains("\u{1b}["));
    assert!(colored.contains("+ab"));
}
