use engagement_core::diff::{render, render_original, revert, revert_all, revised_count, tokenize};
use engagement_core::{reconcile, TextSegment};
use proptest::prelude::*;

#[test]
fn substitutions_anchor_on_shared_words() {
    let segments = reconcile("built an algorithm", "developed an AI system");

    assert_eq!(
        segments,
        vec![
            TextSegment::revised("developed", "built"),
            TextSegment::unchanged(" "),
            TextSegment::unchanged("an"),
            TextSegment::unchanged(" "),
            TextSegment::revised("AI system", "algorithm"),
        ]
    );
    assert_eq!(render(&segments), "developed an AI system");
    assert_eq!(render_original(&segments), "built an algorithm");
}

#[test]
fn reverting_one_span_restores_its_wording() {
    let segments = reconcile("built an algorithm", "developed an AI system");

    let reverted = revert(&segments, 0);
    assert_eq!(render(&reverted), "built an AI system");
    assert_eq!(revised_count(&reverted), 1);

    let reverted = revert(&reverted, 4);
    assert_eq!(render(&reverted), "built an algorithm");
    assert_eq!(revised_count(&reverted), 0);
}

#[test]
fn identical_text_is_one_unchanged_segment_per_token() {
    let text = "we've been  quietly tracking\neverything";
    let segments = reconcile(text, text);

    assert_eq!(segments.len(), tokenize(text).len());
    assert!(segments.iter().all(|segment| !segment.is_revised && segment.original_text.is_none()));
}

#[test]
fn empty_inputs() {
    assert!(reconcile("", "").is_empty());
    assert_eq!(reconcile("", "brand new"), vec![TextSegment::revised("brand new", "brand new")]);
    assert_eq!(reconcile("all gone", ""), vec![TextSegment::revised("", "all gone")]);
}

#[test]
fn improvement_with_appended_hashtags() {
    let original = "built an algorithm that triggers you to react";
    let revised = "developed an AI system that maximizes user engagement 🚀 #AI #TechInnovation";
    let segments = reconcile(original, revised);

    assert_eq!(render(&segments), revised);
    let revised_texts: Vec<&str> = segments
        .iter()
        .filter(|segment| segment.is_revised)
        .map(|segment| segment.text.as_str())
        .collect();
    assert_eq!(
        revised_texts,
        vec!["developed", "AI system", "maximizes user engagement 🚀 #AI #TechInnovation"]
    );
    assert_eq!(
        segments.last().and_then(|segment| segment.original_text.as_deref()),
        Some("triggers you to react")
    );
    assert_eq!(render(&revert_all(&segments)), original);
}

#[test]
fn whitespace_changes_are_revisions() {
    let segments = reconcile("one two", "one  two");
    assert_eq!(
        segments,
        vec![
            TextSegment::unchanged("one"),
            TextSegment::revised("  ", " "),
            TextSegment::unchanged("two"),
        ]
    );
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("the"),
            Just("cat"),
            Just("sat"),
            Just("AI"),
            Just("🚀"),
            Just(" "),
            Just("  "),
            Just("\n"),
        ],
        0..24,
    )
    .prop_map(|tokens| tokens.concat())
}

proptest! {
    #[test]
    fn segments_rebuild_the_revision(original in sentence(), revised in sentence()) {
        let segments = reconcile(&original, &revised);
        prop_assert_eq!(render(&segments), revised);
    }

    #[test]
    fn arbitrary_text_round_trips(original in ".{0,40}", revised in ".{0,40}") {
        prop_assert_eq!(render(&reconcile(&original, &revised)), revised);
    }

    #[test]
    fn identical_text_has_no_revisions(text in sentence()) {
        let segments = reconcile(&text, &text);
        prop_assert_eq!(revised_count(&segments), 0);
        prop_assert_eq!(render(&segments), text);
    }

    #[test]
    fn revised_segments_carry_their_original(original in sentence(), revised in sentence()) {
        let segments = reconcile(&original, &revised);
        for (index, segment) in segments.iter().enumerate() {
            prop_assert_eq!(segment.is_revised, segment.original_text.is_some());
            if !segment.is_revised {
                continue;
            }
            let prefix = render(&segments[..index]);
            let suffix = render(&segments[index + 1..]);
            let expected = format!("{}{}{}", prefix, segment.original_text.as_deref().unwrap(), suffix);
            prop_assert_eq!(render(&revert(&segments, index)), expected);
        }
    }
}
