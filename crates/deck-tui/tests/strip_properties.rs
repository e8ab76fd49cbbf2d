//! Property-level tests for the progress strip, driven end to end through
//! its public API: a `UiStore` publishes segments, updates arrive as the
//! playback host would send them, and assertions run against the flushed
//! render tree.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use deck_proto::config::StripConfig;
use deck_proto::store::UiStore;
use deck_tui::strip::layout::directed_offset;
use deck_tui::strip::{ProgressStrip, StripError};

const WIDTH: f64 = 120.0;

fn strip_with(n: usize) -> (UiStore, ProgressStrip) {
    let store = UiStore::new();
    store.set_segments((0..n).map(|i| format!("s{i}")).collect());
    let cfg = StripConfig::default();
    let mut strip = ProgressStrip::new(&cfg, Duration::from_millis(200), &store);
    strip.build();
    strip.on_resize(WIDTH);
    strip.flush_frame();
    (store, strip)
}

fn full_size_segments(strip: &ProgressStrip) -> usize {
    (0..strip.segment_count())
        .filter(|&i| !strip.is_marker(i))
        .count()
}

#[test]
fn small_decks_never_overflow() {
    for n in 1..=20 {
        let (_store, mut strip) = strip_with(n);
        for i in 0..n {
            strip.update_progress(&format!("s{i}"), 0.5, false).unwrap();
            strip.flush_frame();
            assert_eq!(strip.first_visible(), 0, "n={n} active={i}");
            assert_eq!(strip.leading_overflow(), 0);
            assert_eq!(strip.trailing_overflow(), 0);
            assert_eq!(full_size_segments(&strip), n);
        }
    }
}

#[test]
fn large_decks_keep_exactly_one_window_of_full_segments() {
    for n in [21, 25, 50, 100] {
        let (_store, mut strip) = strip_with(n);
        strip.update_progress("s0", 0.1, false).unwrap();
        strip.flush_frame();
        assert_eq!(full_size_segments(&strip), strip.window_size());
        assert!(strip.leading_overflow() + strip.trailing_overflow() <= n - strip.window_size());
    }
}

#[test]
fn worked_example_window20_cap3_step5_n50() {
    let (_store, mut strip) = strip_with(50);
    strip.update_progress("s25", 0.5, false).unwrap();
    strip.flush_frame();
    assert_eq!(strip.first_visible(), 20);
    assert_eq!(strip.leading_overflow(), 3);
    assert_eq!(strip.trailing_overflow(), 3);
}

#[test]
fn monotonic_playthrough_marches_window_forward_to_the_end() {
    let n = 50;
    let (_store, mut strip) = strip_with(n);
    let mut prev_first = 0;
    for i in 0..n {
        // A playthrough closes each slide then opens the next, exactly as
        // the playback engine does.
        strip.update_progress(&format!("s{i}"), 0.0, false).unwrap();
        strip.update_progress(&format!("s{i}"), 1.0, false).unwrap();
        strip.flush_frame();
        assert!(
            strip.first_visible() >= prev_first,
            "window moved backward at slide {i}"
        );
        // The active slide never falls outside the window + overflow range.
        let lo = strip.first_visible().saturating_sub(3);
        let hi = strip.first_visible() + strip.window_size() + 3;
        assert!(i >= lo && i < hi, "active {i} escaped the rendered range");
        prev_first = strip.first_visible();
    }
    assert_eq!(strip.first_visible() + strip.window_size(), n);
}

#[test]
fn at_most_one_non_active_segment_animates_per_update() {
    let n = 40;
    let (_store, mut strip) = strip_with(n);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let index = rng.gen_range(0..n);
        let progress: f64 = match rng.gen_range(0..4) {
            0 => 0.0,
            1 => 1.0,
            _ => rng.gen_range(0.0..1.0),
        };
        let update_all = rng.gen_bool(0.2);
        strip
            .update_progress(&format!("s{index}"), progress, update_all)
            .unwrap();
        strip.flush_frame();
        let non_active_animating = strip
            .root()
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, node)| Some(*i) != strip.active_index() && node.fill.is_animating())
            .count();
        assert!(
            non_active_animating <= 1,
            "{non_active_animating} non-active segments animating"
        );
    }
}

#[test]
fn forward_handoff_eases_the_finished_segment_full() {
    let (_store, mut strip) = strip_with(10);
    strip.update_progress("s0", 1.0, false).unwrap();
    strip.flush_frame();
    strip.update_progress("s1", 0.3, false).unwrap();
    strip.flush_frame();
    let nodes = &strip.root().nodes;
    assert!(nodes[0].fill.is_animating());
    assert_eq!(nodes[0].fill.target(), 1.0);
    assert_eq!(nodes[1].fill.target(), 0.3);
    assert!(nodes[2..].iter().all(|n| n.fill.target() == 0.0));
}

#[test]
fn rtl_mirrors_every_offset_and_keeps_widths() {
    let (store, mut strip) = strip_with(50);
    strip.update_progress("s25", 0.5, false).unwrap();
    strip.flush_frame();

    let ltr: Vec<(f64, f64)> = strip
        .root()
        .nodes
        .iter()
        .map(|n| (n.layout.offset, n.layout.width))
        .collect();

    store.toggle_direction();
    assert!(strip.pump_store());
    strip.flush_frame();

    for (node, (offset, width)) in strip.root().nodes.iter().zip(&ltr) {
        // Stored layout is direction-agnostic.
        assert_eq!(node.layout.offset, *offset);
        assert_eq!(node.layout.width, *width);
        // Application-time mirroring inverts the offset about the canvas.
        let x = directed_offset(&node.layout, WIDTH, strip.direction().is_rtl());
        assert!((WIDTH - x - node.layout.width - node.layout.offset).abs() < 1e-9);
    }
}

#[test]
fn resize_rescales_widths_but_not_the_window() {
    let (_store, mut strip) = strip_with(50);
    strip.update_progress("s25", 0.5, false).unwrap();
    strip.flush_frame();
    let before = strip.root().nodes[25].layout.width;
    let first = strip.first_visible();

    strip.on_resize(WIDTH * 2.0);
    strip.flush_frame();
    let after = strip.root().nodes[25].layout.width;
    assert!(after > before);
    assert_eq!(strip.first_visible(), first);
}

#[test]
fn replay_resets_window_without_forgetting_segments() {
    let (_store, mut strip) = strip_with(50);
    strip.update_progress("s45", 1.0, false).unwrap();
    strip.flush_frame();
    assert!(strip.first_visible() > 0);

    strip.on_replay();
    strip.flush_frame();
    assert_eq!(strip.first_visible(), 0);
    assert_eq!(strip.segment_count(), 50);

    // Playback restarts cleanly from the top.
    strip.update_progress("s0", 0.0, false).unwrap();
    strip.flush_frame();
    assert!(strip.root().nodes.iter().all(|n| n.fill.target() == 0.0));
}

#[test]
fn unknown_ids_fail_and_leave_state_alone() {
    let (_store, mut strip) = strip_with(10);
    strip.update_progress("s3", 0.7, false).unwrap();
    strip.flush_frame();
    let first = strip.first_visible();

    assert!(matches!(
        strip.update_progress("ghost", 0.5, false),
        Err(StripError::UnknownSegment(_))
    ));
    strip.flush_frame();
    assert_eq!(strip.first_visible(), first);
    assert_eq!(strip.root().nodes[3].fill.target(), 0.7);
    assert_eq!(strip.active_index(), Some(3));
}

#[test]
fn build_twice_keeps_one_tree() {
    let store = UiStore::new();
    store.set_segments(vec!["a".into(), "b".into(), "c".into()]);
    let cfg = StripConfig::default();
    let mut strip = ProgressStrip::new(&cfg, Duration::from_millis(200), &store);
    strip.build();
    strip.build();
    assert_eq!(strip.root().nodes.len(), 3);
    assert_eq!(strip.segment_count(), 3);
}

#[test]
fn markers_and_window_tile_the_full_canvas() {
    let (_store, mut strip) = strip_with(50);
    strip.update_progress("s25", 0.5, false).unwrap();
    strip.flush_frame();

    let lead = strip.leading_overflow();
    let trail = strip.trailing_overflow();
    let cfg = StripConfig::default();
    let marker_span = cfg.marker_width + cfg.margin;

    let seg_w = strip.root().nodes[strip.first_visible()].layout.width;
    let tiled = (lead + trail) as f64 * marker_span
        + strip.window_size() as f64 * (seg_w + cfg.margin);
    assert!((tiled - WIDTH).abs() < 1e-9);
}
