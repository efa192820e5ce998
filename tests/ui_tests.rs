// Host-side tests for the pure control helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod ui {
    include!("../src/ui.rs");
}

use ui::*;

#[test]
fn slider_maps_to_unit_gain() {
    assert_eq!(slider_to_volume("0", 100.0), Some(0.0));
    assert_eq!(slider_to_volume("50", 100.0), Some(0.5));
    assert_eq!(slider_to_volume("100", 100.0), Some(1.0));
    assert_eq!(slider_to_volume(" 25 ", 100.0), Some(0.25));
}

#[test]
fn slider_out_of_range_is_clamped() {
    assert_eq!(slider_to_volume("150", 100.0), Some(1.0));
    assert_eq!(slider_to_volume("-20", 100.0), Some(0.0));
}

#[test]
fn slider_garbage_is_ignored() {
    assert_eq!(slider_to_volume("", 100.0), None);
    assert_eq!(slider_to_volume("loud", 100.0), None);
    assert_eq!(slider_to_volume("NaN", 100.0), None);
    assert_eq!(slider_to_volume("50", 0.0), None);
}

#[test]
fn sample_button_label_follows_state() {
    let playing = sample_button_html(true, "Play Sample", "Stop Sample");
    let idle = sample_button_html(false, "Play Sample", "Stop Sample");
    assert!(playing.ends_with("Stop Sample"));
    assert!(idle.ends_with("Play Sample"));
    assert!(idle.contains("play-icon"));
}

#[test]
fn clickable_tags() {
    assert!(is_clickable_tag("A"));
    assert!(is_clickable_tag("BUTTON"));
    assert!(is_clickable_tag("button"));
    assert!(!is_clickable_tag("DIV"));
    assert!(!is_clickable_tag("SPAN"));
}

#[test]
fn pressing_current_sample_stops_it() {
    assert_eq!(
        sample_action(Some("sample1"), "sample1", "sample"),
        SampleAction::Stop("sample1".into())
    );
}

#[test]
fn pressing_another_sample_switches() {
    assert_eq!(
        sample_action(Some("sample1"), "sample2", "sample"),
        SampleAction::Switch {
            previous: Some("sample1".into()),
            next: "sample2".into(),
        }
    );
}

#[test]
fn ambient_is_not_treated_as_a_previous_sample() {
    // the ambient bed is the current track until a sample starts
    assert_eq!(
        sample_action(Some("ambient"), "sample1", "sample"),
        SampleAction::Switch {
            previous: None,
            next: "sample1".into(),
        }
    );
    assert_eq!(
        sample_action(None, "sample3", "sample"),
        SampleAction::Switch {
            previous: None,
            next: "sample3".into(),
        }
    );
}

#[test]
fn class_pulse_holds_then_clears() {
    let mut p = ClassPulse::default();
    assert!(!p.active(0.0));
    p.trigger(1.0, 0.12);
    assert!(p.active(1.05));
    assert!(!p.active(1.2));
    // stays cleared
    assert!(!p.active(1.21));
}

#[test]
fn class_pulse_retrigger_extends() {
    let mut p = ClassPulse::default();
    p.trigger(0.0, 0.1);
    p.trigger(0.08, 0.1);
    assert!(p.active(0.15));
    assert!(!p.active(0.2));
}
