use super::*;
use crate::config::DialConfig;
use crate::events::HapticKind;

const PIVOT: Point = Point::new(240, 400);

fn dial() -> Dial {
    dial_with(DialConfig {
        // Unit scale keeps the geometry in the tests easy to read.
        size_scale: Fx::ONE,
        ..DialConfig::default()
    })
}

fn dial_with(config: DialConfig) -> Dial {
    let mut dial = Dial::new(config, 64);
    dial.set_geometry(PIVOT, 240);
    dial
}

fn kinds(out: &DialOutput) -> Vec<DialAction> {
    out.iter().copied().collect()
}

#[test]
fn drag_session_adjusts_value_end_to_end() {
    let mut dial = dial();

    let down = dial.on_pointer_down(0, 240, 400);
    assert_eq!(kinds(&down), vec![DialAction::InteractionStart]);

    let commit = dial.on_pointer_move(20, 240, 390);
    assert!(commit.iter().any(|a| *a == DialAction::ValueChanged(69)));
    assert!(commit
        .iter()
        .any(|a| matches!(a, DialAction::HapticRequested { kind: HapticKind::ValueTick, .. })));

    let up = dial.on_pointer_up(40);
    assert_eq!(kinds(&up), vec![DialAction::InteractionEnd]);
    assert_eq!(dial.value(), 69);
}

#[test]
fn tap_outside_the_dial_requests_dismiss() {
    let mut dial = dial();

    // Acceptance limit: radius 240 + margin 200 = 440 px from the pivot.
    let out = dial.on_pointer_down(0, 240, 841);
    assert_eq!(kinds(&out), vec![DialAction::DismissRequested]);
    // No session opened, so the matching up is silent.
    assert!(dial.on_pointer_up(10).is_empty());
}

#[test]
fn size_scale_shrinks_the_acceptance_radius() {
    let mut dial = dial_with(DialConfig {
        size_scale: Fx::from_num(0.5),
        ..DialConfig::default()
    });

    // Scaled radius 120 + margin 200 = 320 px.
    let rejected = dial.on_pointer_down(0, 240, 721);
    assert_eq!(kinds(&rejected), vec![DialAction::DismissRequested]);

    let accepted = dial.on_pointer_down(10, 240, 720);
    assert_eq!(kinds(&accepted), vec![DialAction::InteractionStart]);
}

#[test]
fn config_swap_rescales_geometry() {
    let mut dial = dial();

    // In range at unit scale.
    let first = dial.on_pointer_down(0, 240, 840);
    assert_eq!(kinds(&first), vec![DialAction::InteractionStart]);
    let _ = dial.on_pointer_up(10);

    dial.set_config(DialConfig {
        size_scale: Fx::from_num(0.5),
        ..DialConfig::default()
    });
    let second = dial.on_pointer_down(20, 240, 840);
    assert_eq!(kinds(&second), vec![DialAction::DismissRequested]);
}

#[test]
fn escape_flow_hands_off_and_ends_the_session() {
    let mut dial = dial();

    let _ = dial.on_pointer_down(0, 240, 400);
    let out = dial.on_pointer_move(30, 320, 403);
    assert_eq!(
        kinds(&out),
        vec![DialAction::EscapeRequested, DialAction::InteractionEnd]
    );

    // The physical up was swallowed by the classifier.
    assert!(dial.on_pointer_up(60).is_empty());
}

#[test]
fn long_press_expansion_runs_on_the_tick_clock() {
    let mut dial = dial();

    let _ = dial.on_pointer_down(0, 240, 400);
    let pop = dial.tick(500);
    assert!(pop.iter().any(|a| matches!(
        a,
        DialAction::HapticRequested { kind: HapticKind::ExpandPop, .. }
    )));

    let done = dial.tick(800);
    assert!(done.iter().any(|a| *a == DialAction::ExpandModeChanged(true)));
    assert!(dial.is_expanded());

    let _ = dial.on_pointer_up(900);
    let _ = dial.tick(5_900);
    let end = dial.tick(6_150);
    assert!(end.iter().any(|a| *a == DialAction::ExpandModeChanged(false)));
    assert!(!dial.is_expanded());
}

#[test]
fn closed_gate_silences_the_surface() {
    let mut dial = dial();
    dial.set_gate(false);

    assert!(dial.on_pointer_down(0, 240, 400).is_empty());
    assert!(dial.on_pointer_move(10, 240, 380).is_empty());
    assert!(dial.on_pointer_up(20).is_empty());

    dial.set_gate(true);
    assert_eq!(
        kinds(&dial.on_pointer_down(30, 240, 400)),
        vec![DialAction::InteractionStart]
    );
}

#[test]
fn force_reset_discards_the_pending_long_press() {
    let mut dial = dial();

    let _ = dial.on_pointer_down(0, 240, 400);
    let _ = dial.force_reset();

    assert!(dial.tick(600).is_empty());
    assert!(!dial.is_expanded());
}

#[test]
fn force_reset_during_expansion_emits_reset_notifications() {
    let mut dial = dial();

    let _ = dial.on_pointer_down(0, 240, 400);
    let _ = dial.tick(500);
    let _ = dial.tick(650);

    let out = dial.force_reset();
    assert!(out.iter().any(|a| *a == DialAction::ExpandProgress(Fx::ZERO)));
    assert!(out.iter().any(|a| *a == DialAction::ExpandModeChanged(false)));
    assert_eq!(dial.expand_state(), crate::dial::ExpandStateId::Collapsed);

    // Idempotent: a second reset is silent.
    assert!(dial.force_reset().is_empty());
}

#[test]
fn external_value_reaches_the_host_through_the_facade() {
    let mut dial = dial();

    let out = dial.set_value(1_000, 99);
    assert!(out.iter().any(|a| *a == DialAction::ValueChanged(100)));
    assert_eq!(dial.value(), 100);
    assert!(dial.animated_value(1_010) > 64);
}

#[test]
fn pointer_cancel_ends_the_session_like_an_up() {
    let mut dial = dial();

    let _ = dial.on_pointer_down(0, 240, 400);
    let out = dial.on_pointer_cancel(50);
    assert_eq!(kinds(&out), vec![DialAction::InteractionEnd]);
}

#[test]
fn trace_reports_rejections() {
    let mut dial = dial();

    let _ = dial.on_pointer_down(0, 2_000, 2_000);
    assert_eq!(
        dial.gesture_trace().reject,
        crate::gesture::RejectReason::OutsidePivot
    );
}
