//! End-to-end dispatch scenarios: transition detection, layer precedence,
//! transparent chaining and the layer actions.

use conker::action::modifier;
use conker::{Action, Error, Keyboard};

const KEY_A: usize = 0;
const KEY_B: usize = 1;
const KEY_C: usize = 2;

fn keyboard() -> Keyboard<8> {
    Keyboard::new(8).unwrap()
}

#[test]
fn modifier_press_and_release() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::Modifier(modifier::LEFT_CTRL)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    assert_eq!(kb.state().modifiers(), modifier::LEFT_CTRL);
    assert!(kb.state().keycodes().is_empty());

    kb.update_key(KEY_A, false).unwrap();
    assert_eq!(kb.state().modifiers(), 0);
    assert!(kb.state().keycodes().is_empty());
}

#[test]
fn repeated_samples_of_the_same_state_are_no_ops() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::Key(4)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_A, true).unwrap();
    assert_eq!(kb.snapshot().keycodes, [4, 0, 0, 0, 0, 0]);

    kb.update_key(KEY_A, false).unwrap();
    kb.update_key(KEY_A, false).unwrap();
    assert!(kb.state().keycodes().is_empty());
}

#[test]
fn matched_press_release_restores_state() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::Key(23)).unwrap();
    kb.bind(KEY_B, 0, Action::Modifier(modifier::LEFT_SHIFT)).unwrap();

    let before = kb.snapshot();
    for key in [KEY_A, KEY_B] {
        kb.update_key(key, true).unwrap();
        kb.update_key(key, false).unwrap();
    }
    assert_eq!(kb.snapshot(), before);
}

#[test]
fn momentary_layer_scenario() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::MomentaryLayer(3)).unwrap();
    kb.bind(KEY_B, 3, Action::Key(5)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    assert!(kb.layers().is_active(3));

    kb.update_key(KEY_B, true).unwrap();
    assert_eq!(kb.snapshot().keycodes, [5, 0, 0, 0, 0, 0]);

    kb.update_key(KEY_B, false).unwrap();
    assert!(kb.state().keycodes().is_empty());

    // Release resolves against the current flags: layer 3 is still the
    // winner, key A's transparent slot there chains down to the momentary
    // binding on the default layer.
    kb.update_key(KEY_A, false).unwrap();
    assert!(!kb.layers().is_active(3));
}

#[test]
fn momentary_release_reverts_own_layer_after_stack_change() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::MomentaryLayer(3)).unwrap();
    kb.bind(KEY_B, 3, Action::MomentaryLayer(7)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_B, true).unwrap();
    assert!(kb.layers().is_active(7));

    // Layer 7 now outranks 3, but releasing A still finds its own binding by
    // chaining transparently from the top of the stack.
    kb.update_key(KEY_A, false).unwrap();
    assert!(!kb.layers().is_active(3));
    assert!(kb.layers().is_active(7));
}

#[test]
fn transparent_chains_down_to_the_default_layer() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::MomentaryLayer(5)).unwrap();
    kb.bind(KEY_B, 0, Action::Key(4)).unwrap();
    // KEY_B has no binding at layer 5; its transparent slot must fall through.

    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_B, true).unwrap();
    assert_eq!(kb.snapshot().keycodes, [4, 0, 0, 0, 0, 0]);
    kb.update_key(KEY_B, false).unwrap();
    assert!(kb.state().keycodes().is_empty());
}

#[test]
fn transparent_on_the_default_layer_is_a_no_op() {
    let mut kb = keyboard();
    // Everything left unbound.
    let before = kb.snapshot();
    kb.update_key(KEY_C, true).unwrap();
    kb.update_key(KEY_C, false).unwrap();
    assert_eq!(kb.snapshot(), before);
}

#[test]
fn toggle_layer_switches_between_target_and_default() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::ToggleLayer(2)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_A, false).unwrap();
    assert!(kb.layers().is_active(2));
    assert_eq!(kb.layers().resolve(), 2);

    // Second tap finds the toggle through the transparent slot on layer 2
    // and releases back toward the default layer.
    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_A, false).unwrap();
    assert!(!kb.layers().is_active(2));
    assert_eq!(kb.layers().resolve(), 0);
}

#[test]
fn layer_on_exclusive_clears_everything_else() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::MomentaryLayer(9)).unwrap();
    kb.bind(KEY_B, 0, Action::LayerOnExclusive(5)).unwrap();
    // Shadow KEY_B's slot on layer 9 so it stays reachable while 9 is up.
    kb.bind(KEY_B, 9, Action::LayerOnExclusive(5)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    assert!(kb.layers().is_active(9));

    kb.update_key(KEY_B, true).unwrap();
    for layer in 0..16 {
        assert_eq!(kb.layers().is_active(layer), layer == 0 || layer == 5);
    }
}

#[test]
fn default_layer_action_moves_only_the_floor() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::DefaultLayer(1)).unwrap();
    kb.bind(KEY_B, 0, Action::MomentaryLayer(4)).unwrap();

    kb.update_key(KEY_B, true).unwrap();
    kb.update_key(KEY_A, true).unwrap();

    assert_eq!(kb.layers().default_layer(), 1);
    // The active set is untouched by the floor move.
    assert!(kb.layers().is_active(4));
    assert!(!kb.layers().is_active(1));
}

#[test]
fn consumer_release_only_clears_its_own_code() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::Consumer(0x00E9)).unwrap();
    kb.bind(KEY_B, 0, Action::Consumer(0x00EA)).unwrap();

    kb.update_key(KEY_A, true).unwrap();
    kb.update_key(KEY_B, true).unwrap();
    assert_eq!(kb.state().consumer(), 0x00EA);

    // Stale release of the first key must not clobber the newer code.
    kb.update_key(KEY_A, false).unwrap();
    assert_eq!(kb.state().consumer(), 0x00EA);

    kb.update_key(KEY_B, false).unwrap();
    assert_eq!(kb.state().consumer(), 0);
}

#[test]
fn unset_binding_fails_soft() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::No).unwrap();
    kb.bind(KEY_B, 0, Action::Key(4)).unwrap();

    let before = kb.snapshot();
    assert_eq!(kb.update_key(KEY_A, true), Err(Error::InvalidBinding));
    assert_eq!(kb.snapshot(), before);

    // Subsequent events keep flowing.
    kb.update_key(KEY_B, true).unwrap();
    assert_eq!(kb.snapshot().keycodes, [4, 0, 0, 0, 0, 0]);
}

#[test]
fn out_of_range_indices_are_surfaced() {
    let mut kb = keyboard();
    assert_eq!(kb.update_key(8, true), Err(Error::InvalidKeyIndex));
    assert_eq!(kb.bind(8, 0, Action::Key(4)), Err(Error::InvalidKeyIndex));
    assert_eq!(kb.bind(0, 16, Action::Key(4)), Err(Error::InvalidLayer));
}

#[test]
fn configuration_past_capacity_aborts() {
    assert!(matches!(Keyboard::<4>::new(5), Err(Error::OutOfMemory)));
}

#[test]
fn snapshot_carries_the_layer_bitmask() {
    let mut kb = keyboard();
    kb.bind(KEY_A, 0, Action::MomentaryLayer(3)).unwrap();
    kb.update_key(KEY_A, true).unwrap();
    assert_eq!(kb.snapshot().layers, 1 << 3);
    kb.update_key(KEY_A, false).unwrap();
    assert_eq!(kb.snapshot().layers, 0);
}

#[test]
fn release_consumes_the_keyboard() {
    let kb = keyboard();
    kb.release();
}
