// Browser-side checks for the exported bindings; run with `wasm-pack test`.
#![cfg(target_arch = "wasm32")]

use number_escape::GameHandle;
use number_escape::web::{js_count_pair_combinations, js_min_presses};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn min_presses_accepts_textual_operations() {
    let ops = vec!["+3".to_string(), "+7".to_string()];
    assert_eq!(js_min_presses(50.0, ops).unwrap(), Some(10));
    assert!(js_min_presses(5.0, vec!["x3".to_string()]).is_err());
    assert_eq!(js_min_presses(f64::INFINITY, vec!["+1".to_string()]).unwrap(), None);
}

#[wasm_bindgen_test]
fn count_pair_combinations_export() {
    assert_eq!(js_count_pair_combinations(17.0, 10.0, 6.0), 0);
}

#[wasm_bindgen_test]
fn handle_reports_first_level() {
    let handle = GameHandle::new().unwrap();
    assert_eq!(handle.target(), 50.0);
    assert_eq!(handle.op_labels(), vec!["+3".to_string(), "+7".to_string()]);
    handle.press(1).unwrap();
    assert_eq!(handle.total_label(), "7");
    assert_eq!(handle.press_counts(), vec![0, 1]);
}
