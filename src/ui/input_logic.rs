//! Pure input helpers shared by the controller and the param editor.

/// Move a selection one item back, stopping at 0.
pub fn select_prev(selected: u8) -> u8 {
    selected.saturating_sub(1)
}

/// Move a selection one item forward if another item exists.
pub fn select_next(selected: u8, item_count: usize) -> u8 {
    if (selected as usize) + 1 < item_count {
        selected + 1
    } else {
        selected
    }
}

/// Direction of an encoder turn: `1`, `-1`, or `0` for no movement.
pub fn tick_sign(ticks: i32) -> i32 {
    ticks.signum()
}

/// Add `delta` to `value` and clamp into `[lo, hi]`.
///
/// If `lo > hi` the result is `lo`.
pub fn clamp_step(value: u8, delta: i32, lo: u8, hi: u8) -> u8 {
    let stepped = (value as i32).saturating_add(delta);
    stepped.min(hi as i32).max(lo as i32) as u8
}
