//! Distance-based level choice from a block's error thresholds.

/// Coarsest level whose threshold does not exceed `distance_squared`.
///
/// `thresholds` must be non-decreasing with `thresholds[0] == 0`, so level 0
/// is chosen when nothing coarser qualifies.
pub fn select_level(thresholds: &[f32], distance_squared: f32) -> u32 {
    thresholds
        .iter()
        .rposition(|&threshold| threshold <= distance_squared)
        .map_or(0, |level| level as u32)
}
