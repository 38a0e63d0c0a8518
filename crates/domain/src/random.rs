//! Randomness is injected, never owned.
//!
//! Domain code that draws takes a `FnMut(min, max) -> i32` closure returning a
//! value in the inclusive range `min..=max`. The engine passes
//! `|min, max| random.gen_range(min, max)`; tests pass fixed sequences.

/// Draw an index in `0..len` through the injected roll.
///
/// Returns `None` for an empty range. Out-of-range rolls are clamped.
pub fn pick_index<R>(roll: &mut R, len: usize) -> Option<usize>
where
    R: FnMut(i32, i32) -> i32 + ?Sized,
{
    if len == 0 {
        return None;
    }
    let max = i32::try_from(len - 1).unwrap_or(i32::MAX);
    let drawn = roll(0, max).clamp(0, max);
    usize::try_from(drawn).ok()
}

/// Draw an index in `0..weights.len()` with probability proportional to weight.
pub fn pick_weighted<R>(roll: &mut R, weights: &[u32]) -> Option<usize>
where
    R: FnMut(i32, i32) -> i32 + ?Sized,
{
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return None;
    }
    let max = i32::try_from(total - 1).unwrap_or(i32::MAX);
    let mut ticket = u64::try_from(roll(0, max).clamp(0, max)).unwrap_or(0);
    for (index, weight) in weights.iter().enumerate() {
        let weight = u64::from(*weight);
        if ticket < weight {
            return Some(index);
        }
        ticket -= weight;
    }
    Some(weights.len() - 1)
}
