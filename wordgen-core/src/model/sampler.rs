use rand::Rng;

/// Draws one key with probability proportional to its weight.
///
/// A uniform value `u` in `[0, 1)` is scaled by the total weight. The weights
/// are then accumulated in iteration order, and the first key whose cumulative
/// sum exceeds the scaled value wins. Zero-weight keys are never selected.
///
/// Returns `None` when there is nothing to draw from (no candidates, or a total
/// weight of zero). Callers treat this as "no continuation is possible".
pub fn sample_weighted<'a, R: Rng>(candidates: &[(&'a str, usize)], rng: &mut R) -> Option<&'a str> {
	let total: usize = candidates.iter().map(|(_, weight)| weight).sum();
	if total == 0 {
		return None;
	}

	let draw = rng.random::<f64>() * total as f64;

	let mut cumulative = 0usize;
	let mut fallback = None;
	for (key, weight) in candidates {
		if *weight == 0 {
			continue;
		}
		cumulative += weight;
		if draw < cumulative as f64 {
			return Some(*key);
		}
		fallback = Some(*key);
	}

	// Only reachable through float rounding of `draw` up to `total`.
	fallback
}
