use tracing::trace;

use crate::constants::ON_COURT;
use crate::draws::DrawSource;

/// Pick an on-court slot with probability proportional to its weight.
///
/// `exempt` is an on-court slot (0..5, not a roster index) whose weight is
/// treated as zero for this draw, e.g. the shooter when picking an assister.
/// Exactly one uniform is consumed. When every eligible weight is zero the
/// draw falls back to a uniform choice among the eligible slots.
pub fn pick_player<D: DrawSource>(
    weights: [f64; ON_COURT],
    exempt: Option<usize>,
    draws: &mut D,
) -> usize {
    let mut weights = weights;
    if let Some(slot) = exempt {
        weights[slot] = 0.0;
    }

    let total: f64 = weights.iter().sum();
    let u = draws.uniform();

    if total <= 0.0 {
        let eligible: Vec<usize> = (0..ON_COURT).filter(|&i| Some(i) != exempt).collect();
        let pick = eligible[((u * eligible.len() as f64) as usize).min(eligible.len() - 1)];
        trace!(pick, ?exempt, "all selection weights zero, picking uniformly");
        return pick;
    }

    let target = u * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate().take(ON_COURT - 1) {
        cumulative += w;
        if target < cumulative {
            return i;
        }
    }

    // Rounding can leave the target just short of the last threshold; land on
    // the last slot that actually carries weight
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(ON_COURT - 1)
}
