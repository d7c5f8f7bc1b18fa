use std::collections::BTreeSet;

use rand::seq::SliceRandom;

/// Draws `count` distinct winners uniformly at random.
///
/// Runs a partial Fisher-Yates shuffle over the participants with the thread-local CSPRNG,
/// so every subset of size `count` is equally likely. `count` is clamped to the number of
/// participants.
///
/// # Arguments
/// - `participants` - Everyone who entered
/// - `count` - Number of winners to draw
///
/// # Returns
/// - `Vec<u64>` - Winners in draw order, empty when nobody entered
pub fn draw_winners(participants: &BTreeSet<u64>, count: usize) -> Vec<u64> {
    let mut pool: Vec<u64> = participants.iter().copied().collect();
    let count = count.min(pool.len());

    let mut rng = rand::rng();
    let (winners, _) = pool.partial_shuffle(&mut rng, count);

    winners.to_vec()
}
