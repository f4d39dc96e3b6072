//! Maximum-distance connectivity verification, the second pass of the constrained selection.

use crate::{KdTree2, Point2};
use rayon::prelude::*;

/// Keep the candidates which have at least one *other* candidate within `max_distance`
/// (boundary inclusive). Nothing is re-selected to replace a dropped candidate.
///
/// Each check only reads the tree built over the candidates, so the checks run in parallel.
/// The returned indices keep the order of `candidates`.
///
/// # Arguments
///
/// * `points`: all point locations
/// * `candidates`: the indices of `points` which survived thinning
/// * `max_distance`: the largest allowed distance to the nearest other candidate
///
/// returns: Vec<usize, Global>
pub fn verify_max_distance(
    points: &[Point2],
    candidates: &[usize],
    max_distance: f64,
) -> Vec<usize> {
    let coords = candidates.iter().map(|&i| points[i]).collect::<Vec<_>>();
    let tree = KdTree2::new(&coords);

    let kept = candidates
        .par_iter()
        .zip(coords.par_iter())
        .filter(|(_, p)| tree.count_within(p, max_distance) > 1)
        .map(|(&i, _)| i)
        .collect::<Vec<_>>();

    tracing::debug!(
        candidates = candidates.len(),
        kept = kept.len(),
        "Finished maximum distance verification"
    );
    kept
}
