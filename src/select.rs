//! Constrained point selection: pick a well spread subset of points such that no two are closer
//! than a minimum distance and every picked point has another picked point within a maximum
//! distance.
//!
//! The selection runs in two independent passes. The first is a randomized greedy thinning
//! which enforces the minimum spacing, the second drops any survivor left without a neighbor
//! inside the maximum distance. There is no backtracking between the passes, so the result is a
//! fast, valid subset rather than the largest possible one.

mod connectivity;
mod thinning;

pub use connectivity::verify_max_distance;
pub use thinning::thin_min_distance;

use crate::Result;
use crate::common::points::is_finite;
use crate::common::{Planar, planar_coords};
use crate::errors::InvalidParameter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// The parameters of a constrained selection. Distances are planar and in the units of the
/// point coordinates (meters for a projected coordinate system).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// No two selected points may be closer than this
    pub min_distance: f64,

    /// Every selected point needs another selected point at most this far away
    pub max_distance: f64,

    /// Seed for the visiting order of the thinning pass. Without a seed the order comes from
    /// the thread-local generator and results differ between runs.
    pub seed: Option<u64>,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 7.0,
            seed: None,
        }
    }
}

impl SelectionParams {
    pub fn new(min_distance: f64, max_distance: f64) -> Self {
        Self {
            min_distance,
            max_distance,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the contract `0 < min_distance <= max_distance`, with both values finite.
    pub fn validate(&self) -> std::result::Result<(), InvalidParameter> {
        if !self.min_distance.is_finite() || !self.max_distance.is_finite() {
            return Err(InvalidParameter::NonFinite);
        }
        if self.min_distance <= 0.0 {
            return Err(InvalidParameter::MinDistanceNotPositive(self.min_distance));
        }
        if self.max_distance < self.min_distance {
            return Err(InvalidParameter::MaxBelowMin {
                min_distance: self.min_distance,
                max_distance: self.max_distance,
            });
        }
        Ok(())
    }

    /// Read parameters from a JSON document. Missing fields take their default values, and the
    /// result is validated before it is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloudthin::SelectionParams;
    /// let params = SelectionParams::from_json(r#"{"min_distance": 1.5, "seed": 4}"#).unwrap();
    /// assert_eq!(params.max_distance, 7.0);
    /// assert_eq!(params.seed, Some(4));
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let params: SelectionParams = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }
}

/// The outcome of a constrained selection, as indices into the input slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The indices of the selected points, in ascending order
    pub indices: Vec<usize>,

    /// How many points survived the minimum distance thinning, before the maximum distance
    /// verification dropped the isolated ones
    pub thinned: usize,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Run the two-pass constrained selection with an explicit random source for the thinning
/// order. The parameters are validated before any index is built, and the `seed` field of the
/// parameters is ignored in favor of `rng`.
///
/// Points with non-finite coordinates are never selected. An empty input, or an input where
/// every thinned point ends up isolated, gives an empty selection rather than an error.
///
/// # Arguments
///
/// * `points`: the candidate points
/// * `params`: the distance constraints
/// * `rng`: the random source used to shuffle the visiting order
///
/// returns: Result<Selection, Box<dyn Error, Global>>
pub fn select_indices_with_rng<T, R>(
    points: &[T],
    params: &SelectionParams,
    rng: &mut R,
) -> Result<Selection>
where
    T: Planar,
    R: Rng + ?Sized,
{
    params.validate()?;

    let coords = planar_coords(points);
    let mut order = (0..coords.len())
        .filter(|&i| is_finite(&coords[i]))
        .collect::<Vec<_>>();
    if order.len() < coords.len() {
        tracing::debug!(
            skipped = coords.len() - order.len(),
            "Skipping points with non-finite coordinates"
        );
    }
    order.shuffle(rng);

    let thinned = thin_min_distance(&coords, &order, params.min_distance).to_indices();
    let indices = verify_max_distance(&coords, &thinned, params.max_distance);

    tracing::info!(
        input = points.len(),
        thinned = thinned.len(),
        selected = indices.len(),
        min_distance = params.min_distance,
        max_distance = params.max_distance,
        "Selected points"
    );

    Ok(Selection {
        indices,
        thinned: thinned.len(),
    })
}

/// Run the constrained selection, using a seeded generator when `params.seed` is set and the
/// thread-local generator otherwise.
pub fn select_indices<T: Planar>(points: &[T], params: &SelectionParams) -> Result<Selection> {
    match params.seed {
        Some(seed) => select_indices_with_rng(points, params, &mut StdRng::seed_from_u64(seed)),
        None => select_indices_with_rng(points, params, &mut rand::rng()),
    }
}

/// Select a subset of `points` such that no two selected points are closer than
/// `params.min_distance` and every selected point has at least one other selected point within
/// `params.max_distance`. The returned points are clones of the inputs, in input order.
///
/// # Examples
///
/// ```
/// use cloudthin::{select, Point2, SelectionParams};
///
/// let points = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(30.0, 0.0)];
/// let params = SelectionParams::new(2.0, 5.0).with_seed(1);
/// let chosen = select(&points, &params).unwrap();
/// assert_eq!(chosen, vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)]);
/// ```
pub fn select<T: Planar + Clone>(points: &[T], params: &SelectionParams) -> Result<Vec<T>> {
    let selection = select_indices(points, params)?;
    Ok(selection
        .indices
        .into_iter()
        .map(|i| points[i].clone())
        .collect())
}
