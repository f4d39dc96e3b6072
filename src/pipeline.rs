//! The full processing chain: restrict a cloud to a set of regions, then run the constrained
//! selection on what is left.

use crate::Result;
use crate::common::Planar;
use crate::filter::{ContainmentFilter, RepairReport};
use crate::select::{SelectionParams, select_indices_with_rng};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// How a pipeline run ended. None of these are errors, an empty result is a valid answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// At least one point satisfied both the region and the distance constraints
    Selected,

    /// No point fell inside any region
    NoPointsInRegions,

    /// Points fell inside the regions, but none survived the distance constraints
    NoPointsSatisfyConstraints,
}

/// Counts collected at each stage of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Number of points handed to the run
    pub input: usize,

    /// Number of points inside at least one region
    pub within_regions: usize,

    /// Number of points left after minimum distance thinning
    pub thinned: usize,

    /// Number of points in the final output
    pub selected: usize,

    /// What happened to the region geometries when the filter was built
    pub regions: RepairReport,
}

impl PipelineReport {
    pub fn outcome(&self) -> Outcome {
        if self.within_regions == 0 {
            Outcome::NoPointsInRegions
        } else if self.selected == 0 {
            Outcome::NoPointsSatisfyConstraints
        } else {
            Outcome::Selected
        }
    }
}

pub struct PipelineOutput<T> {
    /// The selected points, cloned from the input in input order
    pub points: Vec<T>,
    pub report: PipelineReport,
}

/// Run the containment filter followed by the constrained selection, using the generator
/// implied by `params.seed`.
pub fn run<T>(
    points: &[T],
    filter: &ContainmentFilter,
    params: &SelectionParams,
) -> Result<PipelineOutput<T>>
where
    T: Planar + Clone + Sync,
{
    match params.seed {
        Some(seed) => run_with_rng(points, filter, params, &mut StdRng::seed_from_u64(seed)),
        None => run_with_rng(points, filter, params, &mut rand::rng()),
    }
}

/// Run the containment filter followed by the constrained selection with an explicit random
/// source. The distance parameters are checked before anything else is done, so an invalid
/// configuration fails without touching the points.
///
/// # Arguments
///
/// * `points`: the full cloud
/// * `filter`: the regions the output is restricted to
/// * `params`: the distance constraints
/// * `rng`: random source for the thinning order
///
/// returns: Result<PipelineOutput<T>, Box<dyn Error, Global>>
pub fn run_with_rng<T, R>(
    points: &[T],
    filter: &ContainmentFilter,
    params: &SelectionParams,
    rng: &mut R,
) -> Result<PipelineOutput<T>>
where
    T: Planar + Clone + Sync,
    R: Rng + ?Sized,
{
    params.validate()?;

    let inside = filter.filter_indices(points);
    let candidates = inside.iter().map(|&i| points[i].xy()).collect::<Vec<_>>();
    let selection = select_indices_with_rng(&candidates, params, rng)?;

    let selected = selection
        .indices
        .iter()
        .map(|&k| points[inside[k]].clone())
        .collect::<Vec<_>>();

    let report = PipelineReport {
        input: points.len(),
        within_regions: inside.len(),
        thinned: selection.thinned,
        selected: selected.len(),
        regions: filter.report(),
    };

    match report.outcome() {
        Outcome::Selected => tracing::info!(
            input = report.input,
            within_regions = report.within_regions,
            selected = report.selected,
            "Pipeline finished"
        ),
        outcome => tracing::warn!(?outcome, input = report.input, "Pipeline produced no points"),
    }

    Ok(PipelineOutput {
        points: selected,
        report,
    })
}
