use thiserror::Error;

/// Rejected parameters for the geodesic solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("boost velocity {0} must be strictly between -c and c")]
    Superluminal(f64),
    #[error("initial radius {r0} is inside the horizon (r_s = {horizon})")]
    StartsInsideHorizon { r0: f64, horizon: f64 },
    #[error("need at least 2 output samples, got {0}")]
    TooFewSamples(usize),
    #[error("end time must be positive and finite, got {0}")]
    BadEndTime(f64),
    #[error("need at least 1 substep per sample")]
    NoSubsteps,
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot: trajectory is empty")]
    EmptyTrajectory,
    #[error("failed to draw plot: {0}")]
    Drawing(String),
}

// plotters' DrawingAreaErrorKind is generic over the backend error, so we
// flatten it to a string rather than carrying the type parameter around.
impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(e.to_string())
    }
}
