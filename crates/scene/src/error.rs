/// Why a single country could not be hit-tested.
///
/// Picking logs these and moves on to the next candidate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickError {
    #[error("sphere radius must be positive and finite, got {0}")]
    DegenerateRadius(f64),
    #[error("query point has non-finite coordinates")]
    NonFinitePoint,
    #[error("polyline {polyline} has a non-finite vertex")]
    NonFiniteVertex { polyline: usize },
}
