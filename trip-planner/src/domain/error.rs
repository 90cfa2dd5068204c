//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from collaborator/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate outside WGS84 bounds or not a number
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lon: f64,
        reason: &'static str,
    },

    /// Route geometry has too few vertices to interpolate along
    #[error("route geometry needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    /// Route distance or duration is negative or not a number
    #[error("invalid route {field}: {value}")]
    InvalidRouteMetric { field: &'static str, value: f64 },

    /// Unknown pace preset name
    #[error("unknown pace {0:?} (expected relaxed, moderate or active)")]
    UnknownPace(String),
}
