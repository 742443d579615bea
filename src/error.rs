use std::fmt;

use crate::BodyId;

/// Reasons an orbit cannot be derived from a state vector, or a body set
/// cannot be built.
///
/// These are caller bugs (usually a bad frame conversion), not physical
/// outcomes. Crashes and escapes are reported as
/// [`FlightEvent`](crate::FlightEvent)s instead.
#[derive(Debug, Clone, PartialEq)]
pub enum OrbitError {
    /// Position coincides with the center of the body
    ZeroRadius,
    /// Velocity vector has zero length
    ZeroVelocity,
    /// Velocity is parallel to the position, angular momentum is zero
    RadialTrajectory,
    /// Position or velocity contains NaN or infinity
    NonFiniteState,
    /// Rejected body, static orbit or scenario parameters
    InvalidBody(String),
    /// Engine or propagation settings outside their valid range
    InvalidConfig(String),
    /// The id does not refer to a body in the set
    UnknownBody(BodyId),
}

impl fmt::Display for OrbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroRadius => write!(f, "position is at the center of the body"),
            Self::ZeroVelocity => write!(f, "velocity is zero"),
            Self::RadialTrajectory => {
                write!(f, "velocity is parallel to position (zero angular momentum)")
            }
            Self::NonFiniteState => write!(f, "state vector is not finite"),
            Self::InvalidBody(reason) => write!(f, "invalid body: {reason}"),
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            Self::UnknownBody(id) => write!(f, "unknown body {}", id.0),
        }
    }
}

impl std::error::Error for OrbitError {}
