// src/utils/errors.rs

use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or authoring a simulation.
///
/// The stepping loop itself never returns these; they surface from constructors,
/// configuration validation and body authoring calls.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Indicates an invalid mass value (non-positive or not finite).
    InvalidMass,
    /// Indicates an invalid radius value (negative or not finite).
    InvalidRadius,
    /// Indicates an invalid time step (non-positive or not finite).
    InvalidTimeStep,
    /// Indicates an invalid opening angle (negative or not finite).
    InvalidTheta,
    /// Indicates an invalid softening length (negative or not finite).
    InvalidEpsilon,
    /// Indicates a position with a NaN or infinite component.
    InvalidPosition,
    /// Indicates a velocity with a NaN or infinite component.
    InvalidVelocity,
    /// The worker pool could not be created.
    ThreadPool(String),
    /// A general error for settings or calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidMass => write!(f, "Invalid mass value"),
            SimulationError::InvalidRadius => write!(f, "Invalid radius value"),
            SimulationError::InvalidTimeStep => write!(f, "Invalid time step"),
            SimulationError::InvalidTheta => write!(f, "Invalid opening angle (theta)"),
            SimulationError::InvalidEpsilon => write!(f, "Invalid softening length (epsilon)"),
            SimulationError::InvalidPosition => write!(f, "Invalid position value"),
            SimulationError::InvalidVelocity => write!(f, "Invalid velocity value"),
            SimulationError::ThreadPool(msg) => write!(f, "Worker pool error: {}", msg),
            SimulationError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for SimulationError {}

/// Reasons a single body could not be placed in the quadtree.
///
/// These are never fatal: the step driver logs them and leaves the body out of
/// that step's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The position has a NaN or infinite component.
    NonFinitePosition,
    /// The mass is zero, negative or not finite, so it would read as an empty leaf.
    InvalidMass,
    /// Two distinct positions could not be separated within `Quadtree::MAX_DEPTH` splits.
    DepthExceeded,
    /// The node arena cannot grow past the `u32` index range.
    ArenaFull,
    /// The tree has no root; `Quadtree::reset` has not been called since the last clear.
    NoRoot,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeError::NonFinitePosition => write!(f, "Position is not finite"),
            TreeError::InvalidMass => write!(f, "Mass must be positive and finite"),
            TreeError::DepthExceeded => write!(f, "Maximum subdivision depth exceeded"),
            TreeError::ArenaFull => write!(f, "Node arena index range exhausted"),
            TreeError::NoRoot => write!(f, "Quadtree has no root node"),
        }
    }
}

impl Error for TreeError {}
