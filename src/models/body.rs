use crate::models::Vec2;
use crate::utils::SimulationError;

/// A point mass in the simulation.
///
/// Bodies have no identity beyond their index in the engine's body vector.
/// `acc` is scratch space: it is overwritten by the force pass every step and
/// consumed by the integrator. `radius` only matters to the collision pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Position vector.
    pub pos: Vec2,
    /// Velocity vector.
    pub vel: Vec2,
    /// Acceleration from the most recent force pass.
    pub acc: Vec2,
    /// Mass of the body, always positive.
    pub mass: f64,
    /// Collision radius, never negative.
    pub radius: f64,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::zero(), Vec2::zero(), 1.0, 1.0)
    }
}

impl Body {
    /// Creates a body with zero acceleration. No validation is done here;
    /// see [`Body::try_new`].
    pub fn new(pos: Vec2, vel: Vec2, mass: f64, radius: f64) -> Self {
        Self {
            pos,
            vel,
            acc: Vec2::zero(),
            mass,
            radius,
        }
    }

    /// Creates a body, rejecting values the engine cannot simulate.
    ///
    /// # Errors
    ///
    /// Returns an error if the mass is not positive and finite, the radius is
    /// negative or not finite, or the position or velocity is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_barnes_hut::models::{Body, Vec2};
    /// use rs_barnes_hut::utils::SimulationError;
    ///
    /// let body = Body::try_new(Vec2::new(1.0, 2.0), Vec2::zero(), 3.0, 0.5).unwrap();
    /// assert_eq!(body.mass, 3.0);
    ///
    /// let err = Body::try_new(Vec2::zero(), Vec2::zero(), 0.0, 0.5).unwrap_err();
    /// assert_eq!(err, SimulationError::InvalidMass);
    /// ```
    pub fn try_new(pos: Vec2, vel: Vec2, mass: f64, radius: f64) -> Result<Self, SimulationError> {
        if !mass.is_finite() || mass <= 0.0 { return Err(SimulationError::InvalidMass); }
        if !radius.is_finite() || radius < 0.0 { return Err(SimulationError::InvalidRadius); }
        if !pos.is_finite() { return Err(SimulationError::InvalidPosition); }
        if !vel.is_finite() { return Err(SimulationError::InvalidVelocity); }
        Ok(Self::new(pos, vel, mass, radius))
    }

    /// Advances velocity then position by `dt` (semi-implicit Euler).
    #[inline]
    pub fn update(&mut self, dt: f64) {
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.mag_sq()
    }
}
