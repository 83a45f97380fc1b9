//! Initial body layouts.
use std::f64::consts::TAU;

use rand::Rng;

use crate::models::{Body, Vec2};

/// Mass of the body placed at the centre of a disc.
pub const CENTRAL_MASS: f64 = 1e6;
/// Radius of the central body, also the inner edge of the disc.
pub const INNER_RADIUS: f64 = 25.0;

/// A disc of `n` bodies orbiting one heavy central body.
///
/// The central body sits at rest at the origin. The rest are spread uniformly
/// by area between [`INNER_RADIUS`] and `sqrt(n) * 5` (at least twice the inner
/// radius), with masses in `[0.8, 1.2)` and radius `mass.cbrt()`. Bodies are
/// returned sorted by distance from the centre, each moving on a circular orbit
/// around the mass enclosed by its own radius.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rs_barnes_hut::simulation::{uniform_disc, CENTRAL_MASS};
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let bodies = uniform_disc(100, &mut rng, 1.0);
///
/// assert_eq!(bodies.len(), 100);
/// assert_eq!(bodies[0].mass, CENTRAL_MASS);
/// ```
pub fn uniform_disc<R: Rng + ?Sized>(n: usize, rng: &mut R, gravity: f64) -> Vec<Body> {
    if n == 0 {
        return Vec::new();
    }

    let outer_radius = ((n as f64).sqrt() * 5.0).max(INNER_RADIUS * 2.0);
    let t_sq = (INNER_RADIUS / outer_radius).powi(2);

    let mut bodies = Vec::with_capacity(n);
    bodies.push(Body::new(Vec2::zero(), Vec2::zero(), CENTRAL_MASS, INNER_RADIUS));

    while bodies.len() < n {
        let (sin, cos) = (rng.random::<f64>() * TAU).sin_cos();
        let r = (rng.random::<f64>() * (1.0 - t_sq) + t_sq).sqrt() * outer_radius;

        let mass = rng.random_range(0.8..1.2);
        let pos = Vec2::new(cos, sin) * r;
        // Unit tangent; scaled to orbital speed below.
        let vel = Vec2::new(sin, -cos);
        bodies.push(Body::new(pos, vel, mass, f64::cbrt(mass)));
    }

    bodies.sort_by(|a, b| a.pos.mag_sq().total_cmp(&b.pos.mag_sq()));

    let mut enclosed = 0.0;
    for body in &mut bodies {
        enclosed += body.mass;
        if body.pos == Vec2::zero() {
            continue;
        }
        let speed = (gravity * enclosed / body.pos.mag()).max(0.0).sqrt();
        body.vel *= speed;
    }

    bodies
}
