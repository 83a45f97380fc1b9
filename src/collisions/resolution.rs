use crate::models::Body;

/// Scale of the impulse along the contact normal; 1.0 is perfectly inelastic
/// and 2.0 perfectly elastic.
pub const RESTITUTION_FACTOR: f64 = 1.5;

/// Resolves a possible contact between bodies `i` and `j`.
///
/// Overlapping bodies are pushed apart along the line between them until they
/// just touch, each moving by the other's share of the total mass. If they are
/// also approaching, an impulse is exchanged first. Returns `false` without
/// touching either body when they do not overlap, when `i == j`, or when their
/// centres coincide exactly.
///
/// # Examples
///
/// ```
/// use rs_barnes_hut::collisions::resolve;
/// use rs_barnes_hut::models::{Body, Vec2};
///
/// let mut bodies = [
///     Body::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 1.0, 1.0),
///     Body::new(Vec2::new(1.5, 0.0), Vec2::new(-1.0, 0.0), 1.0, 1.0),
/// ];
/// assert!(resolve(&mut bodies, 0, 1));
/// assert!(bodies[0].vel.x < 0.0);
/// assert!(bodies[1].vel.x > 0.0);
/// assert!((bodies[1].pos.x - bodies[0].pos.x - 2.0).abs() < 1e-12);
/// ```
pub fn resolve(bodies: &mut [Body], i: usize, j: usize) -> bool {
    if i == j {
        return false;
    }
    let (b1, b2) = (bodies[i], bodies[j]);

    let d = b2.pos - b1.pos;
    let r = b1.radius + b2.radius;
    let d_sq = d.mag_sq();

    if d_sq > r * r || d_sq == 0.0 {
        return false;
    }

    let total = b1.mass + b2.mass;
    if total <= 0.0 || !total.is_finite() {
        return false;
    }
    let weight1 = b2.mass / total;
    let weight2 = b1.mass / total;

    let v = b2.vel - b1.vel;
    let d_dot_v = d.dot(v);

    if d_dot_v < 0.0 {
        let impulse = d * (RESTITUTION_FACTOR * d_dot_v / d_sq);
        bodies[i].vel += impulse * weight1;
        bodies[j].vel -= impulse * weight2;
    }

    let overlap = d * (r / d_sq.sqrt() - 1.0);
    bodies[i].pos -= overlap * weight1;
    bodies[j].pos += overlap * weight2;

    true
}
