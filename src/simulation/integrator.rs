use crate::models::Body;

/// Advances every body by `dt` with semi-implicit Euler.
///
/// Velocity is updated from the stored acceleration first and the new velocity
/// then moves the position. No collision or boundary handling happens here.
pub fn integrate(bodies: &mut [Body], dt: f64) {
    for body in bodies {
        body.update(dt);
    }
}
