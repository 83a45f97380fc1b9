use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::Vec2;
use crate::simulation::{integrate, uniform_disc, CENTRAL_MASS, INNER_RADIUS};
use crate::models::Body;

#[test]
fn test_empty_and_single_disc() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(uniform_disc(0, &mut rng, 1.0).is_empty());

    let one = uniform_disc(1, &mut rng, 1.0);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].pos, Vec2::zero());
    assert_eq!(one[0].vel, Vec2::zero());
    assert_eq!(one[0].mass, CENTRAL_MASS);
    assert_eq!(one[0].radius, INNER_RADIUS);
}

#[test]
fn test_disc_is_seeded() {
    let a = uniform_disc(500, &mut StdRng::seed_from_u64(11), 1.0);
    let b = uniform_disc(500, &mut StdRng::seed_from_u64(11), 1.0);
    let c = uniform_disc(500, &mut StdRng::seed_from_u64(12), 1.0);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_disc_layout() {
    let n = 2000;
    let bodies = uniform_disc(n, &mut StdRng::seed_from_u64(3), 1.0);
    let outer = (n as f64).sqrt() * 5.0;

    assert_eq!(bodies.len(), n);
    assert_eq!(bodies[0].mass, CENTRAL_MASS);

    for pair in bodies.windows(2) {
        assert!(pair[0].pos.mag_sq() <= pair[1].pos.mag_sq());
    }
    for body in &bodies[1..] {
        let r = body.pos.mag();
        assert!(r >= INNER_RADIUS - 1e-9 && r <= outer + 1e-9);
        assert!(body.mass >= 0.8 && body.mass < 1.2);
        assert_relative_eq!(body.radius, body.mass.cbrt());
        assert_eq!(body.acc, Vec2::zero());
    }
}

#[test]
fn test_small_disc_uses_minimum_outer_radius() {
    let bodies = uniform_disc(10, &mut StdRng::seed_from_u64(4), 1.0);
    for body in &bodies[1..] {
        assert!(body.pos.mag() <= INNER_RADIUS * 2.0 + 1e-9);
    }
}

#[test]
fn test_disc_orbits_are_circular() {
    let g = 2.0;
    let bodies = uniform_disc(300, &mut StdRng::seed_from_u64(8), g);

    let mut enclosed = 0.0;
    for body in &bodies {
        enclosed += body.mass;
        if body.pos == Vec2::zero() {
            continue;
        }
        let r = body.pos.mag();
        assert_relative_eq!(body.vel.mag(), (g * enclosed / r).sqrt(), max_relative = 1e-9);
        assert!(body.vel.dot(body.pos).abs() < 1e-9 * body.vel.mag() * r);
    }
}

#[test]
fn test_negative_gravity_leaves_bodies_at_rest() {
    let bodies = uniform_disc(50, &mut StdRng::seed_from_u64(1), -1.0);
    assert!(bodies.iter().all(|b| b.vel == Vec2::zero()));
}

#[test]
fn test_integrate_is_semi_implicit() {
    let mut bodies = vec![Body::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0), 1.0, 1.0)];
    bodies[0].acc = Vec2::new(0.0, -2.0);

    integrate(&mut bodies, 0.5);

    assert_eq!(bodies[0].vel, Vec2::new(1.0, -1.0));
    assert_eq!(bodies[0].pos, Vec2::new(1.5, 0.5));
    // The stored acceleration is left for the next force pass to overwrite.
    assert_eq!(bodies[0].acc, Vec2::new(0.0, -2.0));
}
