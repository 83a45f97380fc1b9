use std::collections::HashSet;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::collisions::{resolve, resolve_collisions, RESTITUTION_FACTOR};
use crate::models::{Body, Vec2};
use crate::tree::{BodyIndex, Quadtree};

fn total_momentum(bodies: &[Body]) -> Vec2 {
    bodies.iter().fold(Vec2::zero(), |acc, b| acc + b.momentum())
}

fn built(bodies: &[Body]) -> Quadtree {
    let mut tree = Quadtree::default();
    tree.rebuild(bodies);
    tree
}

#[test]
fn test_approaching_pair_conserves_momentum() {
    let mut bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.5), 3.0, 1.0),
        Body::new(Vec2::new(1.2, 0.9), Vec2::new(-1.0, 0.0), 1.0, 0.8),
    ];
    let before = total_momentum(&bodies);

    assert!(resolve(&mut bodies, 0, 1));

    let after = total_momentum(&bodies);
    assert_relative_eq!(after.x, before.x, epsilon = 1e-12);
    assert_relative_eq!(after.y, before.y, epsilon = 1e-12);

    // Relative normal velocity flips sign and is scaled by the restitution factor.
    let d = Vec2::new(1.2, 0.9);
    let v_before = Vec2::new(-3.0, -0.5).dot(d);
    let v_after = (bodies[1].vel - bodies[0].vel).dot(d);
    assert_relative_eq!(v_after, v_before * (1.0 - RESTITUTION_FACTOR), epsilon = 1e-12);
}

#[test]
fn test_separating_pair_only_moves_apart() {
    let mut bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.0), 1.0, 1.0),
        Body::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), 1.0, 1.0),
    ];

    assert!(resolve(&mut bodies, 0, 1));

    assert_eq!(bodies[0].vel, Vec2::new(-1.0, 0.0));
    assert_eq!(bodies[1].vel, Vec2::new(1.0, 0.0));
    assert_relative_eq!(bodies[0].pos.x, -0.5, epsilon = 1e-12);
    assert_relative_eq!(bodies[1].pos.x, 1.5, epsilon = 1e-12);
}

#[test]
fn test_resting_overlap_gets_no_impulse() {
    let mut bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::zero(), 1.0, 1.0),
        Body::new(Vec2::new(0.0, 1.0), Vec2::zero(), 1.0, 1.0),
    ];
    assert!(resolve(&mut bodies, 0, 1));
    assert_eq!(bodies[0].vel, Vec2::zero());
    assert_eq!(bodies[1].vel, Vec2::zero());
    assert_relative_eq!((bodies[1].pos - bodies[0].pos).mag(), 2.0, epsilon = 1e-12);
}

#[test]
fn test_heavier_body_moves_less() {
    let mut bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::zero(), 9.0, 1.0),
        Body::new(Vec2::new(1.0, 0.0), Vec2::zero(), 1.0, 1.0),
    ];
    assert!(resolve(&mut bodies, 0, 1));

    let moved_heavy = bodies[0].pos.mag();
    let moved_light = (bodies[1].pos - Vec2::new(1.0, 0.0)).mag();
    assert_relative_eq!(moved_heavy, 0.1, epsilon = 1e-12);
    assert_relative_eq!(moved_light, 0.9, epsilon = 1e-12);
}

#[test]
fn test_distant_pair_is_untouched() {
    let mut bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 1.0, 1.0),
        Body::new(Vec2::new(2.5, 0.0), Vec2::new(-1.0, 0.0), 1.0, 1.0),
    ];
    let before = bodies;
    assert!(!resolve(&mut bodies, 0, 1));
    assert_eq!(bodies, before);
}

#[test]
fn test_touching_pair_counts_as_contact() {
    let mut bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 1.0, 1.0),
        Body::new(Vec2::new(2.0, 0.0), Vec2::new(-1.0, 0.0), 1.0, 1.0),
    ];
    assert!(resolve(&mut bodies, 0, 1));
    assert!(bodies[0].vel.x < 0.0);
    assert_eq!(bodies[0].pos, Vec2::zero());
}

#[test]
fn test_coincident_and_self_pairs_are_skipped() {
    let mut bodies = [
        Body::new(Vec2::new(3.0, 3.0), Vec2::new(1.0, 0.0), 1.0, 1.0),
        Body::new(Vec2::new(3.0, 3.0), Vec2::new(-1.0, 0.0), 1.0, 1.0),
    ];
    let before = bodies;
    assert!(!resolve(&mut bodies, 0, 1));
    assert!(!resolve(&mut bodies, 0, 0));
    assert_eq!(bodies, before);
}

#[test]
fn test_broad_phase_reports_only_greater_indices() {
    let bodies = [
        Body::new(Vec2::new(0.0, 0.0), Vec2::zero(), 1.0, 1.0),
        Body::new(Vec2::new(1.0, 0.0), Vec2::zero(), 1.0, 1.0),
        Body::new(Vec2::new(0.0, 1.0), Vec2::zero(), 1.0, 1.0),
    ];
    let tree = built(&bodies);

    let mut seen = Vec::new();
    tree.find_collisions(BodyIndex::new(1).unwrap(), bodies[1].pos, 2.0, |j| seen.push(j.index()));
    assert_eq!(seen, vec![2]);

    seen.clear();
    tree.find_collisions(BodyIndex::new(2).unwrap(), bodies[2].pos, 2.0, |j| seen.push(j.index()));
    assert!(seen.is_empty());
}

#[test]
fn test_broad_phase_on_single_leaf_and_empty_tree() {
    let bodies = [Body::new(Vec2::new(5.0, 5.0), Vec2::zero(), 1.0, 1.0)];
    let tree = built(&bodies);
    let mut calls = 0;
    tree.find_collisions(BodyIndex::new(0).unwrap(), bodies[0].pos, 2.0, |_| calls += 1);
    assert_eq!(calls, 0);

    let empty = Quadtree::default();
    empty.find_collisions(BodyIndex::new(0).unwrap(), Vec2::zero(), 2.0, |_| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn test_broad_phase_finds_every_overlapping_pair() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut bodies: Vec<Body> = (0..300)
        .map(|_| {
            let pos = Vec2::new(rng.random_range(-60.0..60.0), rng.random_range(-60.0..60.0));
            Body::new(pos, Vec2::zero(), 1.0, rng.random_range(0.2..2.0))
        })
        .collect();
    // One oversized body whose centre sits far from most of its contacts.
    bodies.push(Body::new(Vec2::new(0.0, 0.0), Vec2::zero(), 1.0, 15.0));

    let tree = built(&bodies);
    let max_radius = bodies.iter().map(|b| b.radius).fold(0.0, f64::max);

    for (i, body) in bodies.iter().enumerate() {
        let mut found = HashSet::new();
        tree.find_collisions(BodyIndex::new(i).unwrap(), body.pos, body.radius + max_radius, |j| {
            assert!(found.insert(j.index()), "candidate reported twice");
        });

        for (j, other) in bodies.iter().enumerate().skip(i + 1) {
            let r = body.radius + other.radius;
            if (other.pos - body.pos).mag_sq() <= r * r {
                assert!(found.contains(&j), "pair ({}, {}) missed", i, j);
            }
        }
        assert!(found.iter().all(|&j| j > i));
    }
}

#[test]
fn test_each_pair_resolved_once() {
    // Ten overlapping pairs, far enough apart that no pair disturbs another.
    let mut bodies = Vec::new();
    for k in 0..10 {
        let base = Vec2::new(k as f64 * 100.0, (k % 3) as f64 * 100.0);
        bodies.push(Body::new(base, Vec2::new(1.0, 0.0), 1.0, 1.0));
        bodies.push(Body::new(base + Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0), 1.0, 1.0));
    }
    let tree = built(&bodies);
    let before = total_momentum(&bodies);

    assert_eq!(resolve_collisions(&tree, &mut bodies), 10);

    for pair in bodies.chunks(2) {
        assert_relative_eq!((pair[1].pos - pair[0].pos).mag(), 2.0, epsilon = 1e-9);
        assert!(pair[0].vel.x < 0.0 && pair[1].vel.x > 0.0);
    }
    let after = total_momentum(&bodies);
    assert_relative_eq!(after.x, before.x, epsilon = 1e-9);
}

#[test]
fn test_resolve_collisions_ignores_separated_bodies() {
    let mut bodies = vec![
        Body::new(Vec2::new(0.0, 0.0), Vec2::zero(), 1.0, 1.0),
        Body::new(Vec2::new(10.0, 0.0), Vec2::zero(), 1.0, 1.0),
        Body::new(Vec2::new(0.0, 10.0), Vec2::zero(), 1.0, 1.0),
    ];
    let before = bodies.clone();
    let tree = built(&bodies);
    assert_eq!(resolve_collisions(&tree, &mut bodies), 0);
    assert_eq!(bodies, before);
}
