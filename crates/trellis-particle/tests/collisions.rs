//! Integration test: collision times agree with step-by-step simulation.

use trellis_core::Coord2;
use trellis_particle::{Particle2, Particle3};
use trellis_test_utils::{converging_pair, missing_pair};

#[test]
fn head_on_pair_meets_at_five() {
    let (p, q) = converging_pair();
    assert_eq!(p.collision_time(&q), Some(5));

    let (mut a, mut b) = (p, q);
    for _ in 0..5 {
        assert_ne!(a.position, b.position);
        a.tick();
        b.tick();
    }
    assert_eq!(a.position, b.position);
}

#[test]
fn misaligned_pair_never_meets() {
    let (p, q) = missing_pair();
    assert_eq!(p.collision_time(&q), None);
    assert!((0..100).all(|t| p.position_at_time(t) != q.position_at_time(t)));
}

#[test]
fn three_dimensional_swarm_first_collisions() {
    // Three particles converge on (3, 0, 0) at t = 3; the fourth drifts
    // off the x axis and meets nobody.
    let swarm = [
        Particle3::new((-6, 0, 0), (3, 0, 0), (0, 0, 0)),
        Particle3::new((6, 0, 0), (-1, 0, 0), (0, 0, 0)),
        Particle3::new((9, 0, 0), (-2, 0, 0), (0, 0, 0)),
        Particle3::new((7, 0, 0), (-1, 1, 0), (0, 0, 0)),
    ];

    let mut first: Vec<(usize, usize, u64)> = Vec::new();
    for i in 0..swarm.len() {
        for j in i + 1..swarm.len() {
            if let Some(t) = swarm[i].collision_time(&swarm[j]) {
                first.push((i, j, t));
            }
        }
    }
    assert_eq!(first, [(0, 1, 3), (0, 2, 3), (1, 2, 3)]);
}

#[test]
fn tick_n_lands_on_the_collision_point() {
    let (mut p, mut q) = converging_pair();
    let t = p.collision_time(&q).unwrap();
    p.tick_n(t);
    q.tick_n(t);
    assert_eq!(p.position, q.position);
    assert_eq!(p.manhattan_from_origin(), 5);
}

#[test]
fn accelerating_chase() {
    // The leader cruises from x = 2 at speed 2; the chaser starts at rest
    // at x = 0 and accelerates at 2. Both reach x = 6 at t = 2.
    let leader = Particle2::new((2, 1), (2, 0), (0, 0));
    let chaser = Particle2::new((0, 1), (0, 0), (2, 0));
    assert_eq!(leader.collision_time(&chaser), Some(2));
    assert_eq!(chaser.position_at_time(2), Coord2::new(6, 1));
}
