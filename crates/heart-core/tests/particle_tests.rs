// Host-side tests for the particle store: emission, integration and culling.

use glam::Vec2;
use heart_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pink(alpha: u8) -> Rgba {
    Rgba::new(255, 105, 180, alpha)
}

fn particle(lifetime: f32) -> Particle {
    Particle::new(Vec2::ZERO, Vec2::new(1.0, 0.0), lifetime, pink(255))
}

#[test]
fn spawn_into_empty_store_adds_exactly_n() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut store = ParticleStore::new();
    let added = store.spawn(SPAWN_PER_FRAME, BASE_SIZE, 1.0, &mut rng);
    assert_eq!(added, 5);
    assert_eq!(store.len(), 5);
}

#[test]
fn spawned_particles_respect_emission_ranges() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut store = ParticleStore::new();
    store.spawn(200, BASE_SIZE, 1.0, &mut rng);
    let origin = screen_origin();
    for p in store.iter() {
        let speed = p.velocity.length();
        assert!((SPEED_MIN - 1e-3..=SPEED_MAX + 1e-3).contains(&speed), "speed {speed}");
        assert!((LIFETIME_MIN..=LIFETIME_MAX).contains(&p.lifetime()));
        assert_eq!(p.remaining(), p.lifetime());

        assert_eq!(p.color.r, 255);
        assert!((105..=155).contains(&p.color.g), "green {}", p.color.g);
        assert!(p.color.b >= 180, "blue {}", p.color.b);
        assert_eq!(p.color.a, 255);

        // Emission radius is size * (0.9 + 0.2 sin θ), so within [0.7, 1.1] * size.
        let offset = p.position - origin;
        let r = offset.length();
        assert!(r >= 0.7 * BASE_SIZE - 1e-2 && r <= 1.1 * BASE_SIZE + 1e-2, "radius {r}");

        // Velocity points along the spawn angle; the offset has y flipped.
        let dir = p.velocity / speed;
        let flipped = Vec2::new(offset.x, -offset.y) / r;
        assert!((dir - flipped).length() < 1e-3, "{dir} vs {flipped}");
    }
}

#[test]
fn spawn_positions_follow_beat_factor() {
    let beat = 1.1;
    let mut a = ParticleStore::new();
    let mut b = ParticleStore::new();
    a.spawn(20, BASE_SIZE, 1.0, &mut StdRng::seed_from_u64(3));
    b.spawn(20, BASE_SIZE, beat, &mut StdRng::seed_from_u64(3));
    let origin = screen_origin();
    for (pa, pb) in a.iter().zip(b.iter()) {
        let da = pa.position - origin;
        let db = pb.position - origin;
        assert!((da.x - db.x).abs() < 1e-3);
        assert!((da.y / beat - db.y).abs() < 1e-3);
        assert_eq!(pa.velocity, pb.velocity);
    }
}

#[test]
fn same_seed_spawns_identical_particles() {
    let mut a = ParticleStore::new();
    let mut b = ParticleStore::new();
    a.spawn(50, BASE_SIZE, 1.05, &mut StdRng::seed_from_u64(99));
    b.spawn(50, BASE_SIZE, 1.05, &mut StdRng::seed_from_u64(99));
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn store_never_exceeds_cap() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut store = ParticleStore::new();
    for frame in 0..300 {
        store.spawn(SPAWN_PER_FRAME, BASE_SIZE, 1.0, &mut rng);
        assert!(store.len() <= MAX_PARTICLES, "frame {frame}: {}", store.len());
    }
    assert_eq!(store.len(), MAX_PARTICLES);
    assert!(store.is_full());
    assert_eq!(store.spawn(SPAWN_PER_FRAME, BASE_SIZE, 1.0, &mut rng), 0);
}

#[test]
fn spawn_stops_partway_at_cap() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut store = ParticleStore::new();
    store.spawn(MAX_PARTICLES - 3, BASE_SIZE, 1.0, &mut rng);
    assert_eq!(store.spawn(5, BASE_SIZE, 1.0, &mut rng), 3);
    assert_eq!(store.len(), MAX_PARTICLES);
}

#[test]
fn push_honours_cap() {
    let mut store = ParticleStore::new();
    for _ in 0..MAX_PARTICLES {
        assert!(store.push(particle(1.0)));
    }
    assert!(!store.push(particle(1.0)));
    assert_eq!(store.len(), MAX_PARTICLES);
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn advance_fades_then_removes() {
    let mut store = ParticleStore::new();
    store.push(particle(2.0));

    assert_eq!(store.advance(1.0), 0);
    let p = store.as_slice()[0];
    assert!((p.remaining() - 1.0).abs() < 1e-6);
    assert_eq!(p.lifetime(), 2.0);
    assert!((126..=128).contains(&p.color.a), "alpha {}", p.color.a);
    assert_eq!(p.position, Vec2::new(1.0, 0.0));

    assert_eq!(store.advance(1.5), 1);
    assert!(store.is_empty());
}

#[test]
fn advance_decrements_remaining_by_dt() {
    let mut store = ParticleStore::new();
    for lifetime in [1.0, 1.5, 2.0, 2.5, 3.0] {
        store.push(particle(lifetime));
    }
    let before: Vec<f32> = store.iter().map(Particle::remaining).collect();
    store.advance(0.25);
    let after: Vec<f32> = store.iter().map(Particle::remaining).collect();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert!((b - 0.25 - a).abs() < 1e-6, "{b} -> {a}");
    }
}

#[test]
fn particle_expiring_exactly_at_zero_is_removed() {
    let mut store = ParticleStore::new();
    store.push(particle(0.5));
    store.advance(0.5);
    assert!(store.is_empty());
}

#[test]
fn removal_visits_each_survivor_once() {
    let mut store = ParticleStore::new();
    for i in 0..10 {
        store.push(particle(if i % 2 == 0 { 0.5 } else { 2.0 }));
    }
    assert_eq!(store.advance(1.0), 5);
    assert_eq!(store.len(), 5);
    for p in store.iter() {
        assert_eq!(p.position, Vec2::new(1.0, 0.0), "integrated more than once");
        assert!((p.remaining() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn consecutive_dead_particles_are_all_removed() {
    let mut store = ParticleStore::new();
    for lifetime in [0.1, 0.1, 0.1, 3.0, 0.1, 0.1, 3.0, 0.1] {
        store.push(particle(lifetime));
    }
    assert_eq!(store.advance(0.2), 6);
    assert_eq!(store.len(), 2);
    assert!(store.iter().all(|p| !p.is_dead()));
}

#[test]
fn alpha_is_monotonic_and_bounded() {
    let mut store = ParticleStore::new();
    store.push(particle(2.7));
    let mut last = 255u8;
    let mut steps = 0;
    while let Some(p) = store.as_slice().first().copied() {
        assert!(p.color.a <= last, "alpha rose from {last} to {}", p.color.a);
        assert!(p.remaining() <= p.lifetime());
        last = p.color.a;
        store.advance(1.0 / 60.0);
        steps += 1;
        assert!(steps < 1000);
    }
    assert!(last < 10);
}

#[test]
fn new_particle_starts_opaque() {
    let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0, pink(12));
    assert_eq!(p.color.a, 255);
    assert!(!p.is_dead());
}
