//! Particle trail emitted from the heart's edge.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::color::Rgba;
use crate::constants::{
    screen_origin, EMIT_RADIUS_BASE, EMIT_RADIUS_SWING, LIFETIME_MAX, LIFETIME_MIN,
    MAX_PARTICLES, PARTICLE_BLUE_BASE, PARTICLE_BLUE_JITTER, PARTICLE_GREEN_BASE,
    PARTICLE_GREEN_JITTER, PARTICLE_RED, SPEED_MAX, SPEED_MIN,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgba,
    remaining: f32,
    lifetime: f32,
}

impl Particle {
    /// New particle with a full lifetime and opaque colour.
    pub fn new(position: Vec2, velocity: Vec2, lifetime: f32, color: Rgba) -> Self {
        Self {
            position,
            velocity,
            color: color.with_alpha(255),
            remaining: lifetime,
            lifetime,
        }
    }

    /// Seconds left before the particle expires.
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Lifetime assigned at spawn.
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn is_dead(&self) -> bool {
        self.remaining <= 0.0
    }

    fn integrate(&mut self, dt_sec: f32) {
        self.position += self.velocity * dt_sec;
        self.remaining -= dt_sec;
        let alpha = (self.remaining / self.lifetime * 255.0).clamp(0.0, 255.0);
        self.color.a = alpha as u8;
    }
}

/// Live particles, capped at [`MAX_PARTICLES`].
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= MAX_PARTICLES
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Inserts a prepared particle. Returns false when the store is full.
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Emits up to `n` particles around a heart of `heart_size`.
    ///
    /// Spawn points sit on a cheap heart-like radius rather than the true
    /// boundary and are offset to the window-space heart centre. Emission
    /// stops silently at the cap; the number actually added is returned.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        heart_size: f32,
        beat_factor: f32,
        rng: &mut R,
    ) -> usize {
        let origin = screen_origin();
        let mut added = 0;
        while added < n && !self.is_full() {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(SPEED_MIN..=SPEED_MAX);
            let r = heart_size * (EMIT_RADIUS_BASE + EMIT_RADIUS_SWING * angle.sin());
            let (sin, cos) = angle.sin_cos();

            let position = origin + Vec2::new(r * cos, -r * sin / beat_factor);
            let velocity = Vec2::new(cos, sin) * speed;
            let lifetime = rng.gen_range(LIFETIME_MIN..=LIFETIME_MAX);

            let green =
                PARTICLE_GREEN_BASE.saturating_add(rng.gen_range(0..=PARTICLE_GREEN_JITTER));
            let blue =
                PARTICLE_BLUE_BASE.saturating_add(rng.gen_range(0..=PARTICLE_BLUE_JITTER));
            let color = Rgba::new(PARTICLE_RED, green, blue, 255);

            self.particles
                .push(Particle::new(position, velocity, lifetime, color));
            added += 1;
        }
        if added < n {
            log::trace!(
                "particle cap reached: spawned {added}/{n}, {} live",
                self.particles.len()
            );
        }
        added
    }

    /// Integrates every particle by `dt_sec` and drops the expired ones.
    ///
    /// Survivors are compacted in place, so each particle is visited exactly
    /// once regardless of how many are removed. Returns the number removed.
    pub fn advance(&mut self, dt_sec: f32) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.integrate(dt_sec);
            !p.is_dead()
        });
        before - self.particles.len()
    }
}
