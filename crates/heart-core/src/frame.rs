//! Per-frame driver: pulse, outline, particles, and the hand-off to a renderer.
//!
//! All mutable state lives in [`Scene`]; [`Scene::tick`] is the whole frame
//! step and needs no window, so tests can drive it directly. The traits here
//! are the narrow contracts a frontend implements to host the scene.

use glam::Vec2;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::color::Rgba;
use crate::constants::{
    screen_origin, CLEAR_COLOR, HEART_COLOR, PARTICLE_RADIUS, SPAWN_PER_FRAME,
};
use crate::heart::{sample_outline, OutlineVertex};
use crate::particles::ParticleStore;
use crate::pulse::Pulse;

/// Signals delivered by the host's event system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    CloseRequested,
    /// Anything the scene does not react to.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Running,
    Closed,
}

/// Filled circle in window coordinates. Layout matches the native instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, Default)]
pub struct RenderFrame {
    pub clear_color: Rgba,
    /// Triangle fan, first vertex is the fan origin.
    pub outline: Vec<OutlineVertex>,
    /// Offset applied to every outline vertex.
    pub translation: Vec2,
    pub circles: Vec<Circle>,
}

/// Host display surface.
pub trait Renderer {
    type Error;

    /// Draws `frame` and presents it.
    fn present(&mut self, frame: &RenderFrame) -> Result<(), Self::Error>;
}

/// Host event queue.
pub trait EventSource {
    /// Appends every pending event to `out`.
    fn poll_events(&mut self, out: &mut Vec<FrameEvent>);
}

/// Elapsed time between frames.
pub trait Clock {
    /// Time since the previous call (or since creation for the first call).
    fn delta(&mut self) -> Duration;
}

/// Wall clock backed by a monotonic instant.
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }
}

/// Clock that advances by the same step every frame.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    pub step: Duration,
}

impl FixedClock {
    pub fn from_fps(fps: u32) -> Self {
        Self {
            step: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> Duration {
        self.step
    }
}

pub struct Scene {
    pub pulse: Pulse,
    pub particles: ParticleStore,
    rng: StdRng,
    state: DriverState,
    frames: u64,
}

impl Scene {
    /// Scene with a reproducible random stream.
    pub fn new(seed: u64) -> Self {
        log::debug!("[scene] seeded with {seed}");
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pulse: Pulse::default(),
            particles: ParticleStore::new(),
            rng,
            state: DriverState::Running,
            frames: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Number of frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn close(&mut self) {
        if self.state == DriverState::Running {
            log::info!("[scene] close requested after {} frames", self.frames);
            self.state = DriverState::Closed;
        }
    }

    /// Advances the scene by `dt` and returns the frame to draw.
    ///
    /// Returns `None` once closed: either already, or because `events`
    /// contains [`FrameEvent::CloseRequested`].
    pub fn tick<I>(&mut self, dt: Duration, events: I) -> Option<RenderFrame>
    where
        I: IntoIterator<Item = FrameEvent>,
    {
        if !self.is_running() {
            return None;
        }
        if events
            .into_iter()
            .any(|ev| ev == FrameEvent::CloseRequested)
        {
            self.close();
            return None;
        }

        let dt_sec = dt.as_secs_f32();
        self.pulse.advance(dt_sec);
        let beat_factor = self.pulse.beat_factor();
        let heart_size = self.pulse.heart_size();

        let outline = sample_outline(heart_size, beat_factor, HEART_COLOR);

        self.particles
            .spawn(SPAWN_PER_FRAME, heart_size, beat_factor, &mut self.rng);
        self.particles.advance(dt_sec);

        let circles = self
            .particles
            .iter()
            .map(|p| Circle {
                center: p.position,
                radius: PARTICLE_RADIUS,
                color: p.color,
            })
            .collect();

        self.frames += 1;
        Some(RenderFrame {
            clear_color: CLEAR_COLOR,
            outline,
            translation: screen_origin(),
            circles,
        })
    }
}

/// Couples a scene with its clock and feeds frames to a renderer.
pub struct FrameDriver<C: Clock> {
    pub scene: Scene,
    pub clock: C,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(scene: Scene, clock: C) -> Self {
        Self { scene, clock }
    }

    /// Closes the scene immediately, without ticking or presenting.
    ///
    /// For hosts whose close signal arrives outside the redraw cycle.
    pub fn close(&mut self) -> DriverState {
        self.scene.close();
        self.scene.state()
    }

    /// Runs one frame. Nothing is presented once the scene is closed.
    pub fn step<I, R>(&mut self, events: I, renderer: &mut R) -> Result<DriverState, R::Error>
    where
        I: IntoIterator<Item = FrameEvent>,
        R: Renderer,
    {
        let dt = self.clock.delta();
        if let Some(frame) = self.scene.tick(dt, events) {
            renderer.present(&frame)?;
        }
        Ok(self.scene.state())
    }
}

/// Steps `driver` until the scene closes. Returns the number of frames presented.
pub fn run<C, E, R>(
    driver: &mut FrameDriver<C>,
    source: &mut E,
    renderer: &mut R,
) -> Result<u64, R::Error>
where
    C: Clock,
    E: EventSource,
    R: Renderer,
{
    let mut events = Vec::new();
    let mut presented = 0;
    while driver.scene.is_running() {
        events.clear();
        source.poll_events(&mut events);
        if driver.step(events.drain(..), renderer)? == DriverState::Running {
            presented += 1;
        }
    }
    Ok(presented)
}
