use glam::Vec2;

use crate::color::Rgba;

// Shared visual tuning constants used by the core and the native frontend.

// Window
pub const WINDOW_TITLE: &str = "跳动的粉色爱心";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const TARGET_FPS: u32 = 60;

// Scene layout
pub const SCREEN_ORIGIN: [f32; 2] = [400.0, 300.0]; // heart centre in window pixels
pub const CLEAR_COLOR: Rgba = Rgba::new(30, 30, 30, 255);
pub const HEART_COLOR: Rgba = Rgba::new(255, 105, 180, 255);

// Heart pulse
pub const BASE_SIZE: f32 = 100.0;
pub const PULSE_RATE: f32 = 4.0; // radians of phase per second
pub const BEAT_AMPLITUDE: f32 = 0.1; // vertical squash swing
pub const SIZE_AMPLITUDE: f32 = 0.05; // overall size swing

// Outline sampling
pub const OUTLINE_POINTS: usize = 100;
pub const SCAN_STEP: f32 = 0.5; // radial scan resolution
pub const SCAN_RANGE_FACTOR: f32 = 3.0; // scan out to this multiple of the heart size

// Particle emission
pub const MAX_PARTICLES: usize = 500;
pub const SPAWN_PER_FRAME: usize = 5;
pub const SPEED_MIN: f32 = 20.0;
pub const SPEED_MAX: f32 = 50.0;
pub const LIFETIME_MIN: f32 = 1.0;
pub const LIFETIME_MAX: f32 = 3.0;
pub const EMIT_RADIUS_BASE: f32 = 0.9;
pub const EMIT_RADIUS_SWING: f32 = 0.2;

// Particle colour: fixed red, jittered green/blue
pub const PARTICLE_RED: u8 = 255;
pub const PARTICLE_GREEN_BASE: u8 = 105;
pub const PARTICLE_GREEN_JITTER: u8 = 50;
pub const PARTICLE_BLUE_BASE: u8 = 180;
pub const PARTICLE_BLUE_JITTER: u8 = 75;

// Drawing
pub const PARTICLE_RADIUS: f32 = 2.0;

#[inline]
pub fn screen_origin() -> Vec2 {
    Vec2::from(SCREEN_ORIGIN)
}
