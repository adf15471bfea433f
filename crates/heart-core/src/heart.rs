//! Heart-shaped region and its outline.
//!
//! The heart is the implicit curve `(x² + y² - 1)³ - x²·y³ = 0` scaled by a
//! size parameter. The outline is found numerically: for each sample angle a
//! ray is marched outward from the origin in fixed steps until it leaves the
//! region. The result is faceted at the scale of [`SCAN_STEP`], which is
//! acceptable for a filled silhouette.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::color::Rgba;
use crate::constants::{OUTLINE_POINTS, SCAN_RANGE_FACTOR, SCAN_STEP};

/// One vertex of the outline fan. Layout matches the native vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineVertex {
    pub position: Vec2,
    pub color: Rgba,
}

/// Returns true when `(x, y)` lies inside the heart of the given `size`.
#[inline]
pub fn inside(x: f32, y: f32, size: f32) -> bool {
    let nx = x / size;
    let ny = y / size;
    let s = nx * nx + ny * ny - 1.0;
    s * s * s - nx * nx * ny * ny * ny <= 0.0
}

/// Largest scanned radius along `angle` before the ray first leaves the
/// region. Zero if the ray never enters it.
fn boundary_radius(angle: f32, size: f32, beat_factor: f32) -> f32 {
    let (sin, cos) = angle.sin_cos();
    let limit = size * SCAN_RANGE_FACTOR;
    let mut r = 0.0;
    let mut test_r = 0.0;
    while test_r < limit {
        if inside(test_r * cos, test_r * sin * beat_factor, size) {
            r = test_r;
        } else if r > 0.0 {
            break;
        }
        test_r += SCAN_STEP;
    }
    r
}

/// Samples the heart outline as a triangle fan around the origin.
///
/// The first vertex is the origin; it is followed by `OUTLINE_POINTS + 1`
/// boundary samples over `[0, 2π]`, so the last sample closes the loop onto
/// the first. `beat_factor` scales y during the scan and the emitted y is
/// divided by it again, so the net effect is a vertical squash of roughly
/// `1 / beat_factor²`: the heart flattens when the factor exceeds 1. Y points
/// down, as in window coordinates.
pub fn sample_outline(size: f32, beat_factor: f32, color: Rgba) -> Vec<OutlineVertex> {
    let mut vertices = Vec::with_capacity(OUTLINE_POINTS + 2);
    vertices.push(OutlineVertex {
        position: Vec2::ZERO,
        color,
    });
    for i in 0..=OUTLINE_POINTS {
        let angle = (i as f32 / OUTLINE_POINTS as f32) * TAU;
        let r = boundary_radius(angle, size, beat_factor);
        let (sin, cos) = angle.sin_cos();
        vertices.push(OutlineVertex {
            position: Vec2::new(r * cos, -r * sin / beat_factor),
            color,
        });
    }
    vertices
}

/// Triangle-list indices equivalent to a fan over `vertex_count` vertices.
///
/// `vertex_count` must fit 16-bit indices.
pub fn fan_indices(vertex_count: usize) -> Vec<u16> {
    debug_assert!(
        vertex_count <= u16::MAX as usize + 1,
        "fan of {vertex_count} vertices overflows u16 indices"
    );
    if vertex_count < 3 {
        return Vec::new();
    }
    (1..vertex_count - 1)
        .flat_map(|i| [0, i as u16, (i + 1) as u16])
        .collect()
}
