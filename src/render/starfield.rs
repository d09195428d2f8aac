//! Background decoration
//!
//! Pure functions of the frame counter. Nothing here touches gameplay state.

use glam::Vec2;

pub const STAR_COUNT: u32 = 40;

/// Star positions for a frame. Stars wrap across a band 50 units wider than
/// the playfield on each side so they enter and leave off-screen.
pub fn stars(frame: u64, playfield: Vec2) -> impl Iterator<Item = Vec2> {
    let wrap = (playfield.x + 100.0).max(1.0) as u64;
    let height = playfield.y.max(1.0) as u64;
    (0..STAR_COUNT as u64).map(move |i| {
        let layer_speed = i % 3 + 1;
        let x = (i * 1234 + frame.wrapping_mul(layer_speed)) % wrap;
        let y = (i * 5678) % height;
        Vec2::new(x as f32 - 50.0, y as f32)
    })
}

/// Per-vertex radius scale for an asteroid outline, in [0.8, 1.0]
pub fn outline_jitter(obstacle_id: u32, vertex: u32) -> f32 {
    // Integer hash keeps outlines stable across frames
    let mut h = obstacle_id.wrapping_mul(0x9E37_79B9) ^ vertex.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    0.8 + (h % 1000) as f32 / 999.0 * 0.2
}
