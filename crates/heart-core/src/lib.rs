pub mod color;
pub mod constants;
pub mod frame;
pub mod heart;
pub mod particles;
pub mod pulse;
pub static HEART_WGSL: &str = include_str!("../shaders/heart.wgsl");

pub use color::*;
pub use constants::*;
pub use frame::*;
pub use heart::*;
pub use particles::*;
pub use pulse::*;
