// Typing playground: type into the window, hover it, and every visible
// character blooms into a soft white circle.
//
// Core (no window needed): `sampler` turns text into anchor points,
// `circles` animates one circle per anchor, `animation` ties both to the
// frame loop and the hover flag. The rest is the desktop host around it.

pub mod animation;
pub mod circles;
pub mod config;
pub mod draw;
pub mod error;
pub mod fade;
pub mod gamma;
pub mod pattern;
pub mod sampler;
pub mod types;
pub mod typing;

pub use animation::{FrameLoop, Playground};
pub use circles::{Circle, CircleField};
pub use error::Error;
pub use types::{FrameBuffer, Point, Rgba, Surface, TextStyle};
