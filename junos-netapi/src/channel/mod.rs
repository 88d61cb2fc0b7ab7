//! Channel-level helpers shared by the session implementations.

mod buffer;

pub use buffer::{END_OF_MESSAGE, FrameBuffer};
