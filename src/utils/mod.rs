//! Utility data structures.
//!
//! Provides:
//! - [`RingBuffer`] - Fixed-capacity circular buffer with O(1) push

mod ring_buffer;

pub use ring_buffer::RingBuffer;
