//! Identity types shared between the core and the world that owns it.
//!
//! The core never owns positions or observers; it stores these `Copy` handles
//! and asks the world about them through [`crate::env`].
mod common;

pub use common::{ObserverId, Position};
