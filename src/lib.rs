//! Animated phasor diagrams rendered into a pixel buffer and shown in a terminal.
//!
//! The core is [`math`] (quadrant resolution), [`phasor`] (per-phasor model
//! and drawing) and [`sketch`] (frame rendering for a whole set). The
//! remaining modules host it: [`phasor_set`] and [`widget`] play the editing
//! UI, [`terminal`] is the drawing surface's container.

pub mod color;
pub mod error;
pub mod graphics;
pub mod math;
pub mod phasor;
pub mod phasor_set;
pub mod sketch;
pub mod state;
pub mod terminal;
pub mod widget;

pub use color::Color;
pub use error::PhasorError;
pub use graphics::Canvas;
pub use phasor::{Phasor, PhasorConfig, PhasorProps};
pub use phasor_set::PhasorSet;
pub use sketch::PhasorSketch;
