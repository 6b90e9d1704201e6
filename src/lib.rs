//! Air painter: paint on a live camera feed with a tracked fingertip.
//!
//! A pinch (index and middle fingertip close together) toggles between moving
//! and drawing. The library holds the drawing engine and its collaborators;
//! camera capture and the window live in the binary.
//!
//! # Modules
//!
//! - [`smoothing`] - moving-average fingertip smoother
//! - [`gesture`] - pinch classification
//! - [`tools`] - tools, palette and width ladder
//! - [`painter`] - the drawing state machine (owns the canvas)
//! - [`compositor`] - paint-over-video compositing
//! - [`toolbar`] - toolbar band, hit-testing and debounce
//! - [`session`] - per-frame wiring of all of the above
//! - [`export`] - PNG export of the canvas

pub mod canvas;
pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod gesture;
pub mod hud;
pub mod painter;
pub mod raster;
pub mod session;
pub mod smoothing;
pub mod toolbar;
pub mod tools;
pub mod tracker;
pub mod types;

pub use config::PainterConfig;
pub use error::Error;
pub use gesture::HandInput;
pub use session::{FrameReport, PaintSession};
pub use types::{Color, FrameBuffer, Point};
