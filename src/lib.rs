//! Real-time electrostatic field of draggable point charges, drawn either as
//! a grid of fixed-length colored arrows or as traced field lines.
//!
//! Everything here is pure Rust and target independent. Drawing goes through
//! [`surface::Surface`]; the browser front end lives in the binary.

pub mod color;
pub mod config;
pub mod field;
pub mod frame;
pub mod glyph;
pub mod grid;
pub mod interaction;
pub mod seed;
pub mod stream;
pub mod surface;

pub use config::{ConfigError, FieldConfig, Integrator, InteractionConfig};
pub use field::{Charge, ChargeSet, field_at, magnitude};
pub use frame::{FrameReport, Hud, run_frame};
pub use interaction::{Button, InputEvent, Key, Session, VisualizationMode};
pub use surface::Surface;
