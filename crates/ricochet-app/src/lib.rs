//! Ricochet Host
//!
//! A headless host for the Ricochet brush: it replays recorded pointer
//! gestures on a fixed tick clock and exports the painted canvas.

pub mod export;
pub mod input;
pub mod scene;
pub mod session;

pub use export::{encode_png, write_png};
pub use input::{PointerAdapter, PointerEvent};
pub use scene::{AppError, AppResult, SceneConfig};
pub use session::{SessionReport, run_scene};
