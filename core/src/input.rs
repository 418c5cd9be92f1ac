//! Platform input consumed by the cursor manager.

pub mod pointer;

pub use pointer::{PointerEvent, PositionTracker};
