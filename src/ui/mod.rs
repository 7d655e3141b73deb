//! Presentation-layer helpers for the CLI: semantic theme and the run
//! progress bar. Pure styling; nothing in here touches the engine.

pub mod progress;
pub mod theme;
