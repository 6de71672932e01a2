//! Canvas2D rendering of the frame snapshot
//!
//! Reads the simulation state immutably; never mutates or calls back into it.

pub mod canvas;

pub use canvas::CanvasRenderer;
