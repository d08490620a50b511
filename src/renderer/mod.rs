//! Rendering module
//!
//! `scene` builds a draw list from a `RenderFrame`; `canvas` paints it in the
//! browser with the Canvas 2D API.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{DrawCmd, TextAlign, build_scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
