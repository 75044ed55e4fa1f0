//! Node-graph canvas for the pipeline editor.
//!
//! # Architecture
//!
//! ```text
//! Pipeline (canonical state, owned by the app)
//!        │
//!        ▼
//! PipelineCanvas::ui (allocate_painter + input)
//!        │
//!        ├──► geometry (card sizes, analytic port anchors)
//!        ├──► edges (cubic bezier routing, hit testing)
//!        ├──► render (grid, cards, connections, preview)
//!        │
//!        └──► Vec<CanvasEvent> (back to the app, which mutates the store)
//! ```
//!
//! The canvas never mutates the pipeline directly. Every gesture that
//! should change state is reported upward as a [`CanvasEvent`].

pub mod camera;
pub mod canvas;
pub mod colors;
pub mod edges;
pub mod geometry;
pub mod interaction;
pub mod render;

pub use camera::Camera;
pub use canvas::PipelineCanvas;
pub use interaction::{CanvasEvent, Interaction, PortRef};
