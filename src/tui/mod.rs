//! Terminal presentation of the Explainer View.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (`input` key/mouse dispatch, `on_tick`) +
//! View (`layout::draw`). Immediate mode: every frame is drawn from the
//! view's `QueryState`, nothing is retained between frames except the
//! areas used for hit-testing.

pub mod app;
pub mod input;
pub mod input_line;
pub mod layout;
pub mod runner;

pub use runner::run;
