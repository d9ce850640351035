//! Vedabase AI Explainer — explain Srimad Bhagavatam verse references with
//! the Gemini generative-language API.
//!
//! - `llm` — Gemini wire types, HTTP client, and the `ExplanationSource` seam.
//! - `explainer` — the Explainer View: state, validation, request lifecycle.
//! - `tui` — ratatui presentation and event loop.
//! - `oneshot` — the non-interactive `explain <VERSE>` command.

pub mod explainer;
pub mod llm;
pub mod oneshot;
pub mod tui;
