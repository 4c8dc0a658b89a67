//! Simscene library.
//!
//! This module exposes the framework's math types, scene-graph nodes, signal
//! registry, and engine for use in integration tests and as a reusable
//! library. The bundled simulations live in [`sims`].

pub mod engine;
pub mod math;
pub mod scene;
pub mod signal;
pub mod sims;
