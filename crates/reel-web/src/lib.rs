//! Browser binding for `reel-core`.
//!
//! On `wasm32` this mounts the carousel on `#workScroller` (see
//! [`reel_core::Hooks`] for every class and attribute it touches). The DOM
//! string conventions in [`dom`] build everywhere so they can be tested
//! natively.

pub mod dom;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::*;
