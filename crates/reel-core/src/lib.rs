//! # Reel
//!
//! Reel is the headless half of an infinite-loop, center-weighted horizontal
//! carousel. It owns the bookkeeping and geometry; a host (the browser binding
//! in `reel-web`, or [`headless::HeadlessCarousel`]) owns the platform.
//!
//! ## The loop
//!
//! The original tiles are tripled into `[clones | originals | clones]`
//! ([`sequence::TileSequence`]). The viewport starts on the middle copy and,
//! whenever scrolling drifts into a clone band, the offset is silently moved
//! by one *set width* ([`scroll::LoopScroll`]). The same tile stays on screen,
//! so the strip never ends.
//!
//! ## The controller
//!
//! [`controller::Carousel`] turns events into commands:
//!
//! ```rust
//! use reel_core::*;
//!
//! let mut c = Carousel::new(vec!["a", "b", "c"], Some(1), CarouselConfig::default());
//! let layout = Layout::strip(300.0, &[100.0; 9], 0.0);
//!
//! let r = c.init(layout);
//! assert!(r.commands.contains(&Command::ScrollTo { left: 300.0, smooth: false }));
//! assert_eq!(c.active(), Some(4));
//! ```
//!
//! Hosts apply each [`controller::Command`] in order and report scroll
//! offsets, animation frames and settle timers back. Nothing in this crate
//! reads a clock except the headless host, so every handler is a plain
//! function of (state, event).
//!
//! ## Modes
//!
//! [`config::CarouselMode::Snap`] moves one tile per wheel gesture and snaps
//! drags to the nearest tile; [`config::CarouselMode::Scale`] scrolls freely
//! and scales tiles by their distance from the center.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`config::CarouselConfig`],
//!   durations as milliseconds. The headless demo enables it, so a workspace
//!   `cargo test` covers the JSON form.

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod input;
pub mod scroll;
pub mod sequence;
pub mod task;
pub mod tests;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use sequence::*;
pub use task::*;
