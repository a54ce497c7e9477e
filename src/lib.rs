//! # Resizer
//! Resizer is a viewport size-listener registry. It keeps an ordered list of
//! registrations, each watching one axis of the viewport over a span of
//! logical pixels, and evaluates all of them synchronously whenever the host
//! reports a resize.
//!
//! ## Example: responsive callbacks
//! ```rust
//! use resizer::prelude::*;
//!
//! let mut resizer = Resizer::new();
//!
//! resizer.add_size_listener(
//!     SizeListener::new()
//!         .sizes(0.0..=768.0)
//!         .inside(|_| println!("compact layout"))
//!         .outside(|_| println!("full layout")),
//! );
//!
//! // Forwarded by the host's resize handler.
//! resizer.window_resized(Size::new(1024.0, 768.0));
//! assert_eq!(resizer.media(), Media::Desktop);
//! ```
//!
//! The building blocks:
//!
//! - Registration: [`SizeListener`] describes an axis, a span, an `inside`
//!   callback for passes whose value falls within the span, and an optional
//!   `outside` callback for the rest. Incomplete registrations are logged
//!   and dropped, never panicked on.
//! - Evaluation: [`Resizer::window_resized`] snapshots the viewport once
//!   and walks every registration in insertion order against it.
//! - Classification: every pass also classifies the width into a coarse
//!   [`Media`] (mobile, tablet, desktop) with configurable [`Breakpoints`].
//!   [`MediaSet`] composes media into width spans for listeners that watch
//!   several at once.
//! - Class sync: [`ClassSync`] binds elements carrying per-media class
//!   lists to a registry, adding and removing classes as the width moves
//!   between breakpoints without stripping a class the active breakpoint
//!   still claims.
//!
//! Registries are plain values owned by the host's composition root; there
//! is no ambient global, so tests and nested components can run their own.

pub mod element;
pub mod listener;
pub mod media;
pub mod registry;
pub mod sync;

pub use element::{ElementId, ElementState, Elements};
pub use listener::{Axis, SizeListener, SizeSpan};
pub use media::{Breakpoints, Media, MediaHandle, MediaSet};
pub use peniko::kurbo;
pub use registry::Resizer;
pub use sync::ClassSync;

pub mod prelude {
    pub use crate::element::{ElementId, Elements};
    pub use crate::listener::{Axis, SizeListener, SizeSpan};
    pub use crate::media::{Breakpoints, Media, MediaSet};
    pub use crate::registry::Resizer;
    pub use crate::sync::ClassSync;
    pub use peniko::kurbo::Size;
}
