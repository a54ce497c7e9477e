use std::cell::Cell;
use std::rc::Rc;

use peniko::kurbo::Size;
use tracing::warn;

use crate::listener::{Axis, SizeCallback, SizeListener, SizeSpan};
use crate::media::{Breakpoints, Media, MediaHandle, MediaSet};

/// A validated registration. Immutable once stored; lives as long as the
/// registry that owns it.
struct Registration {
    axis: Axis,
    sizes: SizeSpan,
    inside: SizeCallback,
    outside: Option<SizeCallback>,
}

/// An ordered registry of size listeners evaluated against the viewport.
///
/// The host environment owns a `Resizer` wherever its composition root
/// lives and forwards resize notifications to [`Resizer::window_resized`].
/// Each notification takes one snapshot of the viewport and walks every
/// registration in insertion order, firing `inside` or `outside` callbacks
/// as the watched dimension enters or leaves each span. Registries are
/// plain values; tests and nested components can own independent ones.
///
/// The registry also tracks the current [`Media`] classification of the
/// viewport width, refreshed at the start of every pass so listener
/// callbacks observe the classification of the pass that invoked them.
pub struct Resizer {
    registrations: Vec<Registration>,
    size: Size,
    media: Rc<Cell<Media>>,
    breakpoints: Breakpoints,
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Resizer {
    pub fn new() -> Self {
        Self::with_breakpoints(Breakpoints::default())
    }

    pub fn with_breakpoints(breakpoints: Breakpoints) -> Self {
        Self {
            registrations: Vec::new(),
            size: Size::ZERO,
            media: Rc::new(Cell::new(breakpoints.classify(0.0))),
            breakpoints,
        }
    }

    /// Append a listener to the registry.
    ///
    /// Incomplete or malformed listeners are dropped with a warning rather
    /// than panicking: a listener needs an `inside` callback and a span
    /// whose bounds are ordered numbers.
    pub fn add_size_listener(&mut self, listener: SizeListener) {
        let SizeListener {
            axis,
            sizes,
            inside,
            outside,
        } = listener;
        let Some(inside) = inside else {
            warn!("no listener added: missing inside callback");
            return;
        };
        let Some(sizes) = sizes else {
            warn!("no listener added: missing sizes");
            return;
        };
        if !sizes.is_well_formed() {
            warn!(%sizes, "no listener added: malformed span");
            return;
        }
        self.registrations.push(Registration {
            axis,
            sizes,
            inside,
            outside,
        });
    }

    /// Append a width listener covering every media in the set, e.g.
    /// tablet-and-up. The listener's axis and span are derived from the
    /// set under this registry's breakpoints; gaps between non-contiguous
    /// media are covered too.
    pub fn add_media_listener(&mut self, media: impl Into<MediaSet>, listener: SizeListener) {
        let media = media.into();
        let Some(span) = media.span(&self.breakpoints) else {
            warn!("no listener added: empty media set");
            return;
        };
        self.add_size_listener(listener.axis(Axis::Width).sizes(span));
    }

    /// Host entry point for resize notifications: stores the new snapshot
    /// and runs an evaluation pass over it.
    pub fn window_resized(&mut self, size: Size) {
        self.size = size;
        self.evaluate(size);
    }

    /// Re-run every listener against the last stored snapshot, e.g. right
    /// after registering listeners for an already-sized viewport.
    pub fn run_listeners(&mut self) {
        self.evaluate(self.size);
    }

    /// One synchronous pass. The snapshot is read once and every callback
    /// in the pass receives the same value; a listener without an
    /// `outside` callback is silent outside its span.
    pub fn evaluate(&mut self, size: Size) {
        self.media.set(self.breakpoints.classify(size.width));
        for registration in &mut self.registrations {
            let value = registration.axis.pick(size);
            if registration.sizes.contains(value) {
                (registration.inside)(size);
            } else if let Some(outside) = registration.outside.as_mut() {
                outside(size);
            }
        }
    }

    /// The last snapshot seen by [`Resizer::window_resized`].
    pub fn size(&self) -> Size {
        self.size
    }

    /// The classification of the most recent pass.
    pub fn media(&self) -> Media {
        self.media.get()
    }

    /// A handle listener closures can capture to read the classification
    /// mid-pass.
    pub fn media_handle(&self) -> MediaHandle {
        MediaHandle(Rc::clone(&self.media))
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
