//! Keeps element class lists in step with the current breakpoint.
//!
//! An element configured with per-media class lists gets one width
//! listener per configured media: entering the media's span adds the
//! listed classes, leaving it removes them again. Removal checks the
//! registry's current classification first so a class that the active
//! media's own list still claims is left alone; without that check an
//! element tagged for both mobile and tablet would have its class
//! stripped by the mobile listener the moment the width crosses into
//! tablet territory.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::element::{ElementId, Elements};
use crate::listener::SizeListener;
use crate::media::Media;
use crate::registry::Resizer;

fn class_list(list: &str) -> SmallVec<[String; 4]> {
    list.split_whitespace().map(str::to_owned).collect()
}

fn claims(list: Option<&str>, class: &str) -> bool {
    list.is_some_and(|list| list.split_whitespace().any(|c| c == class))
}

/// Binds elements from one store to a [`Resizer`].
///
/// Binding is idempotent per element: a second [`ClassSync::bind`] for an
/// already-bound element registers nothing, so hosts can rescan their
/// element set without stacking duplicate listeners.
pub struct ClassSync {
    elements: Rc<RefCell<Elements>>,
    bound: FxHashSet<ElementId>,
}

impl ClassSync {
    pub fn new(elements: Rc<RefCell<Elements>>) -> Self {
        Self {
            elements,
            bound: FxHashSet::default(),
        }
    }

    /// Register width listeners for every media the element carries a
    /// class list for. The set of configured media is read once, here;
    /// the lists themselves are re-read live on every pass.
    pub fn bind(&mut self, resizer: &mut Resizer, id: ElementId) {
        let configured: SmallVec<[Media; 3]> = {
            let elements = self.elements.borrow();
            let Some(element) = elements.get(id) else {
                warn!(?id, "not binding breakpoint classes: unknown element");
                return;
            };
            Media::ALL
                .into_iter()
                .filter(|media| element.breakpoint_class(*media).is_some())
                .collect()
        };
        if !self.bound.insert(id) {
            debug!(?id, "breakpoint classes already bound");
            return;
        }

        let handle = resizer.media_handle();
        for media in configured {
            let elements = Rc::clone(&self.elements);
            let inside = move |_| {
                let mut elements = elements.borrow_mut();
                let Some(element) = elements.get_mut(id) else {
                    return;
                };
                let Some(list) = element.breakpoint_class(media).map(class_list) else {
                    return;
                };
                for class in list {
                    element.add_class(class);
                }
            };

            let elements = Rc::clone(&self.elements);
            let handle = handle.clone();
            let outside = move |_| {
                let mut elements = elements.borrow_mut();
                let Some(element) = elements.get_mut(id) else {
                    return;
                };
                let Some(list) = element.breakpoint_class(media).map(class_list) else {
                    return;
                };
                let active = element.breakpoint_class(handle.get()).map(str::to_owned);
                for class in list {
                    // A competing list for the active media may still want
                    // this class; only strip what nothing claims.
                    if !claims(active.as_deref(), &class) {
                        element.remove_class(&class);
                    }
                }
            };

            resizer.add_media_listener(
                media,
                SizeListener::new().inside(inside).outside(outside),
            );
        }
    }

    /// Bind every element in the store that carries breakpoint classes.
    pub fn bind_all(&mut self, resizer: &mut Resizer) {
        let tagged: Vec<ElementId> = {
            let elements = self.elements.borrow();
            elements
                .ids()
                .filter(|id| {
                    elements
                        .get(*id)
                        .is_some_and(|element| element.has_breakpoint_classes())
                })
                .collect()
        };
        for id in tagged {
            self.bind(resizer, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use peniko::kurbo::Size;

    use super::ClassSync;
    use crate::element::Elements;
    use crate::media::Media;
    use crate::registry::Resizer;

    #[test]
    fn competing_lists_keep_shared_classes() {
        let elements = Elements::new_shared();
        let id = {
            let mut store = elements.borrow_mut();
            let id = store.create();
            let el = store.get_mut(id).unwrap();
            el.set_breakpoint_class(Media::Mobile, "hidden");
            el.set_breakpoint_class(Media::Tablet, "hidden");
            id
        };

        let mut resizer = Resizer::new();
        let mut sync = ClassSync::new(elements.clone());
        sync.bind(&mut resizer, id);

        resizer.window_resized(Size::new(300.0, 600.0));
        assert!(elements.borrow().get(id).unwrap().has_class("hidden"));

        // Tablet still claims the class; the mobile mismatch must not
        // strip it.
        resizer.window_resized(Size::new(600.0, 600.0));
        assert!(elements.borrow().get(id).unwrap().has_class("hidden"));

        resizer.window_resized(Size::new(900.0, 600.0));
        assert!(!elements.borrow().get(id).unwrap().has_class("hidden"));
    }

    #[test]
    fn distinct_lists_swap_with_media() {
        let elements = Elements::new_shared();
        let id = {
            let mut store = elements.borrow_mut();
            let id = store.create();
            let el = store.get_mut(id).unwrap();
            el.set_breakpoint_class(Media::Mobile, "compact stacked");
            el.set_breakpoint_class(Media::Desktop, "wide");
            id
        };

        let mut resizer = Resizer::new();
        let mut sync = ClassSync::new(elements.clone());
        sync.bind(&mut resizer, id);

        resizer.window_resized(Size::new(320.0, 600.0));
        {
            let store = elements.borrow();
            let el = store.get(id).unwrap();
            assert!(el.has_class("compact"));
            assert!(el.has_class("stacked"));
            assert!(!el.has_class("wide"));
        }

        resizer.window_resized(Size::new(1280.0, 600.0));
        {
            let store = elements.borrow();
            let el = store.get(id).unwrap();
            assert!(!el.has_class("compact"));
            assert!(!el.has_class("stacked"));
            assert!(el.has_class("wide"));
        }
    }

    #[test]
    fn rebinding_registers_nothing_new() {
        let elements = Elements::new_shared();
        let id = {
            let mut store = elements.borrow_mut();
            let id = store.create();
            store
                .get_mut(id)
                .unwrap()
                .set_breakpoint_class(Media::Mobile, "hidden");
            id
        };

        let mut resizer = Resizer::new();
        let mut sync = ClassSync::new(elements);
        sync.bind(&mut resizer, id);
        let registered = resizer.len();
        sync.bind(&mut resizer, id);
        assert_eq!(resizer.len(), registered);
    }

    #[test]
    fn bind_all_scans_tagged_elements() {
        let elements = Elements::new_shared();
        {
            let mut store = elements.borrow_mut();
            let tagged = store.create();
            store
                .get_mut(tagged)
                .unwrap()
                .set_breakpoint_class(Media::Mobile, "hidden");
            // Untagged element; the scan must skip it.
            store.create();
        }

        let mut resizer = Resizer::new();
        let mut sync = ClassSync::new(elements);
        sync.bind_all(&mut resizer);
        assert_eq!(resizer.len(), 1);
    }

    #[test]
    fn unknown_element_binds_nothing() {
        let elements = Elements::new_shared();
        let id = {
            let mut store = elements.borrow_mut();
            let id = store.create();
            store.remove(id);
            id
        };

        let mut resizer = Resizer::new();
        let mut sync = ClassSync::new(elements);
        sync.bind(&mut resizer, id);
        assert!(resizer.is_empty());
    }

    #[test]
    fn removed_element_quiets_its_listeners() {
        let elements = Elements::new_shared();
        let id = {
            let mut store = elements.borrow_mut();
            let id = store.create();
            store
                .get_mut(id)
                .unwrap()
                .set_breakpoint_class(Media::Mobile, "hidden");
            id
        };

        let mut resizer = Resizer::new();
        let mut sync = ClassSync::new(elements.clone());
        sync.bind(&mut resizer, id);
        elements.borrow_mut().remove(id);
        resizer.window_resized(Size::new(300.0, 600.0));
        resizer.window_resized(Size::new(900.0, 600.0));
    }
}
