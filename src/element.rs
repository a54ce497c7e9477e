//! # `ElementId`s
//!
//! [`ElementId`]s are small stable identifiers for the elements whose
//! class lists the sync layer mutates. The store is a plain value owned
//! by the host (shared into listener closures behind `Rc<RefCell<..>>`),
//! so independent stores can coexist, one per registry under test.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::media::Media;

new_key_type! {
    /// A small unique identifier for an element in an [`Elements`] store.
    ///
    /// Ids handed to listener closures may outlive their element; lookups
    /// through a stale id return `None` and the closures fall silent.
    pub struct ElementId;
}

/// Per-element state: the live class list plus the configured
/// per-media class lists (the `mobile-class` / `tablet-class` /
/// `desktop-class` attribute contract, space-separated).
#[derive(Default, Debug)]
pub struct ElementState {
    classes: IndexSet<String>,
    breakpoint_classes: FxHashMap<Media, String>,
}

impl ElementState {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Live classes in the order they were added.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.insert(class.into());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    /// The configured class list for one media, if any.
    pub fn breakpoint_class(&self, media: Media) -> Option<&str> {
        self.breakpoint_classes.get(&media).map(String::as_str)
    }

    pub fn set_breakpoint_class(&mut self, media: Media, classes: impl Into<String>) {
        self.breakpoint_classes.insert(media, classes.into());
    }

    pub(crate) fn has_breakpoint_classes(&self) -> bool {
        !self.breakpoint_classes.is_empty()
    }
}

/// An instance-owned store of elements.
#[derive(Default, Debug)]
pub struct Elements {
    elements: SlotMap<ElementId, ElementState>,
}

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh store already wrapped for sharing into listener closures.
    pub fn new_shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn create(&mut self) -> ElementId {
        self.elements.insert(ElementState::default())
    }

    pub fn remove(&mut self, id: ElementId) {
        self.elements.remove(id);
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementState> {
        self.elements.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::Elements;
    use crate::media::Media;

    #[test]
    fn class_list_keeps_insertion_order() {
        let mut elements = Elements::new();
        let id = elements.create();
        let el = elements.get_mut(id).unwrap();
        el.add_class("nav");
        el.add_class("hidden");
        el.add_class("nav");
        assert_eq!(el.classes().collect::<Vec<_>>(), vec!["nav", "hidden"]);

        el.remove_class("nav");
        assert_eq!(el.classes().collect::<Vec<_>>(), vec!["hidden"]);
    }

    #[test]
    fn stale_ids_resolve_to_none() {
        let mut elements = Elements::new();
        let id = elements.create();
        elements.remove(id);
        assert!(!elements.contains(id));
        assert!(elements.get(id).is_none());
    }

    #[test]
    fn breakpoint_classes_per_media() {
        let mut elements = Elements::new();
        let id = elements.create();
        let el = elements.get_mut(id).unwrap();
        el.set_breakpoint_class(Media::Mobile, "hidden compact");
        assert_eq!(el.breakpoint_class(Media::Mobile), Some("hidden compact"));
        assert_eq!(el.breakpoint_class(Media::Desktop), None);
    }
}
