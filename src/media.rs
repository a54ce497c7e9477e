use std::cell::Cell;
use std::ops::{BitOr, RangeBounds};
use std::rc::Rc;

use bitflags::bitflags;

use crate::listener::SizeSpan;

bitflags! {
  #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
  #[must_use]
  pub struct MediaFlags: u8 {
    const MOBILE = 1;
    const TABLET = 2;
    const DESKTOP = 4;
  }
}

/// Coarse device classification derived from viewport width.
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Media {
    Mobile,
    Tablet,
    Desktop,
}

impl Media {
    pub const ALL: [Media; 3] = [Media::Mobile, Media::Tablet, Media::Desktop];

    fn flag(self) -> MediaFlags {
        match self {
            Media::Mobile => MediaFlags::MOBILE,
            Media::Tablet => MediaFlags::TABLET,
            Media::Desktop => MediaFlags::DESKTOP,
        }
    }
}

/// Width cut points in logical pixels
///
/// Classification is gap-free by construction: everything at or below
/// `mobile_max` is mobile, everything at or below `tablet_max` is tablet,
/// the rest is desktop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoints {
    mobile_max: f64,
    tablet_max: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 499.0,
            tablet_max: 799.0,
        }
    }
}

impl Breakpoints {
    /// Custom cut points. `mobile_max` must be below `tablet_max` and both
    /// must be numbers; otherwise the defaults are kept and a warning is
    /// logged.
    pub fn new(mobile_max: f64, tablet_max: f64) -> Self {
        if mobile_max.is_nan() || tablet_max.is_nan() || mobile_max >= tablet_max {
            tracing::warn!(
                mobile_max,
                tablet_max,
                "ignoring unordered breakpoint cut points"
            );
            return Self::default();
        }
        Self {
            mobile_max,
            tablet_max,
        }
    }

    pub fn classify(&self, width: f64) -> Media {
        if width <= self.mobile_max {
            return Media::Mobile;
        }
        if width <= self.tablet_max {
            return Media::Tablet;
        }
        Media::Desktop
    }

    /// The width span a given media occupies under these cut points.
    pub fn span(&self, media: Media) -> SizeSpan {
        match media {
            Media::Mobile => SizeSpan::new(0.0, self.mobile_max),
            Media::Tablet => SizeSpan::new(self.mobile_max.next_up(), self.tablet_max),
            Media::Desktop => SizeSpan::new(self.tablet_max.next_up(), f64::INFINITY),
        }
    }
}

fn next(set: MediaSet) -> MediaSet {
    MediaSet {
        flags: MediaFlags::from_bits(set.flags.bits() * 2).unwrap(),
    }
}

fn prev(set: MediaSet) -> MediaSet {
    MediaSet {
        flags: MediaFlags::from_bits(set.flags.bits() / 2).unwrap(),
    }
}

/// All media between the bounds, inclusive of everything the bound sets
/// already contain.
pub fn range<R: RangeBounds<MediaSet>>(range: R) -> MediaSet {
    let start = match range.start_bound() {
        std::ops::Bound::Included(i) => *i,
        std::ops::Bound::Excluded(e) => next(*e),
        std::ops::Bound::Unbounded => MediaSet::MOBILE,
    };
    let end = match range.end_bound() {
        std::ops::Bound::Included(i) => *i,
        std::ops::Bound::Excluded(e) => prev(*e),
        std::ops::Bound::Unbounded => MediaSet::DESKTOP,
    };
    // First enabled flag from the start and the last from the end, so a set
    // with several flags (e.g. MOBILE|TABLET) passed as a bound still works.
    let lowest_start: MediaFlags = start.flags.iter().next().unwrap();
    let highest_end: MediaFlags = end.flags.iter().last().unwrap();

    let mask = highest_end.bits() - lowest_start.bits();
    // Subtract to get all the flags between the two, then OR to ensure
    // everything in the range is set.
    let result = MediaFlags::from_bits(highest_end.bits() | mask | lowest_start.bits()).unwrap();

    MediaSet { flags: result }
}

/// A set of media classifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaSet {
    flags: MediaFlags,
}

impl MediaSet {
    pub const MOBILE: MediaSet = MediaSet::new(MediaFlags::MOBILE);
    pub const TABLET: MediaSet = MediaSet::new(MediaFlags::TABLET);
    pub const DESKTOP: MediaSet = MediaSet::new(MediaFlags::DESKTOP);

    const fn new(flags: MediaFlags) -> Self {
        Self { flags }
    }

    pub const fn not(set: MediaSet) -> Self {
        let flags = MediaFlags::all().difference(set.flags);
        Self { flags }
    }

    pub fn contains(&self, media: Media) -> bool {
        self.flags.contains(media.flag())
    }

    pub fn media(&self) -> Vec<Media> {
        Media::ALL
            .into_iter()
            .filter(|media| self.contains(*media))
            .collect()
    }

    /// The single width span covering every media in the set, under the
    /// given cut points. Gaps are filled: mobile | desktop spans tablet
    /// widths too. Empty sets have no span.
    pub fn span(&self, breakpoints: &Breakpoints) -> Option<SizeSpan> {
        let lowest = Media::ALL.into_iter().find(|m| self.contains(*m))?;
        let highest = Media::ALL.into_iter().rev().find(|m| self.contains(*m))?;
        Some(SizeSpan::new(
            breakpoints.span(lowest).min(),
            breakpoints.span(highest).max(),
        ))
    }
}

impl From<Media> for MediaSet {
    fn from(media: Media) -> Self {
        Self::new(media.flag())
    }
}

impl BitOr for MediaSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.flags | rhs.flags)
    }
}

/// Cheap clonable view of a registry's current classification, readable
/// from inside listener callbacks while a pass is running.
#[derive(Clone)]
pub struct MediaHandle(pub(crate) Rc<Cell<Media>>);

impl MediaHandle {
    pub fn get(&self) -> Media {
        self.0.get()
    }
}
