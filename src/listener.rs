use std::fmt;
use std::ops::{Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};

use peniko::kurbo::Size;

/// Which viewport dimension a listener watches.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Width,
    Height,
}

impl Axis {
    pub(crate) fn pick(self, size: Size) -> f64 {
        match self {
            Axis::Width => size.width,
            Axis::Height => size.height,
        }
    }
}

/// A closed interval of logical pixels along one axis.
///
/// Spans cover non-negative sizes only: an unbounded minimum collapses to
/// `0.0` and an unbounded maximum is `f64::INFINITY`, so a bare number
/// behaves as "this size and up".
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeSpan {
    min: f64,
    max: f64,
}

impl SizeSpan {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// A span is usable when both bounds are numbers and they are ordered.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.min.is_nan() && !self.max.is_nan() && self.min <= self.max
    }

    fn from_range_bounds<R: RangeBounds<f64>>(range: R) -> Self {
        let min = match range.start_bound() {
            Bound::Included(min) => *min,
            Bound::Excluded(min) => min.next_up(),
            Bound::Unbounded => 0.0,
        };
        let max = match range.end_bound() {
            Bound::Included(max) => *max,
            Bound::Excluded(max) => max.next_down(),
            Bound::Unbounded => f64::INFINITY,
        };
        Self { min, max }
    }
}

impl fmt::Display for SizeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.max == f64::INFINITY {
            write!(f, "{}..", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

impl From<f64> for SizeSpan {
    fn from(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }
}

impl From<[f64; 2]> for SizeSpan {
    fn from([min, max]: [f64; 2]) -> Self {
        Self { min, max }
    }
}

impl From<(f64, f64)> for SizeSpan {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Range<f64>> for SizeSpan {
    fn from(range: Range<f64>) -> Self {
        Self::from_range_bounds(range)
    }
}

impl From<RangeInclusive<f64>> for SizeSpan {
    fn from(range: RangeInclusive<f64>) -> Self {
        Self::from_range_bounds(range)
    }
}

impl From<RangeFrom<f64>> for SizeSpan {
    fn from(range: RangeFrom<f64>) -> Self {
        Self::from_range_bounds(range)
    }
}

impl From<RangeToInclusive<f64>> for SizeSpan {
    fn from(range: RangeToInclusive<f64>) -> Self {
        Self::from_range_bounds(range)
    }
}

impl From<RangeFull> for SizeSpan {
    fn from(range: RangeFull) -> Self {
        Self::from_range_bounds(range)
    }
}

pub(crate) type SizeCallback = Box<dyn FnMut(Size)>;

/// Builder for one size-listener registration.
///
/// A listener watches one axis of the viewport and fires its `inside`
/// callback whenever an evaluation pass sees a value within the span, and
/// its `outside` callback otherwise. Both callbacks receive the viewport
/// snapshot of the pass that invoked them. Anything else a callback needs
/// (an element id, shared state) is captured by its closure at
/// registration time.
///
/// ```
/// use resizer::{Resizer, SizeListener};
/// use resizer::kurbo::Size;
///
/// let mut resizer = Resizer::new();
/// resizer.add_size_listener(
///     SizeListener::new()
///         .sizes(0.0..=768.0)
///         .inside(|size: Size| println!("narrow: {size:?}"))
///         .outside(|size: Size| println!("wide: {size:?}")),
/// );
/// resizer.window_resized(Size::new(640.0, 480.0));
/// ```
#[derive(Default)]
pub struct SizeListener {
    pub(crate) axis: Axis,
    pub(crate) sizes: Option<SizeSpan>,
    pub(crate) inside: Option<SizeCallback>,
    pub(crate) outside: Option<SizeCallback>,
}

impl SizeListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch width or height. Width if never called.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// The span to watch. Accepts a bare minimum (`768.0`), a pair, or a
    /// range (`0.0..=768.0`).
    pub fn sizes(mut self, sizes: impl Into<SizeSpan>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    /// Callback for passes whose value falls within the span. Required.
    pub fn inside(mut self, inside: impl FnMut(Size) + 'static) -> Self {
        self.inside = Some(Box::new(inside));
        self
    }

    /// Callback for passes whose value falls outside the span. Optional;
    /// a listener without one simply stays quiet outside its span.
    pub fn outside(mut self, outside: impl FnMut(Size) + 'static) -> Self {
        self.outside = Some(Box::new(outside));
        self
    }
}

impl fmt::Debug for SizeListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeListener")
            .field("axis", &self.axis)
            .field("sizes", &self.sizes)
            .field("inside", &self.inside.is_some())
            .field("outside", &self.outside.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, SizeSpan};
    use peniko::kurbo::Size;

    #[test]
    fn bare_minimum_is_unbounded_above() {
        let span = SizeSpan::from(768.0);
        assert!(!span.contains(767.9));
        assert!(span.contains(768.0));
        assert!(span.contains(f64::MAX));
    }

    #[test]
    fn pair_forms() {
        assert_eq!(SizeSpan::from([0.0, 499.0]), SizeSpan::new(0.0, 499.0));
        assert_eq!(SizeSpan::from((500.0, 799.0)), SizeSpan::new(500.0, 799.0));
    }

    #[test]
    fn inclusive_range() {
        let span = SizeSpan::from(0.0..=499.0);
        assert!(span.contains(499.0));
        assert!(!span.contains(499.5));
    }

    #[test]
    fn exclusive_end_stays_below() {
        let span = SizeSpan::from(0.0..500.0);
        assert!(span.contains(499.0));
        assert!(!span.contains(500.0));
        assert!(span.contains(500.0_f64.next_down()));
    }

    #[test]
    fn full_range_contains_everything() {
        let span = SizeSpan::from(..);
        assert!(span.contains(0.0));
        assert!(span.contains(1e9));
    }

    #[test]
    fn malformed_spans() {
        assert!(!SizeSpan::new(f64::NAN, 10.0).is_well_formed());
        assert!(!SizeSpan::new(0.0, f64::NAN).is_well_formed());
        assert!(!SizeSpan::new(10.0, 0.0).is_well_formed());
        assert!(SizeSpan::new(10.0, 10.0).is_well_formed());
    }

    #[test]
    fn axis_picks_its_dimension() {
        let size = Size::new(1024.0, 768.0);
        assert_eq!(Axis::Width.pick(size), 1024.0);
        assert_eq!(Axis::Height.pick(size), 768.0);
    }
}
