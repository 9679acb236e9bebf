//! Bounded numeric stepping for number fields.
//!
//! The stepper never fails: unparseable input counts as zero and absent
//! bounds are unbounded. A value that is already out of range in the
//! direction of travel snaps straight to the violated bound instead of
//! stepping.

use navkit_types::StepDirection;
use navkit_util::numeric::{format_decimal, parse_decimal_or_zero};
use tracing::trace;

/// Step size used when a field does not declare one.
pub const DEFAULT_STEP: f64 = 1.0;

/// A single increment/decrement request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRequest<'a> {
    pub current_value: &'a str,
    pub step: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub direction: StepDirection,
}

impl<'a> StepRequest<'a> {
    pub fn new(current_value: &'a str, direction: StepDirection) -> Self {
        Self {
            current_value,
            step: DEFAULT_STEP,
            min: None,
            max: None,
            direction,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Runs the request; see [`step`].
    pub fn next_value(&self) -> String {
        step(self.current_value, self.step, self.min, self.max, self.direction)
    }
}

/// Clamps `value` into `[min, max]`.
///
/// With inverted bounds (`min > max`) the result is `max`: the lower bound is
/// applied first, then the upper bound.
pub fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let lower = min.map_or(value, |min| value.max(min));
    max.map_or(lower, |max| lower.min(max))
}

/// Computes the next numeric value for an increment or decrement.
///
/// A step that is not positive (including NaN) is replaced by
/// [`DEFAULT_STEP`], so increments never lower the value.
pub fn step_value(current: f64, step: f64, min: Option<f64>, max: Option<f64>, direction: StepDirection) -> f64 {
    let step = if step > 0.0 { step } else { DEFAULT_STEP };
    let snapped = match direction {
        StepDirection::Increment => min.filter(|min| current < *min),
        StepDirection::Decrement => max.filter(|max| current > *max),
    };
    let next = snapped.unwrap_or(current + direction.sign() * step);
    clamp(next, min, max)
}

/// Textual stepper used by number fields.
///
/// ```
/// use navkit_engine::stepper::step;
/// use navkit_types::StepDirection;
///
/// assert_eq!(step("1.25", 0.5, None, None, StepDirection::Increment), "1.75");
/// ```
pub fn step(current_value: &str, step: f64, min: Option<f64>, max: Option<f64>, direction: StepDirection) -> String {
    let current = parse_decimal_or_zero(current_value);
    let next = step_value(current, step, min, max, direction);
    trace!(current, next, ?direction, "stepped numeric value");
    format_decimal(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use StepDirection::{Decrement, Increment};

    #[test]
    fn increments_and_decrements_by_one() {
        assert_eq!(step("3", 1.0, None, None, Increment), "4");
        assert_eq!(step("3", 1.0, None, None, Decrement), "2");
    }

    #[test]
    fn empty_value_counts_as_zero() {
        assert_eq!(step("", 1.0, None, None, Increment), "1");
        assert_eq!(step("", 1.0, None, None, Decrement), "-1");
    }

    #[test]
    fn garbage_counts_as_zero() {
        assert_eq!(step("twelve", 1.0, None, None, Increment), "1");
        assert_eq!(step("inf", 1.0, None, None, Increment), "1");
    }

    #[test]
    fn non_positive_steps_use_the_default() {
        assert_eq!(step("3", -1.0, None, None, Increment), "4");
        assert_eq!(step("3", 0.0, None, None, Decrement), "2");
        assert_eq!(step("3", f64::NAN, None, None, Increment), "4");
    }

    #[test]
    fn honours_fractional_steps() {
        assert_eq!(step("1.25", 0.5, None, None, Increment), "1.75");
        assert_eq!(step("1.25", 0.5, None, None, Decrement), "0.75");
    }

    #[test]
    fn respects_a_min_value() {
        assert_eq!(step("2", 1.0, Some(2.0), None, Decrement), "2");
        assert_eq!(step("2", 1.0, Some(2.0), None, Increment), "3");
    }

    #[test]
    fn respects_a_max_value() {
        assert_eq!(step("2", 1.0, None, Some(2.0), Increment), "2");
        assert_eq!(step("2", 1.0, None, Some(2.0), Decrement), "1");
    }

    #[test]
    fn brings_an_invalid_value_up_to_the_min() {
        assert_eq!(step("-1", 1.0, Some(2.0), None, Increment), "2");
        assert_eq!(step("-1", 1.0, Some(2.0), None, Decrement), "2");
    }

    #[test]
    fn brings_an_invalid_value_down_to_the_max() {
        assert_eq!(step("12", 1.0, None, Some(2.0), Increment), "2");
        assert_eq!(step("12", 1.0, None, Some(2.0), Decrement), "2");
    }

    #[test]
    fn clamps_overshoot_inside_bounds() {
        assert_eq!(step("9.5", 1.0, Some(0.0), Some(10.0), Increment), "10");
        assert_eq!(step("0.5", 1.0, Some(0.0), Some(10.0), Decrement), "0");
    }

    #[test]
    fn inverted_bounds_resolve_to_max() {
        assert_eq!(step("0", 1.0, Some(5.0), Some(1.0), Increment), "1");
        assert_eq!(step("3", 1.0, Some(5.0), Some(1.0), Decrement), "1");
        assert_eq!(step("9", 1.0, Some(5.0), Some(1.0), Increment), "1");
    }

    #[test]
    fn request_builder_matches_free_function() {
        let request = StepRequest::new("4", Decrement).with_step(2.0).with_bounds(Some(3.0), None);
        assert_eq!(request.next_value(), "3");
    }

    #[test]
    fn never_emits_negative_zero() {
        assert_eq!(step("1", 1.0, None, None, Decrement), "0");
        assert_eq!(step("-1", 1.0, None, None, Increment), "0");
    }
}
