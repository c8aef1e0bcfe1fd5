//! The sequence generator
//!
//! Each step yields `factor * value`, where `value` evolves by the
//! configured rule. The time since the previous step gates what the rule
//! is allowed to do:
//!
//! - past the save period, the value falls back to `start_value`
//! - past the change period, the value is held as is
//! - otherwise the rule is applied and the result is clamped (or wrapped)
//!   at `max_value`

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::rule::{UpdateContext, ValueChange};
use crate::time::{Millis, SystemClock, TimeSource};
use crate::value::ValueMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// What a step is allowed to do with the value, given the elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepGate {
    /// Save period exceeded: restore the start value
    Restart,
    /// Within the change period: apply the rule
    Apply,
    /// Change period exceeded: keep the value untouched
    Hold,
}

impl StepGate {
    fn classify(config: &GeneratorConfig, elapsed: Millis) -> Self {
        match (config.value_save_period, config.value_change_period) {
            (Some(save), _) if elapsed > save => StepGate::Restart,
            (_, Some(change)) if elapsed > change => StepGate::Hold,
            _ => StepGate::Apply,
        }
    }
}

/// A stateful numeric sequence
///
/// The generator is also an infinite `Iterator`; use `by_ref()` to pull a
/// few items without giving it up.
///
/// ```
/// use seqgen_core::{GeneratorConfig, SequenceGenerator, ValueChange};
///
/// let fib = ValueChange::function(|ctx| match ctx.prev {
///     Some(prev) if ctx.index > 1 => prev + ctx.current,
///     _ => 1.0,
/// });
/// let mut generator = SequenceGenerator::new(GeneratorConfig::new().with_value_change(fib));
///
/// // range() works on a fresh copy and leaves the generator alone
/// assert_eq!(generator.range(3, 6), vec![2.0, 3.0, 5.0, 8.0]);
/// assert_eq!(generator.index(), 0);
///
/// let first: Vec<f64> = generator.by_ref().take(3).collect();
/// assert_eq!(first, vec![1.0, 1.0, 2.0]);
/// ```
#[derive(Debug)]
pub struct SequenceGenerator {
    config: GeneratorConfig,
    clock: Arc<dyn TimeSource>,
    value: f64,
    index: u64,
    current: f64,
    prev: Option<f64>,
    last_step_time: Millis,
    aux_state: Option<ValueMap>,
}

impl SequenceGenerator {
    /// Create a generator reading time from a `SystemClock`
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a generator reading time from the given source
    pub fn with_clock(config: GeneratorConfig, clock: Arc<dyn TimeSource>) -> Self {
        let mut generator = Self {
            config,
            clock,
            value: 0.0,
            index: 0,
            current: 0.0,
            prev: None,
            last_step_time: 0,
            aux_state: None,
        };
        generator.reset();
        generator
    }

    /// Validate the configuration, then create a generator
    pub fn try_new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Validate the configuration, then create a generator on the given clock
    pub fn try_with_clock(config: GeneratorConfig, clock: Arc<dyn TimeSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_clock(config, clock))
    }

    /// Advance by one position and return the new item
    pub fn step(&mut self) -> f64 {
        self.index += 1;

        let now = self.clock.now_ms();
        let elapsed = now.saturating_sub(self.last_step_time);
        self.last_step_time = now;

        let gate = StepGate::classify(&self.config, elapsed);
        trace!(index = self.index, elapsed, ?gate, "step");

        match gate {
            StepGate::Restart => {
                debug!(
                    index = self.index,
                    elapsed,
                    start_value = self.config.start_value,
                    "save period exceeded, restarting value"
                );
                self.value = self.config.start_value;
            }
            StepGate::Apply => {
                let next = self.next_value();
                self.value = self.limit_to_max(next);
            }
            StepGate::Hold => {
                // Held values skip the max check as well
                debug!(
                    index = self.index,
                    elapsed,
                    value = self.value,
                    "change period exceeded, holding value"
                );
            }
        }

        self.prev = Some(self.current);
        self.current = self.value * self.config.factor;
        self.current
    }

    /// Step `count` times and collect the items in order
    pub fn step_many(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.step()).collect()
    }

    /// A new generator with the same configuration and clock but fresh state
    ///
    /// This is not a snapshot: the copy starts over from `start_value`.
    pub fn fresh_clone(&self) -> Self {
        Self::with_clock(self.config.clone(), Arc::clone(&self.clock))
    }

    /// Items at positions `first..=last` of a fresh run of this generator
    ///
    /// Position 0 is the item before any step (`start_value * factor`).
    /// The generator itself is not touched. Returns an empty vector when
    /// `first > last`.
    pub fn range(&self, first: usize, last: usize) -> Vec<f64> {
        if first > last {
            return Vec::new();
        }

        let mut probe = self.fresh_clone();
        let mut items = Vec::new();
        if first == 0 {
            items.push(probe.current);
        }
        for position in 1..=last {
            let item = probe.step();
            if position >= first {
                items.push(item);
            }
        }
        items
    }

    /// Like `range`, but reports `first > last` as an error
    pub fn checked_range(&self, first: usize, last: usize) -> Result<Vec<f64>> {
        if first > last {
            return Err(Error::InvalidRange { first, last });
        }
        Ok(self.range(first, last))
    }

    /// The first `size` stepped items of a fresh run, same as `range(1, size)`
    pub fn to_sequence(&self, size: usize) -> Vec<f64> {
        self.range(1, size)
    }

    /// Restore the runtime state; configuration is kept
    pub fn reset(&mut self) -> &mut Self {
        self.value = self.config.start_value;
        self.index = 0;
        self.current = self.value * self.config.factor;
        self.prev = None;
        self.last_step_time = self.clock.now_ms();
        self.aux_state = None;
        debug!(start_value = self.value, current = self.current, "generator reset");
        self
    }

    /// Drop the auxiliary state
    ///
    /// The generator keeps working afterwards; a function rule simply
    /// starts over with an empty aux map.
    pub fn dispose(&mut self) {
        if self.aux_state.take().is_some() {
            debug!(index = self.index, "aux state released");
        }
    }

    /// Human-readable summary of configuration and state
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// The configuration this generator was built with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The internal value before multiplication by `factor`
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of steps since the last reset
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The most recent item
    pub fn current(&self) -> f64 {
        self.current
    }

    /// The item before `current`, if any step has happened
    pub fn prev(&self) -> Option<f64> {
        self.prev
    }

    /// Clock reading taken at the last step or reset
    pub fn last_step_time(&self) -> Millis {
        self.last_step_time
    }

    /// Scratch state of function rules; `None` until first used
    ///
    /// While a rule is running this reads `None`; the rule sees the map
    /// through `UpdateContext::aux` instead.
    pub fn aux_state(&self) -> Option<&ValueMap> {
        self.aux_state.as_ref()
    }

    /// Mutable scratch state, created on demand
    pub fn aux_state_mut(&mut self) -> &mut ValueMap {
        self.aux_state.get_or_insert_with(ValueMap::new)
    }

    fn next_value(&mut self) -> f64 {
        let rule = match &self.config.value_change {
            ValueChange::None => return self.value,
            ValueChange::Constant(delta) => return self.value + delta,
            ValueChange::Function(rule) => Arc::clone(rule),
        };

        let mut aux = self.aux_state.take().unwrap_or_default();
        let next = {
            let generator = if self.config.pass_self_to_changer {
                Some(&*self)
            } else {
                None
            };
            let mut ctx = UpdateContext {
                index: self.index,
                value: self.value,
                start_value: self.config.start_value,
                max_value: self.config.max_value,
                factor: self.config.factor,
                prev: self.prev,
                current: self.current,
                aux: &mut aux,
                generator,
            };
            rule(&mut ctx)
        };
        self.aux_state = Some(aux);
        next
    }

    // NaN on either side compares false and passes through untouched
    fn limit_to_max(&self, value: f64) -> f64 {
        if value >= self.config.max_value {
            if self.config.reset_value_on_max {
                debug!(
                    index = self.index,
                    value,
                    max_value = self.config.max_value,
                    "max value reached, wrapping to start value"
                );
                self.config.start_value
            } else {
                self.config.max_value
            }
        } else {
            value
        }
    }
}

impl Iterator for SequenceGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl fmt::Display for SequenceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SequenceGenerator {{ factor: {}, value: {}, start value: {}, max value: {}, \
             change period: {}, save period: {}, index: {}, prev: {}, current: {} }}",
            self.config.factor,
            self.value,
            self.config.start_value,
            self.config.max_value,
            Period(self.config.value_change_period),
            Period(self.config.value_save_period),
            self.index,
            Item(self.prev),
            self.current,
        )
    }
}

struct Period(Option<Millis>);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ms) => write!(f, "{} ms", ms),
            None => write!(f, "no"),
        }
    }
}

struct Item(Option<f64>);

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use crate::value::Value;

    fn manual(config: GeneratorConfig) -> (SequenceGenerator, ManualClock) {
        let clock = ManualClock::new(0);
        let generator = SequenceGenerator::with_clock(config, Arc::new(clock.clone()));
        (generator, clock)
    }

    fn fibonacci() -> ValueChange {
        ValueChange::function(|ctx| match ctx.prev {
            Some(prev) if ctx.index > 1 => prev + ctx.current,
            _ => 1.0,
        })
    }

    #[test]
    fn test_no_rule_is_constant() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_start_value(3.0).with_factor(2.0));
        assert_eq!(generator.current(), 6.0);
        for _ in 0..20 {
            assert_eq!(generator.step(), 6.0);
        }
        assert_eq!(generator.index(), 20);
    }

    #[test]
    fn test_constant_increment() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_start_value(1.0)
                .with_factor(3.0)
                .with_value_change(0.5),
        );
        for n in 1..=10 {
            let expected = (1.0 + n as f64 * 0.5) * 3.0;
            assert_eq!(generator.step(), expected);
        }
    }

    #[test]
    fn test_even_numbers() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(2.0));
        assert_eq!(generator.step_many(5), vec![2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_alternating_sign() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_start_value(1.0)
                .with_value_change(ValueChange::function(|ctx| -ctx.value)),
        );
        assert_eq!(generator.step_many(4), vec![-1.0, 1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_squares() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_value_change(ValueChange::function(|ctx| (ctx.index * ctx.index) as f64)),
        );
        assert_eq!(generator.step_many(5), vec![1.0, 4.0, 9.0, 16.0, 25.0]);
    }

    #[test]
    fn test_fibonacci() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(fibonacci()));
        assert_eq!(generator.step_many(6), vec![1.0, 1.0, 2.0, 3.0, 5.0, 8.0]);
    }

    #[test]
    fn test_max_clamps_without_reset() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_max_value(10.0)
                .with_value_change(3.0),
        );
        assert_eq!(generator.step_many(6), vec![3.0, 6.0, 9.0, 10.0, 10.0, 10.0]);
        assert_eq!(generator.value(), 10.0);
    }

    #[test]
    fn test_max_wraps_with_reset() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_max_value(3.0)
                .with_reset_value_on_max(true)
                .with_value_change(1.0),
        );
        assert_eq!(generator.step_many(6), vec![1.0, 2.0, 0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_max_applies_before_factor() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_factor(10.0)
                .with_max_value(2.5)
                .with_value_change(1.0),
        );
        assert_eq!(generator.step_many(3), vec![10.0, 20.0, 25.0]);
    }

    #[test]
    fn test_prev_tracks_previous_item() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(1.0));
        assert_eq!(generator.prev(), None);
        generator.step();
        assert_eq!(generator.prev(), Some(0.0));
        generator.step();
        assert_eq!(generator.prev(), Some(1.0));
        assert_eq!(generator.current(), 2.0);
    }

    #[test]
    fn test_step_many_zero_is_empty() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(1.0));
        assert!(generator.step_many(0).is_empty());
        assert_eq!(generator.index(), 0);
    }

    #[test]
    fn test_range_is_pure() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(2.0));
        generator.step_many(3);
        let (index, current) = (generator.index(), generator.current());

        let a = generator.range(2, 4);
        let b = generator.range(2, 4);
        assert_eq!(a, vec![4.0, 6.0, 8.0]);
        assert_eq!(a, b);
        assert_eq!(generator.index(), index);
        assert_eq!(generator.current(), current);
    }

    #[test]
    fn test_range_from_zero_includes_initial_item() {
        let (generator, _) = manual(
            GeneratorConfig::new()
                .with_start_value(1.0)
                .with_factor(2.0)
                .with_value_change(1.0),
        );
        let mut expected = vec![2.0];
        expected.extend(generator.to_sequence(4));
        assert_eq!(generator.range(0, 4), expected);
        assert_eq!(generator.range(0, 0), vec![2.0]);
    }

    #[test]
    fn test_range_inverted_is_empty() {
        let (generator, _) = manual(GeneratorConfig::new().with_value_change(1.0));
        assert!(generator.range(5, 2).is_empty());
        assert_eq!(
            generator.checked_range(5, 2),
            Err(Error::InvalidRange { first: 5, last: 2 })
        );
        assert_eq!(generator.checked_range(1, 2), Ok(vec![1.0, 2.0]));
    }

    #[test]
    fn test_to_sequence_matches_stepping() {
        let (generator, _) = manual(GeneratorConfig::new().with_value_change(fibonacci()));
        let mut fresh = generator.fresh_clone();
        assert_eq!(generator.to_sequence(8), fresh.step_many(8));
        assert!(generator.to_sequence(0).is_empty());
    }

    #[test]
    fn test_fresh_clone_resets_state() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_factor(2.0)
                .with_start_value(1.0)
                .with_max_value(50.0)
                .with_reset_value_on_max(true)
                .with_value_change(ValueChange::function(|ctx| {
                    ctx.set_aux("seen", true);
                    ctx.value + 1.0
                }))
                .with_value_change_period(Some(100))
                .with_value_save_period(Some(200)),
        );
        generator.step_many(4);
        assert!(generator.aux_state().is_some());

        let copy = generator.fresh_clone();
        assert_eq!(copy.index(), 0);
        assert_eq!(copy.current(), 2.0);
        assert_eq!(copy.prev(), None);
        assert!(copy.aux_state().is_none());

        let config = copy.config();
        assert_eq!(config.factor, 2.0);
        assert_eq!(config.start_value, 1.0);
        assert_eq!(config.max_value, 50.0);
        assert!(config.reset_value_on_max);
        assert_eq!(config.value_change_period, Some(100));
        assert_eq!(config.value_save_period, Some(200));
    }

    #[test]
    fn test_change_period_holds_value() {
        let (mut generator, clock) = manual(
            GeneratorConfig::new()
                .with_value_change(1.0)
                .with_value_change_period(Some(100)),
        );
        assert_eq!(generator.step(), 1.0);
        clock.advance(50);
        assert_eq!(generator.step(), 2.0);
        clock.advance(150);
        assert_eq!(generator.step(), 2.0);
        clock.advance(100);
        assert_eq!(generator.step(), 3.0);
        assert_eq!(generator.index(), 4);
    }

    #[test]
    fn test_first_step_measures_from_construction() {
        let (mut generator, clock) = manual(
            GeneratorConfig::new()
                .with_value_change(1.0)
                .with_value_change_period(Some(100)),
        );
        clock.advance(200);
        assert_eq!(generator.step(), 0.0);
        assert_eq!(generator.step(), 1.0);

        clock.advance(200);
        generator.reset();
        assert_eq!(generator.step(), 1.0);
    }

    #[test]
    fn test_save_period_restarts_value() {
        let (mut generator, clock) = manual(
            GeneratorConfig::new()
                .with_start_value(5.0)
                .with_value_change(1.0)
                .with_value_save_period(Some(1_000)),
        );
        assert_eq!(generator.step_many(2), vec![6.0, 7.0]);
        clock.advance(1_500);
        assert_eq!(generator.step(), 5.0);
        assert_eq!(generator.step(), 6.0);
        assert_eq!(generator.index(), 4);
    }

    #[test]
    fn test_save_period_takes_precedence() {
        let (mut generator, clock) = manual(
            GeneratorConfig::new()
                .with_value_change(1.0)
                .with_value_change_period(Some(100))
                .with_value_save_period(Some(300)),
        );
        assert_eq!(generator.step_many(3), vec![1.0, 2.0, 3.0]);

        clock.advance(200);
        assert_eq!(generator.step(), 3.0);

        clock.advance(400);
        assert_eq!(generator.step(), 0.0);
    }

    #[test]
    fn test_hold_skips_max_check() {
        // start above max: applying the rule would clamp, holding does not
        let config = GeneratorConfig::new()
            .with_start_value(5.0)
            .with_max_value(3.0)
            .with_value_change_period(Some(100));

        let (mut held, clock) = manual(config.clone());
        clock.advance(150);
        assert_eq!(held.step(), 5.0);

        let (mut applied, _) = manual(config);
        assert_eq!(applied.step(), 3.0);
    }

    #[test]
    fn test_hold_at_max_keeps_clamped_value() {
        let (mut generator, clock) = manual(
            GeneratorConfig::new()
                .with_max_value(2.0)
                .with_value_change(1.0)
                .with_value_change_period(Some(100)),
        );
        assert_eq!(generator.step_many(3), vec![1.0, 2.0, 2.0]);
        clock.advance(500);
        assert_eq!(generator.step(), 2.0);
        assert_eq!(generator.value(), 2.0);
    }

    #[test]
    fn test_backwards_clock_counts_as_no_elapsed_time() {
        let clock = ManualClock::new(1_000);
        let mut generator = SequenceGenerator::with_clock(
            GeneratorConfig::new()
                .with_value_change(1.0)
                .with_value_change_period(Some(10)),
            Arc::new(clock.clone()),
        );
        clock.set(0);
        assert_eq!(generator.step(), 1.0);
        assert_eq!(generator.last_step_time(), 0);
    }

    #[test]
    fn test_aux_state_is_lazy() {
        let (mut constant, _) = manual(GeneratorConfig::new().with_value_change(1.0));
        constant.step_many(3);
        assert!(constant.aux_state().is_none());

        let (mut generator, _) = manual(
            GeneratorConfig::new().with_value_change(ValueChange::function(|ctx| ctx.value)),
        );
        assert!(generator.aux_state().is_none());
        generator.step();
        assert!(generator.aux_state().is_some());
    }

    #[test]
    fn test_aux_state_persists_between_steps() {
        // tribonacci: keep the last three items in aux
        let rule = ValueChange::function(|ctx| {
            let window: Vec<f64> = ctx
                .aux
                .get("window")
                .and_then(Value::as_list)
                .map(|l| l.iter().filter_map(Value::as_float).collect())
                .unwrap_or_else(|| vec![0.0, 0.0, 1.0]);
            let next: f64 = window.iter().sum();
            let shifted = vec![window[1], window[2], next];
            ctx.set_aux("window", shifted);
            next
        });
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(rule));
        assert_eq!(generator.step_many(6), vec![1.0, 2.0, 4.0, 7.0, 13.0, 24.0]);
    }

    #[test]
    fn test_reset_and_dispose_clear_aux() {
        let rule = ValueChange::function(|ctx| {
            let calls = ctx.aux_f64("calls").unwrap_or(0.0) + 1.0;
            ctx.set_aux("calls", calls);
            calls
        });
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(rule));
        assert_eq!(generator.step_many(3), vec![1.0, 2.0, 3.0]);

        generator.dispose();
        assert!(generator.aux_state().is_none());
        assert_eq!(generator.step(), 1.0);
        assert_eq!(generator.index(), 4);

        assert_eq!(generator.reset().step(), 1.0);
        assert_eq!(generator.index(), 1);
        assert_eq!(generator.prev(), Some(0.0));
    }

    #[test]
    fn test_aux_state_mut_seeds_rule() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_value_change(ValueChange::function(|ctx| ctx.aux_f64("offset").unwrap_or(0.0))),
        );
        generator.aux_state_mut().insert("offset".into(), Value::Float(7.0));
        assert_eq!(generator.step(), 7.0);
    }

    #[test]
    fn test_pass_self_to_changer() {
        let rule = ValueChange::function(|ctx| match ctx.generator {
            Some(generator) => generator.index() as f64 * 10.0,
            None => -1.0,
        });

        let (mut without, _) = manual(GeneratorConfig::new().with_value_change(rule.clone()));
        assert_eq!(without.step(), -1.0);

        let (mut with, _) = manual(
            GeneratorConfig::new()
                .with_value_change(rule)
                .with_pass_self_to_changer(true),
        );
        assert_eq!(with.step_many(2), vec![10.0, 20.0]);
    }

    #[test]
    fn test_iterator() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_value_change(1.0));
        let items: Vec<f64> = generator.by_ref().take(3).collect();
        assert_eq!(items, vec![1.0, 2.0, 3.0]);
        assert_eq!(generator.next(), Some(4.0));

        generator.reset();
        let evens: Vec<f64> = generator.by_ref().filter(|v| v % 2.0 == 0.0).take(2).collect();
        assert_eq!(evens, vec![2.0, 4.0]);
    }

    #[test]
    fn test_describe() {
        let (mut generator, _) = manual(
            GeneratorConfig::new()
                .with_factor(2.0)
                .with_value_change(1.0)
                .with_value_save_period(Some(500)),
        );
        let before = generator.describe();
        assert!(before.contains("factor: 2"));
        assert!(before.contains("change period: no"));
        assert!(before.contains("save period: 500 ms"));
        assert!(before.contains("prev: none"));

        generator.step();
        let after = generator.describe();
        assert!(after.contains("index: 1"));
        assert!(after.contains("prev: 0"));
        assert!(after.contains("current: 2"));
        assert!(after.contains("value: 1"));
        assert!(after.contains("start value: 0"));
    }

    #[test]
    fn test_try_new_validates() {
        let err = SequenceGenerator::try_new(GeneratorConfig::new().with_factor(f64::NAN)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { field: "factor", .. }));
        assert!(SequenceGenerator::try_new(GeneratorConfig::new()).is_ok());
    }

    #[test]
    fn test_nan_passes_through_max_check() {
        let (mut nan_start, _) = manual(
            GeneratorConfig::new()
                .with_start_value(f64::NAN)
                .with_value_change(1.0),
        );
        assert!(nan_start.step().is_nan());
        assert!(nan_start.value().is_nan());

        let (mut nan_rule, _) = manual(
            GeneratorConfig::new()
                .with_max_value(10.0)
                .with_reset_value_on_max(true)
                .with_value_change(ValueChange::function(|_| f64::NAN)),
        );
        assert!(nan_rule.step().is_nan());

        let (mut nan_max, _) = manual(
            GeneratorConfig::new()
                .with_max_value(f64::NAN)
                .with_value_change(1.0),
        );
        assert_eq!(nan_max.step_many(3), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_garbage_in_garbage_out() {
        let (mut generator, _) = manual(GeneratorConfig::new().with_factor(f64::NAN).with_value_change(1.0));
        assert!(generator.step().is_nan());
    }
}
