use smallvec::SmallVec;

/// Pixel spacing targets used to derive tick counts from the plot size.
pub const X_TICK_SPACING_PX: f64 = 100.0;
pub const Y_TICK_SPACING_PX: f64 = 36.0;

const MIN_TICKS: usize = 2;
const MAX_TICKS: usize = 1_000;

pub type Ticks = SmallVec<[f64; 16]>;

/// Number of ticks requested for an axis spanning `axis_span_px`.
#[must_use]
pub fn tick_count_for_span(axis_span_px: f64, spacing_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return MIN_TICKS;
    }
    if !spacing_px.is_finite() || spacing_px <= 0.0 {
        return MIN_TICKS;
    }

    ((axis_span_px / spacing_px).floor() as usize).clamp(MIN_TICKS, MAX_TICKS)
}

/// Step between "nice" ticks (1, 2 or 5 times a power of ten).
///
/// A negative return value `-k` encodes a step of `1 / k`, which keeps
/// fractional steps exact when ticks are materialized.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let mut step = (stop - start) / count;
    if step.is_infinite() {
        step = stop / count - start / count;
    }
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Roughly `count` evenly spaced, round-valued ticks inside `[start, stop]`.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Ticks {
    let mut ticks = Ticks::new();
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return ticks;
    }
    if start == stop {
        ticks.push(start);
        return ticks;
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let step = tick_increment(low, high, count);
    if step == 0.0 || !step.is_finite() {
        return ticks;
    }

    if step > 0.0 {
        let first = (low / step).ceil();
        let last = (high / step).floor();
        for i in 0..tick_span(first, last) {
            ticks.push((first + i as f64) * step);
        }
    } else {
        let inverse = -step;
        let first = (low * inverse).ceil();
        let last = (high * inverse).floor();
        for i in 0..tick_span(first, last) {
            ticks.push((first + i as f64) / inverse);
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

fn tick_span(first: f64, last: f64) -> usize {
    let n = (last - first + 1.0).ceil();
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    (n as usize).min(MAX_TICKS)
}

#[cfg(test)]
mod tests {
    use super::{nice_ticks, tick_count_for_span, tick_increment};

    #[test]
    fn unit_interval_splits_into_fifths() {
        let ticks = nice_ticks(0.0, 1.0, 5);
        assert_eq!(ticks.as_slice(), &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn steps_follow_one_two_five_pattern() {
        let ticks = nice_ticks(1.0, 3.0, 8);
        assert_eq!(ticks.as_slice(), &[1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 2.2, 2.4, 2.6, 2.8, 3.0]);

        let ticks = nice_ticks(0.0, 100.0, 4);
        assert_eq!(ticks.as_slice(), &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn spans_beyond_f64_max_still_produce_ticks() {
        let ticks = nice_ticks(-1e308, 1e308, 8);
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|tick| tick.is_finite()));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn ticks_stay_inside_the_domain() {
        let ticks = nice_ticks(-2.718, 3.1416, 6);
        assert_eq!(ticks.as_slice(), &[-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn reversed_domain_yields_reversed_ticks() {
        let ticks = nice_ticks(1.0, 0.0, 2);
        assert_eq!(ticks.as_slice(), &[1.0, 0.5, 0.0]);
    }

    #[test]
    fn degenerate_and_invalid_domains() {
        assert_eq!(nice_ticks(4.0, 4.0, 5).as_slice(), &[4.0]);
        assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
        assert!(nice_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn increment_picks_one_two_five_multiples() {
        assert_eq!(tick_increment(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
        assert_eq!(tick_increment(0.0, 35.0, 10), 5.0);
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
    }

    #[test]
    fn tick_count_follows_plot_span() {
        assert_eq!(tick_count_for_span(865.0, 100.0), 8);
        assert_eq!(tick_count_for_span(420.0, 36.0), 11);
        assert_eq!(tick_count_for_span(50.0, 100.0), 2);
        assert_eq!(tick_count_for_span(f64::NAN, 100.0), 2);
    }
}
