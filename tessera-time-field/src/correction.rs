//! Folding of arbitrary hour and minute values into their canonical ranges.
//!
//! ## Usage
//!
//! Run any externally supplied hour or minute through these functions before
//! rendering it into a segment.
//!
//! Negative values are folded onto their magnitude rather than wrapped, so
//! `-5` becomes `5`, not `19`. Values above the ceiling keep only the
//! fractional part of "how many whole periods" they span, scaled back onto the
//! period. For integer input this lands on `value mod period`.

/// Largest valid hour on a 24-hour clock.
pub const MAX_HOUR: u8 = 23;
/// Largest valid minute.
pub const MAX_MINUTE: u8 = 59;

/// Folds `hour` into `0..=23`.
///
/// ```
/// use tessera_time_field::correction::correct_hour;
///
/// assert_eq!(correct_hour(35), 11);
/// assert_eq!(correct_hour(-5), 5);
/// assert_eq!(correct_hour(24), 0);
/// ```
pub fn correct_hour(hour: i32) -> u8 {
    fold_into_period(hour, MAX_HOUR)
}

/// Folds `minute` into `0..=59`.
///
/// ```
/// use tessera_time_field::correction::correct_minute;
///
/// assert_eq!(correct_minute(90), 30);
/// assert_eq!(correct_minute(-10), 10);
/// ```
pub fn correct_minute(minute: i32) -> u8 {
    fold_into_period(minute, MAX_MINUTE)
}

fn fold_into_period(value: i32, ceiling: u8) -> u8 {
    // Widened so that negating i32::MIN cannot overflow.
    let mut value = i64::from(value);
    if value < 0 {
        value += value * -2;
    }

    if value <= i64::from(ceiling) {
        return value as u8;
    }

    let period = f64::from(ceiling) + 1.0;
    let periods = value as f64 / period;
    let remainder = periods - periods.floor();
    // The scaled remainder sits within float error of an integer; rounding
    // recovers it where truncation would drop to the integer below.
    let scaled = (remainder * period).round() as u8;
    if scaled > ceiling { 0 } else { scaled }
}
