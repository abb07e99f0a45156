//! Go-style duration strings
//!
//! The daemon parses `lifetime` and `ttl` options with Go's duration grammar
//! (`"24h0m0s"`, `"1m30s"`, `"250ms"`). Durations are signed, so
//! [`chrono::TimeDelta`] is used on both sides of the conversion.

use chrono::TimeDelta;

use crate::{Error, Result};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Format a duration the way Go's `time.Duration.String` does.
///
/// ```
/// use chrono::TimeDelta;
/// use ipns_core::duration::format_go_duration;
///
/// assert_eq!(format_go_duration(TimeDelta::hours(24)), "24h0m0s");
/// assert_eq!(format_go_duration(TimeDelta::seconds(90)), "1m30s");
/// assert_eq!(format_go_duration(TimeDelta::milliseconds(250)), "250ms");
/// ```
pub fn format_go_duration(d: TimeDelta) -> String {
    let negative = d < TimeDelta::zero();
    let total = u128::from(d.num_seconds().unsigned_abs()) * NANOS_PER_SEC
        + u128::from(d.subsec_nanos().unsigned_abs());

    if total == 0 {
        return "0s".to_string();
    }

    let body = if total < NANOS_PER_MICRO {
        format!("{}ns", total)
    } else if total < NANOS_PER_MILLI {
        format!("{}µs", fixed(total, NANOS_PER_MICRO, 3))
    } else if total < NANOS_PER_SEC {
        format!("{}ms", fixed(total, NANOS_PER_MILLI, 6))
    } else {
        let secs = total / NANOS_PER_SEC;
        let nanos = total % NANOS_PER_SEC;
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = fixed((secs % 60) * NANOS_PER_SEC + nanos, NANOS_PER_SEC, 9);

        if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    };

    if negative { format!("-{}", body) } else { body }
}

/// Render `value / unit` with up to `digits` fractional digits, trailing zeros dropped
fn fixed(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = digits);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a Go duration string such as `"1h30m"`, `"-1.5s"` or `"300ms"`.
///
/// A bare `"0"` is accepted; every other number needs a unit
/// (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`). The result must fit in a signed
/// 64-bit count of nanoseconds, as Go's `time.Duration` does.
pub fn parse_go_duration(input: &str) -> Result<TimeDelta> {
    let invalid = || Error::invalid_input(format!("invalid duration: {:?}", input));
    let out_of_range = || Error::invalid_input(format!("duration out of range: {:?}", input));

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    // i64::MIN has no positive counterpart
    let limit = if negative {
        u128::from(i64::MIN.unsigned_abs())
    } else {
        u128::from(i64::MAX.unsigned_abs())
    };

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let whole_len = rest.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
        let whole = &rest[..whole_len];
        rest = &rest[whole_len..];

        let frac = match rest.strip_prefix('.') {
            Some(after) => {
                let frac_len = after.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
                rest = &after[frac_len..];
                &after[..frac_len]
            }
            None => "",
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().map_err(|_| out_of_range())?.into()
        };
        let component = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(fraction_nanos(frac, scale)))
            .ok_or_else(out_of_range)?;

        total = total.checked_add(component).ok_or_else(out_of_range)?;
        if total > limit {
            return Err(out_of_range());
        }
    }

    let nanos = if negative {
        i64::try_from(-(total as i128)).map_err(|_| out_of_range())?
    } else {
        i64::try_from(total).map_err(|_| out_of_range())?
    };
    Ok(TimeDelta::nanoseconds(nanos))
}

/// Nanoseconds contributed by the digits after the decimal point of a
/// `scale`-nanosecond unit, truncated like Go does
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    // Digits past 18 are below a nanosecond even for hours
    let digits = &digits[..digits.len().min(18)];
    let mut value: u128 = 0;
    let mut denominator: u128 = 1;
    for b in digits.bytes() {
        value = value * 10 + u128::from(b - b'0');
        denominator *= 10;
    }
    value * scale / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_go_duration(TimeDelta::zero()), "0s");
    }

    #[test]
    fn test_format_hours_minutes_seconds() {
        assert_eq!(format_go_duration(TimeDelta::hours(24)), "24h0m0s");
        assert_eq!(format_go_duration(TimeDelta::seconds(3661)), "1h1m1s");
        assert_eq!(format_go_duration(TimeDelta::seconds(90)), "1m30s");
        assert_eq!(format_go_duration(TimeDelta::seconds(5)), "5s");
    }

    #[test]
    fn test_format_fractional_seconds() {
        assert_eq!(format_go_duration(TimeDelta::milliseconds(1500)), "1.5s");
        assert_eq!(
            format_go_duration(TimeDelta::seconds(61) + TimeDelta::milliseconds(250)),
            "1m1.25s"
        );
    }

    #[test]
    fn test_format_sub_second_units() {
        assert_eq!(format_go_duration(TimeDelta::milliseconds(250)), "250ms");
        assert_eq!(format_go_duration(TimeDelta::microseconds(1500)), "1.5ms");
        assert_eq!(format_go_duration(TimeDelta::microseconds(2)), "2µs");
        assert_eq!(format_go_duration(TimeDelta::nanoseconds(500)), "500ns");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_go_duration(TimeDelta::hours(-1)), "-1h0m0s");
        assert_eq!(format_go_duration(TimeDelta::milliseconds(-1500)), "-1.5s");
    }

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse_go_duration("24h").unwrap(), TimeDelta::hours(24));
        assert_eq!(parse_go_duration("1m30s").unwrap(), TimeDelta::seconds(90));
        assert_eq!(parse_go_duration("300ms").unwrap(), TimeDelta::milliseconds(300));
        assert_eq!(parse_go_duration("2us").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_go_duration("2µs").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_go_duration("7ns").unwrap(), TimeDelta::nanoseconds(7));
    }

    #[test]
    fn test_parse_fraction_and_sign() {
        assert_eq!(parse_go_duration("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_go_duration("-1.5s").unwrap(), TimeDelta::milliseconds(-1500));
        assert_eq!(parse_go_duration("+10s").unwrap(), TimeDelta::seconds(10));
        assert_eq!(parse_go_duration("0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_go_duration("-0").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "-", "10", "h", "1x", "1.s2", "..5s", "1h 30m"] {
            assert!(parse_go_duration(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_accepts_formatted_output() {
        for d in [
            TimeDelta::hours(24),
            TimeDelta::seconds(3661),
            TimeDelta::milliseconds(1500),
            TimeDelta::milliseconds(-250),
            TimeDelta::nanoseconds(360_000_000_000_000_001),
        ] {
            assert_eq!(parse_go_duration(&format_go_duration(d)).unwrap(), d);
        }
    }

    #[test]
    fn test_parse_keeps_nanosecond_precision() {
        assert_eq!(
            parse_go_duration("100000h1ns").unwrap(),
            TimeDelta::nanoseconds(360_000_000_000_000_001)
        );
        assert_eq!(
            format_go_duration(TimeDelta::nanoseconds(360_000_000_000_000_001)),
            "100000h0m0.000000001s"
        );
        assert_eq!(
            parse_go_duration("0.000000001s").unwrap(),
            TimeDelta::nanoseconds(1)
        );
        assert_eq!(parse_go_duration(".5s").unwrap(), TimeDelta::milliseconds(500));
        assert_eq!(parse_go_duration("1.s").unwrap(), TimeDelta::seconds(1));
    }

    #[test]
    fn test_parse_range_limits() {
        assert_eq!(
            parse_go_duration("9223372036854775807ns").unwrap(),
            TimeDelta::nanoseconds(i64::MAX)
        );
        assert_eq!(
            parse_go_duration("-9223372036854775808ns").unwrap(),
            TimeDelta::nanoseconds(i64::MIN)
        );

        for input in [
            "9223372036854775808ns",
            "-9223372036854775809ns",
            "18446744073709551616ns",
            "2562048h",
            "9223372036854775807ns1ns",
        ] {
            let err = parse_go_duration(input).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{:?}: {:?}", input, err);
        }
    }
}
