pub const DEFAULT_PRECISION: usize = 2;

/// Magnitudes below this have no decimal point in their shortest text form
/// and are printed as integers.
const EXPONENT_FORM_BELOW: f64 = 1e-6;

/// Thousands-grouped rendering of a number.
///
/// Non-integral values are rounded to `precision` decimals (2 when `None`),
/// exact halves away from zero. Integral values, and values too small to be
/// written without an exponent, are rounded to an integer. Groups of three
/// digits are separated by commas, counted from the decimal point.
///
/// `number_display(12856892.11111, Some(2))` gives `"12,856,892.11"`.
pub fn number_display(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let fixed = if value.fract() == 0.0 || value.abs() < EXPONENT_FORM_BELOW {
        to_fixed(value, 0)
    } else {
        to_fixed(value, precision.unwrap_or(DEFAULT_PRECISION))
    };
    group_thousands(&fixed)
}

/// Fixed-point text with `precision` decimals. A value exactly halfway
/// between two candidates takes the one further from zero.
fn to_fixed(value: f64, precision: usize) -> String {
    let abs = value.abs();
    // halfway iff the lowest set bit of `abs` weighs 2^-(precision + 1)
    let scaled = abs * 2f64.powi(precision as i32 + 1);
    let digits = if scaled.fract() == 0.0 && scaled % 2.0 == 1.0 {
        let exact = format!("{:.*}", precision + 1, abs);
        let kept = exact[..exact.len() - 1].trim_end_matches('.');
        round_up_last_digit(kept)
    } else {
        format!("{:.*}", precision, abs)
    };
    if value < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

fn round_up_last_digit(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    let mut carry = true;
    for ch in out.iter_mut().rev() {
        match *ch {
            '.' => continue,
            '9' => *ch = '0',
            d => {
                *ch = (d as u8 + 1) as char;
                carry = false;
                break;
            }
        }
    }
    if carry {
        out.insert(0, '1');
    }
    out.into_iter().collect()
}

/// `count / total * 100`, or 0 when `total` is 0.
pub fn percent_of(count: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        (count / total) * 100.0
    }
}

/// Percentage cell text, e.g. `"97.25%"`.
pub fn percent_display(count: f64, total: f64) -> String {
    let mut out = number_display(percent_of(count, total), None);
    out.push('%');
    out
}

/// Percentage rounded to 2 decimals, halves rounded up.
pub fn rounded_percent(count: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    ((count / total) * 10_000.0 + 0.5).floor() / 100.0
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };
    let len = int_part.len();
    let mut out = String::with_capacity(fixed.len() + len / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(frac_part);
    out
}
