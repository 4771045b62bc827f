//! Display formatting for calculation results.

/// Shown in place of a number that is not finite, and in empty outputs.
pub const PLACEHOLDER: &str = "—";

/// Unit suffix for volume outputs.
pub const CBM_UNIT: &str = "m³";

/// Unit suffix for weight outputs.
pub const WEIGHT_UNIT: &str = "kg";

/// Fractional digits needed to print any `f64` exactly; the smallest
/// subnormal has 1074.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format `value` with exactly `digits` decimals, or [`PLACEHOLDER`] when the
/// value is `NaN` or infinite.
///
/// Rounding works on the exact decimal expansion of the float and sends ties
/// up in magnitude, so `1.25` becomes `1.3` and `0.0625` becomes `0.063`.
/// Values that are only close to a tie round to the nearer side: `1.005` is
/// stored just below, so it becomes `1.00`.
#[must_use]
pub fn format_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();

    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        round_up_in_place(&mut kept);
    }

    let int_len = kept.len() - digits;
    let (int_digits, frac_digits) = kept.split_at(int_len);

    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(int_digits));
    if digits > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(frac_digits));
    }
    out
}

/// Add one unit in the last place to a string of ASCII digits.
fn round_up_in_place(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Volume with three decimals, e.g. `0.060 m³`.
#[must_use]
pub fn format_cubic_meters(value: f64) -> String {
    format!("{} {CBM_UNIT}", format_fixed(value, 3))
}

/// Weight with one decimal, e.g. `10.0 kg`.
#[must_use]
pub fn format_weight_kg(value: f64) -> String {
    format!("{} {WEIGHT_UNIT}", format_fixed(value, 1))
}
