//! Volume and dimensional-weight computation.
//!
//! Everything in this module is pure: it takes numbers (or the raw text typed
//! into a form field) and returns either an [`Estimate`] or a [`CalcError`].
//! Nothing here touches the terminal, so the form controller and the tests can
//! drive it directly.

use serde::Serialize;
use thiserror::Error;

/// Number of cubic centimeters in one cubic meter.
pub const CM3_PER_M3: f64 = 1_000_000.0;

/// Reasons a calculation request is rejected.
///
/// Both kinds are recoverable: the user fixes the offending field and asks
/// for a new calculation. The `Display` text is what lands in the form's
/// error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// At least one input is not a finite number.
    #[error("Please enter numbers only (e.g. 50, 40, 30).")]
    InvalidInput,

    /// Every input parsed, but at least one is zero or negative.
    #[error("Only values greater than zero are allowed.")]
    NonPositiveInput,
}

/// The five scalar inputs of a calculation, already parsed.
///
/// Dimensions are in centimeters. `divisor` is the effective divisor after
/// preset resolution (see [`crate::divisor::resolve_divisor`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inputs {
    /// Box width in cm
    pub width: f64,

    /// Box length in cm
    pub length: f64,

    /// Box height in cm
    pub height: f64,

    /// Number of identical boxes
    pub quantity: f64,

    /// Volume-to-weight divisor (cm³ per kg)
    pub divisor: f64,
}

/// Derived result of a successful calculation. Never stored between runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Total shipped volume in cm³
    pub volume_cm3: f64,

    /// Total shipped volume in m³ (CBM)
    pub cubic_meters: f64,

    /// Dimensional weight in kg
    pub dimensional_weight_kg: f64,
}

impl Inputs {
    /// Parse raw field text into inputs.
    ///
    /// Parsing never fails on its own; text that is not a number becomes
    /// `NaN` and is rejected later by [`Inputs::validate`].
    #[must_use]
    pub fn parse(width: &str, length: &str, height: &str, quantity: &str, divisor: f64) -> Self {
        Self {
            width: parse_number(width),
            length: parse_number(length),
            height: parse_number(height),
            quantity: parse_number(quantity),
            divisor,
        }
    }

    const fn values(&self) -> [f64; 5] {
        [
            self.width,
            self.length,
            self.height,
            self.quantity,
            self.divisor,
        ]
    }

    /// Check that every input is finite and strictly positive.
    ///
    /// Non-finite values are reported before non-positive ones, so
    /// `width = "abc", quantity = "0"` yields [`CalcError::InvalidInput`].
    ///
    /// # Errors
    ///
    /// - [`CalcError::InvalidInput`] if any value is `NaN` or infinite
    /// - [`CalcError::NonPositiveInput`] if any value is `<= 0`
    pub fn validate(self) -> Result<Self, CalcError> {
        let values = self.values();

        if values.iter().any(|v| !v.is_finite()) {
            return Err(CalcError::InvalidInput);
        }
        if values.iter().any(|v| *v <= 0.0) {
            return Err(CalcError::NonPositiveInput);
        }

        Ok(self)
    }
}

/// Validate `inputs` and compute volume and dimensional weight.
///
/// No rounding is applied; rounding happens only when the values are
/// formatted for display.
///
/// # Errors
///
/// Returns the first validation failure from [`Inputs::validate`].
pub fn estimate(inputs: Inputs) -> Result<Estimate, CalcError> {
    let inputs = inputs.validate()?;

    let volume_cm3 = inputs.width * inputs.length * inputs.height * inputs.quantity;

    Ok(Estimate {
        volume_cm3,
        cubic_meters: volume_cm3 / CM3_PER_M3,
        dimensional_weight_kg: volume_cm3 / inputs.divisor,
    })
}

/// Convert the text of a form field into a number.
///
/// The rules are deliberately loose, matching how a web form coerces its
/// inputs:
///
/// - surrounding whitespace is ignored
/// - an empty field is `0`, so it fails as non-positive rather than non-numeric
/// - plain decimal and exponent notation are accepted (`50`, `12.5`, `.5`, `1e3`)
/// - `Infinity` (optionally signed) is infinite
/// - hex, octal and binary literals (`0x10`, `0o7`, `0b11`) are not accepted
/// - anything else is `NaN`
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return 0.0;
    }

    // `str::parse::<f64>` also accepts "inf" and "nan" spellings; only the
    // numeric alphabet goes through it.
    let numeric = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));

    if !numeric {
        return match trimmed {
            "Infinity" | "+Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
    }

    trimmed.parse().unwrap_or(f64::NAN)
}
