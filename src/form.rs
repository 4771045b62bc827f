//! Form state and the actions that drive it.
//!
//! [`FormState`] is the single owner of everything the calculator shows:
//! the raw field text, the divisor selector, both outputs, the error slot and
//! the advisory notice. Each public method corresponds to one user action
//! (calculate, reset, example, selector change) and runs to completion before
//! the next one; adapters such as the interactive session only read and write
//! this struct.

use std::fmt;

use tracing::debug;

use crate::calc::{self, CalcError, Estimate, Inputs};
use crate::divisor::{CustomDivisorField, DivisorPreset, resolve_divisor};
use crate::format::{PLACEHOLDER, format_cubic_meters, format_weight_kg};

/// Advisory text shown after every successful calculation.
pub const NOTICE: &str = "\
💡 Freight is usually billed on the greater of the actual weight and the dimensional weight (chargeable weight).
⚠️ Divisors (e.g. 5000/6000) and rounding rules differ between carriers and services; check your contract or rate card first.";

/// Field values used by the example action.
pub const EXAMPLE_WIDTH: &str = "50";
pub const EXAMPLE_LENGTH: &str = "40";
pub const EXAMPLE_HEIGHT: &str = "30";
pub const EXAMPLE_QUANTITY: &str = "1";

/// Quantity restored by a reset.
pub const DEFAULT_QUANTITY: &str = "1";

/// The editable numeric text fields of the form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Width,
    Length,
    Height,
    Quantity,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Width, Self::Length, Self::Height, Self::Quantity];

    /// Human label, with the unit where there is one.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Width => "Width (cm)",
            Self::Length => "Length (cm)",
            Self::Height => "Height (cm)",
            Self::Quantity => "Quantity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Live state of the calculator form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    width: String,
    length: String,
    height: String,
    quantity: String,
    preset: DivisorPreset,
    custom: CustomDivisorField,
    default_preset: DivisorPreset,

    cubic_meters: String,
    dimensional_weight: String,
    estimate: Option<Estimate>,
    error: String,
    notice: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(DivisorPreset::default())
    }
}

impl FormState {
    /// Create a form in its initial state.
    ///
    /// Mirrors the initial page load: the custom field is synced with the
    /// selector, then the whole form is reset. `default_preset` is what reset
    /// and example select; a `custom` default falls back to the built-in
    /// default since the custom field is always emptied on reset.
    #[must_use]
    pub fn new(default_preset: DivisorPreset) -> Self {
        let default_preset = if default_preset.is_custom() {
            DivisorPreset::default()
        } else {
            default_preset
        };

        let mut form = Self {
            width: String::new(),
            length: String::new(),
            height: String::new(),
            quantity: String::new(),
            preset: default_preset,
            custom: CustomDivisorField::default(),
            default_preset,
            cubic_meters: String::new(),
            dimensional_weight: String::new(),
            estimate: None,
            error: String::new(),
            notice: String::new(),
        };

        form.select_preset(form.preset);
        form.reset();
        form
    }

    // ── Field access ────────────────────────────────────────────────────

    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Width => &self.width,
            Field::Length => &self.length,
            Field::Height => &self.height,
            Field::Quantity => &self.quantity,
        }
    }

    /// Replace the raw text of a field. No parsing happens until the next
    /// calculation.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::Width => &mut self.width,
            Field::Length => &mut self.length,
            Field::Height => &mut self.height,
            Field::Quantity => &mut self.quantity,
        };
        *slot = text.into();
    }

    #[must_use]
    pub const fn preset(&self) -> DivisorPreset {
        self.preset
    }

    #[must_use]
    pub const fn default_preset(&self) -> DivisorPreset {
        self.default_preset
    }

    #[must_use]
    pub const fn custom_divisor(&self) -> &CustomDivisorField {
        &self.custom
    }

    /// Type into the custom divisor field.
    ///
    /// Returns `false`, leaving the field untouched, when the selector is not
    /// on `custom`.
    pub fn set_custom_divisor(&mut self, text: impl Into<String>) -> bool {
        let accepted = self.custom.set_value(text);
        if !accepted {
            debug!("custom divisor edit ignored: field is disabled");
        }
        accepted
    }

    // ── Outputs ─────────────────────────────────────────────────────────

    /// Displayed volume, e.g. `0.060 m³`, or the placeholder.
    #[must_use]
    pub fn cubic_meters(&self) -> &str {
        &self.cubic_meters
    }

    /// Displayed dimensional weight, e.g. `10.0 kg`, or the placeholder.
    #[must_use]
    pub fn dimensional_weight(&self) -> &str {
        &self.dimensional_weight
    }

    /// The estimate behind the displayed outputs, if any calculation has
    /// succeeded since the last reset.
    #[must_use]
    pub const fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    /// Content of the error slot; empty when there is no error.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Advisory notice; empty until a calculation succeeds.
    #[must_use]
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// Divisor the next calculation would use.
    #[must_use]
    pub fn effective_divisor(&self) -> f64 {
        resolve_divisor(self.preset, self.custom.value())
    }

    // ── Actions ─────────────────────────────────────────────────────────

    /// Change the divisor selector.
    ///
    /// Selecting `custom` enables the custom field; any numeric preset
    /// disables and empties it.
    pub fn select_preset(&mut self, preset: DivisorPreset) {
        debug!(%preset, "divisor preset selected");
        self.preset = preset;
        self.custom.sync_with(preset);
    }

    /// Validate the current fields and, on success, update both outputs and
    /// the notice.
    ///
    /// The error slot is cleared first. On failure it receives the error
    /// message while the outputs keep whatever they showed before and the
    /// notice is left alone.
    ///
    /// # Errors
    ///
    /// Returns the [`CalcError`] that was written to the error slot.
    pub fn calculate(&mut self) -> Result<Estimate, CalcError> {
        self.set_error("");

        let inputs = Inputs::parse(
            &self.width,
            &self.length,
            &self.height,
            &self.quantity,
            self.effective_divisor(),
        );

        match calc::estimate(inputs) {
            Ok(estimate) => {
                debug!(
                    volume_cm3 = estimate.volume_cm3,
                    divisor = inputs.divisor,
                    "calculation succeeded"
                );
                self.cubic_meters = format_cubic_meters(estimate.cubic_meters);
                self.dimensional_weight = format_weight_kg(estimate.dimensional_weight_kg);
                self.estimate = Some(estimate);
                NOTICE.clone_into(&mut self.notice);
                Ok(estimate)
            }
            Err(err) => {
                debug!(?err, "calculation rejected");
                self.set_error(&err.to_string());
                Err(err)
            }
        }
    }

    /// Restore every field and output to its default.
    pub fn reset(&mut self) {
        debug!("form reset");
        self.set_error("");
        self.width.clear();
        self.length.clear();
        self.height.clear();
        DEFAULT_QUANTITY.clone_into(&mut self.quantity);
        self.preset = self.default_preset;
        self.custom.disable();
        PLACEHOLDER.clone_into(&mut self.cubic_meters);
        PLACEHOLDER.clone_into(&mut self.dimensional_weight);
        self.estimate = None;
        self.notice.clear();
    }

    /// Fill in the 50 × 40 × 30 cm example box and calculate it.
    ///
    /// # Errors
    ///
    /// Only fails if the default preset itself is unusable, which the
    /// constructor rules out.
    pub fn apply_example(&mut self) -> Result<Estimate, CalcError> {
        debug!("example applied");
        EXAMPLE_WIDTH.clone_into(&mut self.width);
        EXAMPLE_LENGTH.clone_into(&mut self.length);
        EXAMPLE_HEIGHT.clone_into(&mut self.height);
        EXAMPLE_QUANTITY.clone_into(&mut self.quantity);
        self.preset = self.default_preset;
        self.custom.disable();
        self.calculate()
    }

    /// Replace the error slot content. An empty message clears it.
    fn set_error(&mut self, message: &str) {
        message.clone_into(&mut self.error);
    }
}
