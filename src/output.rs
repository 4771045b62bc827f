//! Rendering of a form snapshot.
//!
//! Two renderers share the same input, a [`FormState`]:
//!
//! - [`JsonOutput`] - a single serializable document for scripting (`--json`)
//! - [`render_form`] - the colored, human-readable report used by the
//!   one-shot commands and the interactive session

use colored::Colorize;
use serde::Serialize;

use crate::calc::Estimate;
use crate::form::{Field, FormState};
use crate::format::{PLACEHOLDER, format_cubic_meters, format_weight_kg};

/// Top-level JSON document emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// `"ok"` when the error slot is empty, `"error"` otherwise.
    pub status: &'static str,

    /// Raw form inputs as they were typed.
    pub inputs: JsonInputs,

    /// Estimate behind the displayed outputs, or `null` if nothing has been
    /// calculated since the last reset.
    pub result: Option<JsonResult>,

    /// Error slot content, or `null`.
    pub error: Option<String>,

    /// Advisory notice, or `null`.
    pub notice: Option<String>,
}

/// Raw field values in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonInputs {
    pub width_cm: String,
    pub length_cm: String,
    pub height_cm: String,
    pub quantity: String,

    /// Selector value: `"5000"`, `"6000"` or `"custom"`.
    pub divisor_preset: String,

    /// Custom divisor text; present only while `custom` is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_divisor: Option<String>,
}

/// Calculation result in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonResult {
    /// Total volume in cm³
    pub volume_cm3: f64,

    /// Total volume in m³
    pub cubic_meters: f64,

    /// Dimensional weight in kg
    pub dimensional_weight_kg: f64,

    /// Display string, e.g. `"0.060 m³"`
    pub cubic_meters_formatted: String,

    /// Display string, e.g. `"10.0 kg"`
    pub dimensional_weight_formatted: String,
}

impl JsonOutput {
    /// Snapshot a form into its JSON representation.
    #[must_use]
    pub fn from_form(form: &FormState) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let custom = form.custom_divisor();

        Self {
            status: if form.error().is_empty() { "ok" } else { "error" },
            inputs: JsonInputs {
                width_cm: form.field(Field::Width).to_string(),
                length_cm: form.field(Field::Length).to_string(),
                height_cm: form.field(Field::Height).to_string(),
                quantity: form.field(Field::Quantity).to_string(),
                divisor_preset: form.preset().to_string(),
                custom_divisor: custom.is_enabled().then(|| custom.value().to_string()),
            },
            result: form.estimate().map(JsonResult::from_estimate),
            error: non_empty(form.error()),
            notice: non_empty(form.notice()),
        }
    }
}

impl JsonResult {
    /// Convert an [`Estimate`] into a `JsonResult`.
    #[must_use]
    pub fn from_estimate(estimate: &Estimate) -> Self {
        Self {
            volume_cm3: estimate.volume_cm3,
            cubic_meters: estimate.cubic_meters,
            dimensional_weight_kg: estimate.dimensional_weight_kg,
            cubic_meters_formatted: format_cubic_meters(estimate.cubic_meters),
            dimensional_weight_formatted: format_weight_kg(estimate.dimensional_weight_kg),
        }
    }
}

/// Render the whole form as a human-readable report.
///
/// Lists the inputs, both outputs, then the error slot and the notice when
/// they are non-empty.
#[must_use]
pub fn render_form(form: &FormState) -> String {
    let row = |label: &str, value: &str| format!("  {label:<22}{value}");

    let mut lines = vec!["📦 Box".bold().to_string()];
    lines.extend(Field::ALL.map(|field| {
        let value = form.field(field);
        let shown = if value.is_empty() { PLACEHOLDER } else { value };
        row(&format!("{field}:"), shown)
    }));

    let custom = form.custom_divisor();
    let divisor = if custom.is_enabled() {
        let value = if custom.value().is_empty() {
            PLACEHOLDER
        } else {
            custom.value()
        };
        format!("custom ({value})")
    } else {
        form.preset().to_string()
    };
    lines.push(row("Divisor:", &divisor));

    lines.push(String::new());
    lines.push("📊 Result".bold().to_string());
    lines.push(row(
        "Volume (CBM):",
        &form.cubic_meters().bright_white().to_string(),
    ));
    lines.push(row(
        "Dimensional weight:",
        &form.dimensional_weight().bright_white().to_string(),
    ));

    if !form.error().is_empty() {
        lines.push(String::new());
        lines.push(format!("{} {}", "❌".red(), form.error().red()));
    }

    if !form.notice().is_empty() {
        lines.push(String::new());
        lines.push(form.notice().yellow().to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divisor::DivisorPreset;
    use crate::form::NOTICE;

    #[test]
    fn test_json_after_reset() {
        let form = FormState::default();
        let output = JsonOutput::from_form(&form);

        assert_eq!(output.status, "ok");
        assert_eq!(output.inputs.quantity, "1");
        assert_eq!(output.inputs.divisor_preset, "6000");
        assert!(output.inputs.custom_divisor.is_none());
        assert!(output.result.is_none());
        assert!(output.error.is_none());
        assert!(output.notice.is_none());
    }

    #[test]
    fn test_json_after_example() {
        let mut form = FormState::default();
        form.apply_example().unwrap();

        let output = JsonOutput::from_form(&form);
        let result = output.result.as_ref().unwrap();

        assert_eq!(output.status, "ok");
        assert_eq!(result.cubic_meters_formatted, "0.060 m³");
        assert_eq!(result.dimensional_weight_formatted, "10.0 kg");
        assert_eq!(output.notice.as_deref(), Some(NOTICE));
    }

    #[test]
    fn test_json_error_status() {
        let mut form = FormState::default();
        form.set_field(Field::Width, "abc");
        form.calculate().unwrap_err();

        let output = JsonOutput::from_form(&form);
        assert_eq!(output.status, "error");
        assert!(output.error.is_some());
        assert!(output.result.is_none());
    }

    #[test]
    fn test_json_serializes_custom_divisor() {
        let mut form = FormState::default();
        form.select_preset(DivisorPreset::Custom);
        form.set_custom_divisor("5500");

        let value = serde_json::to_value(JsonOutput::from_form(&form)).unwrap();
        assert_eq!(value["inputs"]["divisor_preset"], "custom");
        assert_eq!(value["inputs"]["custom_divisor"], "5500");
        assert!(value["result"].is_null());
    }

    #[test]
    fn test_json_omits_custom_divisor_for_presets() {
        let value = serde_json::to_value(JsonOutput::from_form(&FormState::default())).unwrap();
        assert!(value["inputs"].get("custom_divisor").is_none());
    }

    #[test]
    fn test_render_form_shows_outputs_and_notice() {
        colored::control::set_override(false);

        let mut form = FormState::default();
        form.apply_example().unwrap();
        let text = render_form(&form);

        assert!(text.contains("0.060 m³"));
        assert!(text.contains("10.0 kg"));
        assert!(text.contains("Divisor:"));
        assert!(text.contains("6000"));
        assert!(text.contains(NOTICE));
    }

    #[test]
    fn test_render_form_aligns_rows() {
        colored::control::set_override(false);

        let text = render_form(&FormState::default());
        assert!(text.contains("  Quantity:             1\n"));
        assert!(text.contains("  Volume (CBM):         —\n"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_form_shows_error() {
        colored::control::set_override(false);

        let mut form = FormState::default();
        form.calculate().unwrap_err();
        let text = render_form(&form);

        assert!(text.contains(&form.error().to_string()));
        assert!(text.contains("Width (cm):"));
    }

    #[test]
    fn test_render_form_custom_divisor() {
        colored::control::set_override(false);

        let mut form = FormState::default();
        form.select_preset(DivisorPreset::Custom);
        assert!(render_form(&form).contains("custom (—)"));

        form.set_custom_divisor("4500");
        assert!(render_form(&form).contains("custom (4500)"));
    }
}
