//! Divisor presets and divisor resolution.
//!
//! Carriers convert volume into weight by dividing cm³ by a fixed divisor.
//! The form offers two common presets and a free "custom" entry.

use std::fmt;

use clap::ValueEnum;

use crate::calc::parse_number;

/// Value of the divisor preset selector.
///
/// The numeric presets carry their divisor; [`DivisorPreset::Custom`] defers
/// to the custom divisor field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum DivisorPreset {
    /// 5000 cm³/kg, common for express couriers
    #[value(name = "5000")]
    Div5000,

    /// 6000 cm³/kg, common for air freight
    #[default]
    #[value(name = "6000")]
    Div6000,

    /// User supplied divisor from the custom field
    Custom,
}

impl DivisorPreset {
    /// Every selector value, in menu order.
    pub const ALL: [Self; 3] = [Self::Div5000, Self::Div6000, Self::Custom];

    /// Divisor carried by a numeric preset, `None` for [`DivisorPreset::Custom`].
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Div5000 => Some(5000.0),
            Self::Div6000 => Some(6000.0),
            Self::Custom => None,
        }
    }

    #[must_use]
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }

    /// Selector value as written in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Div5000 => "5000",
            Self::Div6000 => "6000",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DivisorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom divisor input: its text and whether it accepts edits.
///
/// The field is only enabled while the selector is on
/// [`DivisorPreset::Custom`]; leaving `custom` empties it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CustomDivisorField {
    value: String,
    enabled: bool,
}

impl CustomDivisorField {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the field text. Ignored while the field is disabled.
    ///
    /// Returns whether the edit was accepted.
    pub fn set_value(&mut self, text: impl Into<String>) -> bool {
        if !self.enabled {
            return false;
        }
        self.value = text.into();
        true
    }

    /// Follow a change of the preset selector.
    pub fn sync_with(&mut self, preset: DivisorPreset) {
        self.enabled = preset.is_custom();
        if !self.enabled {
            self.value.clear();
        }
    }

    /// Empty and disable the field.
    pub fn disable(&mut self) {
        self.value.clear();
        self.enabled = false;
    }
}

/// Effective divisor for a selector value and the custom field text.
///
/// For `custom` the field text is parsed like any other form input, so an
/// empty field resolves to `0` and garbage to `NaN`; validation rejects both.
#[must_use]
pub fn resolve_divisor(preset: DivisorPreset, custom: &str) -> f64 {
    preset.value().unwrap_or_else(|| parse_number(custom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_is_6000() {
        assert_eq!(DivisorPreset::default(), DivisorPreset::Div6000);
        assert_eq!(DivisorPreset::default().value(), Some(6000.0));
    }

    #[test]
    fn test_preset_values() {
        assert_eq!(DivisorPreset::Div5000.value(), Some(5000.0));
        assert_eq!(DivisorPreset::Custom.value(), None);
        assert!(DivisorPreset::Custom.is_custom());
        assert!(!DivisorPreset::Div5000.is_custom());
    }

    #[test]
    fn test_preset_value_enum_names() {
        assert_eq!(
            DivisorPreset::from_str("5000", true),
            Ok(DivisorPreset::Div5000)
        );
        assert_eq!(
            DivisorPreset::from_str("6000", true),
            Ok(DivisorPreset::Div6000)
        );
        assert_eq!(
            DivisorPreset::from_str("CUSTOM", true),
            Ok(DivisorPreset::Custom)
        );
        assert!(DivisorPreset::from_str("4000", true).is_err());
    }

    #[test]
    fn test_display_matches_value_names() {
        for preset in DivisorPreset::ALL {
            assert_eq!(
                DivisorPreset::from_str(&preset.to_string(), false),
                Ok(preset)
            );
        }
    }

    #[test]
    fn test_resolve_numeric_preset_ignores_custom_text() {
        assert!((resolve_divisor(DivisorPreset::Div5000, "1234") - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_custom() {
        assert!((resolve_divisor(DivisorPreset::Custom, "5500") - 5500.0).abs() < f64::EPSILON);
        assert!(resolve_divisor(DivisorPreset::Custom, "").abs() < f64::EPSILON);
        assert!(resolve_divisor(DivisorPreset::Custom, "abc").is_nan());
    }

    #[test]
    fn test_custom_field_follows_selector() {
        let mut field = CustomDivisorField::default();
        assert!(!field.is_enabled());
        assert!(!field.set_value("5500"));
        assert_eq!(field.value(), "");

        field.sync_with(DivisorPreset::Custom);
        assert!(field.is_enabled());
        assert!(field.set_value("5500"));
        assert_eq!(field.value(), "5500");

        field.sync_with(DivisorPreset::Div6000);
        assert!(!field.is_enabled());
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_custom_field_keeps_value_when_reselecting_custom() {
        let mut field = CustomDivisorField::default();
        field.sync_with(DivisorPreset::Custom);
        field.set_value("4500");

        field.sync_with(DivisorPreset::Custom);
        assert_eq!(field.value(), "4500");
    }
}
