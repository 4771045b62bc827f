//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and subcommands
//! using [clap](https://docs.rs/clap/). Helper methods on [`Cli`] accept a
//! [`FileConfig`] reference so that config-file values act as defaults that
//! CLI arguments can override (layered config).

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use dimweight::config::{FileConfig, OutputOptions};
use dimweight::divisor::DivisorPreset;
use dimweight::form::{Field, FormState};

/// Arguments of the one-shot `calc` subcommand.
///
/// Values are taken as raw text and go through the same parsing and
/// validation as the interactive form, so `abc` or `0` produce the form's
/// error messages rather than a clap error.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Box width in centimeters
    #[arg(allow_negative_numbers = true)]
    width: String,

    /// Box length in centimeters
    #[arg(allow_negative_numbers = true)]
    length: String,

    /// Box height in centimeters
    #[arg(allow_negative_numbers = true)]
    height: String,

    /// Number of identical boxes
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    quantity: String,

    /// Divisor preset for this calculation (5000, 6000, custom)
    ///
    /// Defaults to the configured default preset. Passing `--custom` alone
    /// implies `custom`.
    #[arg(short, long, value_enum)]
    divisor: Option<DivisorPreset>,

    /// Custom divisor value, used with `--divisor custom`
    #[arg(long, allow_negative_numbers = true)]
    custom: Option<String>,
}

impl CalcArgs {
    /// Fill `form` with these arguments, the way a user would type them.
    ///
    /// # Errors
    ///
    /// Fails if `--custom` is combined with a numeric `--divisor` preset.
    pub fn apply(&self, form: &mut FormState) -> Result<()> {
        form.set_field(Field::Width, self.width.as_str());
        form.set_field(Field::Length, self.length.as_str());
        form.set_field(Field::Height, self.height.as_str());
        form.set_field(Field::Quantity, self.quantity.as_str());

        let preset = match (self.divisor, &self.custom) {
            (Some(preset), Some(_)) if !preset.is_custom() => {
                bail!("--custom can only be used with --divisor custom (got --divisor {preset})")
            }
            (None, Some(_)) => Some(DivisorPreset::Custom),
            (preset, _) => preset,
        };

        if let Some(preset) = preset {
            form.select_preset(preset);
        }
        if let Some(custom) = &self.custom {
            form.set_custom_divisor(custom.as_str());
        }

        Ok(())
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate volume and dimensional weight for one set of values
    Calc(CalcArgs),

    /// Calculate the 50 × 40 × 30 cm example box
    Example,

    /// Open the interactive form (default when no subcommand is given)
    Interactive,

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values
/// act as defaults when the corresponding CLI argument is not provided.
#[derive(Parser, Debug)]
#[command(name = "dimweight")]
#[command(about = "Calculate shipping volume (CBM) and dimensional weight from box dimensions")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (defaults to the interactive form)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Default divisor preset used by reset and example (5000, 6000)
    #[arg(long, global = true, value_parser = parse_default_preset)]
    default_divisor: Option<DivisorPreset>,

    /// Output the result as a single JSON object for scripting/piping
    ///
    /// Incompatible with the interactive form.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log every form action to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    /// Whether `--json` was passed on the command line.
    #[must_use]
    pub const fn json_flag(&self) -> bool {
        self.json
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Resolve output options from CLI args and config file.
    ///
    /// Flags only ever switch behavior on (`--json`) or off (`--no-color`);
    /// otherwise the config file value applies, then the default.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        let defaults = OutputOptions::default();

        OutputOptions {
            json: self.json || config.output.json.unwrap_or(defaults.json),
            color: !self.no_color && config.output.color.unwrap_or(defaults.color),
        }
    }

    /// Resolve the default divisor preset.
    ///
    /// Priority: CLI argument > config file > built-in default (`6000`).
    #[must_use]
    pub fn default_preset(&self, config: &FileConfig) -> DivisorPreset {
        self.default_divisor
            .or_else(|| config.form.preset())
            .unwrap_or_default()
    }
}

/// Parse `--default-divisor`, which only takes the numeric presets.
fn parse_default_preset(value: &str) -> Result<DivisorPreset, String> {
    match DivisorPreset::from_str(value, true)? {
        DivisorPreset::Custom => {
            Err("custom cannot be the default divisor; use 5000 or 6000".to_string())
        }
        preset => Ok(preset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimweight::config::file::{FileFormConfig, FileOutputConfig};

    fn config_with_divisor(divisor: &str) -> FileConfig {
        FileConfig {
            form: FileFormConfig {
                divisor: Some(divisor.to_string()),
            },
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["dimweight"]);
        let config = FileConfig::default();

        assert!(args.subcommand.is_none());
        assert_eq!(args.default_preset(&config), DivisorPreset::Div6000);
        assert_eq!(args.output_options(&config), OutputOptions::default());
        assert!(!args.verbose());
    }

    #[test]
    fn test_calc_subcommand() {
        let args = Cli::parse_from(["dimweight", "calc", "50", "40", "30", "-q", "2"]);
        let Some(Commands::Calc(calc)) = args.subcommand else {
            panic!("expected calc subcommand");
        };

        let mut form = FormState::default();
        calc.apply(&mut form).unwrap();

        assert_eq!(form.field(Field::Width), "50");
        assert_eq!(form.field(Field::Quantity), "2");
        assert_eq!(form.preset(), DivisorPreset::Div6000);
        assert!((form.calculate().unwrap().volume_cm3 - 120_000.0).abs() < f64::EPSILON);
        assert_eq!(form.dimensional_weight(), "20.0 kg");
    }

    #[test]
    fn test_calc_accepts_negative_and_garbage_values() {
        let args = Cli::parse_from(["dimweight", "calc", "-50", "abc", "30"]);
        let Some(Commands::Calc(calc)) = args.subcommand else {
            panic!("expected calc subcommand");
        };

        let mut form = FormState::default();
        calc.apply(&mut form).unwrap();
        assert_eq!(form.field(Field::Width), "-50");
        assert!(form.calculate().is_err());
    }

    #[test]
    fn test_calc_divisor_preset() {
        let args = Cli::parse_from(["dimweight", "calc", "50", "40", "30", "-d", "5000"]);
        let Some(Commands::Calc(calc)) = args.subcommand else {
            panic!("expected calc subcommand");
        };

        let mut form = FormState::default();
        calc.apply(&mut form).unwrap();
        form.calculate().unwrap();
        assert_eq!(form.dimensional_weight(), "12.0 kg");
    }

    #[test]
    fn test_calc_custom_implies_custom_preset() {
        let args = Cli::parse_from(["dimweight", "calc", "50", "40", "30", "--custom", "4000"]);
        let Some(Commands::Calc(calc)) = args.subcommand else {
            panic!("expected calc subcommand");
        };

        let mut form = FormState::default();
        calc.apply(&mut form).unwrap();
        assert_eq!(form.preset(), DivisorPreset::Custom);
        assert_eq!(form.custom_divisor().value(), "4000");
        form.calculate().unwrap();
        assert_eq!(form.dimensional_weight(), "15.0 kg");
    }

    #[test]
    fn test_calc_custom_with_numeric_preset_is_rejected() {
        let args = Cli::parse_from([
            "dimweight", "calc", "50", "40", "30", "-d", "6000", "--custom", "4000",
        ]);
        let Some(Commands::Calc(calc)) = args.subcommand else {
            panic!("expected calc subcommand");
        };

        assert!(calc.apply(&mut FormState::default()).is_err());
    }

    #[test]
    fn test_invalid_divisor_preset_is_a_parse_error() {
        assert!(Cli::try_parse_from(["dimweight", "calc", "1", "1", "1", "-d", "4000"]).is_err());
    }

    #[test]
    fn test_default_preset_layering() {
        let args = Cli::parse_from(["dimweight"]);
        assert_eq!(
            args.default_preset(&config_with_divisor("5000")),
            DivisorPreset::Div5000
        );

        let args = Cli::parse_from(["dimweight", "--default-divisor", "6000"]);
        assert_eq!(
            args.default_preset(&config_with_divisor("5000")),
            DivisorPreset::Div6000
        );
    }

    #[test]
    fn test_default_preset_ignores_unknown_config_value() {
        let args = Cli::parse_from(["dimweight"]);
        assert_eq!(
            args.default_preset(&config_with_divisor("bogus")),
            DivisorPreset::Div6000
        );
    }

    #[test]
    fn test_default_divisor_rejects_custom() {
        assert!(Cli::try_parse_from(["dimweight", "--default-divisor", "custom"]).is_err());
        assert!(Cli::try_parse_from(["dimweight", "--default-divisor", "5000"]).is_ok());
    }

    #[test]
    fn test_default_preset_ignores_custom_in_config() {
        let args = Cli::parse_from(["dimweight"]);
        assert_eq!(
            args.default_preset(&config_with_divisor("custom")),
            DivisorPreset::Div6000
        );
    }

    #[test]
    fn test_output_options_layering() {
        let config = FileConfig {
            output: FileOutputConfig {
                json: Some(true),
                color: Some(true),
            },
            ..FileConfig::default()
        };

        let args = Cli::parse_from(["dimweight", "--no-color"]);
        let opts = args.output_options(&config);
        assert!(opts.json);
        assert!(!opts.color);
        assert!(!args.json_flag());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Cli::parse_from(["dimweight", "example", "--json", "-v"]);
        assert!(matches!(args.subcommand, Some(Commands::Example)));
        assert!(args.json_flag());
        assert!(args.verbose());
    }

    #[test]
    fn test_config_subcommands() {
        let args = Cli::parse_from(["dimweight", "config", "path"]);
        assert!(matches!(
            args.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Path
            })
        ));
    }
}
