//! # dimweight
//!
//! A small CLI form that turns box dimensions and a quantity into a shipping
//! volume (CBM) and a dimensional (volumetric) weight.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive form
//! dimweight
//!
//! # One-shot calculation: 50 × 40 × 30 cm, 2 boxes, divisor 5000
//! dimweight calc 50 40 30 -q 2 -d 5000
//!
//! # Custom divisor, JSON output
//! dimweight calc 50 40 30 --custom 4000 --json
//! ```

mod cli;

use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dimweight::{
    DivisorPreset, OutputOptions,
    config::FileConfig,
    form::FormState,
    interactive::run_session,
    output::{JsonOutput, render_form},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Entry point for the dimweight application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any error to stderr before exiting with a non-zero status code.
fn main() -> ExitCode {
    match inner_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, layers the config file under them, then either runs a
/// one-shot calculation or the interactive form. A rejected calculation is
/// reported through the form itself and turns into exit status 1.
///
/// # Errors
///
/// Returns errors from config file handling, argument conflicts, the
/// interactive prompts, or JSON serialization.
fn inner_main() -> Result<ExitCode> {
    let args = Cli::parse();

    init_tracing(args.verbose(), args.json_flag());

    let succeeded = match &args.subcommand {
        Some(Commands::Config { command }) => {
            handle_config_command(command)?;
            true
        }
        Some(Commands::Calc(calc)) => {
            let (mut form, output) = prepare_form(&args);
            calc.apply(&mut form)?;
            let outcome = form.calculate();
            print_form(&form, output)?;
            outcome.is_ok()
        }
        Some(Commands::Example) => {
            let (mut form, output) = prepare_form(&args);
            let outcome = form.apply_example();
            print_form(&form, output)?;
            outcome.is_ok()
        }
        None | Some(Commands::Interactive) => {
            if args.json_flag() {
                bail!("--json cannot be used with the interactive form");
            }
            let (mut form, _) = prepare_form(&args);
            run_session(&mut form)?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ── Helper functions ────────────────────────────────────────────────────

/// Layer the config file under the arguments and build the starting form.
///
/// Also switches colored output off globally when the resolved options say so.
fn prepare_form(args: &Cli) -> (FormState, OutputOptions) {
    let file_config = load_config(args.json_flag());
    let output = args.output_options(&file_config);

    if !output.color {
        colored::control::set_override(false);
    }

    let form = FormState::new(args.default_preset(&file_config));
    debug!(default_preset = %form.default_preset(), "form initialised");

    (form, output)
}

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, everything
/// from this crate with `--verbose`, and nothing in JSON mode so stdout stays
/// a single document.
fn init_tracing(verbose: bool, json_mode: bool) {
    let fallback = if verbose {
        "dimweight=debug"
    } else if json_mode {
        "off"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print the form snapshot in JSON or human-readable form.
fn print_form(form: &FormState, output: OutputOptions) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(&JsonOutput::from_form(form))?);
    } else {
        print!("{}", render_form(form));
    }
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dimweight configuration
# All values shown are their defaults. Uncomment and change as needed.

[form]
# Divisor preset selected on reset and by the example (5000 or 6000)
# divisor = "6000"

[output]
# Print a single JSON document instead of the human-readable report
# json = false

# Colorize human-readable output
# color = true
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let defaults = OutputOptions::default();

    format!(
        "\
[form]
divisor = {divisor}

[output]
json    = {json}
color   = {color}",
        divisor = show_str(
            config.form.divisor.as_deref(),
            DivisorPreset::default().as_str()
        ),
        json = show_bool(config.output.json, defaults.json),
        color = show_bool(config.output.color, defaults.color),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}
