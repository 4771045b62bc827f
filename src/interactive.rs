//! Interactive terminal session over a [`FormState`].
//!
//! The session is a menu loop built with [`inquire`]. Every menu entry maps
//! to one [`Command`]; prompting and applying are kept apart so the command
//! handling can be tested without a terminal.

use std::fmt;
use std::ops::ControlFlow;

use anyhow::Result;
use colored::Colorize;
use inquire::{InquireError, Select, Text};
use tracing::debug;

use crate::divisor::DivisorPreset;
use crate::form::{Field, FormState};
use crate::output::render_form;

/// A single user action on the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the raw text of a field
    SetField(Field, String),

    /// Change the divisor preset selector
    SelectPreset(DivisorPreset),

    /// Type into the custom divisor field
    SetCustomDivisor(String),

    /// Run validation and computation
    Calculate,

    /// Restore the default state
    Reset,

    /// Fill in the example box and calculate
    Example,

    /// Leave the session
    Quit,
}

/// Apply `command` to `form`.
///
/// Returns [`ControlFlow::Break`] for [`Command::Quit`]. Calculation errors
/// are not propagated; they end up in the form's error slot.
pub fn dispatch(form: &mut FormState, command: Command) -> ControlFlow<()> {
    debug!(?command, "dispatching command");

    match command {
        Command::SetField(field, text) => form.set_field(field, text),
        Command::SelectPreset(preset) => form.select_preset(preset),
        Command::SetCustomDivisor(text) => {
            form.set_custom_divisor(text);
        }
        Command::Calculate => {
            let _ = form.calculate();
        }
        Command::Reset => form.reset(),
        Command::Example => {
            let _ = form.apply_example();
        }
        Command::Quit => return ControlFlow::Break(()),
    }

    ControlFlow::Continue(())
}

/// Entries of the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuItem {
    Edit(Field),
    Divisor,
    CustomDivisor,
    Calculate,
    Reset,
    Example,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit(field) => write!(f, "Set {}", field.label().to_lowercase()),
            Self::Divisor => f.write_str("Choose divisor preset"),
            Self::CustomDivisor => f.write_str("Set custom divisor"),
            Self::Calculate => f.write_str("Calculate"),
            Self::Reset => f.write_str("Reset"),
            Self::Example => f.write_str("Example (50 × 40 × 30 cm)"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// Menu entries for the current state. The custom divisor entry only shows
/// while its field is enabled.
fn menu_items(form: &FormState) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::Calculate];
    items.extend(Field::ALL.map(MenuItem::Edit));
    items.push(MenuItem::Divisor);
    if form.custom_divisor().is_enabled() {
        items.push(MenuItem::CustomDivisor);
    }
    items.extend([MenuItem::Example, MenuItem::Reset, MenuItem::Quit]);
    items
}

/// Ask the user for the next command.
///
/// Returns `Ok(None)` when a follow-up prompt is cancelled with Esc, so the
/// caller simply shows the menu again. Ctrl-C on any prompt becomes
/// [`Command::Quit`].
fn prompt_command(form: &FormState) -> Result<Option<Command>> {
    let item = match Select::new("What next?", menu_items(form)).prompt() {
        Ok(item) => item,
        Err(InquireError::OperationCanceled) => return Ok(None),
        Err(InquireError::OperationInterrupted) => return Ok(Some(Command::Quit)),
        Err(e) => return Err(e.into()),
    };

    let answer = match item {
        MenuItem::Edit(field) => Text::new(&format!("{field}:"))
            .with_initial_value(form.field(field))
            .prompt()
            .map(|text| Command::SetField(field, text)),
        MenuItem::Divisor => {
            let start = DivisorPreset::ALL
                .iter()
                .position(|p| *p == form.preset())
                .unwrap_or_default();
            Select::new("Divisor preset:", DivisorPreset::ALL.to_vec())
                .with_starting_cursor(start)
                .prompt()
                .map(Command::SelectPreset)
        }
        MenuItem::CustomDivisor => Text::new("Custom divisor:")
            .with_initial_value(form.custom_divisor().value())
            .prompt()
            .map(Command::SetCustomDivisor),
        MenuItem::Calculate => Ok(Command::Calculate),
        MenuItem::Reset => Ok(Command::Reset),
        MenuItem::Example => Ok(Command::Example),
        MenuItem::Quit => Ok(Command::Quit),
    };

    match answer {
        Ok(command) => Ok(Some(command)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(InquireError::OperationInterrupted) => Ok(Some(Command::Quit)),
        Err(e) => Err(e.into()),
    }
}

/// Run the menu loop until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven (e.g. stdin is not a
/// TTY).
pub fn run_session(form: &mut FormState) -> Result<()> {
    println!("{}", "📐 CBM & dimensional weight calculator".bold());

    loop {
        println!("\n{}", render_form(form));

        let Some(command) = prompt_command(form)? else {
            continue;
        };

        if dispatch(form, command).is_break() {
            println!("{}", "👋 Bye!".green());
            return Ok(());
        }
    }
}
