//! Configuration for the calculator.
//!
//! - [`file`] - the persistent `config.toml` layer
//! - [`OutputOptions`] - resolved output settings handed to the renderers

pub mod file;

pub use file::FileConfig;

/// Resolved output settings (CLI > config file > default).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    /// Print a single JSON document instead of the human-readable report
    pub json: bool,

    /// Colorize human-readable output
    pub color: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_options_default() {
        let opts = OutputOptions::default();
        assert!(!opts.json);
        assert!(opts.color);
    }
}
