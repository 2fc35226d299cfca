//! Output formatting for CLI commands

use serde::Serialize;

use super::router::Reply;
pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints structured data as one line of JSON
    ///
    /// Callers render their own text form; this is only reached with `--format json`.
    pub fn data<T: Serialize>(&self, data: &T) {
        if let Ok(json) = serde_json::to_string(data) {
            println!("{}", json);
        }
    }

    /// Prints a command reply
    pub fn reply(&self, reply: &Reply) {
        match self.format {
            OutputFormat::Text => println!("{}", reply.to_text()),
            OutputFormat::Json => println!("{}", reply.to_json()),
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
