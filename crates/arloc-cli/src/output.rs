//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! human renderings for result trees, flat entries and rule tables.

use crate::cli::OutputFormat;
use crate::error::Result;
use arloc_core::{FlatEntries, RuleTable};
use arloc_core::rules::UnboundToken;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format flat dotted entries
    fn format_entries(&self, entries: &FlatEntries) -> Result<String>;

    /// Format a rule table
    fn format_rule_table(&self, rules: &RuleTable) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Result trees read best as YAML, the usual locale file format
            OutputFormat::Human => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_entries(&self, entries: &FlatEntries) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_entries_human(entries)),
            _ => self.format(entries),
        }
    }

    fn format_rule_table(&self, rules: &RuleTable) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_rule_table_human(rules)),
            _ => self.format(&rules.to_document()),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.finish_block(&formatted)
    }

    /// Write flat dotted entries
    pub fn entries(&mut self, entries: &FlatEntries) -> Result<()> {
        let formatted = self.format.format_entries(entries)?;
        self.finish_block(&formatted)
    }

    /// Write a rule table
    pub fn rule_table(&mut self, rules: &RuleTable) -> Result<()> {
        let formatted = self.format.format_rule_table(rules)?;
        self.finish_block(&formatted)
    }

    /// Write unbound-token findings from a rule lint
    pub fn unbound_tokens(&mut self, findings: &[UnboundToken]) -> Result<()> {
        if self.format != OutputFormat::Human {
            let as_json: Vec<Value> = findings
                .iter()
                .map(|f| serde_json::json!({"pattern": f.pattern, "template": f.template, "token": f.token}))
                .collect();
            return self.data(&as_json);
        }

        for finding in findings {
            self.warning(&format!(
                "'{}' uses %{{{}}} in '{}' but never binds it",
                finding.pattern, finding.token, finding.template
            ))?;
        }
        Ok(())
    }

    /// Check if verbose output should be shown
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }

    /// Machine formats end with exactly one newline
    fn finish_block(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        let rendered = render_table(headers, &rows);
        let mut lines = rendered.lines();
        if let Some(header_row) = lines.next() {
            if self.use_color {
                self.writeln(&header_row.bold().to_string())?;
            } else {
                self.writeln(header_row)?;
            }
        }
        for line in lines {
            self.writeln(line)?;
        }

        Ok(())
    }
}

/// Render rows under headers with aligned columns
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    // Calculate column widths
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| match widths.get(i) {
                Some(width) => format!("{:width$}", cell, width = *width),
                None => cell.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let mut output = render_row(headers.to_vec());
    output.push('\n');

    let separator = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");
    output.push_str(&separator);
    output.push('\n');

    for row in rows {
        output.push_str(&render_row(row.iter().map(String::as_str).collect()));
        output.push('\n');
    }

    output
}

/// Format flat entries as `key = value` lines
fn format_entries_human(entries: &FlatEntries) -> String {
    let width = entries.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    entries
        .iter()
        .map(|(key, value)| format!("{:width$} = {}", key, format_value_compact(value), width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a rule table, one row per template
fn format_rule_table_human(rules: &RuleTable) -> String {
    let rows: Vec<Vec<String>> = rules
        .iter()
        .flat_map(|(pattern, target)| {
            target.templates().iter().map(move |template| {
                vec![
                    pattern.to_string(),
                    template.key().to_string(),
                    template.transform().map(|t| t.name().to_string()).unwrap_or_default(),
                ]
            })
        })
        .collect();

    render_table(&["PATTERN", "TEMPLATE", "TRANSFORM"], &rows)
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            if arr.len() <= 3 {
                format!(
                    "[{}]",
                    arr.iter().map(format_value_compact).collect::<Vec<_>>().join(", ")
                )
            } else {
                format!("[{} items]", arr.len())
            }
        }
        Value::Object(obj) => {
            if obj.len() <= 2 {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", obj.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
