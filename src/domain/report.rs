use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    NoChartsChanged,
    Match,
    Mismatch,
}

impl CheckOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CheckOutcome::NoChartsChanged => {
                "No charts were changed and no version bumps were found. Exiting..."
            }
            CheckOutcome::Match => "Charts were changed and version bumps were found. All good!",
            CheckOutcome::Mismatch => {
                "Error: Number of charts changed does not match the number of version bumps."
            }
        }
    }

    /// A mismatch only fails the step when the caller opts in.
    pub fn exit_code(&self, fail_on_mismatch: bool) -> i32 {
        match self {
            CheckOutcome::Mismatch if fail_on_mismatch => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub files_changed: Vec<String>,
    pub charts_dirs_changed: Vec<String>,
    pub num_charts_changed: usize,
    pub num_version_bumps: usize,
}

impl CheckReport {
    pub fn outcome(&self) -> CheckOutcome {
        match (self.num_charts_changed, self.num_version_bumps) {
            (0, 0) => CheckOutcome::NoChartsChanged,
            (charts, bumps) if charts == bumps => CheckOutcome::Match,
            _ => CheckOutcome::Mismatch,
        }
    }

    /// Step outputs exposed to the calling workflow on a mismatch.
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        match self.outcome() {
            CheckOutcome::Mismatch => vec![
                ("charts_dirs_changed", format_list(&self.charts_dirs_changed)),
                ("num_charts_changed", self.num_charts_changed.to_string()),
            ],
            _ => Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Files Changed: {}", format_list(&self.files_changed));
        let _ = writeln!(
            out,
            "Charts Dirs Changed: {}",
            format_list(&self.charts_dirs_changed)
        );
        let _ = writeln!(out, "Num Charts Changed: {}", self.num_charts_changed);
        let _ = writeln!(out, "Num Version Bumps: {}", self.num_version_bumps);
        let _ = writeln!(out, "{}", self.outcome().message());
        for (name, value) in self.outputs() {
            let _ = writeln!(out, "::set-output name={name}::{value}");
        }
        out
    }

    pub fn append_outputs(&self, output_file: &Path) -> AppResult<()> {
        let outputs = self.outputs();
        if outputs.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(output_file)?;
        for (name, value) in outputs {
            writeln!(file, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Renders `['a', 'b']`, the shape CI consumers of this check already parse.
pub fn format_list(items: &[String]) -> String {
    let quoted = items.iter().map(|item| quote(item)).collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}

/// Single quotes unless the text holds a `'` and no `"`, escaping the rest.
fn quote(item: &str) -> String {
    let delimiter = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(delimiter);
    for ch in item.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}
