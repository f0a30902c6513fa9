//! Diagnostics context shared by the driver and the runner.
//!
//! Fatal errors travel up as `Err` values and are rendered once by the
//! driver; warnings are handed to [`Diagnostics::warn`] while the program
//! keeps running.

use std::rc::Rc;

use colored::Colorize;
use log::warn;

use crate::get_line_at_position;

use super::errors::{Error, ErrorTip, Stage};

#[derive(Debug)]
pub struct Diagnostics {
    file: Rc<String>,
    source: String,
    warnings: Vec<Error>,
    echo_warnings: bool,
}

impl Diagnostics {
    pub fn new(file: &str, source: &str) -> Self {
        Diagnostics {
            file: Rc::new(file.to_string()),
            source: source.to_string(),
            warnings: vec![],
            echo_warnings: true,
        }
    }

    /// A context that records warnings without printing them.
    pub fn silent(file: &str, source: &str) -> Self {
        Diagnostics {
            echo_warnings: false,
            ..Diagnostics::new(file, source)
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    pub fn warn(&mut self, warning: Error) {
        warn!("{}", warning);
        if self.echo_warnings {
            eprint!("{}", self.render(&warning));
        }
        self.warnings.push(warning);
    }

    /// Renders `error` with the offending source line and a caret under its column.
    ///
    /// ```text
    /// Runtime Error: VariableNotDeclared (Variable `y` not declared)
    ///   --> main.sp:2:5
    ///   |
    /// 2 | x = y + 1
    ///   |     ^
    /// ```
    pub fn render(&self, error: &Error) -> String {
        let stage = error.get_stage();
        let heading = stage.to_string();
        let heading = if stage == Stage::Warning {
            heading.yellow().bold()
        } else {
            heading.red().bold()
        };

        let mut rendered = match error.get_tip() {
            ErrorTip::None => format!("{}: {}\n", heading, error.get_error_name().bold()),
            tip => format!("{}: {} ({})\n", heading, error.get_error_name().bold(), tip),
        };

        let position = error.get_position();
        rendered.push_str(&format!("{}\n", format!("  --> {}", position).bright_blue()));

        if let Some(line_text) = get_line_at_position(&self.source, position.line) {
            let line_number = position.line.to_string();
            let padding = line_number.len() + 2;

            let gutter = format!("{:>padding$}", "|");

            rendered.push_str(&format!("{}\n", gutter.bright_blue()));
            rendered.push_str(&format!(
                "{} {} {}\n",
                line_number.bright_blue(),
                "|".bright_blue(),
                line_text
            ));
            rendered.push_str(&format!(
                "{} {}{}\n",
                gutter.bright_blue(),
                " ".repeat(position.column.saturating_sub(1)),
                "^".red().bold()
            ));
        }

        rendered
    }
}
