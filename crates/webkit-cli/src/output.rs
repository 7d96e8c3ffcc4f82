//! Output management and formatting.
//!
//! [`OutputManager`] is the terminal implementation of the core `Printer`
//! port. All writes go through one mutex-guarded writer so lines from the
//! engine and from commands never interleave.

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use std::time::Duration;

use console::measure_text_width;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use webkit_core::application::ports::Printer;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Flag beats config; Auto resolves to Human on a TTY, Plain otherwise.
        let requested = match args.output_format {
            OutputFormat::Auto => config.output.format,
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Bold cyan header line.
    pub fn header(&self, text: &str) {
        if self.suppressed() {
            return;
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.write_line(&line);
    }

    /// Machine-readable output. Written even in quiet mode.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut writer = self.lock();
        writeln!(writer, "{text}")?;
        writer.flush()
    }

    /// Spinner on stderr for long steps, hidden unless output is human.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.suppressed()
            || self.resolved_format != OutputFormat::Human
            || !io::stderr().is_terminal()
        {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Human-oriented lines are dropped in quiet and JSON modes.
    fn suppressed(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, line: &str) {
        let mut writer = self.lock();
        // A closed stdout (e.g. piped into `head`) is not worth failing over.
        let _ = writeln!(writer, "{line}");
        let _ = writer.flush();
    }

    fn symbol_line(&self, symbol: &str, msg: &str, paint: fn(&str) -> String) {
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            paint(&format!("{symbol} {msg}"))
        };
        self.write_line(&line);
    }
}

impl Printer for OutputManager {
    fn info(&self, msg: &str) {
        if self.suppressed() {
            return;
        }
        self.symbol_line("\u{2139}", msg, |s| s.blue().to_string()); // ℹ
    }

    fn success(&self, msg: &str) {
        if self.suppressed() {
            return;
        }
        self.symbol_line("\u{2713}", msg, |s| s.green().to_string()); // ✓
    }

    fn warn(&self, msg: &str) {
        if self.suppressed() {
            return;
        }
        self.symbol_line("\u{26a0}", msg, |s| s.yellow().to_string()); // ⚠
    }

    /// Not suppressed in quiet mode; errors must always be visible.
    fn error(&self, msg: &str) {
        self.symbol_line("\u{2717}", msg, |s| s.red().bold().to_string()); // ✗
    }

    fn println(&self, msg: &str) {
        if self.suppressed() {
            return;
        }
        self.write_line(msg);
    }

    fn printf(&self, args: fmt::Arguments<'_>) {
        if self.suppressed() {
            return;
        }
        let mut writer = self.lock();
        let _ = writer.write_fmt(args);
        let _ = writer.flush();
    }

    fn list(&self, items: &[String]) {
        if self.suppressed() {
            return;
        }
        for item in items {
            self.write_line(&format!("  \u{2022} {item}")); // •
        }
    }

    fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if self.suppressed() {
            return;
        }
        for line in render_table(headers, rows, !self.no_color) {
            self.write_line(&line);
        }
    }

    fn tree(&self, root: &str, children: &[String]) {
        if self.suppressed() {
            return;
        }
        self.write_line(root);
        for (i, child) in children.iter().enumerate() {
            let branch = if i + 1 == children.len() {
                "\u{2514}\u{2500}\u{2500}" // └──
            } else {
                "\u{251c}\u{2500}\u{2500}" // ├──
            };
            self.write_line(&format!("{branch} {child}"));
        }
    }

    fn line_break(&self) {
        if self.suppressed() {
            return;
        }
        self.write_line("");
    }

    fn set_writer(&self, writer: Box<dyn Write + Send>) {
        *self.lock() = writer;
    }
}

/// Left-aligned columns separated by two spaces. Widths ignore ANSI codes.
fn render_table(headers: &[&str], rows: &[Vec<String>], bold_header: bool) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = measure_text_width(cell);
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header = format_row(&widths, headers.iter().copied());
    lines.push(if bold_header {
        header.bold().to_string()
    } else {
        header
    });
    for row in rows {
        lines.push(format_row(&widths, row.iter().map(String::as_str)));
    }
    lines
}

fn format_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(0);
            let pad = width.saturating_sub(measure_text_width(cell));
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AppConfig;

    /// Shared buffer so tests can read what the manager wrote.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn make_manager(quiet: bool, format: OutputFormat) -> (OutputManager, Buffer) {
        let args = GlobalArgs {
            quiet,
            no_color: true,
            output_format: format,
            ..GlobalArgs::default()
        };
        let out = OutputManager::new(&args, &AppConfig::default());
        let buf = Buffer::default();
        out.set_writer(Box::new(buf.clone()));
        (out, buf)
    }

    #[test]
    fn plain_lines_carry_symbols() {
        let (out, buf) = make_manager(false, OutputFormat::Plain);
        out.success("Created package.json");
        out.warn("Skipped README.md (already exists)");
        assert_eq!(
            buf.text(),
            "\u{2713} Created package.json\n\u{26a0} Skipped README.md (already exists)\n"
        );
    }

    #[test]
    fn quiet_suppresses_all_but_errors() {
        let (out, buf) = make_manager(true, OutputFormat::Plain);
        out.info("hello");
        out.println("hello");
        out.error("something went wrong");
        assert_eq!(buf.text(), "\u{2717} something went wrong\n");
    }

    #[test]
    fn json_mode_only_emits_json() {
        let (out, buf) = make_manager(false, OutputFormat::Json);
        out.info("not shown");
        out.json(&serde_json::json!({ "drift": [] })).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&buf.text()).unwrap();
        assert_eq!(parsed["drift"], serde_json::json!([]));
    }

    #[test]
    fn table_aligns_columns() {
        let (out, buf) = make_manager(false, OutputFormat::Plain);
        out.table(
            &["PATH", "REASON"],
            &[
                vec!["package.json".into(), "outdated".into()],
                vec!["a".into(), "new".into()],
            ],
        );
        assert_eq!(
            buf.text(),
            "PATH          REASON\npackage.json  outdated\na             new\n"
        );
    }

    #[test]
    fn tree_draws_branches() {
        let (out, buf) = make_manager(false, OutputFormat::Plain);
        out.tree("apps", &["cms".into(), "web".into()]);
        assert_eq!(buf.text(), "apps\n\u{251c}\u{2500}\u{2500} cms\n\u{2514}\u{2500}\u{2500} web\n");
    }

    #[test]
    fn printf_formats_arguments() {
        let (out, buf) = make_manager(false, OutputFormat::Plain);
        out.printf(format_args!("{} files\n", 3));
        assert_eq!(buf.text(), "3 files\n");
    }

    #[test]
    fn explicit_flag_beats_config() {
        let mut config = AppConfig::default();
        config.output.format = OutputFormat::Json;

        let args = GlobalArgs::default();
        assert_eq!(OutputManager::new(&args, &config).resolved_format, OutputFormat::Json);

        let args = GlobalArgs {
            output_format: OutputFormat::Plain,
            ..GlobalArgs::default()
        };
        let out = OutputManager::new(&args, &config);
        assert_eq!(out.resolved_format, OutputFormat::Plain);
        assert!(out.no_color);
    }
}
