use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Terminal output collaborator.
///
/// Implementations serialize writes internally, so a shared reference can be
/// used from anywhere in a run.
pub trait Printer: Send + Sync {
    fn info(&self, msg: &str);
    fn success(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    fn println(&self, msg: &str);
    fn printf(&self, args: fmt::Arguments<'_>);
    fn list(&self, items: &[String]);
    fn table(&self, headers: &[&str], rows: &[Vec<String>]);
    fn tree(&self, root: &str, children: &[String]);
    fn line_break(&self);
    /// Redirect all further output.
    fn set_writer(&self, writer: Box<dyn Write + Send>);
}

/// Swallows everything. Used for the expected-tree run during drift.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPrinter;

impl Printer for NoopPrinter {
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn error(&self, _: &str) {}
    fn println(&self, _: &str) {}
    fn printf(&self, _: fmt::Arguments<'_>) {}
    fn list(&self, _: &[String]) {}
    fn table(&self, _: &[&str], _: &[Vec<String>]) {}
    fn tree(&self, _: &str, _: &[String]) {}
    fn line_break(&self) {}
    fn set_writer(&self, _: Box<dyn Write + Send>) {}
}

/// What the engine reports about each write.
pub trait Notifier: Send + Sync {
    fn created(&self, path: &str);
    fn updated(&self, path: &str);
    fn skipped(&self, path: &str);
    fn removed(&self, path: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn created(&self, _: &str) {}
    fn updated(&self, _: &str) {}
    fn skipped(&self, _: &str) {}
    fn removed(&self, _: &str) {}
}

/// Forwards engine notifications to a [`Printer`].
pub struct PrinterNotifier {
    printer: Arc<dyn Printer>,
}

impl PrinterNotifier {
    pub fn new(printer: Arc<dyn Printer>) -> Self {
        Self { printer }
    }
}

impl Notifier for PrinterNotifier {
    fn created(&self, path: &str) {
        self.printer.success(&format!("Created {path}"));
    }

    fn updated(&self, path: &str) {
        self.printer.info(&format!("Updated {path}"));
    }

    fn skipped(&self, path: &str) {
        self.printer.warn(&format!("Skipped {path} (already exists)"));
    }

    fn removed(&self, path: &str) {
        self.printer.info(&format!("Removed {path}"));
    }
}
