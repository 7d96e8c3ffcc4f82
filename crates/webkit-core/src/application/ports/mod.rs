//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `webkit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `Template`: A parsed template from the embedded bundle
//!   - `EmbeddedAssets`: Raw embedded files
//!   - `Printer` / `Notifier`: User-facing output

pub mod output;

#[cfg(test)]
pub use output::MockFilesystem;
pub use output::{
    EmbeddedAssets, FileStat, Filesystem, NoopNotifier, NoopPrinter, Notifier, Printer,
    PrinterNotifier, Template,
};
