// Adapters layer: concrete implementations of the domain ports.

pub mod console;
pub mod zip_archive;

pub use console::ConsoleReporter;
pub use zip_archive::ZipArchiveService;
