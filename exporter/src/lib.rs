pub mod exporter;

pub use exporter::{CompilerSink, ExportError, ModSink, TextSink};
