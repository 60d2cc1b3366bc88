pub mod diagnostics;

pub use diagnostics::DiagnosticsService;
