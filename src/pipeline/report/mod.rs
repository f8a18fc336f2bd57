pub mod analysis_report;
pub mod diagram;
pub mod fallback;
pub mod format;
pub mod text_report;

pub use analysis_report::AnalysisReport;
pub use diagram::{build_diagram, sanitize_label};
pub use fallback::fallback_message;
pub use text_report::{render, RenderedReport, DIAGRAM_FENCE_CLOSE, DIAGRAM_FENCE_OPEN};
