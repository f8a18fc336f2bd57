pub mod analysis;
pub mod content;

pub use analysis::{ColorAnalysis, ColorKey, EdgeAnalysis, Measurements, PatternAnalysis};
pub use content::{ContentAnalysis, ContentType, InterfaceVariant, Theme};
