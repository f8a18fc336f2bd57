pub mod classifier;
pub mod color;
pub mod config;
pub mod core;
pub mod edge;
pub mod pattern;
pub mod suite;

pub use classifier::ContentClassifier;
pub use color::ColorAnalyzer;
pub use config::{AnalysisThresholds, ClassifierThresholds, ColorThresholds};
pub use core::PixelAnalyzer;
pub use edge::EdgeAnalyzer;
pub use pattern::PatternAnalyzer;
pub use suite::AnalyzerSuite;
