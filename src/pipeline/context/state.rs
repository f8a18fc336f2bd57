use crate::pipeline::domain::{ContentAnalysis, Measurements};

// Markers to track how far an image has progressed through the pipeline
pub struct DecodedState;
pub struct MeasuredState {
    pub(super) measurements: Measurements,
}
pub struct ClassifiedState {
    pub(super) measurements: Measurements,
    pub(super) content: ContentAnalysis,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for DecodedState {
    fn state_name() -> &'static str {
        "Decoded"
    }
}

impl ProcessingState for MeasuredState {
    fn state_name() -> &'static str {
        "Measured"
    }
}

impl ProcessingState for ClassifiedState {
    fn state_name() -> &'static str {
        "Classified"
    }
}
