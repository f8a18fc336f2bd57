use super::diagram::build_diagram;
use super::format::percent;
use crate::common::ImageDimensions;
use crate::pipeline::domain::{ContentAnalysis, Measurements};

/// Opening fence of the embedded diagram block. Renderers look for this marker verbatim.
pub const DIAGRAM_FENCE_OPEN: &str = "```mermaid";
pub const DIAGRAM_FENCE_CLOSE: &str = "```";

/// Formatted output of one successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub text: String,
    pub diagram: String,
}

pub fn render(
    dimensions: ImageDimensions,
    measurements: &Measurements,
    content: &ContentAnalysis,
) -> RenderedReport {
    let diagram = build_diagram(dimensions, measurements, content);
    let text = build_text_report(dimensions, measurements, content, &diagram);
    RenderedReport { text, diagram }
}

fn detected(flag: bool) -> &'static str {
    if flag {
        "Detected"
    } else {
        "Not detected"
    }
}

fn build_text_report(
    dimensions: ImageDimensions,
    measurements: &Measurements,
    content: &ContentAnalysis,
    diagram: &str,
) -> String {
    let Measurements {
        color,
        edge,
        pattern,
    } = measurements;

    let dominant_colors = if color.dominant_colors.is_empty() {
        "None".to_string()
    } else {
        color
            .dominant_colors
            .iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let screen_type = if !content.is_ui_screen {
        "Not an interface"
    } else if content.is_error_screen {
        "Error screen"
    } else {
        "Standard screen"
    };

    let error_indicators = if content.is_error_screen {
        "Present"
    } else {
        "None"
    };

    let sections = [
        "## Image Analysis Report".to_string(),
        format!(
            "**Type:** {}\n**Dimensions:** {} x {} pixels",
            content.content_type, dimensions.width, dimensions.height
        ),
        format!(
            "### Visual Elements\n\
             - **Dominant Colors:** {dominant_colors}\n\
             - **Brightness:** {}\n\
             - **Dark Areas:** {}\n\
             - **Light Areas:** {}",
            percent(color.brightness, 1),
            percent(color.dark_ratio, 1),
            percent(color.light_ratio, 1),
        ),
        format!(
            "### Content Detection\n\
             - **Text Content:** {}\n\
             - **UI Elements:** {}\n\
             - **Error Indicators:** {error_indicators}",
            detected(content.has_text),
            detected(content.is_ui_screen),
        ),
        format!(
            "### Interface Analysis\n\
             - **Theme:** {}\n\
             - **Screen Type:** {screen_type}",
            content.theme().label(),
        ),
        format!(
            "### Technical Details\n\
             - **Edge Density:** {}\n\
             - **Horizontal Edges:** {}\n\
             - **Vertical Edges:** {}\n\
             - **Rectangular Shapes:** {}\n\
             - **Pattern Regularity:** {}",
            percent(edge.normalized_edges, 2),
            edge.horizontal_edges,
            edge.vertical_edges,
            edge.rectangular_shapes,
            percent(pattern.regularity(), 1),
        ),
        format!(
            "### Visual Summary\n\n{DIAGRAM_FENCE_OPEN}\n{diagram}{DIAGRAM_FENCE_CLOSE}"
        ),
    ];

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}
