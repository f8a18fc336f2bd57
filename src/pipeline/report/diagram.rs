use super::format::percent;
use crate::common::ImageDimensions;
use crate::pipeline::domain::{ContentAnalysis, Measurements};

/// Keeps ASCII letters, digits, spaces, parentheses and hyphens; drops the rest.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '(' | ')' | '-'))
        .collect()
}

/// Mermaid flowchart summarising the analysis as a small tree.
pub fn build_diagram(
    dimensions: ImageDimensions,
    measurements: &Measurements,
    content: &ContentAnalysis,
) -> String {
    let Measurements {
        color,
        edge,
        pattern,
    } = measurements;
    let content_label = sanitize_label(&content.content_type.to_string());
    let status_class = if content.is_error_screen {
        "error"
    } else {
        "success"
    };

    let mut diagram = String::from("graph TD\n");
    let lines = [
        "A[Image Analysis] --> B[Content Type]".to_string(),
        "A --> C[Visual Elements]".to_string(),
        "A --> D[Technical Details]".to_string(),
        format!("B --> B1[{content_label}]"),
        format!("B --> B2[Theme: {}]", content.theme().label()),
        format!("C --> C1[Brightness: {}]", percent(color.brightness, 1)),
        format!("C --> C2[Dark Areas: {}]", percent(color.dark_ratio, 1)),
        format!("C --> C3[Light Areas: {}]", percent(color.light_ratio, 1)),
        format!(
            "D --> D1[Dimensions: {}x{}]",
            dimensions.width, dimensions.height
        ),
        format!("D --> D2[Edge Density: {}]", percent(edge.normalized_edges, 2)),
        format!(
            "D --> D3[Pattern Regularity: {}]",
            percent(pattern.regularity(), 1)
        ),
        "classDef error fill:#f8d7da,stroke:#dc3545,color:#721c24".to_string(),
        "classDef success fill:#d4edda,stroke:#28a745,color:#155724".to_string(),
        format!("class B1 {status_class}"),
    ];
    for line in lines {
        diagram.push_str("    ");
        diagram.push_str(&line);
        diagram.push('\n');
    }
    diagram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::{
        ColorAnalysis, ColorKey, ContentType, EdgeAnalysis, InterfaceVariant, PatternAnalysis,
    };

    fn sample() -> (Measurements, ContentAnalysis) {
        let measurements = Measurements {
            color: ColorAnalysis {
                dominant_colors: vec![ColorKey::new(256, 256, 256)],
                dark_ratio: 0.05,
                light_ratio: 0.9,
                brightness: 0.876,
            },
            edge: EdgeAnalysis {
                horizontal_edges: 30,
                vertical_edges: 12,
                normalized_edges: 0.0042,
                rectangular_shapes: 2,
            },
            pattern: PatternAnalysis {
                regular_patterns: 5_000,
                total_pixels: 10_000,
            },
        };
        let content = ContentAnalysis {
            is_ui_screen: true,
            has_text: false,
            is_error_screen: true,
            is_dark_mode: false,
            is_light_mode: true,
            content_type: ContentType::UserInterface(Some(InterfaceVariant::ErrorScreen)),
        };
        (measurements, content)
    }

    #[test]
    fn strips_characters_outside_the_allowed_set() {
        assert_eq!(sanitize_label("User Interface (Error Screen)"), "User Interface (Error Screen)");
        assert_eq!(sanitize_label("a[b]{c};d\"e'f|g-h"), "abcdefg-h");
        assert_eq!(sanitize_label("tab\there\nnewline"), "tabherenewline");
        assert_eq!(sanitize_label("café: 100%"), "caf 100");
    }

    #[test]
    fn renders_tree_with_error_class() {
        let (measurements, content) = sample();
        let diagram = build_diagram(ImageDimensions::new(100, 100), &measurements, &content);

        assert!(diagram.starts_with("graph TD\n"));
        assert!(diagram.contains("    B --> B1[User Interface (Error Screen)]\n"));
        assert!(diagram.contains("C1[Brightness: 87.6%]"));
        assert!(diagram.contains("D1[Dimensions: 100x100]"));
        assert!(diagram.contains("D2[Edge Density: 0.42%]"));
        assert!(diagram.contains("D3[Pattern Regularity: 50.0%]"));
        assert!(diagram.contains("    class B1 error\n"));
    }

    #[test]
    fn non_error_content_uses_success_class() {
        let (measurements, mut content) = sample();
        content.is_error_screen = false;
        let diagram = build_diagram(ImageDimensions::new(1, 1), &measurements, &content);
        assert!(diagram.contains("class B1 success"));
    }
}
