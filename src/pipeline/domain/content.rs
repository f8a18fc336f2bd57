use serde::{Serialize, Serializer};
use std::fmt;

/// Sub-label attached to a user interface classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceVariant {
    ErrorScreen,
    DarkTheme,
    LightTheme,
}

impl InterfaceVariant {
    pub fn label(&self) -> &'static str {
        match self {
            InterfaceVariant::ErrorScreen => "Error Screen",
            InterfaceVariant::DarkTheme => "Dark Theme",
            InterfaceVariant::LightTheme => "Light Theme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    UserInterface(Option<InterfaceVariant>),
    DocumentOrText,
    SimpleGraphic,
    ComplexImage,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::UserInterface(None) => f.write_str("User Interface"),
            ContentType::UserInterface(Some(variant)) => {
                write!(f, "User Interface ({})", variant.label())
            }
            ContentType::DocumentOrText => f.write_str("Document or Text Content"),
            ContentType::SimpleGraphic => f.write_str("Simple Graphic or Icon"),
            ContentType::ComplexImage => f.write_str("Complex Image or Photo"),
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Display theme, with dark taking precedence when both flags are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
    Mixed,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentAnalysis {
    pub is_ui_screen: bool,
    pub has_text: bool,
    pub is_error_screen: bool,
    pub is_dark_mode: bool,
    pub is_light_mode: bool,
    pub content_type: ContentType,
}

impl ContentAnalysis {
    pub fn theme(&self) -> Theme {
        if self.is_dark_mode {
            Theme::Dark
        } else if self.is_light_mode {
            Theme::Light
        } else {
            Theme::Mixed
        }
    }
}
