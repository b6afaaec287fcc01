//! Sizing layer: the widget's outer box.

use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_WIDGET_WIDTH, MIN_WIDGET_WIDTH};

/// Width requested by the host: pixels, or any CSS length (`"100%"` for responsive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetWidth {
    Px(u32),
    Css(String),
}

impl Default for WidgetWidth {
    fn default() -> Self {
        WidgetWidth::Px(DEFAULT_WIDGET_WIDTH)
    }
}

impl WidgetWidth {
    /// Query-string form: bare numbers are pixels, anything else is passed as CSS.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(px) => WidgetWidth::Px(px),
            Err(_) => WidgetWidth::Css(value.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingScope {
    width: WidgetWidth,
    class_name: Option<String>,
}

impl SizingScope {
    pub fn new(width: Option<&WidgetWidth>, class_name: Option<&str>) -> Self {
        let width = match width {
            None => WidgetWidth::default(),
            Some(WidgetWidth::Px(px)) if *px < MIN_WIDGET_WIDTH => {
                log::warn!(
                    "Widget width must be at least {}px (you set it to {}px). Falling back to {}px.",
                    MIN_WIDGET_WIDTH,
                    px,
                    MIN_WIDGET_WIDTH
                );
                WidgetWidth::Px(MIN_WIDGET_WIDTH)
            }
            Some(width) => width.clone(),
        };
        Self {
            width,
            class_name: class_name.map(str::to_string).filter(|c| !c.is_empty()),
        }
    }

    pub fn width(&self) -> &WidgetWidth {
        &self.width
    }

    pub fn class(&self) -> String {
        match &self.class_name {
            Some(extra) => format!("swap-widget {}", extra),
            None => "swap-widget".to_string(),
        }
    }

    pub fn style(&self) -> String {
        let width = match &self.width {
            WidgetWidth::Px(px) => format!("{}px", px),
            WidgetWidth::Css(css) => css.clone(),
        };
        format!(
            "width: {}; min-width: {}px; position: relative; box-sizing: border-box; user-select: none;",
            width, MIN_WIDGET_WIDTH
        )
    }
}
