//! # Widget Theme
//!
//! Light and dark palettes plus partial overrides from the host page. The resolved
//! [`Theme`] is emitted as CSS custom properties on the widget's outer box, so every
//! descendant reads colours through `var(--swap-*)` and nothing leaks to the host page.

use serde::{Deserialize, Serialize};

/// Corner radii in `rem`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderRadius {
    pub large: f32,
    pub medium: f32,
    pub small: f32,
    pub xsmall: f32,
}

impl Default for BorderRadius {
    fn default() -> Self {
        BorderRadius {
            large: 1.0,
            medium: 0.75,
            small: 0.5,
            xsmall: 0.25,
        }
    }
}

/// Fully resolved theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Primary text
    pub primary: String,
    /// Secondary text
    pub secondary: String,
    /// Placeholder / hint text
    pub hint: String,
    /// Text drawn on interactive surfaces
    pub on_interactive: String,
    /// Brand accent (action buttons)
    pub accent: String,
    /// Outermost background
    pub container: String,
    /// Inner module background
    pub module: String,
    /// Buttons and selectors
    pub interactive: String,
    pub outline: String,
    /// Modal background
    pub dialog: String,
    /// Overlay behind modals
    pub scrim: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub font_family: String,
    pub border_radius: BorderRadius,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            primary: "#0D111C".to_string(),
            secondary: "#5D6785".to_string(),
            hint: "#98A1C0".to_string(),
            on_interactive: "#FFFFFF".to_string(),
            accent: "#FB118E".to_string(),
            container: "#FFFFFF".to_string(),
            module: "#F5F6FC".to_string(),
            interactive: "#E8ECFB".to_string(),
            outline: "#D2D9EE".to_string(),
            dialog: "#FFFFFF".to_string(),
            scrim: "rgba(255, 255, 255, 0.6)".to_string(),
            success: "#007D35".to_string(),
            warning: "#F3B71E".to_string(),
            error: "#FA2B39".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            border_radius: BorderRadius::default(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            primary: "#FFFFFF".to_string(),
            secondary: "#98A1C0".to_string(),
            hint: "#5D6785".to_string(),
            on_interactive: "#0D111C".to_string(),
            accent: "#4C82FB".to_string(),
            container: "#0D111C".to_string(),
            module: "#131A2A".to_string(),
            interactive: "#293249".to_string(),
            outline: "#1B2236".to_string(),
            dialog: "#0D111C".to_string(),
            scrim: "rgba(0, 0, 0, 0.6)".to_string(),
            success: "#76D191".to_string(),
            warning: "#F3B71E".to_string(),
            error: "#FD766B".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            border_radius: BorderRadius::default(),
        }
    }

    /// Resolve host-supplied theme input against the defaults.
    pub fn resolve(input: Option<&ThemeInput>) -> Self {
        match input {
            None => Theme::light(),
            Some(ThemeInput::Named(ThemeName::Light)) => Theme::light(),
            Some(ThemeInput::Named(ThemeName::Dark)) => Theme::dark(),
            Some(ThemeInput::Custom(overrides)) => {
                let base = if overrides.dark_mode { Theme::dark() } else { Theme::light() };
                base.merge(overrides)
            }
        }
    }

    pub fn merge(mut self, overrides: &ThemeOverrides) -> Self {
        let fields: [(&mut String, &Option<String>); 15] = [
            (&mut self.primary, &overrides.primary),
            (&mut self.secondary, &overrides.secondary),
            (&mut self.hint, &overrides.hint),
            (&mut self.on_interactive, &overrides.on_interactive),
            (&mut self.accent, &overrides.accent),
            (&mut self.container, &overrides.container),
            (&mut self.module, &overrides.module),
            (&mut self.interactive, &overrides.interactive),
            (&mut self.outline, &overrides.outline),
            (&mut self.dialog, &overrides.dialog),
            (&mut self.scrim, &overrides.scrim),
            (&mut self.success, &overrides.success),
            (&mut self.warning, &overrides.warning),
            (&mut self.error, &overrides.error),
            (&mut self.font_family, &overrides.font_family),
        ];
        for (slot, value) in fields {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        if let Some(radius) = overrides.border_radius {
            self.border_radius = radius;
        }
        self
    }

    /// Inline style declaring the theme as CSS custom properties.
    pub fn css_variables(&self) -> String {
        format!(
            "--swap-primary: {}; --swap-secondary: {}; --swap-hint: {}; --swap-on-interactive: {}; \
             --swap-accent: {}; --swap-container: {}; --swap-module: {}; --swap-interactive: {}; \
             --swap-outline: {}; --swap-dialog: {}; --swap-scrim: {}; --swap-success: {}; \
             --swap-warning: {}; --swap-error: {}; --swap-radius-large: {}rem; \
             --swap-radius-medium: {}rem; --swap-radius-small: {}rem; --swap-radius-xsmall: {}rem; \
             font-family: {}; color: {}; background: {};",
            self.primary,
            self.secondary,
            self.hint,
            self.on_interactive,
            self.accent,
            self.container,
            self.module,
            self.interactive,
            self.outline,
            self.dialog,
            self.scrim,
            self.success,
            self.warning,
            self.error,
            self.border_radius.large,
            self.border_radius.medium,
            self.border_radius.small,
            self.border_radius.xsmall,
            self.font_family,
            self.primary,
            self.container,
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Light,
    Dark,
}

/// Partial theme supplied by the host; unset fields keep the base palette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeOverrides {
    /// Start from the dark palette instead of the light one
    pub dark_mode: bool,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub hint: Option<String>,
    pub on_interactive: Option<String>,
    pub accent: Option<String>,
    pub container: Option<String>,
    pub module: Option<String>,
    pub interactive: Option<String>,
    pub outline: Option<String>,
    pub dialog: Option<String>,
    pub scrim: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
    pub font_family: Option<String>,
    pub border_radius: Option<BorderRadius>,
}

/// Either a palette name (`"dark"`) or an override object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeInput {
    Named(ThemeName),
    Custom(ThemeOverrides),
}

/// Theme layer of the composition stack.
#[derive(Debug, Clone)]
pub struct ThemeScope {
    theme: Theme,
}

impl ThemeScope {
    pub fn new(input: Option<&ThemeInput>) -> Self {
        Self {
            theme: Theme::resolve(input),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Style for the absolutely positioned dialog wrapper inside the widget box.
    pub fn dialog_wrapper_style(&self) -> String {
        format!(
            "border-radius: {}rem; height: 100%; left: 0; padding: 0.5rem; position: absolute; top: 0; width: 100%; pointer-events: none;",
            self.theme.border_radius.large
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        assert_eq!(Theme::resolve(None), Theme::light());
        assert_eq!(Theme::resolve(Some(&ThemeInput::Named(ThemeName::Dark))), Theme::dark());
    }

    #[test]
    fn test_overrides_merge_onto_base() {
        let overrides = ThemeOverrides {
            container: Some("rgba(244, 246, 254, 1)".to_string()),
            accent: Some("rgba(110, 214, 243, 1)".to_string()),
            ..Default::default()
        };
        let theme = Theme::resolve(Some(&ThemeInput::Custom(overrides)));
        assert_eq!(theme.container, "rgba(244, 246, 254, 1)");
        assert_eq!(theme.accent, "rgba(110, 214, 243, 1)");
        assert_eq!(theme.primary, Theme::light().primary);
    }

    #[test]
    fn test_dark_mode_override_base() {
        let overrides = ThemeOverrides {
            dark_mode: true,
            error: Some("red".to_string()),
            ..Default::default()
        };
        let theme = Theme::resolve(Some(&ThemeInput::Custom(overrides)));
        assert_eq!(theme.container, Theme::dark().container);
        assert_eq!(theme.error, "red");
    }

    #[test]
    fn test_theme_input_deserialize() {
        let named: ThemeInput = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(named, ThemeInput::Named(ThemeName::Dark));

        let custom: ThemeInput = serde_json::from_str(r#"{"module":"rgba(222, 241, 255, 1)"}"#).unwrap();
        match custom {
            ThemeInput::Custom(overrides) => {
                assert_eq!(overrides.module.as_deref(), Some("rgba(222, 241, 255, 1)"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_css_variables() {
        let css = Theme::dark().css_variables();
        assert!(css.contains("--swap-accent: #4C82FB;"));
        assert!(css.contains("--swap-radius-large: 1rem;"));
    }
}
