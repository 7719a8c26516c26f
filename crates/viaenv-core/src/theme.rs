//! Design tokens for the dashboard chrome.
//!
//! A [`Theme`] is an immutable table resolved once at startup from the
//! configured [`ThemeMode`]. Only colors and shadow opacities differ between
//! the light and dark variants; spacing, typography, radii, transitions and
//! layout are shared. Shells render the table as CSS custom properties so
//! the stylesheet never hard-codes a color.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::ParseError;

/// Which color scheme the server renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Resolve the token table for this mode.
    #[must_use]
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseError::UnknownTheme(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_dark: &'static str,
    pub primary_extra_light: &'static str,

    pub background: &'static str,
    pub background_light: &'static str,
    pub background_dark: &'static str,
    pub background_card: &'static str,

    pub text: &'static str,
    pub text_secondary: &'static str,
    pub text_light: &'static str,
    pub text_inverted: &'static str,

    pub border: &'static str,
    pub border_light: &'static str,
    pub border_dark: &'static str,

    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub info: &'static str,

    /// `gray50` through `gray900`.
    pub grays: [&'static str; 10],

    pub input_background: &'static str,
    pub placeholder: &'static str,
    pub disabled: &'static str,
    pub overlay: &'static str,

    pub gradient_primary: [&'static str; 3],
}

/// Spacing scale in pixels, `xs` to `xxxl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub xs: u16,
    pub sm: u16,
    pub md: u16,
    pub lg: u16,
    pub xl: u16,
    pub xxl: u16,
    pub xxxl: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizes {
    pub xs: u16,
    pub sm: u16,
    pub md: u16,
    pub base: u16,
    pub lg: u16,
    pub xl: u16,
    pub xxl: u16,
    pub xxxl: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontWeights {
    pub light: u16,
    pub normal: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typography {
    pub sizes: FontSizes,
    pub weights: FontWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radii {
    pub xs: u16,
    pub sm: u16,
    pub md: u16,
    pub lg: u16,
    pub xl: u16,
    pub round: u16,
    pub pill: u16,
}

/// One elevation step. Color is always black; only the geometry and
/// opacity vary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset_y: u16,
    pub blur: u16,
    pub opacity: f32,
}

impl Shadow {
    /// CSS `box-shadow` value.
    #[must_use]
    pub fn css(&self) -> String {
        format!("0 {}px {}px rgba(0, 0, 0, {})", self.offset_y, self.blur * 2, self.opacity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadows {
    pub sm: Shadow,
    pub md: Shadow,
    pub lg: Shadow,
    pub xl: Shadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transitions {
    pub fast: &'static str,
    pub medium: &'static str,
    pub slow: &'static str,
    pub bezier: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub sidebar_width: u16,
    pub sidebar_collapsed_width: u16,
    pub header_height: u16,
    pub sidebar_transition_ms: u16,
    pub content_max_width: u16,
}

/// The full token table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: Colors,
    pub spacing: Spacing,
    pub typography: Typography,
    pub radii: Radii,
    pub shadows: Shadows,
    pub transitions: Transitions,
    pub layout: Layout,
}

const SPACING: Spacing = Spacing {
    xs: 4,
    sm: 8,
    md: 16,
    lg: 24,
    xl: 32,
    xxl: 48,
    xxxl: 64,
};

const TYPOGRAPHY: Typography = Typography {
    sizes: FontSizes {
        xs: 10,
        sm: 12,
        md: 14,
        base: 16,
        lg: 18,
        xl: 20,
        xxl: 24,
        xxxl: 32,
    },
    weights: FontWeights {
        light: 300,
        normal: 400,
        medium: 500,
        semibold: 600,
        bold: 700,
    },
};

const RADII: Radii = Radii {
    xs: 4,
    sm: 8,
    md: 12,
    lg: 16,
    xl: 20,
    round: 50,
    pill: 1000,
};

const TRANSITIONS: Transitions = Transitions {
    fast: "150ms ease",
    medium: "250ms ease",
    slow: "350ms ease",
    bezier: "cubic-bezier(0.2, 0, 0, 1)",
};

const LAYOUT: Layout = Layout {
    sidebar_width: 280,
    sidebar_collapsed_width: 80,
    header_height: 70,
    sidebar_transition_ms: 300,
    content_max_width: 1400,
};

const fn shadows(opacity: [f32; 4]) -> Shadows {
    Shadows {
        sm: Shadow { offset_y: 1, blur: 2, opacity: opacity[0] },
        md: Shadow { offset_y: 2, blur: 4, opacity: opacity[1] },
        lg: Shadow { offset_y: 4, blur: 8, opacity: opacity[2] },
        xl: Shadow { offset_y: 8, blur: 16, opacity: opacity[3] },
    }
}

/// The light token table.
pub static LIGHT: Theme = Theme {
    mode: ThemeMode::Light,
    colors: Colors {
        primary: "#0066FF",
        primary_light: "#3388FF",
        primary_dark: "#0052D9",
        primary_extra_light: "#E6F0FF",
        background: "#FFFFFF",
        background_light: "#F8F9FA",
        background_dark: "#F1F3F5",
        background_card: "#FFFFFF",
        text: "#1A1A1A",
        text_secondary: "#666666",
        text_light: "#999999",
        text_inverted: "#FFFFFF",
        border: "#E1E5E9",
        border_light: "#F0F2F5",
        border_dark: "#D1D5DB",
        success: "#10B981",
        warning: "#F59E0B",
        error: "#EF4444",
        info: "#3B82F6",
        grays: [
            "#F9FAFB", "#F3F4F6", "#E5E7EB", "#D1D5DB", "#9CA3AF", "#6B7280", "#4B5563",
            "#374151", "#1F2937", "#111827",
        ],
        input_background: "#FFFFFF",
        placeholder: "#9CA3AF",
        disabled: "#D1D5DB",
        overlay: "rgba(0, 0, 0, 0.5)",
        gradient_primary: ["#0066FF", "#3388FF", "#66AAFF"],
    },
    spacing: SPACING,
    typography: TYPOGRAPHY,
    radii: RADII,
    shadows: shadows([0.05, 0.1, 0.15, 0.2]),
    transitions: TRANSITIONS,
    layout: LAYOUT,
};

/// The dark token table.
pub static DARK: Theme = Theme {
    mode: ThemeMode::Dark,
    colors: Colors {
        primary: "#3388FF",
        primary_light: "#66AAFF",
        primary_dark: "#0066FF",
        primary_extra_light: "rgba(51, 136, 255, 0.1)",
        background: "#0F172A",
        background_light: "#1E293B",
        background_dark: "#0A0F1C",
        background_card: "#1E293B",
        text: "#F1F5F9",
        text_secondary: "#94A3B8",
        text_light: "#64748B",
        text_inverted: "#0F172A",
        border: "#334155",
        border_light: "#475569",
        border_dark: "#1E293B",
        success: "#34D399",
        warning: "#FBBF24",
        error: "#F87171",
        info: "#60A5FA",
        grays: [
            "#F8FAFC", "#F1F5F9", "#E2E8F0", "#CBD5E1", "#94A3B8", "#64748B", "#475569",
            "#334155", "#1E293B", "#0F172A",
        ],
        input_background: "#1E293B",
        placeholder: "#64748B",
        disabled: "#475569",
        overlay: "rgba(0, 0, 0, 0.7)",
        gradient_primary: ["#3388FF", "#66AAFF", "#99CCFF"],
    },
    spacing: SPACING,
    typography: TYPOGRAPHY,
    radii: RADII,
    shadows: shadows([0.3, 0.4, 0.5, 0.6]),
    transitions: TRANSITIONS,
    layout: LAYOUT,
};

const GRAY_STEPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

impl Theme {
    /// Render the table as a `:root { ... }` block of CSS custom properties.
    #[must_use]
    pub fn css_variables(&self) -> String {
        let c = &self.colors;
        let mut vars: Vec<(String, String)> = [
            ("primary", c.primary),
            ("primary-light", c.primary_light),
            ("primary-dark", c.primary_dark),
            ("primary-extra-light", c.primary_extra_light),
            ("bg", c.background),
            ("bg-light", c.background_light),
            ("bg-dark", c.background_dark),
            ("bg-card", c.background_card),
            ("text", c.text),
            ("text-secondary", c.text_secondary),
            ("text-light", c.text_light),
            ("text-inverted", c.text_inverted),
            ("border", c.border),
            ("border-light", c.border_light),
            ("border-dark", c.border_dark),
            ("success", c.success),
            ("warning", c.warning),
            ("error", c.error),
            ("info", c.info),
            ("input-bg", c.input_background),
            ("placeholder", c.placeholder),
            ("disabled", c.disabled),
            ("overlay", c.overlay),
        ]
        .into_iter()
        .map(|(k, v)| (format!("color-{k}"), v.to_owned()))
        .collect();

        for (step, value) in GRAY_STEPS.iter().zip(c.grays) {
            vars.push((format!("gray-{step}"), value.to_owned()));
        }
        vars.push((
            "gradient-primary".to_owned(),
            format!(
                "linear-gradient(135deg, {}, {}, {})",
                c.gradient_primary[0], c.gradient_primary[1], c.gradient_primary[2]
            ),
        ));

        let s = &self.spacing;
        for (k, v) in [
            ("xs", s.xs),
            ("sm", s.sm),
            ("md", s.md),
            ("lg", s.lg),
            ("xl", s.xl),
            ("xxl", s.xxl),
            ("xxxl", s.xxxl),
        ] {
            vars.push((format!("space-{k}"), format!("{v}px")));
        }

        let f = &self.typography.sizes;
        for (k, v) in [
            ("xs", f.xs),
            ("sm", f.sm),
            ("md", f.md),
            ("base", f.base),
            ("lg", f.lg),
            ("xl", f.xl),
            ("xxl", f.xxl),
            ("xxxl", f.xxxl),
        ] {
            vars.push((format!("font-{k}"), format!("{v}px")));
        }
        let w = &self.typography.weights;
        for (k, v) in [
            ("light", w.light),
            ("normal", w.normal),
            ("medium", w.medium),
            ("semibold", w.semibold),
            ("bold", w.bold),
        ] {
            vars.push((format!("weight-{k}"), v.to_string()));
        }

        let r = &self.radii;
        for (k, v) in [
            ("xs", r.xs),
            ("sm", r.sm),
            ("md", r.md),
            ("lg", r.lg),
            ("xl", r.xl),
            ("round", r.round),
            ("pill", r.pill),
        ] {
            let unit = if k == "round" { "%" } else { "px" };
            vars.push((format!("radius-{k}"), format!("{v}{unit}")));
        }

        let sh = &self.shadows;
        for (k, v) in [("sm", sh.sm), ("md", sh.md), ("lg", sh.lg), ("xl", sh.xl)] {
            vars.push((format!("shadow-{k}"), v.css()));
        }

        let t = &self.transitions;
        for (k, v) in [("fast", t.fast), ("medium", t.medium), ("slow", t.slow), ("bezier", t.bezier)] {
            vars.push((format!("transition-{k}"), v.to_owned()));
        }

        let l = &self.layout;
        vars.push(("sidebar-width".to_owned(), format!("{}px", l.sidebar_width)));
        vars.push(("sidebar-collapsed-width".to_owned(), format!("{}px", l.sidebar_collapsed_width)));
        vars.push(("header-height".to_owned(), format!("{}px", l.header_height)));
        vars.push(("sidebar-transition".to_owned(), format!("{}ms", l.sidebar_transition_ms)));
        vars.push(("content-max-width".to_owned(), format!("{}px", l.content_max_width)));

        let mut css = String::from(":root {\n");
        for (name, value) in vars {
            let _ = writeln!(css, "  --{name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(" light ".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!(matches!(
            "solarized".parse::<ThemeMode>(),
            Err(ParseError::UnknownTheme(_))
        ));
    }

    #[test]
    fn variants_share_non_color_tokens() {
        assert_eq!(LIGHT.spacing, DARK.spacing);
        assert_eq!(LIGHT.typography, DARK.typography);
        assert_eq!(LIGHT.layout, DARK.layout);
        assert_ne!(LIGHT.colors.background, DARK.colors.background);
    }

    #[test]
    fn dark_shadows_are_heavier() {
        assert!(DARK.shadows.md.opacity > LIGHT.shadows.md.opacity);
    }

    #[test]
    fn css_variables_cover_colors_and_layout() {
        let css = ThemeMode::Dark.theme().css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--color-bg: #0F172A;"));
        assert!(css.contains("--gray-500: #64748B;"));
        assert!(css.contains("--sidebar-width: 280px;"));
        assert!(css.contains("--radius-round: 50%;"));
        assert!(css.contains("--space-md: 16px;"));
    }
}
