// SPDX-License-Identifier: MIT
//! Design-token exporters.
//!
//! Pure serializers over a [`ThemePalette`] and the extracted colors that
//! produced it. Nothing here derives new colors; keys are renamed
//! (camelCase to kebab-case for CSS) and nested, nothing more.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tonal_color::Rgb;
use tonal_extract::ExtractedColor;

use crate::error::ThemeError;
use crate::scale::ColorScale;
use crate::theme::{SemanticTokens, ThemePalette};

const TOKEN_SCHEMA: &str = "https://design-tokens.github.io/community-group/format/token.json";
const DEFAULT_PROJECT: &str = "tonal";

/// Everything the exporters read.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportData {
    /// The seed the palette was ramped from.
    pub primary: Rgb,
    pub palette: ThemePalette,
    /// Colors pulled from a source image, if any, most dominant first.
    pub extracted: Vec<ExtractedColor>,
    pub project_name: Option<String>,
}

impl ExportData {
    #[must_use]
    pub const fn new(primary: Rgb, palette: ThemePalette) -> Self {
        Self {
            primary,
            palette,
            extracted: Vec::new(),
            project_name: None,
        }
    }

    #[must_use]
    pub fn with_extracted(mut self, extracted: Vec<ExtractedColor>) -> Self {
        self.extracted = extracted;
        self
    }

    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    fn project(&self) -> &str {
        self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT)
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("constant pattern compiles"));

/// `textPrimary` → `text-primary`.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    CAMEL_BOUNDARY.replace_all(name, "$1-$2").to_lowercase()
}

// ---------------------------------------------------------------------------
// CSS
// ---------------------------------------------------------------------------

fn push_tokens(out: &mut String, tokens: &SemanticTokens, indent: &str) {
    for (name, color) in tokens.entries() {
        let _ = writeln!(out, "{indent}--{}: {color};", kebab_case(name));
    }
}

fn push_scale(out: &mut String, scale: &ColorScale, indent: &str) {
    for (step, color) in scale.iter() {
        let _ = writeln!(out, "{indent}--color-primary-{step}: {color};");
    }
}

/// Theme stylesheet: light tokens on `:root`, dark tokens both under
/// `prefers-color-scheme: dark` and on a `.dark` class.
#[must_use]
pub fn theme_css(palette: &ThemePalette) -> String {
    let mut out = String::from("/* Light Theme */\n:root {\n");
    push_tokens(&mut out, &palette.light, "  ");
    out.push_str("\n  /* Color Scale */\n");
    push_scale(&mut out, &palette.color_scale, "  ");
    out.push_str("}\n\n");

    out.push_str("/* Dark Theme */\n@media (prefers-color-scheme: dark) {\n  :root {\n");
    push_tokens(&mut out, &palette.dark, "    ");
    out.push_str("\n    /* Dark Color Scale */\n");
    push_scale(&mut out, &palette.dark_color_scale, "    ");
    out.push_str("  }\n}\n\n");

    out.push_str("/* Manual Dark Mode Class */\n.dark {\n");
    push_tokens(&mut out, &palette.dark, "  ");
    out.push_str("\n  /* Dark Color Scale */\n");
    push_scale(&mut out, &palette.dark_color_scale, "  ");
    out.push_str("}\n");
    out
}

/// Flat custom properties: seed, ramp and extracted colors.
#[must_use]
pub fn tokens_css(data: &ExportData) -> String {
    let mut out = String::from(":root {\n  /* Primary Color */\n");
    let _ = writeln!(out, "  --color-primary: {};", data.primary);
    out.push_str("\n  /* Primary Color Ramp */\n");
    push_scale(&mut out, &data.palette.color_scale, "  ");

    if !data.extracted.is_empty() {
        out.push_str("\n  /* Extracted Colors */\n");
        for (i, color) in data.extracted.iter().enumerate() {
            let _ = writeln!(out, "  --color-extracted-{}: {};", i + 1, color.rgb);
        }
    }
    out.push('}');
    out
}

// ---------------------------------------------------------------------------
// Tailwind
// ---------------------------------------------------------------------------

/// Extracted colors keyed `"1"`, `"2"`, … in order.
struct Numbered<'a>(&'a [ExtractedColor]);

impl Serialize for Numbered<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, color) in self.0.iter().enumerate() {
            map.serialize_entry(&(i + 1).to_string(), &color.rgb)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct TailwindPrimary<'a> {
    #[serde(flatten)]
    scale: &'a ColorScale,
    #[serde(rename = "DEFAULT")]
    default: Rgb,
}

#[derive(Serialize)]
struct TailwindColors<'a> {
    primary: TailwindPrimary<'a>,
    extracted: Numbered<'a>,
}

#[derive(Serialize)]
struct TailwindExtend<C> {
    colors: C,
}

#[derive(Serialize)]
struct TailwindTheme<C> {
    extend: TailwindExtend<C>,
}

#[derive(Serialize)]
struct TailwindConfig<C> {
    theme: TailwindTheme<C>,
}

/// `module.exports = { theme: { extend: { colors } } }` as JS source.
fn tailwind_module<C: Serialize>(colors: C) -> Result<String, ThemeError> {
    let config = TailwindConfig {
        theme: TailwindTheme {
            extend: TailwindExtend { colors },
        },
    };
    let body = serde_json::to_string_pretty(&config)?;
    Ok(format!(
        "// tailwind.config.js\n/** @type {{import('tailwindcss').Config}} */\nmodule.exports = {body};\n"
    ))
}

/// A `tailwind.config.js` that extends the palette with the ramp and the
/// extracted colors.
///
/// # Errors
///
/// Returns [`ThemeError::Json`] if serialization fails.
pub fn tailwind_config(data: &ExportData) -> Result<String, ThemeError> {
    tailwind_module(TailwindColors {
        primary: TailwindPrimary {
            scale: &data.palette.color_scale,
            default: data.primary,
        },
        extracted: Numbered(&data.extracted),
    })
}

/// Token prefixes that become nested Tailwind groups.
const TAILWIND_GROUPS: [&str; 2] = ["primary", "text"];

/// A theme color: a bare `var(--name)` or a group of them.
enum ThemeColor {
    Var(String),
    Group(Vec<(String, String)>),
}

impl Serialize for ThemeColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Var(var) => serializer.serialize_str(var),
            Self::Group(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, var) in entries {
                    map.serialize_entry(key, var)?;
                }
                map.end()
            }
        }
    }
}

struct ThemeColors(Vec<(String, ThemeColor)>);

impl Serialize for ThemeColors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, color) in &self.0 {
            map.serialize_entry(name, color)?;
        }
        map.end()
    }
}

/// A `tailwind.config.js` whose colors point at the custom properties
/// [`theme_css`] defines, so utilities follow the light/dark switch.
///
/// Every semantic token becomes `var(--kebab-name)`. `primary*` and
/// `text*` tokens nest: `primary` → `primary.DEFAULT`, `primaryHover` →
/// `primary.hover`, `textMuted` → `text.muted`.
///
/// # Errors
///
/// Returns [`ThemeError::Json`] if serialization fails.
pub fn theme_tailwind(palette: &ThemePalette) -> Result<String, ThemeError> {
    let mut colors: Vec<(String, ThemeColor)> = Vec::new();
    for (name, _) in palette.light.entries() {
        let kebab = kebab_case(name);
        let var = format!("var(--{kebab})");
        let nested = match kebab.split_once('-') {
            Some((head, rest)) if TAILWIND_GROUPS.contains(&head) => {
                Some((head.to_owned(), rest.to_owned()))
            }
            None if TAILWIND_GROUPS.contains(&kebab.as_str()) => {
                Some((kebab.clone(), "DEFAULT".to_owned()))
            }
            _ => None,
        };
        match nested {
            Some((group, key)) => match colors.iter_mut().find(|(n, _)| *n == group) {
                Some((_, ThemeColor::Group(entries))) => entries.push((key, var)),
                _ => colors.push((group, ThemeColor::Group(vec![(key, var)]))),
            },
            None => colors.push((kebab, ThemeColor::Var(var))),
        }
    }
    tailwind_module(ThemeColors(colors))
}

// ---------------------------------------------------------------------------
// JSON design tokens
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Token<'a> {
    #[serde(rename = "$value")]
    value: Rgb,
    #[serde(rename = "$type")]
    kind: &'static str,
    #[serde(rename = "$description", skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl Token<'_> {
    const fn color(value: Rgb) -> Self {
        Self {
            value,
            kind: "color",
            description: None,
        }
    }
}

/// `(name, color)` pairs as an ordered token group.
struct TokenGroup(Vec<(String, Rgb)>);

impl Serialize for TokenGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, color) in &self.0 {
            map.serialize_entry(name, &Token::color(*color))?;
        }
        map.end()
    }
}

impl From<&ColorScale> for TokenGroup {
    fn from(scale: &ColorScale) -> Self {
        Self(scale.iter().map(|(step, c)| (step.to_string(), c)).collect())
    }
}

impl From<&SemanticTokens> for TokenGroup {
    fn from(tokens: &SemanticTokens) -> Self {
        Self(tokens.entries().iter().map(|&(n, c)| (n.to_owned(), c)).collect())
    }
}

#[derive(Serialize)]
struct RoundedHct {
    hue: i64,
    chroma: i64,
    tone: i64,
}

#[derive(Serialize)]
struct ExtractedToken {
    name: String,
    #[serde(rename = "$value")]
    value: Rgb,
    #[serde(rename = "$type")]
    kind: &'static str,
    hct: RoundedHct,
    percentage: f64,
}

impl ExtractedToken {
    #[allow(clippy::cast_possible_truncation)]
    fn new(index: usize, color: &ExtractedColor) -> Self {
        let round = |v: f64| v.round() as i64;
        Self {
            name: format!("color-{}", index + 1),
            value: color.rgb,
            kind: "color",
            hct: RoundedHct {
                hue: round(color.hct.h),
                chroma: round(color.hct.c),
                tone: round(color.hct.t),
            },
            percentage: (color.percentage * 100.0).round() / 100.0,
        }
    }
}

#[derive(Serialize)]
struct SemanticGroups {
    light: TokenGroup,
    dark: TokenGroup,
}

#[derive(Serialize)]
struct ColorTokens<'a> {
    primary: Token<'a>,
    scale: TokenGroup,
    semantic: SemanticGroups,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    extracted: Vec<ExtractedToken>,
}

#[derive(Serialize)]
struct TokenDocument<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    project: &'a str,
    color: ColorTokens<'a>,
}

/// A design-tokens JSON document (`$value`/`$type` per token).
///
/// # Errors
///
/// Returns [`ThemeError::Json`] if serialization fails.
pub fn json_tokens(data: &ExportData) -> Result<String, ThemeError> {
    let doc = TokenDocument {
        schema: TOKEN_SCHEMA,
        project: data.project(),
        color: ColorTokens {
            primary: Token {
                description: Some("Primary brand color"),
                ..Token::color(data.primary)
            },
            scale: (&data.palette.color_scale).into(),
            semantic: SemanticGroups {
                light: (&data.palette.light).into(),
                dark: (&data.palette.dark).into(),
            },
            extracted: data
                .extracted
                .iter()
                .enumerate()
                .map(|(i, c)| ExtractedToken::new(i, c))
                .collect(),
        },
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

// ---------------------------------------------------------------------------
// Figma variables
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ModeValues {
    light: Rgb,
    dark: Rgb,
}

#[derive(Debug, Serialize)]
struct Variable {
    name: String,
    values: ModeValues,
}

#[derive(Debug, Serialize)]
struct VariableCollection<'a> {
    name: &'a str,
    modes: [&'static str; 2],
    variables: Vec<Variable>,
}

/// A Figma variable collection with `Light` and `Dark` modes: one
/// `primary/<step>` variable per ramp step and one `semantic/<role>` per
/// token.
///
/// # Errors
///
/// Returns [`ThemeError::Json`] if serialization fails.
pub fn figma_variables(palette: &ThemePalette, collection: &str) -> Result<String, ThemeError> {
    let scale = palette
        .color_scale
        .iter()
        .zip(palette.dark_color_scale.iter())
        .map(|((step, light), (_, dark))| Variable {
            name: format!("primary/{step}"),
            values: ModeValues { light, dark },
        });
    let semantic = palette
        .light
        .entries()
        .into_iter()
        .zip(palette.dark.entries())
        .map(|((name, light), (_, dark))| Variable {
            name: format!("semantic/{name}"),
            values: ModeValues { light, dark },
        });

    let doc = VariableCollection {
        name: collection,
        modes: ["Light", "Dark"],
        variables: scale.chain(semantic).collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::generate_theme_palette;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn olive() -> ExportData {
        let palette = generate_theme_palette("#5C6356").unwrap();
        ExportData::new(Rgb::from_hex("#5C6356").unwrap(), palette)
    }

    fn with_extracted() -> ExportData {
        olive().with_extracted(vec![
            ExtractedColor::new(Rgb::from_hex("#5C6356").unwrap(), 61.237),
            ExtractedColor::new(Rgb::from_hex("#F2F2F0").unwrap(), 38.763),
        ])
    }

    // ── Naming ───────────────────────────────────────────────────────────

    #[test]
    fn kebab_case_names() {
        assert_eq!(kebab_case("background"), "background");
        assert_eq!(kebab_case("backgroundAlt"), "background-alt");
        assert_eq!(kebab_case("onPrimaryContainer"), "on-primary-container");
        assert_eq!(kebab_case("surface2Hover"), "surface2-hover");
        assert_eq!(kebab_case("text"), "text");
    }

    // ── CSS ──────────────────────────────────────────────────────────────

    #[test]
    fn theme_css_has_three_blocks() {
        let data = olive();
        let css = theme_css(&data.palette);
        assert!(css.starts_with("/* Light Theme */\n:root {\n  --background: #FFFFFF;\n"));
        assert!(css.contains("@media (prefers-color-scheme: dark) {\n  :root {\n    --background: #0A0A0A;"));
        assert!(css.contains(".dark {\n  --background: #0A0A0A;"));
        assert!(css.contains("  --text-primary: #1A1A1A;\n"));
        assert!(css.contains(&format!(
            "  --color-primary-500: {};",
            data.palette.color_scale[crate::scale::ScaleStep::S500]
        )));
        assert_eq!(css.matches("--on-primary:").count(), 3);
        assert_eq!(css.matches("--color-primary-950:").count(), 3);
    }

    #[test]
    fn dark_blocks_match() {
        let css = theme_css(&olive().palette);
        let (before, class) = css.split_once(".dark {").unwrap();
        let media = before.split_once("@media").unwrap().1;
        let vars = |block: &str| -> Vec<String> {
            block
                .lines()
                .map(str::trim)
                .filter(|l| l.starts_with("--"))
                .map(str::to_owned)
                .collect()
        };
        assert_eq!(vars(media).len(), 30);
        assert_eq!(vars(media), vars(class));
    }

    #[test]
    fn tokens_css_lists_extracted() {
        let css = tokens_css(&with_extracted());
        assert!(css.starts_with(":root {\n  /* Primary Color */\n  --color-primary: #5C6356;\n"));
        assert!(css.contains("  --color-extracted-1: #5C6356;\n  --color-extracted-2: #F2F2F0;\n"));
        assert!(css.ends_with('}'));
    }

    #[test]
    fn tokens_css_without_extracted() {
        let css = tokens_css(&olive());
        assert!(!css.contains("Extracted"));
        assert_eq!(css.matches("--color-primary-").count(), 11);
    }

    // ── Tailwind ─────────────────────────────────────────────────────────

    #[test]
    fn tailwind_config_shape() {
        let js = tailwind_config(&with_extracted()).unwrap();
        assert!(js.starts_with("// tailwind.config.js\n"));
        let body = js.split_once("module.exports = ").unwrap().1.trim_end().trim_end_matches(';');
        let v: Value = serde_json::from_str(body).unwrap();
        let colors = &v["theme"]["extend"]["colors"];
        assert_eq!(colors["primary"]["DEFAULT"], "#5C6356");
        assert_eq!(colors["primary"].as_object().unwrap().len(), 12);
        assert_eq!(colors["extracted"]["2"], "#F2F2F0");
    }

    #[test]
    fn tailwind_keeps_step_order() {
        let js = tailwind_config(&olive()).unwrap();
        let p50 = js.find("\"50\"").unwrap();
        let p950 = js.find("\"950\"").unwrap();
        let default = js.find("\"DEFAULT\"").unwrap();
        assert!(p50 < p950 && p950 < default);
    }

    fn tailwind_colors(js: &str) -> Value {
        let body = js.split_once("module.exports = ").unwrap().1.trim_end().trim_end_matches(';');
        let v: Value = serde_json::from_str(body).unwrap();
        v["theme"]["extend"]["colors"].clone()
    }

    #[test]
    fn theme_tailwind_groups() {
        let colors = tailwind_colors(&theme_tailwind(&olive().palette).unwrap());
        assert_eq!(colors["background"], "var(--background)");
        assert_eq!(colors["surface-alt"], "var(--surface-alt)");
        assert_eq!(colors["border"], "var(--border)");
        assert_eq!(colors["on-primary"], "var(--on-primary)");
        assert_eq!(colors["primary"]["DEFAULT"], "var(--primary)");
        assert_eq!(colors["primary"]["hover"], "var(--primary-hover)");
        assert_eq!(colors["primary"]["active"], "var(--primary-active)");
        assert_eq!(colors["text"]["primary"], "var(--text-primary)");
        assert_eq!(colors["text"]["muted"], "var(--text-muted)");
        assert_eq!(colors["text"].as_object().unwrap().len(), 4);
    }

    #[test]
    fn theme_tailwind_vars_are_defined_by_theme_css() {
        let palette = olive().palette;
        let js = theme_tailwind(&palette).unwrap();
        let css = theme_css(&palette);
        let vars: Vec<&str> = js
            .split("var(--")
            .skip(1)
            .map(|rest| rest.split_once(')').unwrap().0)
            .collect();
        assert_eq!(vars.len(), 19);
        for var in vars {
            assert_eq!(css.matches(&format!("--{var}:")).count(), 3, "--{var}");
        }
    }

    // ── JSON tokens ──────────────────────────────────────────────────────

    #[test]
    fn json_tokens_shape() {
        let data = with_extracted().with_project_name("Olive Grove");
        let v: Value = serde_json::from_str(&json_tokens(&data).unwrap()).unwrap();
        assert_eq!(v["$schema"], TOKEN_SCHEMA);
        assert_eq!(v["project"], "Olive Grove");
        assert_eq!(v["color"]["primary"]["$value"], "#5C6356");
        assert_eq!(v["color"]["primary"]["$type"], "color");
        assert_eq!(v["color"]["scale"]["500"]["$type"], "color");
        assert_eq!(v["color"]["semantic"]["light"]["background"]["$value"], "#FFFFFF");
        assert_eq!(v["color"]["semantic"]["dark"]["background"]["$value"], "#0A0A0A");

        let first = &v["color"]["extracted"][0];
        assert_eq!(first["name"], "color-1");
        assert_eq!(first["percentage"], 61.24);
        assert!(first["hct"]["tone"].is_i64());
    }

    #[test]
    fn json_tokens_default_project_and_no_extracted() {
        let v: Value = serde_json::from_str(&json_tokens(&olive()).unwrap()).unwrap();
        assert_eq!(v["project"], DEFAULT_PROJECT);
        assert!(v["color"].get("extracted").is_none());
        assert!(v["color"]["scale"]["50"].get("$description").is_none());
    }

    // ── Figma ────────────────────────────────────────────────────────────

    #[test]
    fn figma_variables_have_both_modes() {
        let palette = olive().palette;
        let v: Value = serde_json::from_str(&figma_variables(&palette, "Olive").unwrap()).unwrap();
        assert_eq!(v["name"], "Olive");
        assert_eq!(v["modes"], serde_json::json!(["Light", "Dark"]));

        let vars = v["variables"].as_array().unwrap();
        assert_eq!(vars.len(), 11 + 19);
        assert_eq!(vars[0]["name"], "primary/50");
        assert_eq!(vars[0]["values"]["Light"], palette.color_scale.0[0].to_hex());
        assert_eq!(vars[0]["values"]["Dark"], palette.color_scale.0[10].to_hex());
        assert_eq!(vars[11]["name"], "semantic/background");
        assert_eq!(vars[11]["values"]["Light"], "#FFFFFF");
        assert_eq!(vars[11]["values"]["Dark"], "#0A0A0A");
    }
}
