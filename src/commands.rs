// SPDX-License-Identifier: MIT
//
// Subcommand handlers. Each one returns the text destined for stdout;
// main decides where it goes.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};
use tonal_color::{Hct, Rgb};
use tonal_extract::{
    ExtractedColor, ImageSource, extract_colors_from_image, filter_extracted_colors,
    select_primary_color,
};
use tonal_theme::export::{
    figma_variables, json_tokens, tailwind_config, theme_css, theme_tailwind, tokens_css,
};
use tonal_theme::presets::{Category, PRESETS, presets_by_category};
use tonal_theme::ramp::{ERROR_SEED, SUCCESS_SEED, WARNING_SEED};
use tonal_theme::{
    ColorScale, ExportData, MaterialScheme, ScaleStep, TargetLevel, VisionType,
    accessibility_report, all_simulations, auto_text_color, find_accessible_shade,
    generate_accessibility_report, generate_brand_ramp, generate_color_palette,
    generate_neutral_ramp, generate_ramp, generate_theme_palette, simulate,
};
use tracing::{debug, info, warn};

use crate::cli::{Cli, Command, RampVariant};
use crate::config::Config;
use crate::format::ExportFormats;

const DEFAULT_FIGMA_COLLECTION: &str = "Tonal";

/// Run the parsed command against the loaded configuration.
pub fn run(cli: &Cli, config: &Config) -> Result<String> {
    match &cli.command {
        Command::Ramp { seed, variant } => ramp(seed, *variant),
        Command::Palette {
            primary,
            secondary,
            tertiary,
        } => palette(primary, secondary.as_deref(), tertiary.as_deref()),
        Command::Theme {
            seed,
            formats,
            project,
        } => theme(seed, *formats, project.as_deref(), config),
        Command::Extract {
            image,
            colors,
            sample_size,
            seed,
            formats,
        } => {
            let mut options = config.extract;
            if let Some(n) = colors {
                options.color_count = *n;
            }
            if let Some(px) = sample_size {
                options.sample_size = *px;
            }
            if seed.is_some() {
                options.seed = *seed;
            }
            extract(image, &options, *formats, config)
        }
        Command::Contrast { fg, bg } => contrast(fg, bg),
        Command::Simulate { color, vision } => simulate_cmd(color, *vision),
        Command::Audit {
            seed,
            background,
            level,
        } => audit(seed, background, (*level).into()),
        Command::Presets { category } => Ok(presets(category.map(Category::from))),
    }
}

// ---------------------------------------------------------------------------
// Ramps
// ---------------------------------------------------------------------------

fn write_scale(out: &mut String, scale: &ColorScale) {
    for (step, rgb) in scale.iter() {
        let hct = Hct::from_rgb(rgb);
        let _ = writeln!(
            out,
            "{:>4}  {rgb}  h {:>5.1}  c {:>4.1}  t {:>4.1}",
            step.key(),
            hct.h,
            hct.c,
            hct.t
        );
    }
}

fn ramp(seed: &str, variant: RampVariant) -> Result<String> {
    let scale = match variant {
        RampVariant::Standard => generate_ramp(seed)?,
        RampVariant::Brand => generate_brand_ramp(seed)?,
        RampVariant::Neutral => generate_neutral_ramp(seed)?,
    };
    debug!(seed, ?variant, "ramp generated");
    let mut out = String::new();
    write_scale(&mut out, &scale);
    Ok(out)
}

fn palette(primary: &str, secondary: Option<&str>, tertiary: Option<&str>) -> Result<String> {
    let palette = generate_color_palette(primary, secondary, tertiary)?;
    let rows = [
        ("primary", &palette.primary),
        ("secondary", &palette.secondary),
        ("tertiary", &palette.tertiary),
        ("neutral", &palette.neutral),
        ("error", &palette.error),
        ("warning", &palette.warning),
        ("success", &palette.success),
    ];

    let mut out = String::from("         ");
    for step in ScaleStep::ALL {
        let _ = write!(out, " {:>7}", step.key());
    }
    out.push('\n');
    for (name, scale) in rows {
        let _ = write!(out, "{name:<9}");
        for (_, rgb) in scale.iter() {
            let _ = write!(out, " {rgb}");
        }
        out.push('\n');
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Themes and export
// ---------------------------------------------------------------------------

fn resolve_formats(flag: Option<ExportFormats>, config: &Config) -> Result<ExportFormats> {
    match (flag, config.export.formats.as_deref()) {
        (Some(formats), _) => Ok(formats),
        (None, Some(list)) => list.parse().context("in [export] formats"),
        (None, None) => Ok(ExportFormats::CSS),
    }
}

fn material_json(seed: Rgb) -> Result<String> {
    let roles = |scheme: &MaterialScheme| {
        scheme
            .entries()
            .into_iter()
            .map(|(name, rgb)| (name.to_owned(), Value::String(rgb.to_hex())))
            .collect::<Map<String, Value>>()
    };
    let seed = seed.to_hex();
    let doc = json!({
        "seed": seed,
        "light": roles(&MaterialScheme::light(&seed)?),
        "dark": roles(&MaterialScheme::dark(&seed)?),
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render every selected format. A single format is printed bare; several
/// are separated by `==> name <==` headers.
fn export(data: &ExportData, formats: ExportFormats, config: &Config) -> Result<String> {
    let collection = config
        .export
        .figma_collection
        .as_deref()
        .unwrap_or(DEFAULT_FIGMA_COLLECTION);

    let mut sections = Vec::new();
    for (name, _) in formats.selected() {
        let body = match name {
            "css" => theme_css(&data.palette),
            "tokens" => tokens_css(data),
            "tailwind" => tailwind_config(data)?,
            "tailwind-theme" => theme_tailwind(&data.palette)?,
            "json" => json_tokens(data)?,
            "figma" => figma_variables(&data.palette, collection)?,
            "material" => material_json(data.primary)?,
            _ => continue,
        };
        debug!(format = name, bytes = body.len(), "exported");
        sections.push((name, body));
    }

    let mut out = String::new();
    let headed = sections.len() > 1;
    for (i, (name, body)) in sections.iter().enumerate() {
        if headed {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "==> {name} <==");
        }
        out.push_str(body.trim_end());
        out.push('\n');
    }
    Ok(out)
}

fn theme(seed: &str, formats: Option<ExportFormats>, project: Option<&str>, config: &Config) -> Result<String> {
    let primary = Rgb::from_hex(seed)?;
    let palette = generate_theme_palette(seed)?;
    let mut data = ExportData::new(primary, palette);
    if let Some(name) = project.or(config.export.project_name.as_deref()) {
        data = data.with_project_name(name);
    }
    info!(seed = %primary, "theme generated");
    export(&data, resolve_formats(formats, config)?, config)
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

fn write_extracted(out: &mut String, colors: &[ExtractedColor]) {
    for color in colors {
        let _ = writeln!(
            out,
            "{}  {:>5.1}%  h {:>5.1}  c {:>4.1}  t {:>4.1}",
            color.rgb, color.percentage, color.hct.h, color.hct.c, color.hct.t
        );
    }
}

fn extract(
    image: &Path,
    options: &tonal_extract::ExtractOptions,
    formats: Option<ExportFormats>,
    config: &Config,
) -> Result<String> {
    let source = ImageSource::from(image.to_path_buf());
    let colors = extract_colors_from_image(&source, options)
        .with_context(|| format!("{}", image.display()))?;
    if colors.is_empty() {
        warn!(image = %image.display(), "no opaque pixels to sample");
        return Ok("no colors found\n".to_owned());
    }

    // Fall back to the unfiltered list when the filter rejects everything.
    let usable = filter_extracted_colors(&colors, &config.filter);
    let candidates = if usable.is_empty() { &colors } else { &usable };
    let primary = select_primary_color(candidates).map_or(colors[0].rgb, |c| c.rgb);
    info!(count = colors.len(), %primary, "colors extracted");

    let mut out = String::new();
    write_extracted(&mut out, &colors);
    let _ = writeln!(out, "\nprimary: {primary}");

    if let Some(formats) = formats {
        let palette = generate_theme_palette(&primary.to_hex())?;
        let mut data = ExportData::new(primary, palette).with_extracted(colors);
        if let Some(name) = config.export.project_name.as_deref() {
            data = data.with_project_name(name);
        }
        out.push('\n');
        out.push_str(&export(&data, formats, config)?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Accessibility
// ---------------------------------------------------------------------------

fn contrast(fg: &str, bg: &str) -> Result<String> {
    let report = accessibility_report(Rgb::from_hex(fg)?, Rgb::from_hex(bg)?);
    let c = &report.contrast;
    let mark = |pass: bool| if pass { "pass" } else { "fail" };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} on {}: {} ({})",
        report.foreground,
        report.background,
        c.ratio_text(),
        c.level
    );
    let _ = writeln!(
        out,
        "  AA {}  AAA {}  AA-Large {}  AAA-Large {}",
        mark(c.pass_aa),
        mark(c.pass_aaa),
        mark(c.pass_aa_large),
        mark(c.pass_aaa_large)
    );
    for hint in &report.suggestions {
        let _ = writeln!(out, "  - {hint}");
    }
    Ok(out)
}

fn simulate_cmd(color: &str, vision: Option<VisionType>) -> Result<String> {
    let color = Rgb::from_hex(color)?;
    let mut out = String::new();
    match vision {
        Some(kind) => {
            let _ = writeln!(out, "{}", simulate(color, kind));
        }
        None => {
            for (kind, seen) in all_simulations(color) {
                let info = kind.info();
                let _ = writeln!(out, "{:<18} {seen}  {}", info.name, info.prevalence);
            }
        }
    }
    Ok(out)
}

fn audit(seed: &str, background: &str, level: TargetLevel) -> Result<String> {
    let scale = generate_ramp(seed)?;
    let bg = Rgb::from_hex(background)?;
    let mut out = String::new();

    match find_accessible_shade(&scale, bg, level) {
        Some(shade) => {
            let _ = writeln!(
                out,
                "text on {bg}: {} {} ({:.2}:1)",
                shade.shade, shade.color, shade.ratio
            );
        }
        None => {
            let _ = writeln!(out, "text on {bg}: no step reaches {:.1}:1", level.min_ratio());
        }
    }

    let base = scale[ScaleStep::S500];
    let text = auto_text_color(base);
    let _ = writeln!(
        out,
        "text on {base}: {} ({:.2}:1, {})",
        text.recommended, text.ratio, text.level
    );

    let swatches = [base, ERROR_SEED, WARNING_SEED, SUCCESS_SEED];
    let _ = writeln!(out, "\ncolor vision (500, error, warning, success):");
    for report in generate_accessibility_report(&swatches) {
        if report.issues.is_empty() {
            let _ = writeln!(out, "  {:<18} ok", report.name);
            continue;
        }
        let pairs: Vec<String> = report
            .issues
            .iter()
            .map(|p| format!("{}/{}", p.color1, p.color2))
            .collect();
        let _ = writeln!(out, "  {:<18} {}", report.name, pairs.join(" "));
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

fn presets(category: Option<Category>) -> String {
    let list = match category {
        Some(c) => presets_by_category(c),
        None => PRESETS.iter().collect(),
    };
    let mut out = String::new();
    for p in list {
        let _ = writeln!(out, "{:<11} {}  {:<8} {}", p.id, p.hex, p.category, p.description);
    }
    out
}
