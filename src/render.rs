use crate::ir::UserRecord;
use crate::layout::{
    ART_START_Y, ART_X, BlockLayout, DOCUMENT_HEIGHT, DOCUMENT_WIDTH, HEADER_RULE, LineKind,
    PositionedLine, SECTION_RULE, TEXT_START_Y, layout_art, layout_text,
};
use crate::theme::Theme;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// X of the text container itself; every line overrides it with its own x.
const TEXT_CONTAINER_X: f64 = 500.0;

pub fn render_art_svg(layout: &BlockLayout, theme: &Theme) -> String {
    let lines: String = layout
        .visible()
        .map(|line| format!("{}\n", render_line(line)))
        .collect();
    format!(
        "<text x=\"{}\" y=\"{}\" fill=\"{}\" class=\"ascii\">\n\n{}\n</text>",
        ART_X, ART_START_Y, theme.text_color, lines
    )
}

/// Every `y` is printed with two decimals (`373.20`), including after the
/// first line, so the text block is not byte-identical to the legacy output
/// which printed `373.2`. Positions are numerically the same.
pub fn render_text_svg(layout: &BlockLayout, theme: &Theme) -> String {
    let lines: Vec<String> = layout.visible().map(render_line).collect();
    format!(
        "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"{}px\">\n{}\n</text>",
        TEXT_CONTAINER_X,
        TEXT_START_Y,
        theme.text_color,
        theme.text_font_size,
        lines.join("\n")
    )
}

fn render_line(line: &PositionedLine) -> String {
    let PositionedLine { x, y, kind } = line;
    match kind {
        LineKind::Art(text) | LineKind::Header(text) => {
            format!("<tspan x=\"{x}\" y=\"{y:.2}\">{}</tspan>", escape_xml(text))
        }
        LineKind::HeaderRule => format!("<tspan x=\"{x}\" y=\"{y:.2}\">{HEADER_RULE}</tspan>"),
        LineKind::SectionRule => format!("<tspan x=\"{x}\" y=\"{y:.2}\">{SECTION_RULE}</tspan>"),
        LineKind::Heading(name) => format!(
            "<tspan x=\"{x}\" y=\"{y:.2}\" class=\"keyColor\">{}</tspan>:",
            escape_xml(name)
        ),
        LineKind::Item { label, value } => format!(
            "<tspan x=\"{x}\" y=\"{y:.2}\" class=\"keyColor\">{}</tspan>: <tspan class=\"valueColor\">{}</tspan>",
            escape_xml(label),
            escape_xml(value)
        ),
        LineKind::Spacer => String::new(),
    }
}

pub fn render_document(art_svg: &str, text_svg: &str, theme: &Theme) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<svg xmlns="http://www.w3.org/2000/svg" font-family="{font}" width="{w}px" height="{h}px" font-size="{size}px">
<style>
	.keyColor {{fill: {key};}}
	.valueColor {{fill: {value};}}
	.addColor {{fill: {add};}}
	.delColor {{fill: {del};}}
	.commentColor {{fill: {comment};}}
	text, tspan {{white-space: pre;}}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="{rx}" />

{art_svg}

{text_svg}

</svg>
"#,
        font = theme.font_family,
        w = DOCUMENT_WIDTH,
        h = DOCUMENT_HEIGHT,
        size = theme.font_size,
        key = theme.key_color,
        value = theme.value_color,
        add = theme.add_color,
        del = theme.del_color,
        comment = theme.comment_color,
        bg = theme.background,
        rx = theme.corner_radius,
    )
}

/// Lays out and renders a whole card.
pub fn render_card(art: &str, record: &UserRecord, theme: &Theme) -> String {
    let art_svg = render_art_svg(&layout_art(art), theme);
    let text_svg = render_text_svg(&layout_text(record), theme);
    render_document(&art_svg, &text_svg, theme)
}

/// Writes the card, creating parent directories. `None` or `-` prints to stdout.
pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) if path != Path::new("-") => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let tmp = path.with_extension("svg.tmp");
            std::fs::write(&tmp, svg).with_context(|| format!("writing {}", tmp.display()))?;
            std::fs::rename(&tmp, path).with_context(|| format!("writing {}", path.display()))?;
            info!("Saved SVG to {}", path.display());
        }
        _ => {
            print!("{}", svg);
        }
    }
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
