use crate::layout::{BlockLayout, LineKind, PositionedLine};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub art: Vec<LineDump>,
    pub text: Vec<LineDump>,
}

#[derive(Debug, Serialize)]
pub struct LineDump {
    pub kind: &'static str,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl LayoutDump {
    pub fn from_layouts(art: &BlockLayout, text: &BlockLayout) -> Self {
        Self {
            art: art.lines.iter().map(LineDump::from_line).collect(),
            text: text.lines.iter().map(LineDump::from_line).collect(),
        }
    }
}

impl LineDump {
    fn from_line(line: &PositionedLine) -> Self {
        let (kind, label, text) = match &line.kind {
            LineKind::Art(text) => ("art", None, Some(text.clone())),
            LineKind::Header(text) => ("header", None, Some(text.clone())),
            LineKind::HeaderRule => ("header_rule", None, None),
            LineKind::Heading(name) => ("heading", None, Some(name.clone())),
            LineKind::SectionRule => ("section_rule", None, None),
            LineKind::Item { label, value } => ("item", Some(label.clone()), Some(value.clone())),
            LineKind::Spacer => ("spacer", None, None),
        };
        Self {
            kind,
            x: line.x,
            y: line.y,
            label,
            text,
        }
    }
}

pub fn write_layout_dump(path: &Path, art: &BlockLayout, text: &BlockLayout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layouts(art, text);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
