use crate::ir::UserRecord;

pub const DOCUMENT_WIDTH: f64 = 2500.0;
pub const DOCUMENT_HEIGHT: f64 = 1282.0;

pub const ART_X: f64 = 100.0;
pub const ART_START_Y: f64 = 100.0;
pub const ART_LINE_HEIGHT: f64 = 8.6;

pub const TEXT_X: f64 = 1300.0;
pub const TEXT_START_Y: f64 = 150.0;
/// Number of line slots the text column is spread over.
pub const TEXT_LINE_SLOTS: f64 = 22.0;

pub const HEADER_RULE: &str = "---------------";
pub const SECTION_RULE: &str = "——————";

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Art(String),
    Header(String),
    HeaderRule,
    Heading(String),
    SectionRule,
    Item { label: String, value: String },
    /// Blank advance after a section; renders to nothing.
    Spacer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub x: f64,
    pub y: f64,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockLayout {
    pub lines: Vec<PositionedLine>,
}

impl BlockLayout {
    /// Lines that produce markup, i.e. everything except spacers.
    pub fn visible(&self) -> impl Iterator<Item = &PositionedLine> {
        self.lines.iter().filter(|line| line.kind != LineKind::Spacer)
    }

    pub fn count(&self, pred: impl Fn(&LineKind) -> bool) -> usize {
        self.lines.iter().filter(|line| pred(&line.kind)).count()
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn text_line_height() -> f64 {
    (DOCUMENT_HEIGHT - 2.0 * TEXT_START_Y) / TEXT_LINE_SLOTS
}

/// Vertical cursor. Each advance rounds, so drift matches fixed-point addition.
struct Cursor {
    x: f64,
    y: f64,
    step: f64,
    lines: Vec<PositionedLine>,
}

impl Cursor {
    fn new(x: f64, y: f64, step: f64) -> Self {
        Self {
            x,
            y,
            step,
            lines: Vec::new(),
        }
    }

    fn emit(&mut self, kind: LineKind) {
        self.lines.push(PositionedLine {
            x: self.x,
            y: self.y,
            kind,
        });
        self.y = round2(self.y + self.step);
    }

    fn finish(self) -> BlockLayout {
        BlockLayout { lines: self.lines }
    }
}

pub fn layout_art(art: &str) -> BlockLayout {
    let mut cursor = Cursor::new(ART_X, ART_START_Y, ART_LINE_HEIGHT);
    for line in art.split('\n').filter(|line| !line.is_empty()) {
        cursor.emit(LineKind::Art(line.to_string()));
    }
    cursor.finish()
}

pub fn layout_text(record: &UserRecord) -> BlockLayout {
    let mut cursor = Cursor::new(TEXT_X, TEXT_START_Y, text_line_height());
    cursor.emit(LineKind::Header(format!("{}@GitHub", record.username)));
    cursor.emit(LineKind::HeaderRule);

    for section in &record.sections {
        if let Some(name) = section.heading() {
            cursor.emit(LineKind::Heading(name.to_string()));
            cursor.emit(LineKind::SectionRule);
        }
        for item in &section.items {
            cursor.emit(LineKind::Item {
                label: item.label.clone(),
                value: item.value.clone(),
            });
        }
        cursor.emit(LineKind::Spacer);
    }

    cursor.finish()
}
