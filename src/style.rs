//! Styling structures for cells and the default style presets

use std::fmt;
use std::sync::LazyLock;

use crate::constants::*;

/// RGB color representation (24-bit, `0xRRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Create a color from a `0xRRGGBB` value; bits above 24 are dropped
    pub fn rgb(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// Parse a hex string such as `"1F4E78"` or `"#1F4E78"`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::rgb)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0x000000)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(0xFFFFFF)
    }

    /// Raw `0xRRGGBB` value
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
    Justify,
}

/// Border line style options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
}

/// Background fill patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPattern {
    None,
    #[default]
    Solid,
    LightGray,
    MediumGray,
    DarkGray,
    Gray125,
}

/// Font settings; `None` fields inherit when merged
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub color: Option<Color>,
}

impl Font {
    fn merge(&self, other: &Font) -> Font {
        Font {
            name: other.name.clone().or_else(|| self.name.clone()),
            size: other.size.or(self.size),
            bold: other.bold.or(self.bold),
            color: other.color.or(self.color),
        }
    }
}

/// Alignment settings; `None` fields inherit when merged
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Alignment {
    pub vertical: Option<VerticalAlignment>,
    pub horizontal: Option<HorizontalAlignment>,
    pub wrap_text: Option<bool>,
}

impl Alignment {
    fn merge(&self, other: &Alignment) -> Alignment {
        Alignment {
            vertical: other.vertical.or(self.vertical),
            horizontal: other.horizontal.or(self.horizontal),
            wrap_text: other.wrap_text.or(self.wrap_text),
        }
    }
}

/// Four-sided border; `None` sides inherit when merged
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border {
    pub top: Option<BorderStyle>,
    pub left: Option<BorderStyle>,
    pub right: Option<BorderStyle>,
    pub bottom: Option<BorderStyle>,
}

impl Border {
    /// Same style on all four sides
    pub fn uniform(style: BorderStyle) -> Self {
        Self {
            top: Some(style),
            left: Some(style),
            right: Some(style),
            bottom: Some(style),
        }
    }

    fn merge(&self, other: &Border) -> Border {
        Border {
            top: other.top.or(self.top),
            left: other.left.or(self.left),
            right: other.right.or(self.right),
            bottom: other.bottom.or(self.bottom),
        }
    }
}

/// Background fill
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fill {
    pub pattern: FillPattern,
    pub foreground_color: Option<Color>,
}

impl Fill {
    /// Solid fill of one color
    pub fn solid(color: Color) -> Self {
        Self {
            pattern: FillPattern::Solid,
            foreground_color: Some(color),
        }
    }

    fn merge(&self, other: &Fill) -> Fill {
        Fill {
            pattern: other.pattern,
            foreground_color: other.foreground_color.or(self.foreground_color),
        }
    }
}

/// Styling for a cell
///
/// The same type serves as a partial override and as a resolved style. A style
/// produced by [`resolve_style`] always has font size and weight, alignment
/// and all four border sides populated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    pub font: Font,
    pub alignment: Alignment,
    pub border: Border,
    pub fill: Option<Fill>,
}

impl CellStyle {
    /// Empty override
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` onto `self`, field by field; `Some` values in `other` win
    pub fn merge(&self, other: &CellStyle) -> CellStyle {
        let fill = match (&self.fill, &other.fill) {
            (Some(base), Some(patch)) => Some(base.merge(patch)),
            (base, patch) => (*patch).or(*base),
        };
        CellStyle {
            font: self.font.merge(&other.font),
            alignment: self.alignment.merge(&other.alignment),
            border: self.border.merge(&other.border),
            fill,
        }
    }

    /// Set font size
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font.size = Some(size);
        self
    }

    /// Set font family
    pub fn with_font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = Some(name.into());
        self
    }

    /// Set font weight
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font.bold = Some(bold);
        self
    }

    /// Set font color
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font.color = Some(color);
        self
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, horizontal: HorizontalAlignment) -> Self {
        self.alignment.horizontal = Some(horizontal);
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, vertical: VerticalAlignment) -> Self {
        self.alignment.vertical = Some(vertical);
        self
    }

    /// Set text wrapping
    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = Some(wrap);
        self
    }

    /// Use the same border style on all sides
    pub fn with_border(mut self, style: BorderStyle) -> Self {
        self.border = Border::uniform(style);
        self
    }

    /// Set background fill
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Style class of a cell, selecting its default preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Title,
    Subtitle,
    Header,
    Body,
    Footer,
    Text,
}

impl CellType {
    /// All cell types, in preset-table order
    pub const ALL: [CellType; 6] = [
        CellType::Title,
        CellType::Subtitle,
        CellType::Header,
        CellType::Body,
        CellType::Footer,
        CellType::Text,
    ];

    /// Map a textual tag (case-insensitive) to a cell type; unknown tags are `Text`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "TITLE" => CellType::Title,
            "SUBTITLE" => CellType::Subtitle,
            "HEADER" => CellType::Header,
            "BODY" => CellType::Body,
            "FOOTER" => CellType::Footer,
            _ => CellType::Text,
        }
    }

    /// Default preset for this type
    pub fn default_style(self) -> &'static CellStyle {
        &DEFAULT_STYLES[self as usize]
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            CellType::Title => "TITLE",
            CellType::Subtitle => "SUBTITLE",
            CellType::Header => "HEADER",
            CellType::Body => "BODY",
            CellType::Footer => "FOOTER",
            CellType::Text => "TEXT",
        };
        f.write_str(tag)
    }
}

static DEFAULT_STYLES: LazyLock<[CellStyle; 6]> =
    LazyLock::new(|| CellType::ALL.map(build_default_style));

fn build_default_style(cell_type: CellType) -> CellStyle {
    // (size, bold, border, wrap, horizontal)
    let (size, bold, border, wrap, horizontal) = match cell_type {
        CellType::Title => (
            TITLE_FONT_SIZE,
            true,
            BorderStyle::Medium,
            false,
            HorizontalAlignment::Center,
        ),
        CellType::Subtitle => (
            DEFAULT_FONT_SIZE,
            true,
            BorderStyle::Medium,
            true,
            HorizontalAlignment::Center,
        ),
        CellType::Header => (
            DEFAULT_FONT_SIZE,
            true,
            BorderStyle::Thin,
            false,
            HorizontalAlignment::Center,
        ),
        CellType::Body => (
            BODY_FONT_SIZE,
            false,
            BorderStyle::Thin,
            true,
            HorizontalAlignment::Left,
        ),
        CellType::Footer => (
            DEFAULT_FONT_SIZE,
            true,
            BorderStyle::Medium,
            false,
            HorizontalAlignment::Center,
        ),
        CellType::Text => (
            DEFAULT_FONT_SIZE,
            false,
            BorderStyle::Medium,
            true,
            HorizontalAlignment::Left,
        ),
    };

    let fill = match cell_type {
        CellType::Header => Some(Fill::solid(Color::rgb(HEADER_FILL_COLOR))),
        _ => None,
    };

    CellStyle {
        font: Font {
            name: Some(DEFAULT_FONT_NAME.to_string()),
            size: Some(size),
            bold: Some(bold),
            color: Some(Color::rgb(DEFAULT_FONT_COLOR)),
        },
        alignment: Alignment {
            vertical: Some(VerticalAlignment::Middle),
            horizontal: Some(horizontal),
            wrap_text: Some(wrap),
        },
        border: Border::uniform(border),
        fill,
    }
}

/// Resolve the style of a cell: the type preset with `override_style` merged on top
pub fn resolve_style(cell_type: CellType, override_style: Option<&CellStyle>) -> CellStyle {
    let base = cell_type.default_style();
    match override_style {
        Some(patch) => base.merge(patch),
        None => base.clone(),
    }
}
