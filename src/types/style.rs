use serde::{Deserialize, Serialize};

/// Cell style as supplied by the decoder.
///
/// Every part is optional; unknown keywords deserialize to an `Other`
/// variant so a single odd attribute never fails the whole workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Borders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// A color reference. Only packed ARGB values are rendered; theme and
/// indexed references fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argb: Option<String>,
}

impl ColorRef {
    pub fn argb(argb: impl Into<String>) -> Self {
        Self {
            argb: Some(argb.into()),
        }
    }
}

/// Optional color reference flattened to its packed value.
pub(crate) fn packed(color: Option<&ColorRef>) -> Option<&str> {
    color.and_then(|c| c.argb.as_deref())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<HAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VAlign>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
    #[serde(other)]
    Other,
}

impl HAlign {
    /// CSS `text-align` value, if the keyword maps to one.
    pub fn css(self) -> Option<&'static str> {
        match self {
            Self::Left | Self::Fill => Some("left"),
            Self::Center | Self::CenterContinuous => Some("center"),
            Self::Right => Some("right"),
            Self::Justify | Self::Distributed => Some("justify"),
            Self::General | Self::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    #[serde(alias = "center")]
    Middle,
    Bottom,
    Justify,
    Distributed,
    #[serde(other)]
    Other,
}

impl VAlign {
    /// CSS `vertical-align` value, if the keyword maps to one.
    pub fn css(self) -> Option<&'static str> {
        match self {
            Self::Top => Some("top"),
            Self::Middle | Self::Justify | Self::Distributed => Some("middle"),
            Self::Bottom => Some("bottom"),
            Self::Other => None,
        }
    }
}

/// Cell fill. Only the foreground (pattern) color is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg_color: Option<ColorRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderEdge {
    /// Line style keyword (`thin`, `medium`, ...). Edges always render 1px solid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    /// Font family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorRef>,
}

/// Underline is either a flag or a style keyword (`single`, `double`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Underline {
    Flag(bool),
    Kind(String),
}

impl Underline {
    pub fn is_set(&self) -> bool {
        match self {
            Self::Flag(on) => *on,
            Self::Kind(kind) => !kind.is_empty() && kind != "none",
        }
    }
}
