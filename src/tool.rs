use std::fmt;
use std::str::FromStr;

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::Snapshot;

/// Color every new session starts with.
pub const DEFAULT_COLOR: &str = "#0000ff";

/// The four kinds of drawing tool the palette offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Pencil,
    Shape,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Brush,
        ToolKind::Pencil,
        ToolKind::Shape,
        ToolKind::Eraser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Pencil => "pencil",
            ToolKind::Shape => "shape",
            ToolKind::Eraser => "eraser",
        }
    }

    /// Size the tool starts with before the user touches its slider
    pub fn default_size(self) -> f32 {
        match self {
            ToolKind::Brush => 8.0,
            ToolKind::Pencil => 2.0,
            ToolKind::Shape => 4.0,
            ToolKind::Eraser => 24.0,
        }
    }

    /// Shape tools drag out a preview over a saved snapshot instead of painting directly
    pub fn is_shape(self) -> bool {
        matches!(self, ToolKind::Shape)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool name: {0:?}")]
pub struct ParseToolKindError(pub String);

impl FromStr for ToolKind {
    type Err = ParseToolKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseToolKindError(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 3 or 6 hex digits: {0:?}")]
    InvalidLength(String),
    #[error("invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// Parses `#rgb` or `#rrggbb` into an opaque color.
pub fn parse_hex_color(hex: &str) -> Result<Color32, ParseColorError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| ParseColorError::MissingHash(hex.to_owned()))?;
    let invalid = || ParseColorError::InvalidDigit(hex.to_owned());

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                rgb[i] = v * 17;
            }
            Ok(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 if digits.is_ascii() => Ok(Color32::from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => Err(ParseColorError::InvalidLength(hex.to_owned())),
    }
}

/// Formats an opaque color as `#rrggbb`; alpha is dropped.
pub fn to_hex_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Where the current gesture stands, derived from `drawing` and `shape_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    ActiveStroke,
    ActiveShape,
}

/// The active tool and everything the canvas needs to know about the gesture in progress.
#[derive(Debug, Clone)]
pub struct Tool {
    pub name: ToolKind,
    /// Hex encoded, e.g. `#0000ff`
    pub color: String,
    pub size: f32,
    /// True between pointer-down and pointer-up
    pub drawing: bool,
    pub last_pos: Pos2,
    /// Origin of the shape being dragged out
    pub shape_start: Option<Pos2>,
    /// Canvas pixels saved before a shape preview was drawn over them
    pub snapshot: Option<Snapshot>,
}

fn same_f32(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

fn same_pos(a: Pos2, b: Pos2) -> bool {
    same_f32(a.x, b.x) && same_f32(a.y, b.y)
}

/// Floats compare bitwise so that a record always equals itself, NaN included.
impl PartialEq for Tool {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.color == other.color
            && same_f32(self.size, other.size)
            && self.drawing == other.drawing
            && same_pos(self.last_pos, other.last_pos)
            && match (self.shape_start, other.shape_start) {
                (Some(a), Some(b)) => same_pos(a, b),
                (a, b) => a.is_none() && b.is_none(),
            }
            && self.snapshot == other.snapshot
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::new(ToolKind::default(), DEFAULT_COLOR, ToolKind::default().default_size())
    }
}

impl Tool {
    /// A fresh, idle tool record.
    pub fn new(name: ToolKind, color: impl Into<String>, size: f32) -> Self {
        Self {
            name,
            color: color.into(),
            size,
            drawing: false,
            last_pos: Pos2::ZERO,
            shape_start: None,
            snapshot: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        match (self.drawing, self.shape_start) {
            (false, _) => GesturePhase::Idle,
            (true, None) => GesturePhase::ActiveStroke,
            (true, Some(_)) => GesturePhase::ActiveShape,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == GesturePhase::Idle
    }

    /// The color as an egui color, if the stored string parses.
    pub fn color32(&self) -> Result<Color32, ParseColorError> {
        parse_hex_color(&self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kind_parse() {
        assert_eq!("eraser".parse::<ToolKind>(), Ok(ToolKind::Eraser));
        assert_eq!(" Brush ".parse::<ToolKind>(), Ok(ToolKind::Brush));
        assert_eq!(
            "spray".parse::<ToolKind>(),
            Err(ParseToolKindError("spray".to_owned()))
        );
        assert_eq!(ToolKind::Shape.to_string(), "shape");
    }

    #[test]
    fn test_default_sizes() {
        let sizes: Vec<f32> = ToolKind::ALL.iter().map(|k| k.default_size()).collect();
        assert_eq!(sizes, vec![8.0, 2.0, 4.0, 24.0]);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_hex_color("#0000ff"), Ok(Color32::from_rgb(0, 0, 255)));
        assert_eq!(parse_hex_color("#f80"), Ok(Color32::from_rgb(255, 136, 0)));
        assert!(matches!(parse_hex_color("0000ff"), Err(ParseColorError::MissingHash(_))));
        assert!(matches!(parse_hex_color("#00ff"), Err(ParseColorError::InvalidLength(_))));
        assert!(matches!(parse_hex_color("#00zzff"), Err(ParseColorError::InvalidDigit(_))));
        assert_eq!(to_hex_color(Color32::from_rgb(0x12, 0xab, 0xff)), "#12abff");
    }

    #[test]
    fn test_tool_equals_itself_with_nan() {
        let mut tool = Tool::default();
        tool.size = f32::NAN;
        tool.shape_start = Some(Pos2::new(f32::NAN, 1.0));
        assert_eq!(tool, tool.clone());

        let mut other = tool.clone();
        other.shape_start = None;
        assert_ne!(tool, other);
    }

    #[test]
    fn test_phase() {
        let mut tool = Tool::default();
        assert_eq!(tool.phase(), GesturePhase::Idle);

        tool.drawing = true;
        assert_eq!(tool.phase(), GesturePhase::ActiveStroke);

        tool.shape_start = Some(Pos2::new(1.0, 2.0));
        assert_eq!(tool.phase(), GesturePhase::ActiveShape);

        tool.drawing = false;
        assert!(tool.is_idle());
    }
}
