use serde::{Deserialize, Serialize};

use crate::tool::ToolKind;

/// Last-used size of each tool kind, so switching back to a tool restores its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSizes {
    pub brush: f32,
    pub pencil: f32,
    pub shape: f32,
    pub eraser: f32,
}

impl Default for ToolSizes {
    fn default() -> Self {
        Self {
            brush: ToolKind::Brush.default_size(),
            pencil: ToolKind::Pencil.default_size(),
            shape: ToolKind::Shape.default_size(),
            eraser: ToolKind::Eraser.default_size(),
        }
    }
}

impl ToolSizes {
    pub fn get(&self, kind: ToolKind) -> f32 {
        match kind {
            ToolKind::Brush => self.brush,
            ToolKind::Pencil => self.pencil,
            ToolKind::Shape => self.shape,
            ToolKind::Eraser => self.eraser,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut f32 {
        match kind {
            ToolKind::Brush => &mut self.brush,
            ToolKind::Pencil => &mut self.pencil,
            ToolKind::Shape => &mut self.shape,
            ToolKind::Eraser => &mut self.eraser,
        }
    }

    /// Stores `size` for `kind` and returns the previous value.
    pub fn set(&mut self, kind: ToolKind, size: f32) -> f32 {
        std::mem::replace(self.get_mut(kind), size)
    }
}
