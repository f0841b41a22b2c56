use crate::tool::{Tool, ToolKind};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// The tool record changed, either replaced whole or edited field by field
    ToolChanged {
        old: Tool,
        new: Tool,
    },
    /// One of the per-tool sizes changed
    SizeChanged {
        kind: ToolKind,
        old: f32,
        new: f32,
    },
}

impl StoreEvent {
    /// Short label for logging
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::ToolChanged { .. } => "tool_changed",
            StoreEvent::SizeChanged { .. } => "size_changed",
        }
    }
}
