use crate::event::{EventBus, EventHandler, StoreEvent, SubscriptionId};
use crate::tool::{Tool, ToolKind};
use futures::channel::mpsc::UnboundedReceiver;

use super::{StorePreferences, ToolSizes};

/// The shared state every part of the paint UI reads and writes.
///
/// `PaintStore` holds the active [`Tool`] and the last-used size of each
/// [`ToolKind`]. It is a passive container: every setter assigns
/// unconditionally and nothing is validated. What it adds over plain fields is
/// change notification. After each mutation that changes an observable value,
/// subscribers are called synchronously, in subscription order, with a
/// [`StoreEvent`] describing the change. Writing a value equal to the current
/// one emits nothing.
///
/// # Gestures
///
/// `drawing`, `last_pos`, `shape_start` and `snapshot` on the tool follow a
/// small state machine (idle, active stroke, active shape) that the store does
/// not enforce. Callers drive it through [`crate::gesture`], which keeps
/// `shape_start` and `snapshot` cleared whenever no gesture is active.
///
/// # Example
///
/// ```rust
/// use paint_store::{PaintStore, ToolKind};
///
/// let mut store = PaintStore::new();
/// let events = store.subscribe_channel();
///
/// store.select_tool(ToolKind::Eraser);
/// assert_eq!(store.tool().size, 24.0);
/// # drop(events);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaintStore {
    tool: Tool,
    sizes: ToolSizes,
    event_bus: EventBus,
}

impl PaintStore {
    /// Brush, `#0000ff`, size 8, idle; sizes 8/2/4/24.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Replaces the whole tool record.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }
        let old = std::mem::replace(&mut self.tool, tool);
        log::debug!(
            "Tool changed: {} {} size {} -> {} {} size {} ({:?})",
            old.name,
            old.color,
            old.size,
            self.tool.name,
            self.tool.color,
            self.tool.size,
            self.tool.phase()
        );
        self.event_bus.emit(StoreEvent::ToolChanged {
            old,
            new: self.tool.clone(),
        });
    }

    /// Edits the tool record in place and notifies once for all edits made in `f`.
    pub fn update_tool(&mut self, f: impl FnOnce(&mut Tool)) {
        let mut tool = self.tool.clone();
        f(&mut tool);
        self.set_tool(tool);
    }

    pub fn sizes(&self) -> &ToolSizes {
        &self.sizes
    }

    pub fn size_for(&self, kind: ToolKind) -> f32 {
        self.sizes.get(kind)
    }

    /// Sets the remembered size of `kind`. The active tool's `size` is left alone.
    pub fn set_size_for(&mut self, kind: ToolKind, size: f32) {
        let old = self.sizes.set(kind, size);
        // Bitwise, so rewriting the same NaN stays silent too
        if old.to_bits() == size.to_bits() {
            return;
        }
        log::debug!("{} size changed: {} -> {}", kind, old, size);
        self.event_bus.emit(StoreEvent::SizeChanged { kind, old, new: size });
    }

    pub fn brush_size(&self) -> f32 {
        self.sizes.brush
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.set_size_for(ToolKind::Brush, size);
    }

    pub fn pencil_size(&self) -> f32 {
        self.sizes.pencil
    }

    pub fn set_pencil_size(&mut self, size: f32) {
        self.set_size_for(ToolKind::Pencil, size);
    }

    pub fn shape_size(&self) -> f32 {
        self.sizes.shape
    }

    pub fn set_shape_size(&mut self, size: f32) {
        self.set_size_for(ToolKind::Shape, size);
    }

    pub fn eraser_size(&self) -> f32 {
        self.sizes.eraser
    }

    pub fn set_eraser_size(&mut self, size: f32) {
        self.set_size_for(ToolKind::Eraser, size);
    }

    /// Switches to a fresh, idle tool of `kind`, carrying over the color and
    /// restoring the kind's remembered size.
    pub fn select_tool(&mut self, kind: ToolKind) {
        if !self.tool.is_idle() {
            log::warn!("Switching to {} while a {} gesture is active", kind, self.tool.name);
        }
        log::info!("Tool selected: {}", kind);
        let tool = Tool::new(kind, self.tool.color.clone(), self.sizes.get(kind));
        self.set_tool(tool);
    }

    /// Size slider for the active tool: updates both the tool and its remembered size.
    pub fn set_active_size(&mut self, size: f32) {
        self.set_size_for(self.tool.name, size);
        self.update_tool(|tool| tool.size = size);
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        self.update_tool(|tool| tool.color = color);
    }

    /// Back to the state of a freshly created store. Subscribers are kept.
    pub fn reset(&mut self) {
        self.set_tool(Tool::default());
        for kind in ToolKind::ALL {
            self.set_size_for(kind, kind.default_size());
        }
    }

    /// The part of the state worth keeping between sessions.
    pub fn preferences(&self) -> StorePreferences {
        StorePreferences {
            tool: self.tool.name,
            color: self.tool.color.clone(),
            sizes: self.sizes,
        }
    }

    /// Loads saved preferences; the tool comes back idle with its remembered size.
    pub fn apply_preferences(&mut self, preferences: StorePreferences) {
        for kind in ToolKind::ALL {
            self.set_size_for(kind, preferences.sizes.get(kind));
        }
        let size = self.sizes.get(preferences.tool);
        self.set_tool(Tool::new(preferences.tool, preferences.color, size));
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> SubscriptionId {
        self.event_bus.subscribe(handler)
    }

    pub fn subscribe_channel(&self) -> UnboundedReceiver<StoreEvent> {
        self.event_bus.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.event_bus.unsubscribe(id)
    }
}
