#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod event;
pub mod gesture;
pub mod panels;
pub mod store;
pub mod tool;

pub use app::PaintApp;
pub use canvas::{Canvas, Snapshot};
pub use event::{EventBus, EventHandler, StoreEvent, SubscriptionId};
pub use gesture::GestureEnd;
pub use store::{PaintStore, StorePreferences, ToolSizes};
pub use tool::{GesturePhase, Tool, ToolKind};
