mod paint_store;
mod persistence;
mod sizes;

pub use paint_store::PaintStore;
pub use persistence::{
    PREFERENCES_KEY, PersistenceError, PersistenceResult, StorePreferences, load_preferences,
    save_preferences,
};
pub use sizes::ToolSizes;
