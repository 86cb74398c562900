pub mod action;
pub mod app;
pub mod components;
pub mod effect;
pub mod events;
pub mod grouping;
pub mod navigation;
pub mod render;
pub mod router;
pub mod state;
pub mod terminal_guard;

pub use action::Action;
pub use app::{run_effect, run_refresh, App, Services};
pub use effect::Effect;
pub use events::{ActionOutcome, AppEvent, RefreshOutcome};
pub use state::{AppState, Dialog, Tab};
