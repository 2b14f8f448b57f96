//! UI components

mod appearance;
mod behaviour;
mod mouse;
pub mod rows;
mod window;

pub use appearance::AppearancePage;
pub use behaviour::BehaviourPage;
pub use mouse::MousePage;
pub use window::SettingsWindow;
