//! TUI widgets - one per panel plus the shared chrome

mod auth_modal;
mod forms;
mod history;
mod input;
mod message_area;
mod profile;
mod settings;
mod sidebar;
mod status_bar;

pub use auth_modal::AuthModal;
pub use forms::{EssayPanel, TestPanel};
pub use history::HistoryPanel;
pub use input::InputWidget;
pub use message_area::MessageArea;
pub use profile::ProfilePanel;
pub use settings::SettingsPanel;
pub use sidebar::Sidebar;
pub use status_bar::StatusBar;
