pub mod app;
pub mod cli;
pub mod constants;
pub mod conversation;
pub mod directions;
pub mod runtime;
pub mod tui;
pub mod utils;

pub use app::{load_config, Config};
pub use conversation::{Message, Sender, Session};
pub use directions::{DirectionsService, HttpDirectionsClient, RouteQuery};
pub use tui::run_ui;
pub use utils::BusChatError;
