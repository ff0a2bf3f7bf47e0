/// Constants module to avoid magic strings and numbers in the codebase

// Directions service
pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "http://buschat.eastus.cloudapp.azure.com:3000";
pub const DIRECTIONS_PATH: &str = "/direction/index";
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 1500;

/// Error value the service reports when it cannot route between the two locations
pub const NO_ROUTES_FOUND: &str = "No routes found";

// Conversation
pub const CHAT_BOT_NAME: &str = "Bus Chat";
pub const RESET_COMMAND: &str = "reset";
pub const ARROW: &str = "--> ";

// Bot messages
pub const INTRO_PROMPT: &str = "To get started, type your starting location. (Eg: Vinhomes Central Park Binh Thanh) \n\nYou can type \"reset\" anytime to reset this conversation";
pub const PROMPT_ENTER_DESTINATION: &str = "Type your destination location. (Eg: Ben Thanh Market District 1)";
pub const PROCESSING_MSG: &str = "Bus Chat is finding a bus route for you ...";
pub const NO_ROUTES_FOUND_MSG: &str = "No routes found for your locations. Please try to be more specific. Start again by entering your starting location.";
pub const ARRIVED_MSG: &str = "You have arrived!";
pub const PROMPT_ENTER_FROM_LOCATION: &str = "Type your starting location. (Eg: Ben Thanh Market)";
pub const LOOKUP_IN_PROGRESS_MSG: &str = "Bus Chat is still finding your previous route. Please wait, or type \"reset\" to start over.";
pub const SERVER_ERROR_MSG: &str = "The server is currently not available. Please try again later. If you want to try again now, you can start by entering the starting location";

// UI Configuration
pub const UI_REFRESH_INTERVAL_MS: u64 = 50;
pub const UI_SCROLL_LINES: u16 = 3;
pub const UI_PAGE_SCROLL_LINES: u16 = 10;
pub const LOOKUP_CHANNEL_CAPACITY: usize = 16;

// Logging
pub const LOG_FILE_NAME: &str = "buschat.log";
