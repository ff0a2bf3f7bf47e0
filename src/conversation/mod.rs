// Gateway module for the conversation core - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod formatter;
mod message;
mod sequencer;
mod session;
mod state;

// Public re-exports - the ONLY way to access conversation functionality
pub use formatter::{interpret, render_route, DirectionsReply, Instruction};
pub use message::{Message, MessageLog, Sender};
pub use sequencer::{transition, Effect, Event, LookupRequest};
pub use session::Session;
pub use state::{ConversationState, LookupStatus, Mode, Ticket};
