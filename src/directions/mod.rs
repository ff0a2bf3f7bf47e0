// Gateway module for the directions service - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod client;
mod traits;
mod types;

// Public re-exports - the ONLY way to access directions functionality
pub use client::HttpDirectionsClient;
#[cfg(test)]
pub use traits::MockDirectionsService;
pub use traits::DirectionsService;
pub use types::RouteQuery;
