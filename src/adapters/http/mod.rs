//! HTTP adapter - server-rendered pages.
//!
//! - `router` - Route table and tower layers
//! - `middleware` - Signed session cookie and auth extractors
//! - `views` - Handlebars templates
//! - `pages` - Page handlers
//! - `state` - Shared application state

pub mod middleware;
pub mod pages;
pub mod router;
pub mod state;
pub mod views;

pub use router::app_router;
pub use state::AppState;
pub use views::Views;
