//! Page handlers.
//!
//! Each handler builds its application handler from [`AppState`], runs it
//! and renders a template or redirects. Expected failures become a message
//! on the page; they are never surfaced as 500 responses.
//!
//! [`AppState`]: super::state::AppState

pub mod auth;
pub mod common;
pub mod misc;
pub mod records;
pub mod users;
pub mod visitor;
