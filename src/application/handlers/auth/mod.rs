//! Sign-in and sign-out handlers.

mod login;
mod logout;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
