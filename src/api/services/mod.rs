pub mod admin;
pub mod redirect;

pub use redirect::{RedirectService, WelcomeBody, redirect_routes};
