//! Domain services shared by the HTTP layer and the CLI

pub mod link_registry;
pub mod user_store;

pub use link_registry::{AddOutcome, LinkRegistry, UpdateOutcome};
pub use user_store::{Authenticator, DEFAULT_ROOT_PASSWORD, UserStore};
