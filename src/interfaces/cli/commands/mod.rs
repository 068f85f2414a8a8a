mod config_management;
mod link_management;
mod user_management;

pub use config_management::config_generate;
pub use link_management::{add_link, list_links, remove_link, update_link};
pub use user_management::set_user;
