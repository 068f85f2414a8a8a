use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::UserStore;
use crate::storage::UserPermission;

pub async fn set_user(
    users: &UserStore,
    username: String,
    password: String,
    root: bool,
) -> Result<(), CliError> {
    if username.is_empty() || password.is_empty() {
        return Err(CliError::CommandError(
            "Username and password must not be empty".to_string(),
        ));
    }

    let permission = if root {
        UserPermission::Root
    } else {
        UserPermission::Admin
    };
    users.upsert(&username, &password, permission).await?;

    println!(
        "{} Saved account {} ({:?})",
        "✓".bold().green(),
        username.cyan(),
        permission
    );
    Ok(())
}
