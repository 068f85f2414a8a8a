//! Link management commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{AddOutcome, LinkRegistry};

pub async fn list_links(registry: &LinkRegistry) -> Result<(), CliError> {
    let links = registry.list_all().await?;

    if links.is_empty() {
        println!("{}", "No links yet".dimmed());
        return Ok(());
    }

    println!("{}", format!("{} link(s):", links.len()).bold());
    for (name, link) in &links {
        println!(
            "  {} -> {} {}",
            name.cyan(),
            link.target.blue().underline(),
            format!("({} requests)", link.request_count).dimmed()
        );
    }
    Ok(())
}

pub async fn add_link(
    registry: &LinkRegistry,
    name: String,
    target: String,
    force: bool,
) -> Result<(), CliError> {
    let link = if force {
        registry.add(&name, &target).await?
    } else {
        match registry.add_if_absent(&name, &target).await? {
            AddOutcome::Created(link) => link,
            AddOutcome::AlreadyExists(existing) => {
                return Err(CliError::CommandError(format!(
                    "Link '{}' already exists (-> {}). Use --force to replace it.",
                    existing.name, existing.target
                )));
            }
        }
    };

    println!(
        "{} Added link: {} -> {}",
        "✓".bold().green(),
        link.name.cyan(),
        link.target.blue().underline()
    );
    Ok(())
}

pub async fn update_link(
    registry: &LinkRegistry,
    name: String,
    target: String,
) -> Result<(), CliError> {
    let link = registry
        .update_target(&name, &target)
        .await?
        .ok_or_else(|| CliError::CommandError(format!("Link '{}' not found", name)))?;

    println!(
        "{} Updated link: {} -> {}",
        "✓".bold().green(),
        link.name.cyan(),
        link.target.blue().underline()
    );
    Ok(())
}

pub async fn remove_link(registry: &LinkRegistry, name: String) -> Result<(), CliError> {
    let link = registry
        .remove(&name)
        .await?
        .ok_or_else(|| CliError::CommandError(format!("Link '{}' not found", name)))?;

    println!("{} Removed link: {}", "✓".bold().green(), link.name.cyan());
    Ok(())
}
