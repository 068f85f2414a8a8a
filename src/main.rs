use clap::Parser;

use link_shortener::cli::{Cli, Commands};
use link_shortener::config::{DEFAULT_CONFIG_PATH, get_config, init_config_from};
use link_shortener::runtime::modes::{run_cli, run_server};
use link_shortener::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));
    let config = get_config();

    match cli.command {
        None | Some(Commands::Serve) => {
            // guard 必须存活到进程结束，否则日志不会刷新
            let _guard = init_logging(&config.logging)?;

            if let Err(e) = run_server(&config).await {
                tracing::error!("Server exited with error: {:#}", e);
                return Err(e);
            }
        }
        Some(cmd) => {
            if let Err(e) = run_cli(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
