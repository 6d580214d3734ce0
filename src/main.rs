use anyhow::Context;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use zeal_docs::cli::{Cli, Commands};
use zeal_docs::config::Config;
use zeal_docs::server::{DocsetServer, format_result_list};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    zeal_docs::tracing::init(cli.verbose);

    let config = Config::load(&cli)?;
    tracing::debug!("Effective config: {:?}", config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::List { input, limit, json } => {
            let mut config = config;
            if let Some(limit) = limit {
                config.max_visible = limit;
            }
            let results = config.launcher().resolve(input.as_deref());
            if json {
                let rendered = serde_json::to_string_pretty(&results)
                    .context("Failed to serialize results")?;
                println!("{}", rendered);
            } else {
                print!("{}", format_result_list(&results));
            }
            Ok(())
        }
        Commands::Open { keyword, query } => {
            let docset = config
                .launcher()
                .open(&keyword, &query)
                .with_context(|| format!("No docset could be opened for '{}'", keyword))?;
            println!("Opened {} in Zeal", docset.title());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting zeal-docs MCP server (docsets: {})",
        config.docsets_path
    );

    let server = DocsetServer::new(config.launcher());
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
