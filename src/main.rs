use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use clarichat::cli::Commands;
use clarichat::{router, Container, ContainerConfig, HttpChatBackend, TerminalChat};

#[derive(Parser)]
#[command(name = "clarichat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            mock_llm,
        } => {
            let container = Arc::new(Container::new(ContainerConfig { mock_llm }));
            let app = router(container);

            let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
            info!("listening on http://{}:{}", host, port);
            axum::serve(listener, app).await?;
        }

        Commands::Chat { url } => {
            let backend = Arc::new(HttpChatBackend::new(url));
            TerminalChat::new(backend).run().await?;
        }
    }

    Ok(())
}
