use anyhow::Context;
use clap::{Parser, Subcommand};
use clinic_mock_api::api;
use clinic_mock_api::event::{ApiEvent, handle_event};
use clinic_mock_api::http::server::Server;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clinic-mock-api")]
#[command(about = "Mock backend for the clinic records frontend", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8888")]
    addr: String,

    /// Connection worker threads
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    workers: u16,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the API over HTTP (default)
    Serve,
    /// Handle one JSON event from stdin and print the response
    Invoke,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let router = api::router()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let server = Server::from_tcp_addr(&cli.addr, cli.workers.into(), router)?;
            server.run()
        }
        Commands::Invoke => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Can't read event from stdin")?;
            let event: ApiEvent = serde_json::from_str(&raw).context("Invalid event JSON")?;

            let response = handle_event(&router, event);
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
    }
}
