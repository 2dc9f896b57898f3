use clap::{Parser, Subcommand};
use perplexity_search::config::{ClientConfig, ServerConfig};
use perplexity_search::server::run_server;
use perplexity_search::ui::terminal::run_terminal;

#[derive(Parser)]
#[command(name = "perplexity-search")]
#[command(about = "AI web search proxy and terminal front end")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve GET /api/perplexity
    Serve(ServerConfig),
    /// Interactive search against a running proxy
    Ui(ClientConfig),
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Ui(config) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
            run_terminal(&config).await?;
        }
        Commands::Serve(config) => run_server(&config).await?,
    }
    Ok(())
}
