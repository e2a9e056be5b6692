use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use versiculo::config::Config;

/// Versículo: Instagram post generator for Bible themes.
///
/// Serves a small studio page that turns a theme into three ready-to-post
/// image descriptions and captions via the Gemini API, shown on an
/// auto-advancing carousel with one-click copy.
#[derive(Parser)]
#[command(name = "versiculo", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("versiculo=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    println!("{}", "Versículo: gerador de posts para Instagram".bold());
    println!("  Gere 3 posts prontos (imagem, legenda e hashtags) a partir de um tema");
    if config.gemini_api_key.is_empty() {
        println!(
            "  {} GEMINI_API_KEY não definida; adicione ao seu .env",
            "Aviso:".yellow()
        );
    }
    println!();

    versiculo::web::run_server(config, cli.port, &cli.bind).await
}
