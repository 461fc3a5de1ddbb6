use clap::Parser;

#[derive(Parser)]
#[command(name = "foundation-lens")]
#[command(version, about = "Buildpack freshness dashboard for Cloud Foundry foundations")]
struct Cli {
    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(foundation_lens::server::run(cli.port))
}
