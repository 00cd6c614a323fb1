use std::{net::Ipv4Addr, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studio_folio::{
    core::settings::{Settings, PORT_ENV},
    server::start_server,
};

#[derive(Parser, Debug)]
#[command(name = "studio-folio", version, about = "Portfolio site server")]
struct Cli {
    /// Settings JSON; defaults apply when the file is absent.
    #[arg(long, default_value = "folio.json")]
    config: PathBuf,

    /// Directory to serve.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    host: Option<Ipv4Addr>,

    /// Port to bind; wins over `PORT`.
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    settings.apply_env_port(std::env::var(PORT_ENV).ok())?;
    if let Some(root) = cli.root {
        settings.site_root.value = root.display().to_string();
    }
    if let Some(host) = cli.host {
        settings.ipv4_addr.value = host;
    }
    if let Some(port) = cli.port {
        settings.port.value = port;
    }

    start_server(settings)
        .await
        .context("static server stopped")?;
    Ok(())
}
