use clap::Parser;
use tls_scanner::cli::Cli;
use tls_scanner::engine::Engine;
use tls_scanner::output::OutputSink;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    if let Some(mode) = cli.parse_mode() {
        println!("{}", mode.run().await?);
        return Ok(());
    }

    let cfg = cli.into_config()?;

    let sink = OutputSink::new(cfg.output.clone())?;
    let mut engine = Engine::new(cfg, sink)?;
    engine.run().await?;

    Ok(())
}
