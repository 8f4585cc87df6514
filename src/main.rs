use ekskul_register::cli::FormPrompt;
use ekskul_register::config::ClientConfig;
use ekskul_register::submit::Registrar;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the form on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let registrar = Registrar::from_config(&config)?;

    tracing::info!(
        endpoint = %config.registrations_url(),
        timeout = ?config.request_timeout,
        "Ekskul Register v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut prompt = FormPrompt::new(
        registrar,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    prompt.run().await?;

    Ok(())
}
