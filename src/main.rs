use seed_test_users::config::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_cli();
    tracing::debug!(?settings, "starting");

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = seed_test_users::run(&settings, &mut stdout).await {
        eprintln!("❌ Error al inicializar: {:#}", e);
        std::process::exit(1);
    }
}
