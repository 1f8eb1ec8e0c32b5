use anyhow::Context;
use authgate::{
    api::{routes::build_app, ApiDoc},
    auth::{AuthFlows, PasswordHasher, TokenIssuer},
    cli::{
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands,
    },
    db::DatabaseProvider,
    utils::toml_config::{AuthgateConfig, LogFormat, ServerConfig},
    AppState,
};
use std::future::Future;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let config = InitConfig {
                path,
                force,
                host,
                port,
            };
            match init::run(config, &output) {
                InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
            }
        }
        Some(Commands::Config { validate }) => show_config(&cli.config, validate, &output),
        Some(Commands::Openapi) => {
            println!("{}", ApiDoc::openapi().to_pretty_json()?);
            Ok(())
        }
        None => serve(&cli.config, cli.verbose).await,
    }
}

async fn serve(config_path: &Path, verbose: bool) -> anyhow::Result<()> {
    let config = AuthgateConfig::load_or_default(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    init_tracing(&config.server, verbose);

    if !config_path.exists() {
        info!(path = %config_path.display(), "config file not found, using defaults");
    }

    // A missing secret is fatal here, before anything binds.
    config.validate().context("invalid configuration")?;
    let jwt_secret = config.jwt_secret()?;

    let provider = DatabaseProvider::from_url(&config.database_url(), config.database_token())?;
    let store = provider
        .create_client()
        .await
        .context("failed to open credential store")?;
    info!("credential store ready");

    let flows = AuthFlows::new(store, PasswordHasher::new(), TokenIssuer::new(jwt_secret));
    let address = config.bind_address();
    let app = build_app(AppState::new(config, flows));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(%address, "authgate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("authgate stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        server.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("authgate={level},tower_http={level}")));

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

fn show_config(config_path: &Path, validate: bool, output: &Output) -> anyhow::Result<()> {
    let config = AuthgateConfig::load_or_default(config_path)?;

    output.header("Configuration");
    if config_path.exists() {
        output.kv("file", &config_path.display().to_string());
    } else {
        output.kv("file", "(not found, defaults)");
    }
    output.kv("bind", &config.bind_address());
    output.kv("log_level", &config.server.log_level);
    output.kv("database", &config.database_url());
    output.kv("jwt_secret_env", &config.auth.jwt_secret_env);
    output.kv(
        "jwt_secret",
        if config.jwt_secret().is_ok() {
            "set"
        } else {
            "missing"
        },
    );
    output.kv("cors", &config.cors.allowed_origins.join(", "));

    if validate {
        if let Err(e) = config.validate() {
            output.error(&e.to_string());
            anyhow::bail!("configuration is invalid");
        }
        output.success("configuration is valid");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = signal_or_pending("SIGINT", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = signal_or_pending("SIGTERM", async {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        sigterm.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

/// Completes when the signal arrives. A handler that cannot be installed
/// never completes, so it cannot trigger shutdown on its own.
async fn signal_or_pending<F>(name: &str, signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "failed to install signal handler");
        std::future::pending::<()>().await;
    }
}
