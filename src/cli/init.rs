//! Init command implementation
//!
//! Scaffolds `authgate.toml`, `.env.example` and the `data/` directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// authgate.toml already exists and --force was not given
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing authgate");

    let base_path = &config.path;

    let config_path = base_path.join("authgate.toml");
    if config_path.exists() && !config.force {
        output.warning("authgate.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.skipped("data", "already exists");
    } else {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data/: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    }

    if let Err(e) = write_file(&config_path, &generate_config_toml(&config), config.force) {
        output.error(&format!("Failed to create authgate.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "authgate.toml");

    let env_example_path = base_path.join(".env.example");
    if let Err(e) = write_file(&env_example_path, generate_env_example(), config.force) {
        output.error(&format!("Failed to create .env.example: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("env", ".env.example");

    output.success("authgate initialized");

    output.header("Next Steps");
    output.info("1. Set the signing secret:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set JWT_SECRET to a long random value");
    output.info("2. Start the server:");
    output.command("authgate");
    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_config_toml(config: &InitConfig) -> String {
    format!(
        r#"# authgate Configuration
# Generated by: authgate init
#
# REQUIRED: set JWT_SECRET in the environment (or .env) before starting.

[server]
host = "{host}"
port = {port}
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[auth]
# Name of the environment variable holding the HS256 signing secret
jwt_secret_env = "JWT_SECRET"

[database]
# ":memory:", a file path, or a libsql:// URL
url = "./data/authgate.db"
# Environment variable that overrides url when set
url_env = "DB_CONNECTION_STRING"
# Environment variable holding the token for a remote libsql database
# token_env = "DB_AUTH_TOKEN"

[cors]
allowed_origins = ["http://localhost:5500", "http://127.0.0.1:5500"]
"#,
        host = config.host,
        port = config.port
    )
}

fn generate_env_example() -> &'static str {
    r#"# Signing secret for issued tokens (required)
JWT_SECRET=change-me-to-a-long-random-string

# Optional: overrides [database].url
# DB_CONNECTION_STRING=./data/authgate.db

# Optional: tracing filter, overrides [server].log_level
# RUST_LOG=authgate=debug,tower_http=info
"#
}
