/// `authgate.toml` loading, defaults and secret resolution.
pub mod toml_config;
