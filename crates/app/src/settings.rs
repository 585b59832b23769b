//! Runtime settings.
//!
//! Sources, lowest priority first: `settings.toml` (or the `--config` path),
//! `EXPENSES__*` environment variables (e.g. `EXPENSES__SERVER__PORT`), command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";
const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: DEFAULT_PORT,
        }
    }
}

impl Server {
    pub fn address(&self) -> String {
        let bind = self.bind.as_deref().unwrap_or(DEFAULT_BIND);
        format!("{}:{}", bind, self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

#[derive(Debug, Parser)]
#[command(name = "expense_tracker", about = "Expense tracking HTTP API")]
struct Args {
    /// Optional config file path (TOML, extension may be omitted).
    #[arg(long)]
    config: Option<String>,
    /// Override the log level (e.g. `debug`).
    #[arg(long)]
    level: Option<String>,
    /// Override the listen address.
    #[arg(long)]
    bind: Option<String>,
    /// Override the listen port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(
                Environment::with_prefix("EXPENSES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        if args.bind.is_some() || args.port.is_some() {
            let server = settings.server.get_or_insert_with(Server::default);
            if let Some(bind) = args.bind {
                server.bind = Some(bind);
            }
            if let Some(port) = args.port {
                server.port = port;
            }
        }

        Ok(settings)
    }

    /// Server section, falling back to the defaults when it is absent.
    pub fn server(&self) -> Server {
        self.server.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server().address(), "127.0.0.1:3000");
    }

    #[test]
    fn server_section_overrides_address() {
        let settings = from_toml(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server().address(), "0.0.0.0:8080");
    }

    #[test]
    fn bind_defaults_to_loopback() {
        let settings = from_toml("[server]\nport = 9000\n");
        assert_eq!(settings.server().address(), "127.0.0.1:9000");
    }
}
