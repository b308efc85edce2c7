use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "AGENCY_";

/// Command line overrides for the environment configuration.
#[derive(Parser, Debug, Default)]
#[command(name = "agency-console", author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the REST backend, e.g. http://127.0.0.1:5000/api
    #[arg(long)]
    pub api_url: Option<String>,

    /// File that receives the application log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Directory for exported project statements
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL every resource path is appended to
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "Edu@123".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("agency-console.log")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("statements")
}

impl Config {
    /// Load configuration from `AGENCY_*` environment variables
    ///
    /// Variables from a `.env` file are loaded first if the file exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Build a configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(vars)?;
        Ok(config.normalized())
    }

    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(url) = &args.api_url {
            self.api_base_url = url.clone();
        }
        if let Some(path) = &args.log_file {
            self.log_file = path.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.output_dir = dir.clone();
        }
        self.normalized()
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.api_base_url = trimmed;
        self
    }
}

/// Load the environment configuration and apply command line overrides
pub fn init(args: &Args) -> Result<Config> {
    let config = Config::load()?;

    Ok(config.with_args(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.api_base_url(), "http://127.0.0.1:5000/api");
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.log_file, PathBuf::from("agency-console.log"));
        assert_eq!(config.output_dir, PathBuf::from("statements"));
    }

    #[test]
    fn prefixed_variables_override_defaults() {
        let config = Config::from_vars(vars(&[
            ("AGENCY_API_BASE_URL", "http://backend:8080/api/"),
            ("AGENCY_ADMIN_PASSWORD", "s3cret"),
            ("DATABASE_URL", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url(), "http://backend:8080/api");
        assert_eq!(config.admin_password, "s3cret");
    }

    #[test]
    fn command_line_wins_over_environment() {
        let config = Config::from_vars(vars(&[("AGENCY_API_BASE_URL", "http://env/api")]))
            .unwrap()
            .with_args(&Args {
                api_url: Some("http://cli:5000/api/".into()),
                output_dir: Some(PathBuf::from("/tmp/out")),
                ..Args::default()
            });
        assert_eq!(config.api_base_url(), "http://cli:5000/api");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.log_file, PathBuf::from("agency-console.log"));
    }
}
