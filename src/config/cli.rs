use crate::config::toml_config::StorefrontConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "qkart")]
#[command(about = "Browse the QKart catalog and manage your cart from the terminal")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "qkart.toml")]
    pub config: String,

    /// Override the API endpoint from config
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the session file location from config
    #[arg(long)]
    pub session_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every product in the catalog
    Products,
    /// Run a single search
    Search { text: String },
    /// Read search input line by line from stdin, debounced
    Browse,
    /// Show the cart of the logged-in user
    Cart,
    /// Add a product from the catalog
    Add {
        product_id: String,
        #[arg(long, default_value = "1")]
        qty: u32,
    },
    /// Set the quantity of a product already in the cart (0 removes it)
    Update { product_id: String, qty: u32 },
    Login { username: String, password: String },
    Register {
        username: String,
        password: String,
        confirm_password: String,
    },
    Logout,
}

impl Cli {
    /// Command-line flags take precedence over the file.
    pub fn apply_overrides(&self, config: &mut StorefrontConfig) {
        if let Some(endpoint) = &self.endpoint {
            tracing::info!("🔧 API endpoint overridden to: {}", endpoint);
            config.api.endpoint = endpoint.clone();
        }
        if let Some(path) = &self.session_path {
            config.session.path = path.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_defaults_to_one_unit() {
        let cli = Cli::parse_from(["qkart", "add", "BW0jAAeDJmlZCF8i"]);
        match cli.command {
            Command::Add { product_id, qty } => {
                assert_eq!(product_id, "BW0jAAeDJmlZCF8i");
                assert_eq!(qty, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_overrides_win_over_file() {
        let cli = Cli::parse_from([
            "qkart",
            "--endpoint",
            "http://10.0.0.5:8082/api/v1",
            "--session-path",
            "/tmp/s.json",
            "cart",
        ]);
        let mut config = StorefrontConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.api.endpoint, "http://10.0.0.5:8082/api/v1");
        assert_eq!(config.session.path, "/tmp/s.json");
    }
}
