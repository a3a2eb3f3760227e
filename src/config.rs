use thiserror::Error;

/// Environment variable holding the JSON-RPC endpoint URL.
pub const RPC_URL_VAR: &str = "CHAINSONAR_RPC_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no RPC endpoint configured; set CHAINSONAR_RPC_URL in the environment \
         (a .env file works) or pass --rpc-url"
    )]
    MissingRpcUrl,
}

#[derive(Debug)]
pub struct AppConfig {
    pub rpc_url: String,
}

/// Resolves the RPC endpoint, preferring an explicit CLI value over the
/// environment. A `.env` file in the working directory is honored.
pub fn load_config(cli_rpc_url: Option<String>) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let rpc_url = cli_rpc_url
        .or_else(|| std::env::var(RPC_URL_VAR).ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingRpcUrl)?;

    Ok(AppConfig { rpc_url })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_value_takes_precedence() {
        let config = load_config(Some("http://localhost:8545".into())).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
    }

    #[test]
    fn blank_cli_value_is_rejected() {
        assert!(matches!(
            load_config(Some("   ".into())),
            Err(ConfigError::MissingRpcUrl)
        ));
    }
}
