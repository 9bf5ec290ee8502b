use crate::config::types::{Config, CredentialConfig, DiscoveryConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_discovery_config(&config.discovery)?;
    validate_credential_config(&config.credentials)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed address is required".to_string(),
        ));
    }

    if config.seeds.len() > 2 {
        return Err(ConfigError::Validation(format!(
            "at most two seed addresses are supported, got {}",
            config.seeds.len()
        )));
    }

    for seed in &config.seeds {
        if seed.trim().is_empty() {
            return Err(ConfigError::Validation(
                "seed addresses cannot be empty".to_string(),
            ));
        }
    }

    if config.concurrency_limit < 1 || config.concurrency_limit > 64 {
        return Err(ConfigError::Validation(format!(
            "concurrency-limit must be between 1 and 64, got {}",
            config.concurrency_limit
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_connect_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-connect-attempts must be >= 1, got {}",
            config.max_connect_attempts
        )));
    }

    if let Some(jump_host) = &config.jump_host {
        if jump_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "jump-host cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates credential configuration
fn validate_credential_config(config: &CredentialConfig) -> Result<(), ConfigError> {
    if config.username.is_empty() {
        return Err(ConfigError::Validation(
            "credentials.username cannot be empty".to_string(),
        ));
    }

    if let Some(alternate) = &config.alternate {
        if alternate.username.is_empty() {
            return Err(ConfigError::Validation(
                "credentials.alternate.username cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CredentialEntry, InputConfig, SiteConfig};

    fn create_test_config() -> Config {
        Config {
            site: SiteConfig {
                name: "Test Campus".to_string(),
            },
            discovery: DiscoveryConfig {
                seeds: vec!["10.0.0.1".to_string()],
                concurrency_limit: 5,
                connect_timeout_secs: 10,
                max_connect_attempts: 3,
                retry_backoff_secs: 2,
                run_timeout_secs: 0,
                jump_host: None,
            },
            credentials: CredentialConfig {
                username: "admin".to_string(),
                password: "hunter2".to_string(),
                alternate: None,
            },
            input: InputConfig::default(),
            output: OutputConfig {
                report_path: "./inventory.md".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&create_test_config()).is_ok());
    }

    #[test]
    fn test_empty_seeds_rejected() {
        let mut config = create_test_config();
        config.discovery.seeds.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_three_seeds_rejected() {
        let mut config = create_test_config();
        config.discovery.seeds = vec![
            "10.0.0.1".to_string(),
            "10.0.0.2".to_string(),
            "10.0.0.3".to_string(),
        ];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_two_seeds_accepted() {
        let mut config = create_test_config();
        config.discovery.seeds = vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_blank_seed_rejected() {
        let mut config = create_test_config();
        config.discovery.seeds = vec!["   ".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = create_test_config();
        config.discovery.concurrency_limit = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = create_test_config();
        config.discovery.max_connect_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_username_rejected() {
        let mut config = create_test_config();
        config.credentials.username = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_alternate_username_rejected() {
        let mut config = create_test_config();
        config.credentials.alternate = Some(CredentialEntry {
            username: String::new(),
            password: "x".to_string(),
        });
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_report_path_rejected() {
        let mut config = create_test_config();
        config.output.report_path = String::new();
        assert!(validate(&config).is_err());
    }
}
