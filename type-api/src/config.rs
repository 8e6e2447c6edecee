use std::net::SocketAddr;

use envconfig::Envconfig;
use tracing::Level;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(default = "0.0.0.0:8080")]
    pub address: SocketAddr,

    // Used for integration tests
    #[envconfig(default = "true")]
    pub export_prometheus: bool,

    #[envconfig(default = "1000000")]
    pub max_body_size: usize,

    #[envconfig(default = "info")]
    pub log_level: Level,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = Config::init_from_hashmap(&HashMap::new()).expect("failed to load defaults");

        assert_eq!(config.address, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert!(config.export_prometheus);
        assert_eq!(config.max_body_size, 1_000_000);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn overrides_are_read() {
        let env = HashMap::from([
            ("ADDRESS".to_owned(), "127.0.0.1:3300".to_owned()),
            ("EXPORT_PROMETHEUS".to_owned(), "false".to_owned()),
            ("MAX_BODY_SIZE".to_owned(), "1024".to_owned()),
            ("LOG_LEVEL".to_owned(), "debug".to_owned()),
        ]);
        let config = Config::init_from_hashmap(&env).expect("failed to load overrides");

        assert_eq!(config.address, "127.0.0.1:3300".parse::<SocketAddr>().unwrap());
        assert!(!config.export_prometheus);
        assert_eq!(config.max_body_size, 1024);
        assert_eq!(config.log_level, Level::DEBUG);
    }
}
