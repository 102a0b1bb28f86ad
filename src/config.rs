use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            host: try_load("HOST", "127.0.0.1"),
            port: try_load("PORT", "8000"),
            static_dir: try_load("STATIC_DIR", "static"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn fallback_addr(&self) -> String {
        format!("{}:{}", self.host, self.port.wrapping_add(1))
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    parse_or_default(key, env::var(key).ok(), default)
}

// An unset or unparsable value falls back to `default`, which must parse.
fn parse_or_default<T: FromStr>(key: &str, raw: Option<String>, default: &str) -> T
where
    T::Err: Display,
{
    if let Some(raw) = raw {
        match raw.trim().parse() {
            Ok(value) => return value,
            Err(e) => warn!("Invalid {key} value {raw:?}: {e}, using default: {default}"),
        }
    } else {
        info!("{key} not set, using default: {default}");
    }

    match default.parse() {
        Ok(value) => value,
        Err(e) => panic!("default for {key} does not parse: {e}"),
    }
}
