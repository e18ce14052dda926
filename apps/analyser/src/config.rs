use std::{env::var, path::PathBuf};

#[derive(Clone, Debug)]
pub struct Config {
    pub output_dir: PathBuf,
    pub charts: bool,
    pub version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            output_dir: var("ANALYSER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("charts")),
            charts: true,
            version: var("APP_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}
