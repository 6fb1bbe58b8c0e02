// ============================================================
// Layer 6 — Parameter File Config Store
// ============================================================
// Reads the `parameters.txt` file a training run leaves in its
// log directory. The format is one `key = value` per line:
//
//   # Input parameters
//   # ****************
//
//   dataset = S3DIS
//   input_threads = 8
//   first_subsampling_dl = 0.04
//   architecture = simple resnetb resnetb_strided
//
// Lines starting with '#' and blank lines are skipped. A value
// with several whitespace-separated tokens becomes a list. Each
// token is stored as an integer, a float, a boolean or a string,
// whichever parses first.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::{Number, Value};

use crate::domain::log_config::LogConfig;
use crate::domain::traits::ConfigStore;

/// File name of the parameter file inside a log directory
pub const PARAMETERS_FILE: &str = "parameters.txt";

#[derive(Debug, Default)]
pub struct ParametersFile;

impl ParametersFile {
    /// Parse the text of a parameter file
    pub fn parse(text: &str) -> Result<LogConfig> {
        let mut dataset = None;
        let mut config  = LogConfig::new("");

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, raw) = line
                .split_once('=')
                .with_context(|| format!("line {}: expected 'key = value', got '{}'", number + 1, line))?;
            let key = key.trim();
            let raw = raw.trim();

            if key == "dataset" {
                dataset = Some(raw.to_string());
            } else {
                config.set(key, parse_value(raw));
            }
        }

        config.dataset = dataset.context("no 'dataset' entry")?;
        Ok(config)
    }
}

impl ConfigStore for ParametersFile {
    fn load(&self, log_dir: &Path) -> Result<LogConfig> {
        let path = log_dir.join(PARAMETERS_FILE);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read log parameters '{}'", path.display()))?;

        let config = Self::parse(&text)
            .with_context(|| format!("Invalid log parameters '{}'", path.display()))?;
        tracing::debug!(
            "Loaded {} parameter(s) from '{}' (dataset = {})",
            config.params.len() + 1,
            path.display(),
            config.dataset
        );
        Ok(config)
    }
}

fn parse_value(raw: &str) -> Value {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match tokens.as_slice() {
        []      => Value::String(String::new()),
        [token] => parse_scalar(token),
        many    => Value::Array(many.iter().map(|t| parse_scalar(t)).collect()),
    }
}

fn parse_scalar(token: &str) -> Value {
    if let Ok(n) = token.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = token.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    match token {
        "True"  | "true"  => Value::Bool(true),
        "False" | "false" => Value::Bool(false),
        _                 => Value::String(token.to_string()),
    }
}
