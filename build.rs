// Build script - reads config.yaml at compile time and generates defaults
// This allows changing defaults during development without editing source code

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src/config.yaml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("compiled_config.rs");

    let config = if Path::new("src/config.yaml").exists() {
        let content = fs::read_to_string("src/config.yaml")
            .expect("Failed to read src/config.yaml");
        parse_config(&content)
    } else {
        CompiledConfig::default()
    };

    let generated = format!(
        r#"// Auto-generated from config.yaml at compile time
// Do not edit - modify config.yaml and rebuild instead

pub const DIGEST: &str = {digest:?};
pub const CHUNK_SIZE: usize = {chunk_size};

pub const TIMESTAMP_FORMAT: &str = {timestamp_format:?};
pub const CONSOLE: bool = {console};
"#,
        digest = config.digest,
        chunk_size = config.chunk_size,
        timestamp_format = config.timestamp_format,
        console = config.console,
    );

    fs::write(&dest_path, generated).expect("Failed to write compiled config");
}

struct CompiledConfig {
    digest: String,
    chunk_size: usize,
    timestamp_format: String,
    console: bool,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self {
            digest: "md5".to_string(),
            chunk_size: 4096,
            timestamp_format: "%d/%m/%Y %I:%M:%S".to_string(),
            console: true,
        }
    }
}

fn parse_config(content: &str) -> CompiledConfig {
    let mut config = CompiledConfig::default();

    // Simple YAML parsing (avoiding external dependencies in build script)
    let mut in_sync = false;
    let mut in_logging = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("sync:") {
            in_sync = true;
            in_logging = false;
            continue;
        } else if trimmed.starts_with("logging:") {
            in_sync = false;
            in_logging = true;
            continue;
        }

        if let Some((key, value)) = parse_kv(trimmed) {
            if in_sync {
                match key {
                    "digest" => config.digest = value.to_lowercase(),
                    "chunk_size" => config.chunk_size = value.parse().unwrap_or(4096),
                    _ => {}
                }
            } else if in_logging {
                match key {
                    "timestamp_format" => config.timestamp_format = value.to_string(),
                    "console" => config.console = parse_bool(value),
                    _ => {}
                }
            }
        }
    }

    // A zero chunk size would never make progress while hashing
    if config.chunk_size == 0 {
        config.chunk_size = 4096;
    }

    config
}

fn parse_kv(line: &str) -> Option<(&str, &str)> {
    if line.starts_with('#') || line.is_empty() {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let mut value = line[colon_pos + 1..].trim();

    if let Some(comment_pos) = value.find(" #") {
        value = value[..comment_pos].trim();
    }

    let value = value.trim_matches('"').trim_matches('\'');

    if value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "1")
}
