use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Read a JSON file into a typed request. `-` reads stdin instead.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    if path == "-" {
        return super::stdin::read_stdin_as()?
            .ok_or_else(|| "expected a JSON document on stdin".into());
    }

    let file = existing_file(path)?;
    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", file.display(), e))?;
    tracing::debug!(path = %file.display(), "read request file");
    Ok(value)
}

fn existing_file(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let absolute = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !absolute.is_file() {
        return Err(format!("File not found: {}", absolute.display()).into());
    }
    Ok(absolute)
}
