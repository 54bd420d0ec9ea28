pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// A JSON document from `--input`, else from piped stdin, else `None`.
pub fn resolve<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_json(path).map(Some),
        None => stdin::read_stdin_as(),
    }
}
