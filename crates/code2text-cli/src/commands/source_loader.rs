use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read source from inline text, a file, or stdin (`-`).
pub fn load_source(text: Option<&str>, path: Option<&Path>) -> Result<String, String> {
    match (text, path) {
        (Some(text), None) => Ok(text.to_owned()),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(buf)
        }
        (None, Some(path)) => fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display())),
        (Some(_), Some(_)) => Err("cannot use both --source and positional SOURCE".to_owned()),
        (None, None) => Err("source required (positional or --source)".to_owned()),
    }
}
