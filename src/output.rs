//! Writing rendered views to disk or stdout

use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Write rendered content to `output_path`, or to stdout when there is none
pub fn write_output(content: &str, output_path: Option<&Path>) -> Result<(), OutputError> {
    match output_path {
        Some(path) => write_file(content, path),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn write_file(content: &str, output_path: &Path) -> Result<(), OutputError> {
    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(output_path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
