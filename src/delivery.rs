use std::{
    fs,
    path::{Path, PathBuf},
};

use onsite_core::{CoreError, ExportFile, FileDelivery, PrintableDocument};
use tracing::debug;

/// Delivers exports as files in one directory. Printable documents are written as
/// `<title>.html`; opening them in a browser starts printing.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn download_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(sanitize_file_name(file_name))
    }

    pub fn printable_path(&self, title: &str) -> PathBuf {
        self.dir
            .join(format!("{}.html", sanitize_file_name(&title.to_lowercase())))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir).map_err(|err| unavailable(&self.dir, err))?;
        fs::write(path, bytes).map_err(|err| unavailable(path, err))?;
        debug!(path = %path.display(), bytes = bytes.len(), "export written");
        Ok(())
    }
}

impl FileDelivery for DirectoryDelivery {
    fn download(&self, file: &ExportFile) -> Result<(), CoreError> {
        self.write(&self.download_path(&file.name), &file.bytes)
    }

    fn open_printable(&self, document: &PrintableDocument) -> Result<(), CoreError> {
        self.write(&self.printable_path(&document.title), document.html.as_bytes())
    }
}

fn unavailable(path: &Path, err: std::io::Error) -> CoreError {
    CoreError::ExportUnavailable(format!("{}: {}", path.display(), err))
}

/// Keeps a file name inside the export directory.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "export".into()
    } else {
        cleaned.to_string()
    }
}
