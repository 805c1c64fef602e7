use crate::CoreError;

/// A generated payload offered to the user as a named download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// An HTML document meant to be shown in its own view and printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableDocument {
    pub title: String,
    pub html: String,
}

impl PrintableDocument {
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
        }
    }
}

/// Where exports end up. Implementations report an unreachable target as
/// [`CoreError::ExportUnavailable`].
pub trait FileDelivery {
    fn download(&self, file: &ExportFile) -> Result<(), CoreError>;
    fn open_printable(&self, document: &PrintableDocument) -> Result<(), CoreError>;
}
