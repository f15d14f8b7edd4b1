//! Source types and traits

use crate::document::{Document, ExtJsonOptions};
use crate::error::Result;

/// Anything that yields documents one at a time
///
/// `Ok(None)` means end of input. Any error aborts the run.
pub trait DocumentSource {
    /// Read the next document
    fn next_document(&mut self) -> Result<Option<Document>>;

    /// Drain the source into memory
    fn read_all(&mut self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        while let Some(doc) = self.next_document()? {
            docs.push(doc);
        }
        Ok(docs)
    }

    /// Stop after `limit` documents
    fn limit(self, limit: usize) -> Limited<Self>
    where
        Self: Sized,
    {
        Limited {
            inner: self,
            remaining: limit,
        }
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn next_document(&mut self) -> Result<Option<Document>> {
        (**self).next_document()
    }
}

/// Source adapter that caps the number of documents read
#[derive(Debug)]
pub struct Limited<S> {
    inner: S,
    remaining: usize,
}

impl<S: DocumentSource> DocumentSource for Limited<S> {
    fn next_document(&mut self) -> Result<Option<Document>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let doc = self.inner.next_document()?;
        if doc.is_some() {
            self.remaining -= 1;
        }
        Ok(doc)
    }
}

/// Configuration for reading JSON input
#[derive(Debug, Clone)]
pub struct JsonSourceConfig {
    /// Yield the object elements of top-level arrays as documents
    pub unwrap_arrays: bool,
    /// Path to the documents inside each top-level value
    pub record_path: Option<String>,
    /// Extended JSON handling
    pub ext_json: ExtJsonOptions,
}

impl Default for JsonSourceConfig {
    fn default() -> Self {
        Self {
            unwrap_arrays: true,
            record_path: None,
            ext_json: ExtJsonOptions::default(),
        }
    }
}

impl JsonSourceConfig {
    /// Set the record path
    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.record_path = Some(path.into());
        self
    }

    /// Enable or disable extended JSON
    #[must_use]
    pub fn with_extended_json(mut self, enabled: bool) -> Self {
        self.ext_json = if enabled {
            ExtJsonOptions::default()
        } else {
            ExtJsonOptions::plain()
        };
        self
    }

    /// Enable or disable unwrapping of top-level arrays
    #[must_use]
    pub fn with_unwrap_arrays(mut self, enabled: bool) -> Self {
        self.unwrap_arrays = enabled;
        self
    }
}
