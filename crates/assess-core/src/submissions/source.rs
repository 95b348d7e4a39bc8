use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// A document pulled from a source, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingDocument {
    pub filename: String,
    pub content: String,
}

/// Error raised while polling a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read {filename}: {source}")]
    Read {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where new submissions come from. The monitor polls this; swapping in a
/// cloud-drive adapter only means implementing this trait.
pub trait DocumentSource: Send + Sync {
    /// Documents that appeared since the previous poll.
    fn fetch_new(&self) -> Result<Vec<IncomingDocument>, SourceError>;
}

/// Watches a local inbox directory for `.txt` submissions. Each file is
/// surfaced once; later edits to an already seen file are ignored.
pub struct DirectorySource {
    inbox: PathBuf,
    processed: Mutex<HashSet<String>>,
}

impl DirectorySource {
    pub fn new(inbox: impl Into<PathBuf>) -> Self {
        Self {
            inbox: inbox.into(),
            processed: Mutex::new(HashSet::new()),
        }
    }
}

impl DocumentSource for DirectorySource {
    fn fetch_new(&self) -> Result<Vec<IncomingDocument>, SourceError> {
        let entries = fs::read_dir(&self.inbox)
            .map_err(|err| SourceError::Unavailable(format!("{}: {err}", self.inbox.display())))?;

        let mut filenames: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.to_lowercase().ends_with(".txt"))
            .collect();
        filenames.sort();

        let mut processed = self.processed.lock().expect("source mutex poisoned");
        let mut documents = Vec::new();
        for filename in filenames {
            if processed.contains(&filename) {
                continue;
            }
            let content =
                fs::read_to_string(self.inbox.join(&filename)).map_err(|source| {
                    SourceError::Read {
                        filename: filename.clone(),
                        source,
                    }
                })?;
            processed.insert(filename.clone());
            documents.push(IncomingDocument { filename, content });
        }

        Ok(documents)
    }
}
