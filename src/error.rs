// One error type for the host edges (window, config file, clipboard, PNG export).
// The animation core never fails; every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame to the window failed
    #[error("Config read error ({path}): {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error ({path}): {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config: {0}")]
    ConfigInvalid(String),
    #[error("Pattern export error: {0}")]
    PatternExport(#[from] image::ImageError),
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
}
