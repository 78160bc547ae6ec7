//! Pre-built UI bundle
//!
//! Files are served from the configured directory; any path that does not
//! name a file gets `index.html` so the client-side router can take over.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Entry document of the bundle
pub const INDEX_FILE: &str = "index.html";

/// Service for the bundle directory with the `index.html` catch-all
pub fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join(INDEX_FILE)))
}
