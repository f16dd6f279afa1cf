//! Loading the package catalog: one `vendor<delim>product` pair per line.

use crate::error::IndexBuildError;
use crate::PackageCoordinate;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_DELIMITER: char = ',';

/// Read coordinates from `reader`. Rows with fewer than two non-trailing fields are
/// skipped; columns past the product are ignored.
pub fn parse_catalog<R: BufRead>(reader: R, delimiter: char) -> io::Result<Vec<PackageCoordinate>> {
    let mut catalog = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        let mut fields: Vec<&str> = line.split(delimiter).collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        match fields.as_slice() {
            [vendor, product, ..] => catalog.push(PackageCoordinate::new(*vendor, *product)),
            _ => tracing::debug!(line = lineno + 1, "skipping malformed catalog row"),
        }
    }
    Ok(catalog)
}

pub fn load_catalog<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Vec<PackageCoordinate>, IndexBuildError> {
    let path = path.as_ref();
    let io_err = |source: io::Error| IndexBuildError::Io { path: path.to_path_buf(), source };
    let f = File::open(path).map_err(io_err)?;
    let catalog = parse_catalog(BufReader::new(f), delimiter).map_err(io_err)?;
    tracing::info!(path = %path.display(), entries = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Conventional catalog location for an ecosystem: `<dir>/<ecosystem>-packages`.
pub fn pkgfile_path<P: AsRef<Path>>(dir: P, ecosystem: &str) -> PathBuf {
    dir.as_ref().join(format!("{ecosystem}-packages"))
}
