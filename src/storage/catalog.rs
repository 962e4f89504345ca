use std::{fs::File, io, io::BufReader, path::Path};

use tracing::{debug, instrument};

use super::LoadError;
use crate::domain::Catalog;

/// Reads a degree catalog from a JSON file.
///
/// The file has the shape `{"requirements": [{"name", "courses",
/// "validCourses"}]}`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist, or another
/// [`LoadError`] if it cannot be read or parsed.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let file = File::open(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(io_error),
    })?;

    let catalog: Catalog = serde_json::from_reader(BufReader::new(file))?;
    debug!(requirements = catalog.len(), "loaded catalog");
    Ok(catalog)
}
