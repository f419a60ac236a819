/// Shared filesystem helpers.
pub mod fs {
    use std::fs;
    use std::io;

    use camino::Utf8Path;

    /// Ensure a directory exists, creating it recursively if needed.
    ///
    /// Returns `true` when the directory had to be created.
    pub fn ensure_dir(path: &Utf8Path) -> io::Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        fs::create_dir_all(path)?;
        Ok(true)
    }

}
