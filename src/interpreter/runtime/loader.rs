use std::{collections::HashMap, fs, io};

/// Loads the text of an imported source unit.
///
/// The path is passed through exactly as written in the `import` statement.
pub trait SourceLoader {
    /// Returns the text stored under `path`.
    ///
    /// # Errors
    /// Returns an I/O error if the unit does not exist or cannot be read.
    fn load(&self, path: &str) -> io::Result<String>;
}

/// Loads imports from the file system, relative to the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Serves imports from a fixed set of in-memory units.
///
/// # Example
/// ```
/// use splice::interpreter::runtime::{MemoryLoader, SourceLoader};
///
/// let loader = MemoryLoader::new().with_unit("lib.sp", "func one() { return 1; }");
///
/// assert!(loader.load("lib.sp").is_ok());
/// assert!(loader.load("other.sp").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    units: HashMap<String, String>,
}

impl MemoryLoader {
    /// Creates a loader without any units.
    #[must_use]
    pub fn new() -> Self {
        Self { units: HashMap::new() }
    }

    /// Adds a unit and returns the loader.
    #[must_use]
    pub fn with_unit(mut self, path: &str, source: &str) -> Self {
        self.insert(path, source);
        self
    }

    /// Adds or replaces a unit.
    pub fn insert(&mut self, path: &str, source: &str) {
        self.units.insert(path.to_string(), source.to_string());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.units
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no unit named '{path}'")))
    }
}
