use crate::core::Storage;
use crate::utils::error::Result;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Writes outputs under a base directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    type Writer = BufWriter<File>;

    fn create(&self, name: &str) -> Result<BufWriter<File>> {
        let full_path = Path::new(&self.base_path).join(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(BufWriter::new(File::create(full_path)?))
    }

    fn finalize(&self, writer: BufWriter<File>) -> Result<()> {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    fn location(&self, name: &str) -> String {
        Path::new(&self.base_path).join(name).display().to_string()
    }
}
