use anyhow::Result;
use std::fs;
use std::path::Path;

// Default base data directory
pub const DATA_DIR: &str = "data";

// EDGAR specific directory
pub const EDGAR_DIR: &str = "data/edgar";

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
