use anyhow::{Context, Result};
use std::path::Path;

pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    anyhow::ensure!(!bytes.is_empty(), "image {} is empty", path.display());
    Ok(bytes)
}
