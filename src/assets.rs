use anyhow::{Context, Result, anyhow};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "layouts"]
struct Layouts;

/// Layout file compiled into the binary and used when `--layout` is absent.
pub const DEFAULT_LAYOUT: &str = "broken-spear.toml";

pub fn get_bytes(path: &str) -> Result<Vec<u8>> {
    let file = Layouts::get(path).ok_or_else(|| anyhow!("embedded layout `{}` missing", path))?;
    Ok(file.data.as_ref().to_vec())
}

pub fn get_string(path: &str) -> Result<String> {
    let bytes = get_bytes(path)?;
    String::from_utf8(bytes).with_context(|| format!("decoding embedded layout `{}`", path))
}
