use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Write `path` through a sibling temporary file and rename it into place,
/// so a reader never sees a half-written artifact.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<fs::File>) -> Result<()>,
{
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid output path {}", path.display()))?;
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));
    let file =
        fs::File::create(&temp_path).with_context(|| format!("create {}", temp_path.display()))?;
    let mut writer = BufWriter::new(file);
    let written = write(&mut writer).and_then(|()| {
        writer
            .flush()
            .with_context(|| format!("flush {}", temp_path.display()))
    });
    if let Err(error) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }
    drop(writer);
    fs::rename(&temp_path, path)
        .with_context(|| format!("rename {} to {}", temp_path.display(), path.display()))
}
