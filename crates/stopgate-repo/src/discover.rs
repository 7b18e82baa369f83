use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Candidate files are `*.json` directly inside `dir`, returned in file-name order.
pub fn discover_candidates(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("candidates directory {dir} does not exist or is not a directory");
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("list {dir}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            tracing::warn!(dir = %dir, "skipping non UTF-8 file name");
            continue;
        };
        if path.extension() == Some("json") {
            out.push(path);
        }
    }

    tracing::debug!(dir = %dir, count = out.len(), "discovered candidate files");
    Ok(out)
}
