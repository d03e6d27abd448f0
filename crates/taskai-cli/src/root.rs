use std::path::{Path, PathBuf};
use taskai_core::paths::TASKAI_DIR;

/// Directory that holds (or will hold) `.taskai/`: the explicit `--root` /
/// `TASKAI_ROOT` value if given, else the nearest ancestor of the working
/// directory that already has one, else the working directory itself.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    nearest_data_root(&cwd).unwrap_or(cwd)
}

fn nearest_data_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(TASKAI_DIR).is_dir())
        .map(Path::to_path_buf)
}
