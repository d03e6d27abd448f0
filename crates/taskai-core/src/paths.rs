use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const TASKAI_DIR: &str = ".taskai";

pub const CONFIG_FILE: &str = ".taskai/config.yaml";
pub const COMMITMENTS_FILE: &str = ".taskai/commitments.json";
pub const REMINDERS_FILE: &str = ".taskai/reminders.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn taskai_dir(root: &Path) -> PathBuf {
    root.join(TASKAI_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn commitments_path(root: &Path) -> PathBuf {
    root.join(COMMITMENTS_FILE)
}

pub fn reminders_path(root: &Path) -> PathBuf {
    root.join(REMINDERS_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
