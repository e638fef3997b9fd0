use std::path::PathBuf;
use std::sync::OnceLock;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// Directory for files written by tests (rendered frames, dumps).
pub fn test_output_dir() -> PathBuf {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = workspace_root().join("test_output");
        std::fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
        dir
    })
    .clone()
}

pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}

/// Path to a checked-in fixture under `test_resources/`.
pub fn test_resource_path(name: &str) -> PathBuf {
    workspace_root().join("test_resources").join(name)
}
