//! Shell interpreter discovery.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

static SHELL: OnceCell<PathBuf> = OnceCell::new();

/// Path of the interpreter used to run commands, resolved once per process.
///
/// Prefers `/bin/bash` when it exists and is executable, falling back to a
/// plain `sh` looked up through `PATH`.
pub(crate) fn shell_path() -> &'static Path {
    SHELL.get_or_init(detect_shell)
}

fn detect_shell() -> PathBuf {
    let bash = Path::new("/bin/bash");
    if is_executable(bash) {
        return bash.to_path_buf();
    }
    PathBuf::from("sh")
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_path_is_bash_or_sh() {
        let shell = shell_path();
        let name = shell.file_name().unwrap().to_string_lossy();
        assert!(name == "bash" || name == "sh", "unexpected shell {shell:?}");
    }

    #[test]
    fn test_shell_path_is_cached() {
        assert!(std::ptr::eq(shell_path(), shell_path()));
    }

    #[test]
    fn test_missing_path_is_not_executable() {
        assert!(!is_executable(Path::new("/definitely/not/a/shell")));
    }
}
