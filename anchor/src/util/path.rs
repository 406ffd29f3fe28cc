// src/util/path.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Replaces a leading home directory with `~`.
///
/// Only whole path components match, so `/home/user2` is left alone for home `/home/user`.
pub fn abbreviate_home(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    if home.as_os_str().is_empty() {
        return path.to_string();
    }

    match Path::new(path).strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => PathBuf::from("~").join(rest).to_string_lossy().into_owned(),
        Err(_) => path.to_string(),
    }
}

/// Immediate children of `dir`: (directories, files), each sorted by name.
///
/// Symlinks are classified by their target; broken links count as files.
pub fn list_children(dir: &Path) -> io::Result<(Vec<String>, Vec<String>)> {
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            directories.push(name);
        } else {
            files.push(name);
        }
    }

    directories.sort();
    files.sort();
    Ok((directories, files))
}

/// The process working directory as a UTF-8 string.
pub fn current_dir_string() -> io::Result<String> {
    std::env::current_dir()?.into_os_string().into_string().map_err(|p| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("working directory is not valid UTF-8: {}", p.to_string_lossy()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_abbreviate_home() {
        let home = Path::new("/home/user");
        assert_eq!(abbreviate_home("/home/user/proj", Some(home)), "~/proj");
        assert_eq!(abbreviate_home("/home/user", Some(home)), "~");
        assert_eq!(abbreviate_home("/home/user2/proj", Some(home)), "/home/user2/proj");
        assert_eq!(abbreviate_home("/srv/home/user", Some(home)), "/srv/home/user");
        assert_eq!(abbreviate_home("/home/user/proj", None), "/home/user/proj");
    }

    #[test]
    fn given_mixed_entries_when_list_children_then_dirs_and_files_sorted_apart() {
        let dir = tempfile::tempdir().unwrap();
        for d in ["zeta", "alpha"] {
            fs::create_dir(dir.path().join(d)).unwrap();
        }
        for f in ["b.txt", "a.txt", "Makefile"] {
            File::create(dir.path().join(f)).unwrap();
        }

        let (directories, files) = list_children(dir.path()).unwrap();

        assert_eq!(directories, vec!["alpha", "zeta"]);
        assert_eq!(files, vec!["Makefile", "a.txt", "b.txt"]);
    }

    #[test]
    fn given_missing_directory_when_list_children_then_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_children(&dir.path().join("gone")).is_err());
    }
}
