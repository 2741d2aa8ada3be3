use std::io;
use std::path::{Path, PathBuf};
use std::{fs, path};

pub fn prepare(directory: &Path) -> io::Result<()> {
    if directory.exists() {
        fs::remove_dir_all(directory)?;
    }
    fs::create_dir_all(directory)
}

pub fn clean(directory: &Path, extensions: &[&str]) -> io::Result<usize> {
    let files = list_files(directory, extensions)?;
    for file_path in &files {
        fs::remove_file(file_path)?;
    }

    Ok(files.len())
}

/// Regular files directly inside `directory` whose name ends with `.<extension>` for one of
/// the extensions, compared case-sensitively, sorted by name.
pub(crate) fn list_files(directory: &Path, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let matches = file_name.to_str().is_some_and(|file_name| {
            extensions.iter().any(|extension| {
                file_name
                    .strip_suffix(extension)
                    .is_some_and(|stem| stem.ends_with('.'))
            })
        });
        if matches {
            files.push(path::absolute(entry.path())?);
        }
    }

    files.sort();
    Ok(files)
}
