use crate::model::MediaLocator;
use std::fs;
use std::io;
use std::path::Path;

pub fn write(path: &Path, locators: &[MediaLocator]) -> io::Result<()> {
    let contents: String = locators
        .iter()
        .map(|locator| format!("{}\n", locator))
        .collect();

    fs::write(path, contents)
}

pub fn read(path: &Path) -> io::Result<Vec<MediaLocator>> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(MediaLocator::new)
        .collect())
}
