use crate::workspace::list_files;
use amplify_derive::Display;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Error, Display, Debug)]
#[display(Debug)]
#[allow(dead_code)]
pub enum AutomationError {
    Spawn(io::Error),
    Failed(ExitStatus),
}

#[async_trait]
pub trait Library {
    /// Creates the user playlist unless one with that name already exists.
    async fn ensure_playlist(&self, playlist_name: &str) -> Result<(), AutomationError>;
    async fn add_file(&self, file_path: &Path, playlist_name: &str)
        -> Result<(), AutomationError>;
}

/// Automation failures are only logged. Returns how many files were submitted.
pub async fn import_directory(
    library: &(dyn Library + Send + Sync),
    directory: &Path,
    playlist_name: &str,
    extension: &str,
) -> io::Result<usize> {
    if let Err(error) = library.ensure_playlist(playlist_name).await {
        warn!("could not ensure the playlist {}: {}", playlist_name, error);
    }

    let files = list_files(directory, &[extension])?;
    for file_path in &files {
        info!("adding {}", file_path.display());
        if let Err(error) = library.add_file(file_path, playlist_name).await {
            warn!("could not add {}: {}", file_path.display(), error);
        }
    }

    Ok(files.len())
}

/// The macOS Music app, driven through `osascript`.
///
/// The scripts are fixed text; playlist names and paths only ever reach them as
/// `argv` items of the run handler.
pub struct MusicApp {
    program: String,
}

impl MusicApp {
    const ENSURE_PLAYLIST_SCRIPT: &'static str = r#"on run argv
    set playlistName to item 1 of argv
    tell application "Music"
        if not (exists playlist playlistName) then
            make new user playlist with properties {name:playlistName}
        end if
    end tell
end run"#;

    const ADD_FILE_SCRIPT: &'static str = r#"on run argv
    set theFile to POSIX file (item 1 of argv) as alias
    set playlistName to item 2 of argv
    tell application "Music"
        add theFile to playlist playlistName
    end tell
end run"#;

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command<'a>(&self, script: &str, arguments: impl IntoIterator<Item = &'a OsStr>) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-e").arg(script).args(arguments);
        command
    }

    async fn run(&self, mut command: Command) -> Result<(), AutomationError> {
        let status = command.status().await.map_err(AutomationError::Spawn)?;
        if !status.success() {
            return Err(AutomationError::Failed(status));
        }
        Ok(())
    }
}

impl Default for MusicApp {
    fn default() -> Self {
        Self::new("osascript")
    }
}

#[async_trait]
impl Library for MusicApp {
    async fn ensure_playlist(&self, playlist_name: &str) -> Result<(), AutomationError> {
        self.run(self.command(Self::ENSURE_PLAYLIST_SCRIPT, [OsStr::new(playlist_name)]))
            .await
    }

    async fn add_file(
        &self,
        file_path: &Path,
        playlist_name: &str,
    ) -> Result<(), AutomationError> {
        self.run(self.command(
            Self::ADD_FILE_SCRIPT,
            [file_path.as_os_str(), OsStr::new(playlist_name)],
        ))
        .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Playlists by name, holding the file paths added to them.
    #[derive(Default)]
    pub(crate) struct InMemoryLibrary {
        pub(crate) playlists: Mutex<BTreeMap<String, Vec<PathBuf>>>,
        pub(crate) created_count: Mutex<usize>,
    }

    #[async_trait]
    impl Library for InMemoryLibrary {
        async fn ensure_playlist(&self, playlist_name: &str) -> Result<(), AutomationError> {
            let mut playlists = self.playlists.lock().unwrap();
            if !playlists.contains_key(playlist_name) {
                playlists.insert(playlist_name.to_owned(), Vec::new());
                *self.created_count.lock().unwrap() += 1;
            }
            Ok(())
        }

        async fn add_file(
            &self,
            file_path: &Path,
            playlist_name: &str,
        ) -> Result<(), AutomationError> {
            if file_path.to_string_lossy().contains("broken") {
                return Err(AutomationError::Spawn(io::Error::other("script error")));
            }
            match self.playlists.lock().unwrap().get_mut(playlist_name) {
                Some(files) => files.push(file_path.to_owned()),
                None => return Err(AutomationError::Spawn(io::Error::other("no playlist"))),
            }
            Ok(())
        }
    }

    fn arguments_of(command: &Command) -> Vec<String> {
        command
            .as_std()
            .get_args()
            .map(|argument| argument.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn playlist_name_is_passed_as_an_argument_not_as_script_text() {
        let name = r#"Mix "quoted" \ end tell"#;
        let music_app = MusicApp::default();
        let command = music_app.command(MusicApp::ENSURE_PLAYLIST_SCRIPT, [OsStr::new(name)]);

        assert_eq!(command.as_std().get_program(), "osascript");
        assert_eq!(
            arguments_of(&command),
            ["-e", MusicApp::ENSURE_PLAYLIST_SCRIPT, name]
        );
        assert!(!MusicApp::ENSURE_PLAYLIST_SCRIPT.contains(name));
    }

    #[test]
    fn add_file_passes_the_path_then_the_playlist() {
        let music_app = MusicApp::default();
        let command = music_app.command(
            MusicApp::ADD_FILE_SCRIPT,
            [OsStr::new("/tmp/It's \"Live\".mp3"), OsStr::new("Recently Downloaded")],
        );

        assert_eq!(
            arguments_of(&command),
            [
                "-e",
                MusicApp::ADD_FILE_SCRIPT,
                "/tmp/It's \"Live\".mp3",
                "Recently Downloaded"
            ]
        );
    }

    #[test]
    fn playlist_is_only_made_when_no_playlist_has_the_name() {
        let lines: Vec<_> = MusicApp::ENSURE_PLAYLIST_SCRIPT
            .lines()
            .map(str::trim)
            .collect();
        let position = |line: &str| {
            lines
                .iter()
                .position(|candidate| *candidate == line)
                .unwrap_or_else(|| panic!("missing line: {}", line))
        };

        let name_from_argv = position("set playlistName to item 1 of argv");
        let guard = position("if not (exists playlist playlistName) then");
        let creation = position("make new user playlist with properties {name:playlistName}");
        let guard_end = position("end if");

        assert!(name_from_argv < guard);
        assert!(guard < creation && creation < guard_end);
        assert_eq!(
            lines
                .iter()
                .filter(|line| line.contains("make new"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn in_memory_library_creates_a_playlist_once() {
        let library = InMemoryLibrary::default();

        library.ensure_playlist("Recently Downloaded").await.unwrap();
        library.ensure_playlist("Recently Downloaded").await.unwrap();

        assert_eq!(library.playlists.lock().unwrap().len(), 1);
        assert_eq!(*library.created_count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn imports_only_matching_files_and_survives_failed_adds() {
        let directory = tempdir().unwrap();
        for name in ["b.mp3", "a.MP3", "broken.mp3", "cover.jpg", "notes.txt"] {
            fs::write(directory.path().join(name), b"").unwrap();
        }
        fs::create_dir(directory.path().join("nested.mp3")).unwrap();
        let library = InMemoryLibrary::default();

        let submitted = import_directory(&library, directory.path(), "Road Trip", "mp3")
            .await
            .unwrap();

        assert_eq!(submitted, 2);
        let playlists = library.playlists.lock().unwrap();
        let names: Vec<_> = playlists["Road Trip"]
            .iter()
            .map(|file_path| {
                assert!(file_path.is_absolute());
                file_path.file_name().unwrap().to_string_lossy().into_owned()
            })
            .collect();
        assert_eq!(names, ["b.mp3"]);
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let directory = tempdir().unwrap();
        let library = InMemoryLibrary::default();

        let result =
            import_directory(&library, &directory.path().join("missing"), "Road Trip", "mp3")
                .await;

        assert!(result.is_err());
    }
}
