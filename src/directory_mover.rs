/// Safety-checked relocation of movie directories.
///
/// This module prepares the destination folder and moves each candidate
/// directory into it. Every candidate goes through the same ordered checks:
/// empty path, missing source, missing basename, name collision, and only
/// then the move itself. A failing check ends that candidate's processing
/// with a [`MoveOutcome`], never with an error that stops the run.
use crate::error::{AppError, AppResult, MoveError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What happened to one candidate directory.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The candidate had no directory path.
    SkippedEmptyPath,
    /// The source does not exist or is not a directory.
    SkippedMissingSource { source: PathBuf },
    /// Something already exists under the destination with the same name.
    SkippedExistingTarget { source: PathBuf, target: PathBuf },
    /// The directory was relocated.
    Moved { source: PathBuf, target: PathBuf },
    /// Dry run: every check passed and the directory would be relocated.
    WouldMove {
        source: PathBuf,
        target: PathBuf,
        size_bytes: u64,
    },
    /// The move was attempted, or the path was unusable, and it failed.
    Failed(MoveError),
}

impl MoveOutcome {
    /// True for the outcomes that count as skips in the run summary.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::SkippedEmptyPath
                | Self::SkippedMissingSource { .. }
                | Self::SkippedExistingTarget { .. }
        )
    }
}

/// Moves candidate directories into a single destination folder.
///
/// # Examples
///
/// ```no_run
/// use moviecull::directory_mover::{DirectoryMover, MoveOutcome};
/// use std::path::Path;
///
/// let mover = DirectoryMover::prepare(Path::new("/srv/low-rated"), false).unwrap();
/// match mover.relocate("/srv/movies/Bad Movie (1999)") {
///     MoveOutcome::Moved { target, .. } => println!("now at {}", target.display()),
///     other => println!("{:?}", other),
/// }
/// ```
#[derive(Debug)]
pub struct DirectoryMover {
    destination: PathBuf,
    dry_run: bool,
}

impl DirectoryMover {
    /// Ensures `destination` exists as a directory and returns a mover for it.
    ///
    /// Missing intermediate directories are created. An existing directory is
    /// accepted as is. In dry-run mode nothing is created: a missing
    /// destination is accepted, but an existing non-directory is still an
    /// error.
    ///
    /// # Errors
    ///
    /// * [`AppError::Usage`] if `destination` is empty
    /// * [`AppError::DestinationCreate`] if the directory cannot be created
    /// * [`AppError::DestinationNotDirectory`] if the path is taken by a file
    pub fn prepare(destination: &Path, dry_run: bool) -> AppResult<Self> {
        if destination.as_os_str().is_empty() {
            return Err(AppError::Usage(
                "destination directory must not be empty".to_string(),
            ));
        }

        if destination.exists() && !destination.is_dir() {
            return Err(AppError::DestinationNotDirectory {
                path: destination.to_path_buf(),
            });
        }

        if !dry_run {
            fs::create_dir_all(destination).map_err(|source| AppError::DestinationCreate {
                path: destination.to_path_buf(),
                source,
            })?;
            if !destination.is_dir() {
                return Err(AppError::DestinationNotDirectory {
                    path: destination.to_path_buf(),
                });
            }
        }

        Ok(Self {
            destination: destination.to_path_buf(),
            dry_run,
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Runs the per-candidate checks and, if they all pass, moves `directory`.
    pub fn relocate(&self, directory: &str) -> MoveOutcome {
        if directory.is_empty() {
            return MoveOutcome::SkippedEmptyPath;
        }

        let source = PathBuf::from(directory);
        if !source.is_dir() {
            return MoveOutcome::SkippedMissingSource { source };
        }

        let Some(basename) = source.file_name() else {
            return MoveOutcome::Failed(MoveError::NoBasename {
                source_path: source,
            });
        };
        let target = self.destination.join(basename);

        if entry_exists(&target) {
            return MoveOutcome::SkippedExistingTarget { source, target };
        }

        if self.dry_run {
            let size_bytes = directory_size(&source);
            return MoveOutcome::WouldMove {
                source,
                target,
                size_bytes,
            };
        }

        match move_directory(&source, &target) {
            Ok(()) => MoveOutcome::Moved { source, target },
            Err(e) => MoveOutcome::Failed(MoveError::Io {
                from: source,
                to: target,
                source: e,
            }),
        }
    }
}

/// True if anything, including a dangling symlink, occupies `path`.
fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Renames `source` to `target`, copying then deleting across filesystems.
fn move_directory(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{} is on another device, copying to {}",
                source.display(),
                target.display()
            );
            copy_then_remove(source, target)
        }
        Err(e) => Err(e),
    }
}

/// Copies `source` into a freshly created `target`, then deletes `source`.
///
/// `target` must not exist. If creating it fails nothing is cleaned up, since
/// whatever occupies that path is not ours. A failed copy removes only the
/// directory created here and leaves the source intact.
fn copy_then_remove(source: &Path, target: &Path) -> io::Result<()> {
    fs::create_dir(target)?;

    if let Err(copy_err) = copy_contents(source, target) {
        if let Err(cleanup_err) = fs::remove_dir_all(target) {
            log::warn!(
                "Could not remove partial copy {}: {}",
                target.display(),
                cleanup_err
            );
        }
        return Err(copy_err);
    }

    fs::remove_dir_all(source)
}

/// Copies everything below `source` into the existing directory `target`,
/// recreating symlinks rather than following them.
fn copy_contents(source: &Path, target: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source).follow_links(false).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let to = target.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir(&to)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &to)?;
        } else {
            fs::copy(entry.path(), &to)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}

/// Total size in bytes of the regular files under `path`.
///
/// Symlinks are not followed. Unreadable entries are logged and skipped.
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Could not read entry under {}: {}", path.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .fold(0, |total, meta| total + meta.len())
}
