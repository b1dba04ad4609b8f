//! Resource directory and extension command files.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use super::Engine;
use crate::error::PlanarError;

/// First bytes of a valid update bundle.
pub const UPDATE_SIGNATURE: &[u8; 6] = b"#@gmic";

#[cfg(windows)]
const USER_FILE_NAME: &str = "user.gmic";
#[cfg(not(windows))]
const USER_FILE_NAME: &str = ".gmic";

/// Whether `source` starts with [`UPDATE_SIGNATURE`].
///
/// The cursor is rewound to the start whatever the outcome, so the caller
/// can hand the same reader on unchanged.
pub fn has_update_signature<R: Read + Seek>(source: &mut R) -> io::Result<bool> {
    let mut sig = [0u8; UPDATE_SIGNATURE.len()];
    let read = source.read_exact(&mut sig);
    source.rewind()?;
    match read {
        Ok(()) => Ok(&sig == UPDATE_SIGNATURE),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Locations an engine loads extra command definitions from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    rc_dir: PathBuf,
    user_file: PathBuf,
}

impl ResourcePaths {
    /// Resolve the locations from `custom` or the process environment,
    /// without touching the filesystem.
    pub fn resolve(custom: Option<&Path>) -> Result<Self, PlanarError> {
        Self::resolve_with(custom, |key| std::env::var_os(key))
    }

    /// [`resolve`](Self::resolve) with an explicit environment lookup.
    ///
    /// The resource directory is the first of: `custom`, `$GMIC_PATH`,
    /// `$XDG_CONFIG_HOME/gmic`, `$HOME/.config/gmic`, `%APPDATA%/gmic`. The
    /// user command file lives in the first of `custom`, `$GMIC_PATH`,
    /// `$HOME`, `%APPDATA%`.
    pub fn resolve_with(
        custom: Option<&Path>,
        env: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, PlanarError> {
        let var = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        let custom = custom.filter(|p| !p.as_os_str().is_empty());

        let rc_dir = custom
            .map(Path::to_path_buf)
            .or_else(|| var("GMIC_PATH"))
            .or_else(|| var("XDG_CONFIG_HOME").map(|p| p.join("gmic")))
            .or_else(|| var("HOME").map(|p| p.join(".config").join("gmic")))
            .or_else(|| var("APPDATA").map(|p| p.join("gmic")))
            .ok_or_else(|| {
                PlanarError::ResourcePathInit("no resource directory could be determined".into())
            })?;

        let user_dir = custom
            .map(Path::to_path_buf)
            .or_else(|| var("GMIC_PATH"))
            .or_else(|| var("HOME"))
            .or_else(|| var("APPDATA"))
            .unwrap_or_else(|| rc_dir.clone());

        Ok(Self {
            user_file: user_dir.join(USER_FILE_NAME),
            rc_dir,
        })
    }

    /// Resolve the locations and create the resource directory if needed.
    pub fn init(custom: Option<&Path>) -> Result<Self, PlanarError> {
        let paths = Self::resolve(custom)?;
        paths.create_rc_dir()?;
        Ok(paths)
    }

    pub(crate) fn create_rc_dir(&self) -> Result<(), PlanarError> {
        fs::create_dir_all(&self.rc_dir).map_err(|e| {
            PlanarError::ResourcePathInit(format!("{}: {e}", self.rc_dir.display()))
        })
    }

    pub fn rc_dir(&self) -> &Path {
        &self.rc_dir
    }

    pub fn user_file(&self) -> &Path {
        &self.user_file
    }

    /// Update bundle for engine `version`: `<rc_dir>/update<version>.gmic`.
    pub fn update_file(&self, version: u32) -> PathBuf {
        self.rc_dir.join(format!("update{version}.gmic"))
    }

    /// Feed the update bundle (only if signed) and the user command file to
    /// `engine`. Missing files and load failures are skipped.
    ///
    /// Returns how many files the engine accepted.
    pub fn load_extensions<E: Engine + ?Sized>(&self, engine: &mut E) -> usize {
        let mut loaded = 0;

        let update = self.update_file(engine.version());
        if let Ok(mut file) = File::open(&update) {
            match has_update_signature(&mut file) {
                Ok(true) => loaded += usize::from(consume(engine, file, &update)),
                Ok(false) => {
                    tracing::debug!(path = %update.display(), "unsigned update bundle skipped");
                }
                Err(e) => {
                    tracing::debug!(path = %update.display(), error = %e, "update bundle unreadable");
                }
            }
        }

        if let Ok(file) = File::open(&self.user_file) {
            loaded += usize::from(consume(engine, file, &self.user_file));
        }
        loaded
    }
}

fn consume<E: Engine + ?Sized>(engine: &mut E, file: File, path: &Path) -> bool {
    let mut reader = BufReader::new(file);
    match engine.add_commands(&mut reader) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "extension commands loaded");
            true
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "extension commands ignored");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn signature_check_rewinds() {
        let mut signed = Cursor::new(b"#@gmic 3.5\nfoo : echo foo\n".to_vec());
        assert!(has_update_signature(&mut signed).unwrap());
        assert_eq!(signed.position(), 0);

        let mut unsigned = Cursor::new(b"#@cli foo\n".to_vec());
        assert!(!has_update_signature(&mut unsigned).unwrap());
        assert_eq!(unsigned.position(), 0);

        let mut short = Cursor::new(b"#@g".to_vec());
        assert!(!has_update_signature(&mut short).unwrap());
        assert_eq!(short.position(), 0);
    }

    #[test]
    fn custom_path_wins() {
        let paths = ResourcePaths::resolve_with(Some(Path::new("/opt/rc")), |_| {
            Some(OsString::from("/ignored"))
        })
        .unwrap();
        assert_eq!(paths.rc_dir(), Path::new("/opt/rc"));
        assert_eq!(paths.user_file(), Path::new("/opt/rc").join(USER_FILE_NAME));
        assert_eq!(
            paths.update_file(350),
            Path::new("/opt/rc").join("update350.gmic")
        );
    }

    #[test]
    fn environment_fallbacks() {
        let paths = ResourcePaths::resolve_with(None, |key| match key {
            "HOME" => Some(OsString::from("/home/ada")),
            _ => None,
        })
        .unwrap();
        assert_eq!(paths.rc_dir(), Path::new("/home/ada/.config/gmic"));
        assert_eq!(paths.user_file(), Path::new("/home/ada").join(USER_FILE_NAME));

        let xdg = ResourcePaths::resolve_with(None, |key| match key {
            "XDG_CONFIG_HOME" => Some(OsString::from("/cfg")),
            "HOME" => Some(OsString::from("/home/ada")),
            _ => None,
        })
        .unwrap();
        assert_eq!(xdg.rc_dir(), Path::new("/cfg/gmic"));
    }

    #[test]
    fn nothing_to_resolve_fails() {
        assert!(matches!(
            ResourcePaths::resolve_with(None, |_| None),
            Err(PlanarError::ResourcePathInit(_))
        ));
    }
}
