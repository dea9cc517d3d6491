//! Locating and running executables such as the `juju` client
//!
//! An [`Executable`] is an absolute path plus an optional environment. When an
//! environment is given it replaces the child's environment entirely.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

use crate::version::{Version, VersionError, VersionNumber};

/// Default name of the Juju client binary.
pub const JUJU_EXECUTABLE: &str = "juju";

/// Environment variables passed to a child process.
pub type EnvVars = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ExecutableError {
    #[error("missing filename")]
    MissingFilename,

    #[error("filename must be an absolute path, got {0:?}")]
    RelativePath(PathBuf),

    #[error("executable {executable:?} not found")]
    NotFound {
        executable: String,
        path: Option<String>,
    },

    #[error("failed to run {filename:?}: {source}")]
    Io {
        filename: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{filename:?} exited with {status}")]
    Failed { filename: PathBuf, status: ExitStatus },

    #[error("output of {0:?} is not valid UTF-8")]
    NonUtf8Output(PathBuf),

    #[error("unexpected version reported by {filename:?}: {source}")]
    Version {
        filename: PathBuf,
        #[source]
        source: VersionError,
    },

    #[error("installed version {found} does not match requested {requested}")]
    VersionMismatch {
        requested: VersionNumber,
        found: Version,
    },
}

/// A single executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    filename: PathBuf,
    envvars: Option<EnvVars>,
}

impl Executable {
    /// Return the named executable if it exists on the `PATH`.
    ///
    /// `PATH` is taken from `envvars` when it sets one, else from the current
    /// process.
    pub fn find(name: &str, envvars: Option<EnvVars>) -> Result<Self, ExecutableError> {
        if name.is_empty() {
            return Err(ExecutableError::MissingFilename);
        }

        let path = search_path(envvars.as_ref());
        debug!("Looking up {:?} on PATH {:?}", name, path);
        let Some(found) = find_executable(name, path.as_deref()) else {
            return Err(ExecutableError::NotFound {
                executable: name.to_string(),
                path,
            });
        };
        debug!("Found {:?} at {:?}", name, found);

        Self::new(found, envvars)
    }

    /// Wrap an absolute path. Env vars with empty values are dropped.
    pub fn new(
        filename: impl Into<PathBuf>,
        envvars: Option<EnvVars>,
    ) -> Result<Self, ExecutableError> {
        let filename = filename.into();
        if filename.as_os_str().is_empty() {
            return Err(ExecutableError::MissingFilename);
        }
        if !filename.is_absolute() {
            return Err(ExecutableError::RelativePath(filename));
        }

        let envvars = envvars.map(|vars| {
            vars.into_iter()
                .filter(|(_, value)| !value.is_empty())
                .collect()
        });

        Ok(Self { filename, envvars })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// The environment used when running the executable, if overridden.
    pub fn envvars(&self) -> Option<&EnvVars> {
        self.envvars.as_ref()
    }

    /// Return the full argv, starting with the executable itself.
    pub fn resolve_args<I, S>(&self, args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        std::iter::once(self.filename.clone().into_os_string())
            .chain(args.into_iter().map(|arg| arg.as_ref().to_os_string()))
            .collect()
    }

    /// Run the executable to completion with inherited stdio.
    pub fn run<I, S>(&self, args: I) -> Result<(), ExecutableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.invoke(args, false).map(|_| ())
    }

    /// Run the executable and return what it wrote to stdout.
    pub fn run_out<I, S>(&self, args: I) -> Result<String, ExecutableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.invoke(args, true)?;
        String::from_utf8(output.stdout)
            .map_err(|_| ExecutableError::NonUtf8Output(self.filename.clone()))
    }

    /// Ask the executable for its version (`<exe> version`).
    pub fn version(&self) -> Result<Version, ExecutableError> {
        let out = self.run_out(["version"])?;
        Version::parse(out.trim()).map_err(|source| ExecutableError::Version {
            filename: self.filename.clone(),
            source,
        })
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.filename);
        command.args(args);
        if let Some(envvars) = &self.envvars {
            command.env_clear().envs(envvars);
        }
        command
    }

    fn invoke<I, S>(&self, args: I, capture: bool) -> Result<Output, ExecutableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = self.command(args);
        debug!("Running {:?}", command);

        let result = if capture {
            command.stderr(Stdio::inherit()).output()
        } else {
            command.status().map(|status| Output {
                status,
                stdout: Vec::new(),
                stderr: Vec::new(),
            })
        };

        let output = result.map_err(|source| self.spawn_error(source))?;
        if !output.status.success() {
            warn!("{:?} exited with {}", self.filename, output.status);
            return Err(ExecutableError::Failed {
                filename: self.filename.clone(),
                status: output.status,
            });
        }
        Ok(output)
    }

    // A vanished executable is reported as NotFound rather than a raw I/O error.
    fn spawn_error(&self, source: io::Error) -> ExecutableError {
        warn!("Failed to run {:?}: {}", self.filename, source);
        if !is_executable(&self.filename) {
            return ExecutableError::NotFound {
                executable: self.filename.display().to_string(),
                path: search_path(self.envvars.as_ref()),
            };
        }
        ExecutableError::Io {
            filename: self.filename.clone(),
            source,
        }
    }
}

/// Find `name` and check that its version satisfies `requested`.
///
/// With no pattern any parseable version is accepted.
pub fn find_juju(
    name: &str,
    requested: Option<&VersionNumber>,
    envvars: Option<EnvVars>,
) -> Result<(Executable, Version), ExecutableError> {
    let executable = Executable::find(name, envvars)?;
    let found = executable.version()?;

    if let Some(requested) = requested.filter(|requested| !requested.matches(found.number())) {
        warn!(
            "{:?} reports {} which does not match {}",
            executable.filename(),
            found,
            requested
        );
        return Err(ExecutableError::VersionMismatch {
            requested: *requested,
            found,
        });
    }

    debug!("Using {:?} ({})", executable.filename(), found);
    Ok((executable, found))
}

// An override without PATH (or an empty one) searches the process PATH.
fn search_path(envvars: Option<&EnvVars>) -> Option<String> {
    envvars
        .and_then(|envvars| envvars.get("PATH").cloned())
        .or_else(|| std::env::var("PATH").ok())
}

fn find_executable(name: &str, path: Option<&str>) -> Option<PathBuf> {
    if name.contains(MAIN_SEPARATOR) {
        let candidate = Path::new(name);
        return is_executable(candidate)
            .then(|| std::path::absolute(candidate).ok())
            .flatten();
    }

    std::env::split_paths(path?)
        .map(|dir| dir.join(name))
        .filter(|candidate| is_executable(candidate))
        .find_map(|candidate| std::path::absolute(candidate).ok())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
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

    fn env(pairs: &[(&str, &str)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn new_with_all_args() {
        let exe = Executable::new("/usr/local/bin/my-exe", Some(env(&[("SPAM", "eggs")]))).unwrap();

        assert_eq!(exe.filename(), Path::new("/usr/local/bin/my-exe"));
        assert_eq!(exe.envvars(), Some(&env(&[("SPAM", "eggs")])));
    }

    #[test]
    fn new_with_minimal_args() {
        let exe = Executable::new("/usr/local/bin/my-exe", None).unwrap();

        assert_eq!(exe.envvars(), None);
    }

    #[test]
    fn new_drops_empty_env_values() {
        let exe = Executable::new(
            "/usr/local/bin/my-exe",
            Some(env(&[("SPAM", "eggs"), ("ham", "")])),
        )
        .unwrap();

        assert_eq!(exe.envvars(), Some(&env(&[("SPAM", "eggs")])));
    }

    #[test]
    fn new_rejects_missing_filename() {
        assert!(matches!(
            Executable::new("", None),
            Err(ExecutableError::MissingFilename)
        ));
    }

    #[test]
    fn new_rejects_relative_filename() {
        assert!(matches!(
            Executable::new("bin/my-exe", None),
            Err(ExecutableError::RelativePath(_))
        ));
    }

    #[test]
    fn find_rejects_empty_name() {
        assert!(matches!(
            Executable::find("", None),
            Err(ExecutableError::MissingFilename)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn find_falls_back_to_process_path_when_override_has_none() {
        let exe = Executable::find("sh", Some(env(&[("SPAM", "eggs")]))).unwrap();

        assert!(exe.filename().ends_with("sh"));
        assert_eq!(exe.envvars(), Some(&env(&[("SPAM", "eggs")])));
    }

    #[cfg(unix)]
    #[test]
    fn find_with_empty_override_searches_process_path() {
        let exe = Executable::find("sh", Some(EnvVars::new())).unwrap();

        assert!(exe.filename().is_absolute());
    }

    #[test]
    fn search_path_prefers_override() {
        let path = search_path(Some(&env(&[("PATH", "/opt/juju/bin")])));

        assert_eq!(path.as_deref(), Some("/opt/juju/bin"));
    }

    #[test]
    fn resolve_args_prepends_filename() {
        let exe = Executable::new("/usr/local/bin/my-exe", None).unwrap();
        let args = exe.resolve_args(["x", "-y", "z"]);

        assert_eq!(
            args,
            ["/usr/local/bin/my-exe", "x", "-y", "z"].map(OsString::from)
        );
    }
}
