/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Error structs used by the Antelope library

use std::{io, error, fmt, result, string, env};
use std::path::{Path, PathBuf};
use walkdir;
use serde_json;

/// Our custom result type
pub type Result<T> = result::Result<T, Error>;

/// Our custom compound error type
pub enum Error {
    /// A string did not match the Antelope version grammar
    InvalidVersion(VersionError),
    /// A problem with some path on the filesystem
    Path(PathError),
    /// An external command exited unsuccessfully
    CmdFailed(String),
    /// Filesystem or process I/O failed
    Io(io::Error),
    /// Listing a directory failed
    Walk(walkdir::Error),
    /// Command output was not UTF-8
    Utf8(string::FromUtf8Error),
    /// An environment variable was set but unusable
    VarError(env::VarError),
    /// Facts could not be serialised
    Json(serde_json::Error),
}

/// A version string which is not of the form `MAJOR.MINOR[-64][pre|post|p]`.
///
/// Holds the offending string for display.
#[derive(PartialEq, Eq, Clone)]
pub struct VersionError {
    version: String,
}

impl VersionError {
    /// Create an error for the given string.
    pub fn new<S: Into<String>>(version: S) -> VersionError {
        VersionError { version: version.into() }
    }
    /// Convenience: wrap as an `Err(Error::InvalidVersion(..))`.
    pub fn err<T, S: Into<String>>(version: S) -> Result<T> {
        Err(Error::InvalidVersion(VersionError::new(version)))
    }
    /// The string which failed to parse
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid Antelope version format: '{}'", self.version)
    }
}

/// Any error where a path on the filesystem is not what was expected
#[derive(PartialEq, Eq)]
pub struct PathError {
    msg: &'static str,
    path: PathBuf,
}

impl PathError {
    /// Create. Will be displayed as `"{msg}: {path}"`.
    pub fn new<P: AsRef<Path>>(msg: &'static str, path: P) -> PathError {
        PathError { msg: msg, path: path.as_ref().to_path_buf() }
    }
    /// Convenience: wrap as an `Err(Error::Path(..))`.
    pub fn err<T, P: AsRef<Path>>(msg: &'static str, path: P) -> Result<T> {
        Err(Error::Path(PathError::new(msg, path)))
    }
    /// The path concerned
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Error {
    /// Create an "external command" error.
    pub fn cmd_failed<T: fmt::Display>(cmd: T, status: Option<i32>) -> Error {
        Error::CmdFailed(match status {
            Some(code) => format!("Command failed with status {}: {}", code, cmd),
            None => format!("Command failed (interrupted): {}", cmd),
        })
    }
    /// True if this is an `InvalidVersion` error
    pub fn is_invalid_version(&self) -> bool {
        match *self {
            Error::InvalidVersion(_) => true,
            _ => false,
        }
    }
}

// Important impls for compound type
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            Error::Walk(ref e) => Some(e),
            Error::Utf8(ref e) => Some(e),
            Error::VarError(ref e) => Some(e),
            Error::Json(ref e) => Some(e),
            _ => None,
        }
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidVersion(ref e) => fmt::Display::fmt(e, f),
            Error::Path(ref e) => write!(f, "{}: {}", e.msg, e.path.display()),
            Error::CmdFailed(ref msg) => write!(f, "{}", msg),
            Error::Io(ref e) => fmt::Display::fmt(e, f),
            Error::Walk(ref e) => fmt::Display::fmt(e, f),
            Error::Utf8(ref e) => fmt::Display::fmt(e, f),
            Error::VarError(ref e) => fmt::Display::fmt(e, f),
            Error::Json(ref e) => fmt::Display::fmt(e, f),
        }
    }
}
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Same as Display: these end up in `expect` messages and test output
        fmt::Display::fmt(self, f)
    }
}

// From impls
impl From<VersionError> for Error {
    fn from(e: VersionError) -> Error { Error::InvalidVersion(e) }
}
impl From<PathError> for Error {
    fn from(e: PathError) -> Error { Error::Path(e) }
}
impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error { Error::Io(e) }
}
impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Error { Error::Walk(e) }
}
impl From<string::FromUtf8Error> for Error {
    fn from(e: string::FromUtf8Error) -> Error { Error::Utf8(e) }
}
impl From<env::VarError> for Error {
    fn from(e: env::VarError) -> Error { Error::VarError(e) }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error { Error::Json(e) }
}


#[test]
fn display_invalid_version() {
    let e: Error = VersionError::new("bad-format").into();
    assert_eq!(e.to_string(), "Invalid Antelope version format: 'bad-format'");
    assert!(e.is_invalid_version());
}

#[test]
fn display_cmd_failed() {
    let e = Error::cmd_failed("getid perl", Some(2));
    assert_eq!(e.to_string(), "Command failed with status 2: getid perl");
    assert!(!e.is_invalid_version());
}

#[test]
fn json_error_converts() {
    use std::error::Error as StdError;
    let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
    let e: Error = json_err.into();
    match e {
        Error::Json(_) => {},
        ref other => panic!("unexpected: {}", other),
    }
    assert!(e.source().is_some());
    assert!(!e.is_invalid_version());
}
