/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Antelope: discovery of installed versions

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use error::{Result, Error};
use version::{is_version_name, sort_versions, Version};

/// Where Antelope is installed unless told otherwise.
pub const DEFAULT_BASEDIR: &'static str = "/opt/antelope";

/// Environment variable overriding `DEFAULT_BASEDIR`.
pub const BASEDIR_VAR: &'static str = "ANTELOPE_BASEDIR";

/// File whose presence in a version directory marks a completed install.
pub const COMPLETION_MARKER: &'static str = "setup.sh";

/// Prefix prepended to paths of contrib software, per version, when the
/// version has a `contrib` tree.
pub const CONTRIB_SUBDIR: &'static str = "/contrib";

fn perl_dir_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^perl[0-9]+\\.[0-9]+(\\.[0-9]+)?(-64)?$").expect("valid regex"))
}

/// An Antelope installation root, containing one directory per installed
/// version (e.g. `/opt/antelope/5.4`) and possibly BRTT-distributed
/// interpreters (e.g. `/opt/antelope/perl5.16`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Installation {
    basedir: PathBuf,
}

impl Installation {
    /// Use the given base directory.
    pub fn new<P: Into<PathBuf>>(basedir: P) -> Installation {
        Installation { basedir: basedir.into() }
    }

    /// Use `$ANTELOPE_BASEDIR` if set, otherwise `/opt/antelope`.
    ///
    /// Fails if the variable is set but not valid unicode.
    pub fn from_env() -> Result<Installation> {
        match env::var(BASEDIR_VAR) {
            Ok(dir) => Ok(Installation::new(dir)),
            Err(env::VarError::NotPresent) => Ok(Installation::default()),
            Err(e) => Err(Error::from(e)),
        }
    }

    /// The base directory
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    /// True if the base directory exists (possibly via a symlink)
    pub fn exists(&self) -> bool {
        self.basedir.is_dir()
    }

    /// Directory of the given version. Does not check that it exists.
    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.basedir.join(version)
    }

    // List names of entries directly under the base directory which are
    // accepted by `filter` and contain `marker`, in file-name order.
    fn scan<F: Fn(&str) -> bool>(&self, filter: F, marker: &str) -> Result<Vec<String>> {
        if !self.exists() {
            info!("No Antelope installation at: {}", self.basedir.display());
            return Ok(vec![]);
        }
        let mut names = vec![];
        for entry in WalkDir::new(&self.basedir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let fname = match entry.file_name().to_str() {
                Some(s) => s,
                None => { /* ignore non-unicode names */ continue; },
            };
            if !filter(fname) {
                trace!("Ignoring entry (does not match pattern): {}", fname);
                continue;
            }
            if !entry.path().join(marker).exists() {
                trace!("Ignoring entry (no {}): {}", marker, fname);
                continue;
            }
            names.push(fname.to_string());
        }
        Ok(names)
    }

    /// All installed versions, oldest first.
    ///
    /// A version is installed when its directory name is a valid version
    /// and it contains `setup.sh`. Other entries are skipped. If the base
    /// directory does not exist the result is empty.
    pub fn versions(&self) -> Result<Vec<String>> {
        info!("Scanning for Antelope versions in: {}", self.basedir.display());
        let found = self.scan(is_version_name, COMPLETION_MARKER)?;
        // Names matching the pattern can still be unrepresentable (huge
        // numbers); skip those rather than failing the whole scan.
        let found: Vec<String> = found.into_iter().filter(|name| {
            let ok = Version::parse(name).is_ok();
            if !ok { warn!("Ignoring unparseable version directory: {}", name); }
            ok
        }).collect();
        sort_versions(found)
    }

    /// The newest installed version, if any.
    pub fn latest_version(&self) -> Result<Option<String>> {
        Ok(self.versions()?.pop())
    }

    /// True if the version has contributed software (`contrib/bin`).
    pub fn has_contrib(&self, version: &str) -> bool {
        self.version_dir(version).join("contrib").join("bin").is_dir()
    }

    /// For each installed version, the contrib base directory: `"/contrib"`
    /// if the version has a contrib tree, otherwise `""`.
    pub fn contrib_basedirs(&self) -> Result<Vec<(String, &'static str)>> {
        Ok(self.versions()?.into_iter().map(|v| {
            let dir = if self.has_contrib(&v) { CONTRIB_SUBDIR } else { "" };
            (v, dir)
        }).collect())
    }

    /// True if the version ships the `ald_proxy` binary.
    pub fn supports_aldproxy(&self, version: &str) -> bool {
        self.version_dir(version).join("bin").join("ald_proxy").exists()
    }

    /// For each installed version, whether it supports `ald_proxy`.
    pub fn aldproxy_support(&self) -> Result<Vec<(String, bool)>> {
        Ok(self.versions()?.into_iter().map(|v| {
            let supported = self.supports_aldproxy(&v);
            (v, supported)
        }).collect())
    }

    /// Installed versions supporting `ald_proxy`, oldest first.
    pub fn versions_supporting_aldproxy(&self) -> Result<Vec<String>> {
        Ok(self.versions()?.into_iter().filter(|v| self.supports_aldproxy(v)).collect())
    }

    /// The BRTT-distributed Perl directory with the greatest name (e.g.
    /// `perl5.16-64`), if any. Only directories containing `bin/perl` count.
    pub fn latest_perl(&self) -> Result<Option<String>> {
        Ok(self.scan(|name| perl_dir_regex().is_match(name), "bin/perl")?.pop())
    }
}

impl Default for Installation {
    fn default() -> Installation {
        Installation::new(DEFAULT_BASEDIR)
    }
}


#[test]
fn version_dir_layout() {
    let inst = Installation::new("/opt/antelope");
    assert_eq!(inst.version_dir("5.4"), PathBuf::from("/opt/antelope/5.4"));
    assert_eq!(Installation::default(), inst);
}

#[test]
fn perl_dir_names() {
    let re = perl_dir_regex();
    assert!(re.is_match("perl5.16"));
    assert!(re.is_match("perl5.16.3"));
    assert!(re.is_match("perl5.8-64"));
    assert!(!re.is_match("perl"));
    assert!(!re.is_match("perl5"));
    assert!(!re.is_match("python3.9"));
}

#[test]
fn missing_basedir() {
    let inst = Installation::new("/nonexistent/antelope/basedir");
    assert!(!inst.exists());
    assert_eq!(inst.versions().unwrap(), Vec::<String>::new());
    assert_eq!(inst.latest_version().unwrap(), None);
    assert_eq!(inst.latest_perl().unwrap(), None);
}
