/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Antelope version strings: parsing, comparison and sorting
//!
//! Antelope release names have the form `MAJOR.MINOR[-64][pre|post|p]`, for
//! example `5.4`, `5.2-64p` or `5.5pre`. They are ordered as follows:
//!
//! 1.  numerically by major, then minor version;
//! 2.  by the `-64` architecture suffix. Before 5.5 a `-64` build is newer
//!     than the (32-bit) plain release; from 5.5 on releases are 64-bit only
//!     and a plain release is newer than a legacy `-64` one;
//! 3.  by release suffix: `pre` < none < `post` = `p`.
//!
//! Strings not matching this grammar are always rejected with
//! `Error::InvalidVersion`; they never compare equal to anything.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use error::{Result, Error, VersionError};

/// The first release where the architecture suffix changes meaning.
pub const EPOCH_64BIT: (u32, u32) = (5, 5);

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^([0-9]+)\\.([0-9]+)(-64)?(pre|post|p)?$").expect("valid regex"))
}

/// True if `s` matches the version grammar.
///
/// This does not check that the numbers fit into a `u32`; use
/// `Version::parse` for that.
pub fn is_version_name(s: &str) -> bool {
    version_regex().is_match(s)
}

/// Release suffix of a version
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Release {
    /// `pre`: a pre-release
    Pre,
    /// No suffix: the primary release
    Primary,
    /// `post`: a post-release patch
    Post,
    /// `p`: the same as `post`, spelled differently
    P,
}

impl Release {
    fn rank(self) -> u8 {
        match self {
            Release::Pre => 0,
            Release::Primary => 1,
            Release::Post | Release::P => 2,
        }
    }

    /// The suffix as written in a version string (empty for `Primary`)
    pub fn as_str(self) -> &'static str {
        match self {
            Release::Pre => "pre",
            Release::Primary => "",
            Release::Post => "post",
            Release::P => "p",
        }
    }

    /// Order release suffixes: `pre < none < post == p`.
    pub fn compare(self, other: Release) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// A parsed Antelope version.
///
/// Equality and ordering follow the Antelope rules, so `5.5post == 5.5p`
/// even though the two print differently.
#[derive(Clone, Copy, Debug)]
pub struct Version {
    major: u32,
    minor: u32,
    has64: bool,
    release: Release,
}

impl Version {
    /// Create from components.
    pub fn new(major: u32, minor: u32, has64: bool, release: Release) -> Version {
        Version { major: major, minor: minor, has64: has64, release: release }
    }

    /// Parse a version string. Fails with `Error::InvalidVersion` unless the
    /// whole string matches `^([0-9]+)\.([0-9]+)(-64)?(pre|post|p)?$`.
    pub fn parse(s: &str) -> Result<Version> {
        let caps = match version_regex().captures(s) {
            Some(caps) => caps,
            None => return VersionError::err(s),
        };
        let major = caps[1].parse().map_err(|_| VersionError::new(s))?;
        let minor = caps[2].parse().map_err(|_| VersionError::new(s))?;
        let release = match caps.get(4).map(|m| m.as_str()) {
            None => Release::Primary,
            Some("pre") => Release::Pre,
            Some("post") => Release::Post,
            Some("p") => Release::P,
            Some(_) => return VersionError::err(s),
        };
        Ok(Version {
            major: major,
            minor: minor,
            has64: caps.get(3).is_some(),
            release: release,
        })
    }

    /// Major version number
    pub fn major(&self) -> u32 { self.major }
    /// Minor version number
    pub fn minor(&self) -> u32 { self.minor }
    /// Whether the `-64` architecture suffix is present
    pub fn has64(&self) -> bool { self.has64 }
    /// Release suffix
    pub fn release(&self) -> Release { self.release }

    /// True for 5.5 and later, where all releases are 64-bit.
    pub fn is_64bit_only(&self) -> bool {
        (self.major, self.minor) >= EPOCH_64BIT
    }

    /// Compare the architecture suffixes of two versions which share
    /// major and minor numbers, from the point of view of `self`.
    fn compare_arch(&self, other: &Version) -> Ordering {
        if self.has64 == other.has64 {
            return Ordering::Equal;
        }
        let newer = if self.is_64bit_only() { !self.has64 } else { self.has64 };
        if newer { Ordering::Greater } else { Ordering::Less }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> Ordering {
        self.major.cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then_with(|| self.compare_arch(other))
            .then_with(|| self.release.compare(other.release))
    }
}
impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Version {
    fn eq(&self, other: &Version) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Version {}

impl FromStr for Version {
    type Err = Error;
    fn from_str(s: &str) -> Result<Version> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}{}{}", self.major, self.minor,
            if self.has64 { "-64" } else { "" }, self.release.as_str())
    }
}

/// Compare two version strings.
///
/// Identical strings are equal without being parsed. Otherwise both are
/// parsed, and the first which fails is reported.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    if a == b {
        return Ok(Ordering::Equal);
    }
    let va = Version::parse(a)?;
    let vb = Version::parse(b)?;
    Ok(va.cmp(&vb))
}

/// Compare two version strings, returning -1, 0 or 1.
///
/// This is the form used from manifests to switch features on by version,
/// e.g. `version_compare(v, "5.5")? >= 0`.
pub fn version_compare(version1: &str, version2: &str) -> Result<i32> {
    Ok(match compare(version1, version2)? {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

/// Sort version strings, oldest first.
///
/// The sort is stable: versions which compare equal (e.g. `5.5post` and
/// `5.5p`) keep their input order. If any element is not a valid version,
/// the first such (in input order) is reported and nothing is returned.
pub fn sort_versions<S: AsRef<str>>(versions: Vec<S>) -> Result<Vec<S>> {
    let mut parsed = Vec::with_capacity(versions.len());
    for v in versions {
        let version = Version::parse(v.as_ref())?;
        parsed.push((version, v));
    }
    parsed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(parsed.into_iter().map(|(_, v)| v).collect())
}

/// The newest of some version strings, or `None` if empty.
pub fn latest_version<S: AsRef<str>>(versions: Vec<S>) -> Result<Option<S>> {
    Ok(sort_versions(versions)?.pop())
}
