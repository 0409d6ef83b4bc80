/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Antelope: querying an installed version with its `getid` utility

use std::fmt;
use std::process::{Command, Stdio};

use discover::Installation;
use error::{Result, Error, PathError};

/// Interpreters distributed with Antelope which `getid` can locate.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Interpreter {
    /// `getid perl`
    Perl,
    /// `getid python`
    Python,
}

impl Interpreter {
    /// The id passed to `getid`
    pub fn id(self) -> &'static str {
        match self {
            Interpreter::Perl => "perl",
            Interpreter::Python => "python",
        }
    }
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Run `$ANTELOPE/bin/getid ID` for the given version, with `ANTELOPE` set
/// to that version's directory.
///
/// Returns the trimmed output, or `None` if there is none. Standard error
/// is discarded.
pub fn getid(inst: &Installation, version: &str, id: &str) -> Result<Option<String>> {
    let antelope = inst.version_dir(version);
    let exe = antelope.join("bin").join("getid");
    if !exe.is_file() {
        return PathError::err("getid not found", exe);
    }
    trace!("Running: {} {}", exe.display(), id);
    let output = Command::new(&exe)
        .arg(id)
        .env("ANTELOPE", &antelope)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;
    if !output.status.success() {
        return Err(Error::cmd_failed(format!("{} {}", exe.display(), id), output.status.code()));
    }
    let out = String::from_utf8(output.stdout)?;
    let out = out.trim();
    Ok(if out.is_empty() { None } else { Some(out.to_string()) })
}

/// Path of the interpreter belonging to the latest installed version, or
/// `None` if no version is installed or `getid` has no answer.
pub fn latest_interpreter(inst: &Installation, interp: Interpreter) -> Result<Option<String>> {
    match inst.latest_version()? {
        Some(version) => getid(inst, &version, interp.id()),
        None => Ok(None),
    }
}


#[test]
fn interpreter_ids() {
    assert_eq!(Interpreter::Perl.id(), "perl");
    assert_eq!(Interpreter::Python.to_string(), "python");
}

#[test]
fn getid_missing() {
    let inst = Installation::new("/nonexistent/antelope/basedir");
    match getid(&inst, "5.4", "perl") {
        Err(Error::Path(ref e)) => assert!(e.path().ends_with("5.4/bin/getid")),
        r => panic!("unexpected: {:?}", r),
    }
    assert_eq!(latest_interpreter(&inst, Interpreter::Perl).unwrap(), None);
}
