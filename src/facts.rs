/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Antelope: system facts
//!
//! Everything known about an installation, gathered in one go, in a form
//! which serialises to the JSON object expected from an external fact
//! source. Facts which do not apply to the running kernel are left out.

use std::collections::BTreeMap;
use std::env::consts;

use serde::Serialize;

use discover::Installation;
use error::Result;
use getid::{latest_interpreter, Interpreter};

/// Operating system kernel, as far as fact confinement is concerned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kernel {
    /// Linux
    Linux,
    /// Solaris and illumos
    SunOS,
    /// macOS
    Darwin,
    /// Anything Antelope does not run on
    Other,
}

impl Kernel {
    /// The kernel this program was built for.
    pub fn current() -> Kernel {
        Kernel::from_os(consts::OS)
    }

    /// Map a Rust `target_os` name to a kernel.
    pub fn from_os(os: &str) -> Kernel {
        match os {
            "linux" => Kernel::Linux,
            "solaris" | "illumos" => Kernel::SunOS,
            "macos" => Kernel::Darwin,
            _ => Kernel::Other,
        }
    }

    /// Kernels on which Antelope runs at all.
    pub fn supports_antelope(self) -> bool {
        self != Kernel::Other
    }

    /// Kernels on which `ald_proxy` is distributed.
    pub fn supports_aldproxy(self) -> bool {
        self == Kernel::Linux || self == Kernel::Darwin
    }
}

/// The facts for an installation. Unset fields are omitted on output.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Facts {
    /// Installed versions, oldest first, comma separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_versions: Option<String>,
    /// Installed versions, oldest first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_versions_array: Option<Vec<String>>,
    /// The newest installed version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_latest_version: Option<String>,
    /// Perl of the newest version, from `getid perl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_latest_perl: Option<String>,
    /// Python of the newest version, from `getid python`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_latest_python: Option<String>,
    /// Per version: `"/contrib"` if it has a contrib tree, else `""`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_contrib_basedir: Option<BTreeMap<String, String>>,
    /// Per version: whether it ships `ald_proxy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_supports_aldproxy: Option<BTreeMap<String, bool>>,
    /// Versions shipping `ald_proxy`, comma separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_versions_supports_aldproxy: Option<String>,
    /// Versions shipping `ald_proxy`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antelope_versions_supports_aldproxy_array: Option<Vec<String>>,
}

impl Facts {
    /// Gather facts for `inst` as seen on `kernel`.
    ///
    /// Failure to scan the installation is an error. Failure to look up an
    /// interpreter only loses that fact (logged as a warning).
    pub fn gather(inst: &Installation, kernel: Kernel) -> Result<Facts> {
        let mut facts = Facts::default();
        if !kernel.supports_antelope() {
            info!("Kernel {:?} not supported by Antelope; no facts", kernel);
            return Ok(facts);
        }
        if !inst.exists() {
            info!("No Antelope installation at: {}", inst.basedir().display());
            return Ok(facts);
        }

        let versions = inst.versions()?;
        facts.antelope_versions = Some(versions.join(","));
        facts.antelope_latest_version = versions.last().cloned();
        facts.antelope_latest_perl = interpreter_fact(inst, Interpreter::Perl);
        facts.antelope_latest_python = interpreter_fact(inst, Interpreter::Python);
        facts.antelope_contrib_basedir = Some(inst.contrib_basedirs()?.into_iter()
            .map(|(v, dir)| (v, dir.to_string())).collect());

        if kernel.supports_aldproxy() {
            let support = inst.aldproxy_support()?;
            let supported: Vec<String> = support.iter()
                .filter(|&&(_, s)| s).map(|&(ref v, _)| v.clone()).collect();
            facts.antelope_supports_aldproxy = Some(support.into_iter().collect());
            facts.antelope_versions_supports_aldproxy = Some(supported.join(","));
            facts.antelope_versions_supports_aldproxy_array = Some(supported);
        }

        facts.antelope_versions_array = Some(versions);
        Ok(facts)
    }
}

fn interpreter_fact(inst: &Installation, interp: Interpreter) -> Option<String> {
    match latest_interpreter(inst, interp) {
        Ok(path) => path,
        Err(e) => {
            warn!("Unable to find latest {}: {}", interp, e);
            None
        }
    }
}


#[test]
fn kernels() {
    assert_eq!(Kernel::from_os("linux"), Kernel::Linux);
    assert_eq!(Kernel::from_os("solaris"), Kernel::SunOS);
    assert_eq!(Kernel::from_os("macos"), Kernel::Darwin);
    assert_eq!(Kernel::from_os("windows"), Kernel::Other);
    assert!(Kernel::SunOS.supports_antelope());
    assert!(!Kernel::SunOS.supports_aldproxy());
    assert!(Kernel::Darwin.supports_aldproxy());
    assert!(!Kernel::Other.supports_antelope());
}

#[test]
fn no_facts_without_installation() {
    let inst = Installation::new("/nonexistent/antelope/basedir");
    assert_eq!(Facts::gather(&inst, Kernel::Linux).unwrap(), Facts::default());
}
