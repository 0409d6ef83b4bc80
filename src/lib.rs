/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Antelope library
//!
//! Support for managing hosts running BRTT Antelope, the real-time
//! seismic-data-acquisition system. Antelope is installed under a base
//! directory (normally `/opt/antelope`), one directory per release, each
//! named by its version (`5.4`, `5.2-64p`, `5.5pre`, ...).
//!
//! The central piece is the ordering of those version names (module
//! `version`). It is unusual in two ways:
//!
//! *   release suffixes order as `pre` < none < `post` = `p`;
//! *   the `-64` architecture suffix marks a *newer* build before 5.5, but
//!     an *older* one from 5.5 on, when releases became 64-bit only.
//!
//! Around this are a few helpers to inspect an installation: which versions
//! are installed (`Installation::versions`), which is the latest, where its
//! interpreters live (`getid`) and which optional components each version
//! has. `Facts::gather` collects all of these for reporting.
//!
//! Terminology:
//!
//! *   **epoch** — version 5.5, from which releases are 64-bit only
//! *   **completion marker** — the `setup.sh` file present in every fully
//!     installed version directory

// This should probably be enabled by default for libraries.
#![warn(missing_docs)]

#[macro_use]
extern crate log;
extern crate regex;
extern crate walkdir;
extern crate serde;
extern crate serde_json;

pub use discover::Installation;
pub use error::{Result, Error, VersionError, PathError};
pub use facts::{Facts, Kernel};
pub use getid::{getid, latest_interpreter, Interpreter};
pub use version::{Version, Release, compare, version_compare, sort_versions, latest_version};

pub mod discover;
pub mod error;
pub mod facts;
pub mod getid;
pub mod version;
