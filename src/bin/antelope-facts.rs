/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Command-line UI for the Antelope library: prints the facts of the local
//! installation, or compares and sorts version strings.

extern crate antelope;
extern crate docopt;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate serde;
extern crate serde_json;

use std::process::exit;

use docopt::Docopt;
use serde::Deserialize;

use antelope::{Installation, Facts, Kernel, Result, version_compare, sort_versions};

const USAGE: &'static str = "
Antelope facts. Reports which versions of BRTT Antelope are installed and
related details, as a JSON object suitable for an external fact source.
Can also compare and sort Antelope version strings.

Usage:
  antelope-facts [-h] [-b DIR]
  antelope-facts [-h] compare OLD NEW
  antelope-facts [-h] sort VERSION...
  antelope-facts --help | --version

Options:
  -b --basedir DIR      Antelope installation directory. Defaults to
                        $ANTELOPE_BASEDIR, or /opt/antelope if unset.

  -h --help             Show this message.
  --version             Show version.

Commands:
  compare               Print -1, 0 or 1 as OLD is older than, the same as or
                        newer than NEW.
  sort                  Print the versions one per line, oldest first.
";

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]        // names are mandated by docopt
struct Args {
    cmd_compare: bool,
    cmd_sort: bool,
    arg_OLD: Option<String>,
    arg_NEW: Option<String>,
    arg_VERSION: Vec<String>,
    flag_basedir: Option<String>,
    flag_help: bool,
    flag_version: bool,
}

#[derive(Debug)]
enum Operation {
    Compare(String, String),
    Sort(Vec<String>),
    /// Default operation: print the facts
    Facts(Option<String>),
}

fn main() {
    env_logger::init();

    let args: Args = Docopt::new(USAGE)
                            .and_then(|dopt| dopt.deserialize())
                            .unwrap_or_else(|e| e.exit());

    if args.flag_help {
        println!("{}", USAGE);
        return;
    } else if args.flag_version {
        println!("antelope-facts version: {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Rely on docopt to spot invalid combinations
    let op = if args.cmd_compare {
        match (args.arg_OLD, args.arg_NEW) {
            (Some(a), Some(b)) => Operation::Compare(a, b),
            _ => {
                println!("{}", USAGE);
                exit(1);
            }
        }
    } else if args.cmd_sort {
        Operation::Sort(args.arg_VERSION)
    } else {
        Operation::Facts(args.flag_basedir)
    };

    match run(op) {
        Ok(()) => {},
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn run(op: Operation) -> Result<()> {
    match op {
        Operation::Compare(a, b) => {
            println!("{}", version_compare(&a, &b)?);
        },
        Operation::Sort(versions) => {
            for v in sort_versions(versions)? {
                println!("{}", v);
            }
        },
        Operation::Facts(basedir) => {
            let inst = match basedir {
                Some(dir) => Installation::new(dir),
                None => Installation::from_env()?,
            };
            info!("Gathering facts for: {}", inst.basedir().display());
            let facts = Facts::gather(&inst, Kernel::current())?;
            println!("{}", serde_json::to_string_pretty(&facts)?);
        },
    }
    Ok(())
}
