/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Test discovery and facts against temporary installation trees
#![cfg(unix)]

extern crate antelope;
extern crate mktemp;
extern crate env_logger;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use mktemp::Temp;

use antelope::{Installation, Facts, Kernel, Interpreter, Error, getid, latest_interpreter};

// —————  Library of utility functions  —————

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mk_temp_dir() -> (Temp, PathBuf) {
    let tmp = Temp::new_dir().expect("new temp dir");
    let path = tmp.to_path_buf();
    (tmp, path)
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create_dir_all");
    fs::write(path, b"").expect("write");
}

/// Create a version directory, with or without the completion marker.
fn add_version(root: &Path, name: &str, complete: bool) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("create_dir_all");
    if complete {
        touch(&dir.join("setup.sh"));
    }
}

fn add_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create_dir_all");
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod");
}

/// A typical installation: a few complete versions, one incomplete one and
/// some unrelated entries.
fn sample_installation() -> (Temp, Installation) {
    let (tmp, root) = mk_temp_dir();
    for v in &["5.5", "5.4-64", "5.3", "5.5pre", "5.4"] {
        add_version(&root, v, true);
    }
    add_version(&root, "5.6", false);            // no setup.sh
    add_version(&root, "5.4.bak", true);         // not a version
    add_version(&root, "local", true);
    touch(&root.join("5.2"));                   // a file, not a directory
    touch(&root.join("5.3/contrib/bin/placeholder"));
    touch(&root.join("5.5/contrib/bin/placeholder"));
    touch(&root.join("5.4/contrib/README"));     // contrib without bin
    touch(&root.join("5.5pre/bin/ald_proxy"));
    touch(&root.join("5.5/bin/ald_proxy"));
    (tmp, Installation::new(root))
}


// —————  Tests  —————

#[test]
fn versions_sorted_and_filtered() {
    init_log();
    let (_tmp, inst) = sample_installation();
    assert_eq!(inst.versions().unwrap(), vec!["5.3", "5.4", "5.4-64", "5.5pre", "5.5"]);
    assert_eq!(inst.latest_version().unwrap(), Some("5.5".to_string()));
}

#[test]
fn empty_installation() {
    let (_tmp, root) = mk_temp_dir();
    let inst = Installation::new(root);
    assert!(inst.exists());
    assert!(inst.versions().unwrap().is_empty());
    assert_eq!(inst.latest_version().unwrap(), None);
    assert!(inst.contrib_basedirs().unwrap().is_empty());
}

#[test]
fn contrib_basedirs() {
    let (_tmp, inst) = sample_installation();
    let expected: Vec<(String, &str)> = vec![
        ("5.3".into(), "/contrib"),
        ("5.4".into(), ""),
        ("5.4-64".into(), ""),
        ("5.5pre".into(), ""),
        ("5.5".into(), "/contrib"),
    ];
    assert_eq!(inst.contrib_basedirs().unwrap(), expected);
}

#[test]
fn aldproxy() {
    let (_tmp, inst) = sample_installation();
    assert!(inst.supports_aldproxy("5.5"));
    assert!(!inst.supports_aldproxy("5.4"));
    let support = inst.aldproxy_support().unwrap();
    assert_eq!(support.len(), 5);
    assert_eq!(support[0], ("5.3".to_string(), false));
    assert_eq!(support[3], ("5.5pre".to_string(), true));
    assert_eq!(inst.versions_supporting_aldproxy().unwrap(), vec!["5.5pre", "5.5"]);
}

#[test]
fn latest_perl() {
    let (_tmp, root) = mk_temp_dir();
    touch(&root.join("perl5.8/bin/perl"));
    touch(&root.join("perl5.16-64/bin/perl"));
    touch(&root.join("perl5.18/README"));         // no bin/perl
    touch(&root.join("perlish/bin/perl"));
    let inst = Installation::new(root);
    // file-name order, as the directory listing gives it
    assert_eq!(inst.latest_perl().unwrap(), Some("perl5.8".to_string()));
}

#[test]
fn getid_and_facts_with_stub() {
    init_log();
    let (_tmp, inst) = sample_installation();
    // Echo back the environment and id so we can see what getid received
    add_script(&inst.version_dir("5.5").join("bin/getid"),
        "if [ \"$1\" = python ]; then exit 0; fi\necho \"$ANTELOPE/local/bin/$1\"");
    add_script(&inst.version_dir("5.4").join("bin/getid"), "echo oops >&2; exit 3");

    let expected = format!("{}/local/bin/perl", inst.version_dir("5.5").display());
    assert_eq!(getid(&inst, "5.5", "perl").unwrap(), Some(expected.clone()));
    assert_eq!(getid(&inst, "5.5", "python").unwrap(), None);
    match getid(&inst, "5.4", "perl") {
        Err(Error::CmdFailed(msg)) => assert!(msg.contains("status 3"), "{}", msg),
        r => panic!("unexpected: {:?}", r),
    }
    match getid(&inst, "5.3", "perl") {
        Err(Error::Path(_)) => {},
        r => panic!("unexpected: {:?}", r),
    }
    assert_eq!(latest_interpreter(&inst, Interpreter::Perl).unwrap(), Some(expected.clone()));

    let facts = Facts::gather(&inst, Kernel::Linux).unwrap();
    assert_eq!(facts.antelope_versions, Some("5.3,5.4,5.4-64,5.5pre,5.5".to_string()));
    assert_eq!(facts.antelope_latest_version, Some("5.5".to_string()));
    assert_eq!(facts.antelope_latest_perl, Some(expected));
    assert_eq!(facts.antelope_latest_python, None);
    assert_eq!(facts.antelope_versions_supports_aldproxy, Some("5.5pre,5.5".to_string()));
}

#[test]
fn facts_gather() {
    let (_tmp, inst) = sample_installation();
    let facts = Facts::gather(&inst, Kernel::Darwin).unwrap();
    assert_eq!(facts.antelope_versions_array.as_ref().map(|v| v.len()), Some(5));
    // no getid installed: those facts are simply missing
    assert_eq!(facts.antelope_latest_perl, None);
    let contrib = facts.antelope_contrib_basedir.as_ref().unwrap();
    assert_eq!(contrib["5.3"], "/contrib");
    assert_eq!(contrib["5.4-64"], "");
    let ald = facts.antelope_supports_aldproxy.as_ref().unwrap();
    assert_eq!(ald["5.5"], true);
    assert_eq!(ald["5.4"], false);
    assert_eq!(facts.antelope_versions_supports_aldproxy_array,
        Some(vec!["5.5pre".to_string(), "5.5".to_string()]));
}

#[test]
fn facts_kernel_confinement() {
    let (_tmp, inst) = sample_installation();
    let facts = Facts::gather(&inst, Kernel::SunOS).unwrap();
    assert!(facts.antelope_versions.is_some());
    assert_eq!(facts.antelope_supports_aldproxy, None);
    assert_eq!(facts.antelope_versions_supports_aldproxy, None);
    assert_eq!(facts.antelope_versions_supports_aldproxy_array, None);

    let facts = Facts::gather(&inst, Kernel::Other).unwrap();
    assert_eq!(facts, Facts::default());
}
