//! Property tests for path confinement
//!
//! Whatever string a model sends, resolution either lands inside the
//! administered root or fails with `OutsideRoot`.

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use tempfile::TempDir;

use fsadmin::sandbox::{AdministeredRoot, PathSandbox};
use fsadmin::tools::ToolError;

/// `<temp>/admin` as the root, with a look-alike sibling, a nested
/// same-name directory and (on unix) a symlink pointing outside
fn fixture() -> (TempDir, PathSandbox) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = temp.path().join("admin");
    fs::create_dir_all(root.join("sub/admin")).unwrap();
    fs::create_dir_all(temp.path().join("admin_evil")).unwrap();
    fs::write(root.join("notes.txt"), "0123456789").unwrap();
    fs::write(temp.path().join("admin_evil/secret.txt"), "s").unwrap();

    #[cfg(unix)]
    std::os::unix::fs::symlink(temp.path().join("admin_evil"), root.join("link")).unwrap();

    let sandbox = PathSandbox::new(AdministeredRoot::new(&root).unwrap());
    (temp, sandbox)
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("..".to_string()),
        Just(".".to_string()),
        Just("admin".to_string()),
        Just("ADMIN".to_string()),
        Just("admin_evil".to_string()),
        Just("sub".to_string()),
        Just("link".to_string()),
        Just("notes.txt".to_string()),
        Just("etc".to_string()),
        "[a-z]{1,6}",
    ]
}

fn candidate(parent: String) -> impl Strategy<Value = String> {
    let prefix = prop_oneof![
        Just(String::new()),
        Just("/".to_string()),
        Just(format!("{}/", parent)),
        Just("/home/someone/".to_string()),
    ];
    (prefix, prop::collection::vec(segment(), 0..8)).prop_map(|(prefix, parts)| format!("{}{}", prefix, parts.join("/")))
}

#[test]
fn test_resolution_never_leaves_root() {
    let (temp, sandbox) = fixture();
    let parent = temp.path().canonicalize().unwrap().display().to_string();
    let root: PathBuf = sandbox.root().path().to_path_buf();

    let mut runner = TestRunner::new(Config::with_cases(512));
    runner
        .run(&candidate(parent), |input| {
            match sandbox.resolve(&input) {
                Ok(resolved) => {
                    prop_assert!(
                        resolved.as_path().starts_with(&root),
                        "{:?} resolved outside the root to {:?}",
                        input,
                        resolved
                    );
                    // Anything that exists must be canonical, so no symlink survives
                    if let Ok(real) = resolved.as_path().canonicalize() {
                        prop_assert!(real.starts_with(&root), "{:?} reaches {:?} through a link", input, real);
                    }
                }
                Err(ToolError::OutsideRoot { .. }) => {}
                Err(other) => {
                    return Err(TestCaseError::fail(format!("unexpected error for {:?}: {}", input, other)));
                }
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_display_form_resolves_to_same_path() {
    let (temp, sandbox) = fixture();
    let parent = temp.path().canonicalize().unwrap().display().to_string();

    let mut runner = TestRunner::new(Config::with_cases(256));
    runner
        .run(&candidate(parent), |input| {
            if let Ok(resolved) = sandbox.resolve(&input) {
                let shown = sandbox.display(&resolved);
                prop_assert!(!shown.starts_with('/'), "display form {:?} is absolute", shown);
                let again = sandbox.resolve(&shown).unwrap();
                prop_assert_eq!(again, resolved);
            }
            Ok(())
        })
        .unwrap();
}

proptest! {
    #[test]
    fn test_plain_relative_names_stay_put(name in "[a-z]{1,10}(\\.[a-z]{1,3})?") {
        prop_assume!(name != "link");
        let (_temp, sandbox) = fixture();
        let resolved = sandbox.resolve(&name).unwrap();
        prop_assert_eq!(resolved.as_path(), sandbox.root().path().join(&name));
        prop_assert_eq!(sandbox.display(&resolved), name);
    }
}
