// irods-share-host/tests/shared_library.rs
//! Runs the plugin through the real dynamic-loading path: the cdylib built
//! for this test target, `plugin_factory` looked up by name, and operations
//! resolved from the library's exports.

use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;

use irods_share_common::{MicroserviceRegistry, STR_MS_T};
use irods_share_host::{call_operation, HostContext, PluginLibrary};
use irods_share_plugin::{GREETING, OPERATION_NAME};

/// The plugin cdylib cargo builds next to this test binary.
fn plugin_path() -> PathBuf {
    let exe = std::env::current_exe().expect("test binary path");
    let deps = exe.parent().expect("test binary directory");
    let file = libloading::library_filename("irods_share_plugin");

    [deps.join(&file), deps.join("..").join(&file)]
        .into_iter()
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| panic!("plugin library {:?} not found near {}", file, deps.display()))
}

#[test]
fn opens_the_built_plugin_and_reads_its_table() {
    let plugin = PluginLibrary::open(plugin_path()).unwrap();

    let summary = plugin.summary();
    assert_eq!(summary.table.num_args(), 1);
    assert_eq!(
        summary.table.operations().collect::<Vec<_>>(),
        vec![(OPERATION_NAME, OPERATION_NAME)]
    );
    assert_eq!(summary.library, plugin.path().display().to_string());
}

#[test]
fn calls_the_microservice_resolved_from_the_library() {
    let plugin = PluginLibrary::open(plugin_path()).unwrap();
    {
        let mut registry = MicroserviceRegistry::new();
        let added = registry.register_table(plugin.table(), &plugin).unwrap();
        assert_eq!(added, 1);

        let mut context = HostContext::default();
        let outcome = call_operation(&registry, OPERATION_NAME, &mut context).unwrap();

        assert_eq!(outcome.value.as_deref(), Some(GREETING));
        assert_eq!(outcome.type_name.as_deref(), Some(STR_MS_T));
    }
    // Registry gone first; dropping the plugin frees the table, then unloads.
    drop(plugin);
}

#[test]
fn loading_the_same_library_twice_gives_independent_tables() {
    let first = PluginLibrary::open(plugin_path()).unwrap();
    let second = PluginLibrary::open(plugin_path()).unwrap();

    assert_eq!(first.table(), second.table());
    assert!(!std::ptr::eq(first.table(), second.table()));
}

fn run_host(args: &[&str]) -> (Value, String) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.json");
    let plugin = plugin_path();

    let output = Command::new(env!("CARGO_BIN_EXE_irods-share-host"))
        .arg("--config")
        .arg(&config)
        .arg("--plugin")
        .arg(&plugin)
        .args(args)
        .env("RUST_LOG", "info")
        .output()
        .unwrap();
    assert!(output.status.success(), "host exited with {}", output.status);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {stdout}"));
    (json, String::from_utf8_lossy(&output.stderr).into_owned())
}

#[test]
fn json_call_output_is_only_json() {
    let (json, logs) = run_host(&["--json", "call"]);

    assert_eq!(json["operation"], OPERATION_NAME);
    assert_eq!(json["type"], STR_MS_T);
    assert_eq!(json["value"], GREETING);
    // Logging still happens, just not on stdout.
    assert!(logs.contains("Loading plugin library"), "stderr was: {logs}");
    assert!(logs.contains("Host config: defaults"), "stderr was: {logs}");
}

#[test]
fn json_list_output_is_only_json() {
    let (json, _) = run_host(&["--json", "list"]);

    assert_eq!(json["table"]["num_args"], 1);
    assert_eq!(json["table"]["operations"][OPERATION_NAME], OPERATION_NAME);
}
