use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::ffi::OsStr;

/// The binary with an empty environment, so stray variables on the host cannot
/// leak into the loaded configuration.
pub fn layerconf() -> Command {
    let mut cmd = cargo_bin_cmd!("layerconf");
    cmd.env_clear();
    cmd
}

pub fn run_json<I, S>(mut cmd: Command, args: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    cmd.args(args);
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("json")
}
