use std::io::{self, Write};
use std::path::Path;

use clap::{Arg, ArgAction, Command};

use super::binder::{FlagRegistry, HELP_FLAG};

/// Writes usage text for every bound flag, with each flag's description.
pub(crate) fn render_help(out: &mut dyn Write, program: &str, registry: &FlagRegistry<'_>) -> io::Result<()> {
    let mut cmd = Command::new(program.to_string())
        .disable_help_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::Help)
                .help("Print help"),
        );

    for entry in registry.entries() {
        if entry.flag == HELP_FLAG {
            continue;
        }
        let Some(long) = entry.flag.strip_prefix("--") else {
            continue;
        };
        let mut arg = Arg::new(long.to_string()).long(long.to_string());
        arg = if entry.switch {
            arg.action(ArgAction::SetTrue)
        } else {
            arg.action(ArgAction::Set).value_name("VALUE")
        };
        if let Some(help) = entry.help {
            arg = arg.help(help.to_string());
        }
        cmd = cmd.arg(arg);
    }

    write!(out, "{}", cmd.render_help())?;
    out.flush()
}

/// Basename of the running executable.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
