use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use owo_colors::OwoColorize;

use layerconf::error;
use layerconf::{Env, LoadOptions};

mod settings;

use settings::ServiceSettings;

/// Path list of config files, lowest priority first.
const CONFIG_FILES_VAR: &str = "LAYERCONF_CONFIG";

fn main() {
    if let Err(err) = run() {
        let kind = error::classify_error(&err);
        print_error(kind.as_str(), &format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_logging();

    let env = Env::from_system(None);
    let json_files: Vec<PathBuf> = env
        .get_non_empty(CONFIG_FILES_VAR)
        .map(|paths| std::env::split_paths(paths).collect())
        .unwrap_or_default();

    let mut settings = ServiceSettings::default();
    let options = LoadOptions {
        json_files,
        env: Some(env),
        ..LoadOptions::default()
    };
    if !layerconf::load(&mut settings, options)? {
        return Ok(());
    }

    let body = serde_json::to_string_pretty(&settings)?;
    writeln!(io::stdout(), "{}", body)?;
    Ok(())
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

fn print_error(kind: &str, message: &str) {
    let line = format!("Error ({}): {}", kind, message);
    if should_color_stderr() {
        let _ = writeln!(io::stderr(), "{}", line.red());
    } else {
        let _ = writeln!(io::stderr(), "{}", line);
    }
}

fn should_color_stderr() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stderr().is_terminal()
}
