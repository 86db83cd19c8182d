use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use super::env::Env;
use super::sources::load_tree;
use super::walker::{Configurable, Walker};
use crate::cli::{bind_args, program_name, render_help};
use crate::error::{AppError, ErrorKind};

/// Controls where a load reads from and where help goes.
#[derive(Default)]
pub struct LoadOptions<'w> {
    /// Command-line arguments without the program name. `None` reads the process arguments.
    pub args: Option<Vec<String>>,
    /// Config files in increasing priority. Empty skips file loading.
    pub json_files: Vec<PathBuf>,
    /// Help output sink. `None` writes to stderr.
    pub writer: Option<&'w mut dyn Write>,
    /// Environment snapshot. `None` snapshots the process environment.
    pub env: Option<Env>,
    /// Name shown in the usage line. `None` uses the executable's basename.
    pub program_name: Option<String>,
}

/// Populates `record` from config files, then environment variables, then
/// command-line flags, each layer overriding the one before.
///
/// Returns `Ok(false)` when `--help` was given: usage has been written and the
/// caller should stop. Sources that are missing or hold values of the wrong
/// type are skipped. Errors are reserved for records where two fields derive
/// the same key or a field name cannot form a flag, and for failing to write
/// help.
pub fn load<C: Configurable + ?Sized>(record: &mut C, options: LoadOptions<'_>) -> Result<bool> {
    let tree = load_tree(&options.json_files);
    let env = options.env.unwrap_or_else(Env::from_process);

    let mut walker = Walker::new(&tree, &env);
    record.visit(&mut walker);
    let mut registry = walker.finish()?;

    let args = options.args.unwrap_or_else(|| {
        std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    });
    tracing::debug!(
        files = options.json_files.len(),
        flags = registry.len(),
        args = args.len(),
        "applying command-line overrides"
    );

    if !bind_args(&mut registry, &args) {
        return Ok(true);
    }

    let program = options.program_name.unwrap_or_else(program_name);
    let written = match options.writer {
        Some(out) => render_help(out, &program, &registry),
        None => render_help(&mut io::stderr(), &program, &registry),
    };
    written.map_err(|err| AppError::new(ErrorKind::Io, format!("Failed to write help: {}", err)))?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Debug, Default)]
    struct SubStruct {
        sub_member: i32,
    }

    impl Configurable for SubStruct {
        fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
            walker.field_with_help("SubMember", "description", &mut self.sub_member);
        }
    }

    #[derive(Debug, Default)]
    struct Record {
        member: Option<SubStruct>,
    }

    impl Configurable for Record {
        fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
            walker.nested("Member", &mut self.member);
        }
    }

    fn record() -> Record {
        Record {
            member: Some(SubStruct { sub_member: 0 }),
        }
    }

    fn value(record: &Record) -> i32 {
        record.member.as_ref().map(|m| m.sub_member).unwrap_or(-1)
    }

    #[test]
    fn layers_stack_in_priority_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join("config.json");
        fs::write(&file, r#"{"member": {"sub_member": 1}}"#).expect("write config");
        let env = Env::from_pairs(&[("MEMBER_SUB_MEMBER", "2")]);
        let cli = vec!["--member-sub-member".to_string(), "3".to_string()];

        let cases = [
            (Some(file.clone()), Some(env.clone()), cli.clone(), 3),
            (Some(file.clone()), Some(env.clone()), Vec::new(), 2),
            (Some(file.clone()), None, Vec::new(), 1),
            (None, None, Vec::new(), 0),
        ];

        for (file, env, args, expected) in cases {
            let mut target = record();
            let options = LoadOptions {
                args: Some(args),
                json_files: file.into_iter().collect(),
                env: Some(env.unwrap_or_default()),
                ..LoadOptions::default()
            };
            assert!(load(&mut target, options).expect("load"));
            assert_eq!(value(&target), expected);
        }
    }

    #[test]
    fn help_writes_usage_and_stops() {
        let mut target = record();
        let mut out = Vec::new();
        let options = LoadOptions {
            args: Some(vec!["--help".to_string()]),
            writer: Some(&mut out),
            env: Some(Env::default()),
            program_name: Some("demo".to_string()),
            ..LoadOptions::default()
        };

        let proceed = load(&mut target, options).expect("load");

        assert!(!proceed);
        assert_eq!(value(&target), 0);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Usage: demo"), "{}", text);
        assert!(text.contains("--member-sub-member"), "{}", text);
        assert!(text.contains("description"), "{}", text);
    }

    #[test]
    fn unusable_field_names_are_rejected_before_help() {
        #[derive(Default)]
        struct Hidden {
            private: i32,
        }

        impl Configurable for Hidden {
            fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
                walker.field("_private", &mut self.private);
            }
        }

        let mut target = Hidden::default();
        let mut out = Vec::new();
        let options = LoadOptions {
            args: Some(vec!["--help".to_string()]),
            writer: Some(&mut out),
            env: Some(Env::default()),
            ..LoadOptions::default()
        };
        let err = load(&mut target, options).expect_err("unusable name");
        assert_eq!(crate::error::classify_error(&err), ErrorKind::Config);
        assert!(err.to_string().contains("---private"));
        assert!(out.is_empty());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        #[derive(Default)]
        struct Clash {
            member_sub_member: i32,
            member: SubStruct,
        }

        impl Configurable for Clash {
            fn visit<'a>(&'a mut self, walker: &mut Walker<'a, '_>) {
                walker.field("MemberSubMember", &mut self.member_sub_member);
                walker.nested("Member", &mut self.member);
            }
        }

        let mut target = Clash::default();
        let options = LoadOptions {
            args: Some(Vec::new()),
            env: Some(Env::default()),
            ..LoadOptions::default()
        };
        let err = load(&mut target, options).expect_err("duplicate keys");
        assert_eq!(crate::error::classify_error(&err), ErrorKind::Config);
        assert!(err.to_string().contains("--member-sub-member"));
    }
}
