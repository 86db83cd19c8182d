use std::sync::LazyLock;

use regex::Regex;

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Converts a field identifier into its canonical snake_case segment.
///
/// `SubMember` becomes `sub_member`, `HTTPServer` becomes `http_server` and
/// `ServerV2Port` becomes `server_v2_port`. Identifiers that are already
/// snake_case come back unchanged.
pub fn derive_key(identifier: &str) -> String {
    let spaced = WORD_BOUNDARY.replace_all(identifier, "${1}_${2}");
    let spaced = ACRONYM_BOUNDARY.replace_all(&spaced, "${1}_${2}");
    spaced.to_lowercase()
}

/// Environment variable name for a field path: `["member", "sub_member"]` → `MEMBER_SUB_MEMBER`.
pub fn env_var_name<S: AsRef<str>>(path: &[S]) -> String {
    join(path, "_").to_uppercase()
}

/// Long flag for a field path: `["member", "sub_member"]` → `--member-sub-member`.
pub fn flag_name<S: AsRef<str>>(path: &[S]) -> String {
    format!("--{}", join(path, "-").replace('_', "-"))
}

/// Whether `flag` is `--` followed by a name that starts with a letter or digit
/// and holds only letters, digits and `-`.
pub fn is_usable_flag(flag: &str) -> bool {
    let Some(long) = flag.strip_prefix("--") else {
        return false;
    };
    long.starts_with(|c: char| c.is_alphanumeric())
        && long.chars().all(|c| c.is_alphanumeric() || c == '-')
}

fn join<S: AsRef<str>>(path: &[S], sep: &str) -> String {
    path.iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<_>>()
        .join(sep)
}
