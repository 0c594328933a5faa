//! The two escaping regimes used when rendering a command line.
//!
//! Option values and path operands are escaped differently and the two
//! functions are never swapped: option values are wrapped in double quotes
//! when they need protection, while paths get a backslash in front of each
//! special character and no surrounding quotes.

use std::borrow::Cow;

use options::HostPlatform;

/// Characters that force an option value to be quoted.
const OPTION_TRIGGERS: &[char] = &['"', '\'', '`', '\\', '$', ' '];

/// Characters backslash-escaped inside a quoted option value.
const OPTION_ESCAPED: &[char] = &['"', '\'', '`', '\\', '$'];

/// Characters backslash-escaped in a path, in addition to whitespace.
const PATH_ESCAPED: &[char] = &['"', '\'', '`', '\\', '$', '(', ')'];

/// Escapes an option value for the shell.
///
/// Values without quotes, backticks, backslashes, dollars or spaces are
/// returned as-is. Anything else is wrapped in double quotes with each quote,
/// backtick, backslash and dollar backslash-escaped.
#[must_use]
pub fn escape_option_value(value: &str) -> Cow<'_, str> {
    if !value.contains(OPTION_TRIGGERS) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        if OPTION_ESCAPED.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    Cow::Owned(escaped)
}

/// Escapes a path operand or filter pattern for the shell.
///
/// Every quote, backtick, backslash, dollar, parenthesis and whitespace
/// character gets its own leading backslash. On Windows hosts a path that
/// arrived with backslash separators is then turned into the POSIX form the
/// bundled shell expects: `C:\home\user` becomes `/home/user`.
#[must_use]
pub fn escape_path(path: &str, platform: HostPlatform) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if PATH_ESCAPED.contains(&ch) || ch.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    if platform.is_windows() && escaped.contains("\\\\") {
        return posix_from_windows(&escaped);
    }
    escaped
}

/// Rewrites escaped backslash separators to `/` and drops a drive prefix.
fn posix_from_windows(escaped: &str) -> String {
    let slashed = escaped.replace("\\\\", "/");
    match strip_drive_prefix(&slashed) {
        Some(rest) => format!("/{rest}"),
        None => slashed,
    }
}

/// Returns the text following a leading `X:/` (optionally preceded by `"`).
fn strip_drive_prefix(path: &str) -> Option<&str> {
    let path = path.strip_prefix('"').unwrap_or(path);
    let mut chars = path.chars();
    let drive = chars.next()?;
    if !drive.is_ascii_alphabetic() {
        return None;
    }
    chars.as_str().strip_prefix(":/")
}
