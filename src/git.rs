//! Thin wrappers around the system `git` binary.
//!
//! Every function here runs exactly one `git` subcommand inside a working
//! directory and maps a non-zero exit into [`Error::GitCommand`]. Arguments
//! are handed to the child process as an argv vector, never through a shell,
//! so names containing whitespace or shell metacharacters reach `git` as a
//! single literal argument. Values that come from a manifest or the host
//! descriptor (URLs, refs, tag names) always follow `--end-of-options` (or
//! `--` for `clone`), so a value starting with `-` is never read as a flag.
//! [`display_command`] renders the same argv with quoting for logs and error
//! messages.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Separates options from values taken from user documents.
const END_OF_OPTIONS: &str = "--end-of-options";

/// One entry of `git status --porcelain -z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitChange {
    /// Two-letter status code with padding removed (`M`, `??`, `R`, `AM`...).
    pub status: String,
    pub path: String,
    /// Source path of a rename or copy.
    pub original_path: Option<String>,
}

impl fmt::Display for GitChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.original_path {
            Some(original) => write!(f, "{} {} -> {}", self.status, original, self.path),
            None => write!(f, "{} {}", self.status, self.path),
        }
    }
}

/// Parses the NUL-separated output of `git status --porcelain -z`.
///
/// Each entry is `XY PATH`; paths are verbatim, never quoted. A rename or
/// copy is followed by one more field holding the source path.
pub fn parse_porcelain(output: &str) -> Vec<GitChange> {
    let mut fields = output.split('\0');
    let mut changes = Vec::new();

    while let Some(entry) = fields.next() {
        let (Some(code), Some(path)) = (entry.get(..2), entry.get(3..)) else {
            continue;
        };
        if path.is_empty() {
            continue;
        }
        let original_path = if code.contains(['R', 'C']) {
            fields.next().map(str::to_string)
        } else {
            None
        };
        changes.push(GitChange {
            status: code.trim().to_string(),
            path: path.to_string(),
            original_path,
        });
    }

    changes
}

fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || arg.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '\'' | '"' | '\\' | '$' | '`' | ';' | '&' | '|' | '<' | '>' | '(' | ')' | '*'
                        | '?' | '!' | '#' | '~'
                )
        })
}

/// Quotes an argument for display using POSIX single-quote rules.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if needs_quoting(arg) {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    } else {
        Cow::Borrowed(arg)
    }
}

/// Renders `git <command> <args...>` with every argument quoted as needed.
pub fn display_command(command: &str, args: &[String]) -> String {
    let mut line = format!("git {}", quote_arg(command));
    for arg in args {
        line.push(' ');
        line.push_str(&quote_arg(arg));
    }
    line
}

fn command_error(line: String, dir: &Path, stderr: String) -> Error {
    Error::GitCommand {
        command: line,
        dir: dir.to_path_buf(),
        stderr,
    }
}

/// Runs `git <command> <args...>` in `dir`, capturing its output.
///
/// Returns stdout on success.
fn run(dir: &Path, command: &str, args: &[String]) -> Result<String> {
    let line = display_command(command, args);
    debug!("{} (in {})", line, dir.display());

    let output = Command::new("git")
        .arg(command)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| command_error(line.clone(), dir, e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        return Err(command_error(line, dir, stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs `git <command> <args...>` in `dir` with the terminal attached, so
/// interactive and paged commands behave as if typed directly.
pub fn run_inherited(dir: &Path, command: &str, args: &[String]) -> Result<()> {
    let line = display_command(command, args);
    debug!("{} (in {})", line, dir.display());

    let status = Command::new("git")
        .arg(command)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| command_error(line.clone(), dir, e.to_string()))?;

    if !status.success() {
        return Err(command_error(line, dir, format!("exited with {}", status)));
    }
    Ok(())
}

/// Builds an argv: `flags` (with `--quiet` when asked), `separator`, `values`.
fn argv(flags: &[&str], quiet: bool, separator: &str, values: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = flags.iter().map(|flag| flag.to_string()).collect();
    if quiet {
        args.push("--quiet".to_string());
    }
    args.push(separator.to_string());
    args.extend(values.iter().map(|value| value.to_string()));
    args
}

fn clone_args(url: &str, dest: &str, no_checkout: bool) -> Vec<String> {
    let flags: &[&str] = if no_checkout { &["--no-checkout"] } else { &[] };
    argv(flags, false, "--", &[url, dest])
}

/// Clone `url` into `dest` (relative to `dir`).
///
/// This uses the system git command, so SSH keys, credential helpers and
/// anything else configured in `~/.gitconfig` apply.
pub fn clone_repo(dir: &Path, url: &str, dest: &Path, no_checkout: bool) -> Result<()> {
    let dest = dest.to_string_lossy();
    run(dir, "clone", &clone_args(url, &dest, no_checkout)).map(drop)
}

fn checkout_args(reference: &str, quiet: bool) -> Vec<String> {
    argv(&[], quiet, END_OF_OPTIONS, &[reference])
}

pub fn checkout(dir: &Path, reference: &str, quiet: bool) -> Result<()> {
    run(dir, "checkout", &checkout_args(reference, quiet)).map(drop)
}

/// Fetch from every configured remote, not only `origin`.
pub fn fetch_all(dir: &Path, quiet: bool) -> Result<()> {
    let mut args = vec!["--all".to_string()];
    if quiet {
        args.push("--quiet".to_string());
    }
    run(dir, "fetch", &args).map(drop)
}

pub fn fetch(dir: &Path, remote: &str, quiet: bool) -> Result<()> {
    run(dir, "fetch", &argv(&[], quiet, END_OF_OPTIONS, &[remote])).map(drop)
}

/// Flags accepted by [`pull`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullOptions {
    /// Refuse anything but a fast-forward (`--ff-only`).
    pub fast_forward_only: bool,
    /// Never rebase local commits (`--no-rebase`).
    pub no_rebase: bool,
    pub quiet: bool,
}

fn pull_args(remote: &str, branch: &str, options: PullOptions) -> Vec<String> {
    let mut flags = Vec::new();
    if options.fast_forward_only {
        flags.push("--ff-only");
    }
    if options.no_rebase {
        flags.push("--no-rebase");
    }
    argv(&flags, options.quiet, END_OF_OPTIONS, &[remote, branch])
}

pub fn pull(dir: &Path, remote: &str, branch: &str, options: PullOptions) -> Result<()> {
    run(dir, "pull", &pull_args(remote, branch, options)).map(drop)
}

fn tag_args(name: &str) -> Vec<String> {
    argv(&[], false, END_OF_OPTIONS, &[name])
}

/// Create a lightweight tag at `HEAD`. Fails if the tag already exists.
pub fn tag(dir: &Path, name: &str) -> Result<()> {
    run(dir, "tag", &tag_args(name)).map(drop)
}

fn push_tag_args(name: &str, remote: &str, quiet: bool) -> Vec<String> {
    argv(&[], quiet, END_OF_OPTIONS, &[remote, "tag", name])
}

pub fn push_tag(dir: &Path, name: &str, remote: &str, quiet: bool) -> Result<()> {
    run(dir, "push", &push_tag_args(name, remote, quiet)).map(drop)
}

fn delete_tag_args(name: &str) -> Vec<String> {
    argv(&["--delete"], false, END_OF_OPTIONS, &[name])
}

pub fn delete_tag(dir: &Path, name: &str) -> Result<()> {
    run(dir, "tag", &delete_tag_args(name)).map(drop)
}

fn push_delete_tag_args(name: &str, remote: &str, quiet: bool) -> Vec<String> {
    argv(&["--delete"], quiet, END_OF_OPTIONS, &[remote, "tag", name])
}

pub fn push_delete_tag(dir: &Path, name: &str, remote: &str, quiet: bool) -> Result<()> {
    run(dir, "push", &push_delete_tag_args(name, remote, quiet)).map(drop)
}

/// Working tree changes as reported by `git status --porcelain -z`.
pub fn status(dir: &Path) -> Result<Vec<GitChange>> {
    let output = run(dir, "status", &["--porcelain".to_string(), "-z".to_string()])?;
    Ok(parse_porcelain(&output))
}

/// Whether `dir` lies anywhere inside a git working tree.
///
/// A directory outside any repository is `false`; other failures are errors.
pub fn is_inside_work_tree(dir: &Path) -> Result<bool> {
    match run(dir, "rev-parse", &["--is-inside-work-tree".to_string()]) {
        Ok(output) => Ok(output.trim() == "true"),
        Err(Error::GitCommand { stderr, .. }) if stderr.contains("not a git repository") => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
