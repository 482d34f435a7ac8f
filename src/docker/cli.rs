//! Container runtime command execution.
//!
//! Runs runtime commands and decodes their JSON output while the process is
//! still writing it.

use colored::Colorize;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::error::PoolError;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Split a command string on spaces, preserving quoted substrings.
///
/// Lets the runtime command be configured as e.g. `sudo docker` or
/// `ssh 'build host' docker`. Empty tokens are dropped.
pub fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Run `program` with `args` and decode its stdout as JSON into `T`.
///
/// The stdout stream is drained to EOF and decoded by a separate task that
/// runs concurrently with the process. The caller waits for the process to
/// exit first and only then joins the decode outcome; waiting for the
/// process without a concurrent reader can deadlock on the OS pipe buffer
/// once the output outgrows it. Stderr passes straight through.
///
/// # Returns
/// * `Ok(T)` - The decoded stdout on success
/// * `Err(PoolError::Process)` - If the process could not be run
/// * `Err(PoolError::ProcessFailed)` - If it exited with a failure status
/// * `Err(PoolError::Decode)` - If stdout was not valid JSON for `T`
pub async fn run_json<T>(program: &str, args: &[&str]) -> Result<T, PoolError>
where
    T: DeserializeOwned + Send + 'static,
{
    let command_line = format!("{} {}", program, args.join(" "));
    log::debug!("run({cmd})", cmd = command_line.on_blue());

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| PoolError::Process {
            command: command_line.clone(),
            source: e,
        })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| PoolError::ReaderTask("child stdout was not captured".to_string()))?;

    let decode_command = command_line.clone();
    let decoder = tokio::spawn(async move {
        let mut raw = Vec::new();
        stdout
            .read_to_end(&mut raw)
            .await
            .map_err(|e| PoolError::ReaderTask(format!("reading stdout: {e}")))?;
        log::debug!("drained {} bytes of output", raw.len());

        let mut deserializer = serde_json::Deserializer::from_slice(&raw);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| PoolError::Decode {
            command: decode_command,
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    });

    // Process first, decode second. The decoder keeps consuming while we
    // wait here, so the child never stalls on a full pipe.
    let status = child.wait().await.map_err(|e| PoolError::Process {
        command: command_line.clone(),
        source: e,
    })?;

    let decoded = decoder
        .await
        .map_err(|e| PoolError::ReaderTask(e.to_string()))?;

    if !status.success() {
        log::warn!(
            "{failed} to run {cmd}: {status}",
            failed = "failed".on_red(),
            cmd = command_line.on_blue()
        );
        return Err(PoolError::ProcessFailed {
            command: command_line,
            status,
        });
    }

    log::debug!("Success cmd: {command_line}");
    decoded
}
