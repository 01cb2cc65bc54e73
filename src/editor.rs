use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("`{0}` command not found. Please ensure it is installed and in your PATH.")]
    CommandNotFound(String),
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Trims silent segments out of `input` by shelling out to auto-editor.
/// `margin` is forwarded verbatim (e.g. `0.04sec`).
pub fn remove_silence(input: &Path, margin: &str, output: &Path) -> Result<(), EditorError> {
    log::debug!(
        "removing silence from {} with margin {}",
        input.display(),
        margin
    );
    let mut command = Command::new("auto-editor");
    command
        .arg(input)
        .arg("--margin")
        .arg(margin)
        .arg("-o")
        .arg(output);
    run_checked(command, "auto-editor")
}

/// Extracts the audio track of `input` and writes it as MP3 to `output`.
pub fn reencode_to_mp3(input: &Path, output: &Path) -> Result<(), EditorError> {
    log::debug!("re-encoding {} to mp3", input.display());
    let mut command = Command::new("ffmpeg");
    command
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-vn", "-codec:a", "libmp3lame"])
        .arg(output);
    run_checked(command, "ffmpeg")
}

// A non-zero exit is an error carrying the captured stderr.
fn run_checked(mut command: Command, label: &str) -> Result<(), EditorError> {
    let output = command.output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            EditorError::CommandNotFound(label.to_string())
        } else {
            EditorError::Spawn {
                command: label.to_string(),
                source: e,
            }
        }
    })?;

    if !output.status.success() {
        return Err(EditorError::Failed {
            command: label.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_passes() {
        run_checked(Command::new("true"), "true").unwrap();
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = run_checked(Command::new("false"), "false").unwrap_err();
        match err {
            EditorError::Failed { command, .. } => assert_eq!(command, "false"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_command_is_reported() {
        let err = run_checked(
            Command::new("desilencer-no-such-tool"),
            "desilencer-no-such-tool",
        )
        .unwrap_err();
        assert!(matches!(err, EditorError::CommandNotFound(_)));
    }
}
