use crate::document::CommandString;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("empty command")]
    Empty,
    #[error("malformed command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("failed to spawn command: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Fire-and-forget launch of a committed command. The command line is
/// validated with shell word-splitting first so unbalanced quotes surface as
/// a dispatch error instead of a shell error at runtime, then handed to
/// `sh -c` so users keep `~`, `$VAR`, and pipes.
pub fn dispatch(command: &CommandString) -> Result<(), DispatchError> {
    let raw = command.as_str().trim();
    if raw.is_empty() {
        return Err(DispatchError::Empty);
    }
    shell_words::split(raw)?;

    Command::new("sh")
        .arg("-c")
        .arg(raw)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
