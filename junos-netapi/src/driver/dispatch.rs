//! Command dispatch.

use log::{debug, warn};

use super::Session;
use super::command::Command;
use super::response::Response;
use crate::error::Result;

/// Send one command on `session` and return its raw output.
///
/// Transport and command errors are returned unchanged; nothing is
/// retried. A CLI error printed by the device is not an error here, it is
/// reported through [`Response::failure_message`].
pub async fn execute<S: Session>(session: &mut S, command: &Command) -> Result<Response> {
    let response = session.run(command).await?;

    debug!(
        "'{}' completed in {:?} ({} bytes)",
        response.command,
        response.elapsed,
        response.output.len()
    );

    if let Some(ref failure) = response.failure_message {
        warn!("device rejected '{}': {}", response.command, failure);
    }

    Ok(response)
}
