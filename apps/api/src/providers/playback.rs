//! Local audio playback through ffplay.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::providers::{AudioPlayer, PlaybackError};

/// Upper bound on one playback run. Verse narrations are short; a player
/// still running past this is assumed hung and killed.
pub const PLAYBACK_TIMEOUT_SECS: u64 = 30;
const PLAYBACK_VOLUME: &str = "80";

/// Plays MP3 files with `ffplay -nodisp -autoexit`: no window, exits when
/// the file ends.
#[derive(Clone, Default)]
pub struct FfplayPlayer;

#[async_trait]
impl AudioPlayer for FfplayPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let child = Command::new("ffplay")
            .arg("-nodisp")
            .arg("-autoexit")
            .arg("-volume")
            .arg(PLAYBACK_VOLUME)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(map_spawn_error)?;

        // kill_on_drop reaps the player if the timeout drops the future.
        let timeout = std::time::Duration::from_secs(PLAYBACK_TIMEOUT_SECS);
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| PlaybackError::Timeout(PLAYBACK_TIMEOUT_SECS))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PlaybackError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        debug!("playback finished: {}", path.display());
        Ok(())
    }
}

fn map_spawn_error(e: std::io::Error) -> PlaybackError {
    if e.kind() == std::io::ErrorKind::NotFound {
        PlaybackError::BinaryMissing
    } else {
        PlaybackError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_missing_binary_maps_to_binary_missing() {
        let mapped = map_spawn_error(Error::from(ErrorKind::NotFound));
        assert!(matches!(mapped, PlaybackError::BinaryMissing));
    }

    #[test]
    fn test_other_spawn_errors_stay_io() {
        let mapped = map_spawn_error(Error::from(ErrorKind::PermissionDenied));
        assert!(matches!(mapped, PlaybackError::Io(_)));
    }
}
