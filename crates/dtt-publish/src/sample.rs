//! Preview sample cutting via ffmpeg.
//!
//! Samples are stream copies of the first N seconds, so cutting is fast
//! and does not re-encode.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use dtt_core::{PublishError, PublishResult};
use tokio::process::Command;

/// Cuts preview samples off the front of an audio file.
#[derive(Debug, Clone)]
pub struct SampleCutter {
    ffmpeg_path: String,
    seconds: u32,
}

impl SampleCutter {
    pub fn new(ffmpeg_path: String, seconds: u32) -> Self {
        SampleCutter {
            ffmpeg_path,
            seconds,
        }
    }

    /// Default sample location: next to the input, `-sample` suffixed.
    pub fn default_output_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sample");
        let ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        input.with_file_name(format!("{}-sample{}", stem, ext))
    }

    /// Cut the first `seconds` of `input` into `output`.
    pub async fn cut(&self, input: &Path, output: &Path) -> PublishResult<()> {
        let args = [
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-t".to_string(),
            self.seconds.to_string(),
            "-acodec".to_string(),
            "copy".to_string(),
            output.to_string_lossy().to_string(),
        ];

        let result = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PublishError::ToolMissing {
                        tool: self.ffmpeg_path.clone(),
                    }
                } else {
                    PublishError::Io(e)
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).to_string();
            return Err(PublishError::ToolFailed {
                tool: self.ffmpeg_path.clone(),
                stderr,
            });
        }

        // ffmpeg can exit zero without writing anything for some inputs
        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(PublishError::ToolFailed {
                tool: self.ffmpeg_path.clone(),
                stderr: "no output file produced".to_string(),
            });
        }

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            seconds = self.seconds,
            "Sample cut"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_output_keeps_extension() {
        assert_eq!(
            SampleCutter::default_output_path(Path::new("/tmp/night-shift.mp3")),
            PathBuf::from("/tmp/night-shift-sample.mp3")
        );
        assert_eq!(
            SampleCutter::default_output_path(Path::new("/tmp/noext")),
            PathBuf::from("/tmp/noext-sample")
        );
    }

    #[tokio::test]
    async fn missing_binary_is_tool_missing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.mp3");
        std::fs::write(&input, b"audio").unwrap();

        let cutter = SampleCutter::new("definitely-not-ffmpeg-binary".to_string(), 10);
        let err = cutter
            .cut(&input, &dir.path().join("out.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::ToolMissing { .. }));
    }

    #[tokio::test]
    async fn nonzero_exit_is_tool_failed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.mp3");
        std::fs::write(&input, b"audio").unwrap();

        // "false" ignores its arguments and exits 1
        let cutter = SampleCutter::new("false".to_string(), 10);
        let err = cutter
            .cut(&input, &dir.path().join("out.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn zero_exit_without_output_is_tool_failed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.mp3");
        std::fs::write(&input, b"audio").unwrap();

        // "true" exits 0 but writes nothing
        let cutter = SampleCutter::new("true".to_string(), 10);
        let err = cutter
            .cut(&input, &dir.path().join("out.mp3"))
            .await
            .unwrap_err();
        match err {
            PublishError::ToolFailed { stderr, .. } => {
                assert!(stderr.contains("no output file"));
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }
}
