//! Optional video capture of the running window.
//!
//! Frames are streamed as raw RGBA into an `ffmpeg` child process and the
//! container is finalized on shutdown. The engine behaves identically with
//! recording on or off; this is a pure side channel.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use log::{info, warn};

/// Streams raw frames to ffmpeg.
pub struct Recorder {
    child: Child,
    stdin: Option<ChildStdin>,
    path: PathBuf,
    frames: u64,
}

impl Recorder {
    /// Spawn the encoder for `width`x`height` RGBA frames at `fps`.
    ///
    /// Fails when `ffmpeg` is not on the path or cannot be started.
    pub fn spawn(path: &Path, width: u32, height: u32, fps: u32) -> io::Result<Recorder> {
        let mut child = Command::new("ffmpeg")
            .args([
                "-loglevel",
                "error",
                "-y",
                "-f",
                "rawvideo",
                "-pixel_format",
                "rgba",
                "-video_size",
                &format!("{}x{}", width, height),
                "-framerate",
                &fps.to_string(),
                "-i",
                "-",
                "-pix_fmt",
                "yuv420p",
            ])
            .arg(path)
            .stdin(Stdio::piped())
            .spawn()?;
        let stdin = child.stdin.take();
        info!("Recording to {:?} at {}x{} {}fps", path, width, height, fps);
        Ok(Recorder {
            child,
            stdin,
            path: path.to_path_buf(),
            frames: 0,
        })
    }

    /// Append one frame of tightly packed RGBA pixels.
    pub fn push_frame(&mut self, rgba: &[u8]) -> io::Result<()> {
        if let Some(stdin) = self.stdin.as_mut() {
            stdin.write_all(rgba)?;
            self.frames += 1;
        }
        Ok(())
    }

    /// Close the stream and wait for the encoder to finish the file.
    pub fn finish(mut self) -> io::Result<()> {
        // Closing stdin signals end-of-stream to ffmpeg.
        drop(self.stdin.take());
        let status = self.child.wait()?;
        if status.success() {
            info!("Exported {} frames to {:?}", self.frames, self.path);
        } else {
            warn!("Recorder exited with {}", status);
        }
        Ok(())
    }
}
