//! Writes rendered frames out as a video. GIFs are encoded in-process; every other container is
//! handed to the system `ffmpeg`, which picks the muxer and codec from the file extension.

use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};

/// Consumes a sequence of equally sized RGB8 frames
pub trait FrameSink {
    fn write_frame(&mut self, pixels: &[u8]) -> Result<()>;

    /// Flushes everything. Dropping a sink without finishing it abandons the output.
    fn finish(self: Box<Self>) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoder {
    Gif,
    Ffmpeg,
}

impl Encoder {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gif") => Encoder::Gif,
            _ => Encoder::Ffmpeg,
        }
    }
}

/// Opens a video file for `size` frames shown `interval_ms` apart. `interval_ms` must be positive.
pub fn open(path: &Path, size: (u32, u32), interval_ms: u32) -> Result<Box<dyn FrameSink>> {
    debug_assert!(interval_ms > 0);
    Ok(match Encoder::for_path(path) {
        Encoder::Gif => Box::new(GifWriter::new(path, size, interval_ms)?),
        Encoder::Ffmpeg => Box::new(FfmpegWriter::new(path, size, interval_ms)?),
    })
}

/// Checks a frame matches the size the sink was opened with
fn check_frame(size: (u32, u32), pixels: &[u8]) -> Result<()> {
    let expected = size.0 as usize * size.1 as usize * 3;
    if pixels.len() != expected {
        bail!(
            "Frame has {} bytes, but a {}x{} RGB frame needs {expected}",
            pixels.len(),
            size.0,
            size.1
        );
    }
    Ok(())
}

pub struct GifWriter {
    encoder: gif::Encoder<BufWriter<fs_err::File>>,
    size: (u16, u16),
    // In hundredths of a second
    delay: u16,
}

impl GifWriter {
    pub fn new(path: &Path, size: (u32, u32), interval_ms: u32) -> Result<Self> {
        let (w, h) = size;
        if w > u16::MAX as u32 || h > u16::MAX as u32 {
            bail!("{w}x{h} is too big for a GIF");
        }
        let size = (w as u16, h as u16);
        let file = fs_err::File::create(path)?;
        let mut encoder = gif::Encoder::new(BufWriter::new(file), size.0, size.1, &[])?;
        encoder.set_repeat(gif::Repeat::Infinite)?;
        Ok(Self {
            encoder,
            size,
            delay: gif_delay(interval_ms),
        })
    }
}

/// GIF delays only have centisecond resolution
fn gif_delay(interval_ms: u32) -> u16 {
    ((interval_ms as f64 / 10.0).round() as u32).clamp(1, u16::MAX as u32) as u16
}

impl FrameSink for GifWriter {
    fn write_frame(&mut self, pixels: &[u8]) -> Result<()> {
        check_frame((self.size.0 as u32, self.size.1 as u32), pixels)?;
        let mut frame = gif::Frame::from_rgb_speed(self.size.0, self.size.1, pixels, 10);
        frame.delay = self.delay;
        self.encoder.write_frame(&frame)?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let mut writer = self.encoder.into_inner()?;
        writer.flush()?;
        Ok(())
    }
}

/// Streams raw frames into an `ffmpeg` child process
pub struct FfmpegWriter {
    path: PathBuf,
    size: (u32, u32),
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    // Read on its own thread while frames stream in
    stderr: Option<JoinHandle<String>>,
}

impl FfmpegWriter {
    pub fn new(path: &Path, size: (u32, u32), interval_ms: u32) -> Result<Self> {
        Self::spawn(ffmpeg_command(path, size, interval_ms), path, size)
    }

    /// `cmd` must read frames on stdin and report problems on stderr.
    fn spawn(mut cmd: Command, path: &Path, size: (u32, u32)) -> Result<Self> {
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                bail!(
                    "ffmpeg isn't installed or isn't on PATH; it's needed to write {}",
                    path.display()
                );
            }
            Err(err) => {
                return Err(err).context("starting ffmpeg");
            }
        };
        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut out = String::new();
                // Best effort; the exit status is what matters
                let _ = pipe.read_to_string(&mut out);
                out
            })
        });
        Ok(Self {
            path: path.to_path_buf(),
            size,
            child: Some(child),
            stdin,
            stderr,
        })
    }

    /// Waits for ffmpeg to exit, turning a failure into an error with whatever it printed.
    fn wait(&mut self) -> Result<()> {
        // Closing stdin tells ffmpeg the stream is over
        self.stdin = None;
        let mut child = match self.child.take() {
            Some(child) => child,
            None => return Ok(()),
        };
        let status = child.wait()?;
        let stderr = self
            .stderr
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();
        if !status.success() {
            bail!(
                "ffmpeg failed writing {} ({status}): {}",
                self.path.display(),
                stderr.trim()
            );
        }
        Ok(())
    }
}

pub(crate) fn ffmpeg_command(path: &Path, size: (u32, u32), interval_ms: u32) -> Command {
    let fps = 1000.0 / interval_ms as f64;
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-y", "-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgb24"])
        .arg("-s")
        .arg(format!("{}x{}", size.0, size.1))
        .arg("-framerate")
        .arg(format!("{fps:.3}"))
        .args(["-i", "-"])
        // Most codecs want even dimensions for yuv420p
        .args(["-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2", "-pix_fmt", "yuv420p"])
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    cmd
}

impl FrameSink for FfmpegWriter {
    fn write_frame(&mut self, pixels: &[u8]) -> Result<()> {
        check_frame(self.size, pixels)?;
        let write = match self.stdin {
            Some(ref mut stdin) => stdin.write_all(pixels),
            None => bail!("ffmpeg for {} already finished", self.path.display()),
        };
        if let Err(err) = write {
            // ffmpeg probably quit early; its own error is more useful than a broken pipe.
            self.wait()?;
            return Err(err).context("streaming a frame to ffmpeg");
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        self.wait()?;
        info!("Wrote {}", self.path.display());
        Ok(())
    }
}

impl Drop for FfmpegWriter {
    fn drop(&mut self) {
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            warn!(
                "Abandoning unfinished video {}",
                self.path.display()
            );
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
