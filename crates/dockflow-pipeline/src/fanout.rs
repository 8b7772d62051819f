//! Subprocess output fan-out.
//!
//! The docking engine runs for minutes per ligand; its progress must be
//! visible on the console while an identical verbatim copy lands in the
//! per-ligand log file. [`OutputFanout`] is that explicit two-sink writer,
//! and [`stream_command`] drives it line-by-line while the child runs, never
//! buffering the whole stream first.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Mutex;

/// Writes each line to every registered sink before the next line is read.
pub struct OutputFanout {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl OutputFanout {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Add a sink. Sinks receive identical bytes in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn Write + Send>) -> &mut Self {
        self.sinks.push(sink);
        self
    }

    /// Write one line (newline appended) to all sinks and flush each, so a
    /// slow external process remains observable in real time.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.write_all(line.as_bytes())?;
            sink.write_all(b"\n")?;
            sink.flush()?;
        }
        Ok(())
    }
}

impl Default for OutputFanout {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a command, streaming its stdout and stderr through the fan-out.
///
/// Both child streams feed the same fan-out; each is drained line-by-line as
/// the child produces it. Stderr is drained on a second thread only to avoid
/// a pipe-buffer deadlock while the main loop sits on stdout; there is still
/// exactly one external process in flight and the call does not return until
/// it exits. No timeout is applied; a hung tool hangs the run.
pub fn stream_command(command: &mut Command, fanout: &mut OutputFanout) -> io::Result<ExitStatus> {
    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Both reader loops funnel into the shared fan-out
    let shared = Mutex::new(std::mem::take(fanout));

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let status = std::thread::scope(|scope| -> io::Result<ExitStatus> {
        if let Some(err_stream) = stderr {
            scope.spawn(|| {
                let reader = BufReader::new(err_stream);
                for line in reader.lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(err) => {
                            log::warn!("stderr capture ended early: {err}");
                            break;
                        }
                    };
                    if let Ok(mut sinks) = shared.lock() {
                        if let Err(err) = sinks.write_line(&line) {
                            log::warn!("dropped captured stderr line: {err}");
                        }
                    }
                }
            });
        }

        if let Some(out_stream) = stdout {
            let reader = BufReader::new(out_stream);
            for line in reader.lines() {
                let written = line.and_then(|line| match shared.lock() {
                    Ok(mut sinks) => sinks.write_line(&line),
                    Err(_) => Ok(()),
                });
                if let Err(err) = written {
                    // Reap the child before surfacing the error; the closed
                    // pipes also unblock the stderr thread joined by the scope.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(err);
                }
            }
        }

        child.wait()
    });

    *fanout = shared.into_inner().unwrap_or_default();
    status
}
