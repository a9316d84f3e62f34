//! Process channel: one child, one payload, one reply

use super::output::{ExitOutcome, ProcessOutput};
use super::spec::ChildSpec;
use crate::error::{Result, TransportError};
use crate::traits::Channel;
use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::ChildStdin;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long a killed child's pipes may keep draining before reads are cut off
const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Runs a child process described by a [`ChildSpec`]
///
/// Each call spawns a fresh child. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ProcessChannel {
    spec: ChildSpec,
}

impl ProcessChannel {
    /// Create a channel for the given child
    pub fn new(spec: ChildSpec) -> Self {
        Self { spec }
    }

    /// Get the child specification
    pub fn spec(&self) -> &ChildSpec {
        &self.spec
    }

    /// Run the child and require a successful exit.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Launch`] if the program or script cannot be started
    /// - [`TransportError::ChildExit`] if the child exits non-zero, is killed,
    ///   or times out; captured stdout/stderr travel with the error
    /// - [`TransportError::Pipe`] if a pipe fails mid-transfer
    pub async fn run(&self, input: impl Into<Vec<u8>>) -> Result<ProcessOutput> {
        self.capture(input).await?.into_result()
    }

    /// Run the child and return whatever it produced, whatever its exit status.
    ///
    /// `input` is written to stdin in full and stdin is then closed. stdout
    /// and stderr are drained on their own tasks while the write is in
    /// flight, so neither side can block on a full pipe buffer.
    ///
    /// On timeout the child is killed and its output up to that point is
    /// still returned, with [`ExitOutcome::TimedOut`] as the status.
    ///
    /// # Errors
    ///
    /// Only launch and pipe failures; a non-zero exit is reported through
    /// [`ProcessOutput::status`].
    pub async fn capture(&self, input: impl Into<Vec<u8>>) -> Result<ProcessOutput> {
        let input = input.into();
        let command = self.spec.display();

        if let Some(script) = self.spec.missing_script() {
            return Err(TransportError::Launch {
                program: self.spec.program.clone(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("script not found: {}", script.display()),
                ),
            });
        }

        let mut cmd = self.spec.command();
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %command, input_bytes = input.len(), "Spawning child process");

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| TransportError::Launch {
            program: self.spec.program.clone(),
            source,
        })?;
        let pid = child.id();

        let stdin = take_pipe(child.stdin.take(), "stdin")?;
        let stdout = take_pipe(child.stdout.take(), "stdout")?;
        let stderr = take_pipe(child.stderr.take(), "stderr")?;

        let writer = tokio::spawn(write_input(stdin, input));
        let stdout = Capture::spawn(stdout, "stdout");
        let stderr = Capture::spawn(stderr, "stderr");

        let status = match self.spec.timeout {
            None => ExitOutcome::from(child.wait().await?),
            Some(limit) => {
                tokio::select! {
                    status = child.wait() => ExitOutcome::from(status?),

                    () = tokio::time::sleep(limit) => {
                        if let Err(e) = child.kill().await {
                            warn!(pid, error = %e, "Failed to kill timed-out child process");
                        }
                        ExitOutcome::TimedOut(limit)
                    }
                }
            }
        };

        if let ExitOutcome::TimedOut(limit) = status {
            writer.abort();
            // A grandchild may still hold the pipes open, so reads get a
            // bounded grace period and keep whatever arrived.
            let (stdout, stderr) =
                tokio::join!(stdout.salvage(DRAIN_GRACE), stderr.salvage(DRAIN_GRACE));

            warn!(
                command = %command,
                pid,
                timeout_ms = limit.as_millis(),
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                "Child process timed out"
            );
            return Ok(ProcessOutput {
                stdout,
                stderr,
                status,
                elapsed: start.elapsed(),
            });
        }

        join_pipe(writer, "stdin").await?;
        let stdout = stdout.finish().await?;
        let stderr = stderr.finish().await?;
        let elapsed = start.elapsed();

        if status.success() {
            info!(
                command = %command,
                pid,
                elapsed_ms = elapsed.as_millis(),
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                "Child process finished"
            );
        } else {
            warn!(
                command = %command,
                pid,
                status = %status,
                elapsed_ms = elapsed.as_millis(),
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                "Child process failed"
            );
        }

        Ok(ProcessOutput {
            stdout,
            stderr,
            status,
            elapsed,
        })
    }
}

#[async_trait]
impl Channel for ProcessChannel {
    async fn exchange(&self, input: Vec<u8>) -> Result<ProcessOutput> {
        self.capture(input).await
    }

    fn describe(&self) -> String {
        self.spec.display()
    }
}

fn take_pipe<T>(pipe: Option<T>, name: &'static str) -> Result<T> {
    pipe.ok_or_else(|| TransportError::Pipe {
        pipe: name,
        source: io::Error::other(format!("child {name} was not captured")),
    })
}

/// Write the whole payload, then close stdin so the child sees EOF.
async fn write_input(mut stdin: ChildStdin, input: Vec<u8>) -> io::Result<()> {
    match stdin.write_all(&input).await {
        Ok(()) => stdin.flush().await?,
        // The child quit without reading; its exit status tells the story.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!(input_bytes = input.len(), "Child closed stdin early");
            return Ok(());
        }
        Err(e) => return Err(e),
    }
    drop(stdin);
    Ok(())
}

/// One output pipe being read into a buffer on its own task.
///
/// The buffer lives outside the task so bytes read before an abort are kept.
struct Capture {
    pipe: &'static str,
    buf: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<io::Result<()>>,
}

impl Capture {
    fn spawn<R>(reader: R, pipe: &'static str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let task = tokio::spawn(drain(reader, Arc::clone(&buf)));
        Self { pipe, buf, task }
    }

    /// Wait for end of stream and return everything read.
    async fn finish(self) -> Result<Vec<u8>> {
        join_pipe(self.task, self.pipe).await?;
        Ok(std::mem::take(&mut *self.buf.lock().await))
    }

    /// Give the pipe `grace` to reach end of stream, then stop reading and
    /// return what was read so far.
    async fn salvage(self, grace: Duration) -> Vec<u8> {
        let mut task = self.task;
        match tokio::time::timeout(grace, &mut task).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => debug!(pipe = self.pipe, error = %e, "Pipe read failed after kill"),
            Ok(Err(e)) => debug!(pipe = self.pipe, error = %e, "Pipe task failed after kill"),
            Err(_) => {
                debug!(pipe = self.pipe, "Pipe still open after kill, keeping partial output");
                task.abort();
            }
        }
        std::mem::take(&mut *self.buf.lock().await)
    }
}

async fn drain<R: AsyncRead + Unpin>(mut pipe: R, sink: Arc<Mutex<Vec<u8>>>) -> io::Result<()> {
    let mut chunk = vec![0u8; 8 * 1024];
    loop {
        let n = pipe.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        sink.lock().await.extend_from_slice(&chunk[..n]);
    }
}

async fn join_pipe<T>(task: JoinHandle<io::Result<T>>, pipe: &'static str) -> Result<T> {
    match task.await {
        Ok(result) => result.map_err(|source| TransportError::Pipe { pipe, source }),
        Err(e) => Err(TransportError::Pipe {
            pipe,
            source: io::Error::other(e),
        }),
    }
}
