// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Background stdin reader.
//
// A dedicated thread reads raw bytes from stdin and forwards them over
// a standard channel. The event loop blocks on that channel with a
// timeout, which is what gives it instant input response with zero idle
// CPU — `read()` on stdin blocks, and the main thread must stay free to
// repaint and to resolve escape-sequence timeouts.
//
// Shutdown: the thread `poll()`s stdin with a short timeout and checks
// an `AtomicBool` stop flag between polls, so it can exit cleanly
// instead of sitting forever inside a blocking `read()`.

#[cfg(unix)]
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Read chunk size. A keypress is 1–6 bytes and a keypad has no paste
/// path, so 1 KB is generous.
const READ_BUF_SIZE: usize = 1024;

/// How often the thread wakes to check the stop flag (milliseconds).
/// Bounds shutdown latency.
const POLL_TIMEOUT_MS: i32 = 50;

/// Background stdin reader thread.
///
/// [`spawn`](Self::spawn) starts the thread and returns a channel
/// receiver of raw byte chunks. The thread runs until
/// [`stop`](Self::stop) is called or the handle is dropped.
pub struct StdinReader {
    /// Thread handle. `None` once `stop()` has joined it.
    handle: Option<JoinHandle<()>>,
    /// Shared flag telling the thread to exit.
    stop: Arc<AtomicBool>,
}

impl StdinReader {
    /// Spawn the reader thread.
    ///
    /// Every received `Vec<u8>` is a non-empty chunk of raw stdin data.
    /// The channel closes when the reader stops or stdin reaches EOF.
    ///
    /// # Panics
    ///
    /// Panics if the OS cannot spawn a thread.
    #[must_use]
    pub fn spawn() -> (Self, Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                Self::read_loop(&tx, &stop_flag);
            })
            .expect("failed to spawn stdin reader thread");

        (
            Self {
                handle: Some(handle),
                stop,
            },
            rx,
        )
    }

    /// Signal the thread to stop and join it. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Thread body: poll stdin, read available bytes, send them on.
    ///
    /// Exits when the stop flag is set, stdin hits EOF, or the receiver
    /// has been dropped.
    #[cfg(unix)]
    fn read_loop(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
        use std::os::unix::io::AsRawFd;

        let stdin_fd = io::stdin().as_raw_fd();
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            let ready = unsafe {
                let mut pfd = libc::pollfd {
                    fd: stdin_fd,
                    events: libc::POLLIN,
                    revents: 0,
                };
                libc::poll(&raw mut pfd, 1, POLL_TIMEOUT_MS)
            };

            // Timeout or poll error: go around and re-check the flag.
            if ready <= 0 {
                continue;
            }

            let n = unsafe { libc::read(stdin_fd, buf.as_mut_ptr().cast(), buf.len()) };

            if n <= 0 {
                // EOF or read error.
                break;
            }

            #[allow(clippy::cast_sign_loss)] // n > 0 checked above.
            let chunk = buf[..n as usize].to_vec();

            if tx.send(chunk).is_err() {
                // Receiver gone.
                break;
            }
        }
    }

    /// Non-unix fallback: blocking reads, no poll. Shutdown is less
    /// prompt (the thread may be parked in `read`), but functional.
    #[cfg(not(unix))]
    fn read_loop(tx: &mpsc::Sender<Vec<u8>>, stop: &AtomicBool) {
        use std::io::Read;

        let stdin = std::io::stdin();
        let mut buf = [0u8; READ_BUF_SIZE];

        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            match stdin.lock().read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for StdinReader {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn spawn_and_stop() {
        // Stdin is not a terminal under test; the thread just has to
        // start and shut down without hanging.
        let (mut reader, _rx) = StdinReader::spawn();
        reader.stop();
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut reader, _rx) = StdinReader::spawn();
        reader.stop();
        reader.stop();
    }

    #[test]
    fn drop_stops_reader() {
        let (reader, _rx) = StdinReader::spawn();
        drop(reader);
    }

    #[test]
    fn channel_closes_on_stop() {
        let (mut reader, rx) = StdinReader::spawn();
        reader.stop();

        // Drain anything that arrived before the stop, then the channel
        // must report disconnected.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
