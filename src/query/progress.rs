//! Spinner while a query runs on a worker thread.
//!
//! The worker sends exactly one `Result` over a channel. The calling thread
//! redraws a spinner between receive timeouts, then joins the worker. The
//! browser is only started from the value this returns.

use super::{QueryError, QueryExecutor, QueryResult};
use crossterm::{
    cursor::MoveToColumn,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Spinner animation frames.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between spinner frames.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Run `sql` on a worker thread, animating a spinner on `out` until it finishes.
///
/// A worker that panics or drops its sender yields [`QueryError::WorkerLost`].
/// Failures writing the spinner are ignored.
pub fn run_with_progress<E, W>(
    executor: &E,
    sql: &str,
    out: &mut W,
) -> Result<QueryResult, QueryError>
where
    E: QueryExecutor + Sync + ?Sized,
    W: Write,
{
    let (tx, rx) = mpsc::channel();
    let started = Instant::now();

    thread::scope(|scope| {
        let worker = scope.spawn(move || {
            // rx lives until the scope ends
            let _ = tx.send(executor.run_query(sql));
        });

        let mut frame = 0usize;
        let received = loop {
            match rx.recv_timeout(SPINNER_INTERVAL) {
                Ok(result) => break Some(result),
                Err(RecvTimeoutError::Timeout) => {
                    let _ = draw_frame(out, frame, started.elapsed());
                    frame = frame.wrapping_add(1);
                }
                Err(RecvTimeoutError::Disconnected) => break None,
            }
        };

        if frame > 0 {
            let _ = clear_line(out);
        }

        let joined = worker.join();
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Query worker finished");

        match (received, joined) {
            (Some(result), _) => result,
            (None, Err(_)) => {
                warn!("Query worker panicked");
                Err(QueryError::WorkerLost)
            }
            (None, Ok(())) => Err(QueryError::WorkerLost),
        }
    })
}

fn draw_frame<W: Write>(out: &mut W, frame: usize, elapsed: Duration) -> std::io::Result<()> {
    let symbol = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(out, "{} Running query... {:.1}s", symbol, elapsed.as_secs_f64())?;
    out.flush()
}

fn clear_line<W: Write>(out: &mut W) -> std::io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    out.flush()
}
