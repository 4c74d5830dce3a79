//! Terminal spinner shown while the upload request is in flight.
//!
//! Purely cosmetic: the animation runs on its own tokio task, shares no
//! state with the upload, and is aborted on stop. Whatever happens to it
//! has no bearing on the run's outcome.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use tokio::task::JoinHandle;

const FRAMES: [&str; 7] = ["/", "|", "\\", "-", "|", "\\", "-"];
const TICK: Duration = Duration::from_millis(174);

pub struct Spinner {
    handle: JoinHandle<()>,
}

impl Spinner {
    /// Starts animating on stderr until [`Spinner::stop`] is called.
    pub fn start(message: &str) -> Self {
        let message = message.to_string();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            let mut frame = 0usize;
            loop {
                ticker.tick().await;
                eprint!("\r{} {}", FRAMES[frame % FRAMES.len()].bright_cyan(), message);
                let _ = io::stderr().flush();
                frame += 1;
            }
        });
        Spinner { handle }
    }

    /// Aborts the animation task and clears the spinner line.
    pub fn stop(self) {
        self.handle.abort();
        eprint!("\r\x1b[2K");
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn spinner_starts_and_stops_cleanly() {
        let spinner = Spinner::start("working ...");
        tokio::time::sleep(Duration::from_millis(200)).await;
        spinner.stop();
    }
}
