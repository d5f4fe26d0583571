use std::io::{BufRead, BufReader, Write};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Where the operator's goals come from.
#[async_trait]
pub trait Operator: Send {
    /// Next non-empty goal, or `None` when input has ended.
    async fn next_goal(&mut self) -> Option<String>;
}

/// Goals typed on a line-oriented reader, stdin by default.
///
/// Lines are read on a dedicated OS thread. Blocking reads there never hold
/// up runtime shutdown; the thread dies with the process.
pub struct StdinOperator {
    lines: mpsc::Receiver<String>,
}

impl StdinOperator {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()))
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        std::thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read operator input: {}", e);
                        break;
                    }
                }
            }
            debug!("Operator input reader finished");
        });
        Self { lines: rx }
    }
}

impl Default for StdinOperator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operator for StdinOperator {
    async fn next_goal(&mut self) -> Option<String> {
        loop {
            print!("\nWhat would you like to do next? Please enter your input: ");
            let _ = std::io::stdout().flush();

            let line = self.lines.recv().await?;
            if !line.trim().is_empty() {
                return Some(line.trim().to_string());
            }
        }
    }
}
