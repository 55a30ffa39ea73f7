pub mod rate;
pub mod reader;

use crate::input::TargetInput;
use crate::model::{Config, Diagnostics, ScanReport};
use crate::output::OutputSink;
use crate::scan::Scanner;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{instrument, warn};

/// Feeds targets through the scanner with bounded concurrency and writes
/// one report per target.
pub struct Engine {
    cfg: Config,
    sink: OutputSink,
    scanner: Arc<Scanner>,
    sem: Arc<Semaphore>,
}

impl Engine {
    pub fn new(cfg: Config, sink: OutputSink) -> anyhow::Result<Self> {
        if cfg.concurrency == 0 {
            anyhow::bail!("concurrency must be greater than zero");
        }
        Ok(Self {
            scanner: Arc::new(Scanner::new(&cfg)?),
            sem: Arc::new(Semaphore::new(cfg.concurrency)),
            cfg,
            sink,
        })
    }

    #[instrument(skip(self))]
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut stream = crate::input::stream_targets(&self.cfg)?;
        let mut tasks = FuturesUnordered::new();

        while let Some(input) = stream.next().await {
            let target = match input {
                TargetInput::Ready(target) => target,
                TargetInput::Rejected { target, reason } => {
                    let report = ScanReport::empty(target, self.cfg.scan, Diagnostics::new("input", reason));
                    if let Err(err) = self.sink.emit(report).await {
                        warn!(error = %err, "failed to emit report");
                    }
                    continue;
                }
            };

            let permit = self.sem.clone().acquire_owned().await?;
            let scanner = self.scanner.clone();
            let sink = self.sink.clone();
            let overall = self.cfg.overall_timeout;
            let scan = self.cfg.scan;
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                let emitted = match timeout(overall, scanner.scan(&target)).await {
                    Ok(report) => sink.emit(report).await,
                    Err(_) => {
                        warn!(target = %target.resolved, "overall timeout");
                        sink.emit_error(target.view(), scan, "timeout", "overall timeout".to_string())
                            .await
                    }
                };
                if let Err(err) = emitted {
                    warn!(error = %err, "failed to emit report");
                }
            }));
        }

        while let Some(joined) = tasks.next().await {
            if let Err(err) = joined {
                warn!(error = %err, "scan task failed");
            }
        }
        self.sink.shutdown().await
    }
}
