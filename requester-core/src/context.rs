// requester-core/src/context.rs
//! The single execution context completions are delivered on.
//!
//! A `MainContext` is a cloneable handle to a FIFO queue of jobs. Exactly one
//! executor drains the queue, either a dedicated thread (`MainContext::spawn`)
//! or a `MainLoop` driven by the embedding application.

use std::io;
use std::thread;
use tokio::sync::mpsc;
use tracing::warn;

pub const MAIN_THREAD_NAME: &str = "requester-main";

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone)]
pub struct MainContext {
    tx: mpsc::UnboundedSender<Job>,
}

impl MainContext {
    /// Start a dedicated thread that runs jobs until every handle is dropped
    pub fn spawn() -> io::Result<Self> {
        let (context, main_loop) = Self::channel();
        thread::Builder::new()
            .name(MAIN_THREAD_NAME.to_string())
            .spawn(move || main_loop.run_blocking())?;
        Ok(context)
    }

    /// A handle plus the loop that drains it, for callers with their own event loop
    pub fn channel() -> (Self, MainLoop) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, MainLoop { rx })
    }

    /// Queue a job. Dropped with a warning if the executor is gone.
    pub fn post<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.tx.send(Box::new(job)).is_err() {
            warn!("main context is closed, dropping completion");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct MainLoop {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl MainLoop {
    /// Run jobs until every `MainContext` handle is dropped
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            job();
        }
    }

    /// Blocking form of `run`. Must not be called from inside an async task.
    pub fn run_blocking(mut self) {
        while let Some(job) = self.rx.blocking_recv() {
            job();
        }
    }

    /// Run whatever is queued right now and return how many jobs ran
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}
