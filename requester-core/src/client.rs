// requester-core/src/client.rs
use crate::context::MainContext;
use crate::error::RequestError;
use crate::http::HttpTransport;
use crate::request::{PreparedRequest, Request, Upload};
use crate::types::{Completion, Outcome};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, error};

/// Builds requests, hands them to a transport, and reports each completion
/// exactly once.
///
/// Two ways to call it:
/// - `send` / `upload_multipart` run in the background and deliver the
///   completion on the `MainContext`. A request that cannot be assembled is
///   logged and dropped; its callback never runs.
/// - `execute` / `execute_upload` are futures that return the completion, or
///   the assembly error.
pub struct Requester<T: HttpTransport> {
    transport: Arc<T>,
    context: MainContext,
    runtime: Handle,
}

impl<T: HttpTransport + 'static> Requester<T> {
    /// Background calls are spawned on `runtime`.
    pub fn new(transport: T, context: MainContext, runtime: Handle) -> Self {
        Self {
            transport: Arc::new(transport),
            context,
            runtime,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// General-purpose request; `on_complete` runs on the main context
    pub fn send<F>(&self, request: &Request, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        match request.prepare() {
            Ok(prepared) => self.spawn_dispatch(prepared, on_complete),
            Err(e) => error!(method = %request.method, error = %e, "dropping request"),
        }
    }

    /// Multipart upload; `on_complete` runs on the main context
    pub fn upload_multipart<F>(&self, upload: &Upload, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        match upload.prepare() {
            Ok(prepared) => self.spawn_dispatch(prepared, on_complete),
            Err(e) => error!(method = %upload.method, error = %e, "dropping upload"),
        }
    }

    pub async fn execute(&self, request: &Request) -> Result<Completion, RequestError> {
        let prepared = request.prepare()?;
        Ok(dispatch(self.transport.as_ref(), prepared).await)
    }

    pub async fn execute_upload(&self, upload: &Upload) -> Result<Completion, RequestError> {
        let prepared = upload.prepare()?;
        Ok(dispatch(self.transport.as_ref(), prepared).await)
    }

    fn spawn_dispatch<F>(&self, prepared: PreparedRequest, on_complete: F)
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let guard = CompletionGuard::new(self.context.clone(), on_complete);
        self.runtime.spawn(async move {
            let completion = dispatch(transport.as_ref(), prepared).await;
            guard.complete(completion);
        });
    }
}

/// Owns a pending callback. If the dispatch task is dropped before it
/// finishes (runtime shut down), the callback still runs, as a transport error.
struct CompletionGuard<F: FnOnce(Completion) + Send + 'static> {
    context: MainContext,
    on_complete: Option<F>,
}

impl<F: FnOnce(Completion) + Send + 'static> CompletionGuard<F> {
    fn new(context: MainContext, on_complete: F) -> Self {
        Self {
            context,
            on_complete: Some(on_complete),
        }
    }

    fn complete(mut self, completion: Completion) {
        if let Some(on_complete) = self.on_complete.take() {
            self.context.post(move || on_complete(completion));
        }
    }
}

impl<F: FnOnce(Completion) + Send + 'static> Drop for CompletionGuard<F> {
    fn drop(&mut self) {
        if let Some(on_complete) = self.on_complete.take() {
            debug!("dispatch abandoned before completion");
            let completion = Completion::from(Outcome::TransportError);
            self.context.post(move || on_complete(completion));
        }
    }
}

/// Run one prepared request and fold the result into a `Completion`.
/// Only transport failures set the error flag; HTTP statuses pass through.
pub async fn dispatch<T: HttpTransport + ?Sized>(
    transport: &T,
    request: PreparedRequest,
) -> Completion {
    let method = request.method;
    let url = request.url.clone();

    let outcome = match transport.execute(request).await {
        Err(e) => {
            debug!(%method, %url, error = %e, "transport failed");
            Outcome::TransportError
        }
        Ok(resp) => {
            let status = resp.status.unwrap_or(0);
            debug!(
                %method,
                %url,
                status,
                bytes = resp.body.len(),
                "response received"
            );
            if resp.body.is_empty() {
                Outcome::EmptyBody { status }
            } else {
                Outcome::Success {
                    body: resp.body,
                    status,
                }
            }
        }
    };

    outcome.into()
}
