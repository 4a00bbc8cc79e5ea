use std::fmt::Debug;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, Instrument};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A service owns its state and processes one request at a time from its mailbox.
///
/// Services never share state; other modules talk to them through a client
/// handle wrapping the mailbox sender.
pub trait Service: Send + 'static {
    type Request: Send + Debug + 'static;

    /// Name used for the service's tracing span.
    const NAME: &'static str;

    fn handle(&mut self, request: Self::Request) -> impl Future<Output = ()> + Send;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

/// Delivers a reply. The caller may already be gone, which is not an error
/// for the service.
pub fn reply<T, E>(respond_to: Response<T, E>, result: Result<T, E>) {
    let _ = respond_to.send(result);
}

// =============================================================================
// 3. THE GENERIC RUN LOOP
// =============================================================================

/// Spawns `service` on the current runtime and returns its mailbox sender.
///
/// The service stops once every sender has been dropped.
pub fn spawn<S: Service>(service: S, buffer_size: usize) -> (mpsc::Sender<S::Request>, JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let span = tracing::info_span!("service", name = S::NAME);
    let handle = tokio::spawn(run(service, receiver).instrument(span));
    (sender, handle)
}

async fn run<S: Service>(mut service: S, mut receiver: mpsc::Receiver<S::Request>) {
    info!("{} starting", S::NAME);
    while let Some(request) = receiver.recv().await {
        service.handle(request).await;
    }
    info!("{} stopped", S::NAME);
}
