use std::future::Future;
use std::io;
use log::debug;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use crate::net::structs::reactor::Reactor;

impl Reactor {
    /// Builds the runtime and parks its thread until shutdown; tasks
    /// spawned through the handle run on that thread.
    pub fn new(name: &str) -> io::Result<Reactor> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let thread = std::thread::Builder::new()
            .name(format!("reactor[{}]", name))
            .spawn(move || {
                runtime.block_on(async move {
                    let _ = shutdown_rx.changed().await;
                });
            })?;
        Ok(Reactor {
            handle,
            shutdown: shutdown_tx,
            thread: Mutex::new(Some(thread)),
        })
    }

    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Cancels every task on the reactor and joins its thread. Idempotent.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.thread.lock().take() {
            if let Err(error) = handle.join() {
                debug!("reactor thread panicked: {:?}", error);
            }
        }
    }
}

impl Drop for Reactor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
