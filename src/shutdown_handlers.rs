use std::thread;

use tracing::{info, warn};

use crate::shutdown::CancelToken;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Cancels `token` on Ctrl+C (and SIGTERM on unix).
///
/// Signals are awaited on a dedicated thread running a current-thread tokio
/// runtime, so the caller stays fully blocking.
pub fn setup_signal_cancel_handler(token: &CancelToken) {
    let token = token.clone();
    let spawned = thread::Builder::new()
        .name("signal-listener".to_owned())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    warn!("Failed to start signal listener: {}", err);
                    return;
                }
            };
            runtime.block_on(wait_for_signal());
            info!("Interrupt received, cancelling after the in-flight request");
            token.cancel();
        });
    if let Err(err) = spawned {
        warn!("Failed to spawn signal listener: {}", err);
    }
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            () = async {
                if let Some(signal) = term_signal.as_mut() {
                    signal.recv().await;
                } else {
                    std::future::pending::<()>().await;
                }
            } => {}
        }
    }

    #[cfg(not(unix))]
    {
        drop(tokio::signal::ctrl_c().await);
    }
}
