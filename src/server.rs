use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
    time,
};

use crate::{
    api, config,
    types::{AuthError, AuthorizationResult},
};

/// What to do when a callback carries neither `code` nor `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Respond 400 and end the wait with `AuthError::MalformedCallback`.
    FailFast,
    /// Respond 400 and keep listening for a well-formed redirect.
    KeepWaiting,
}

/// What the callback handler reports back to the waiting orchestrator.
pub type CallbackOutcome = Result<AuthorizationResult, AuthError>;

/// Sender half handed to the callback handler. Consumed on first use, so a
/// second request cannot produce a second result.
pub struct CallbackSender {
    result: oneshot::Sender<CallbackOutcome>,
    shutdown: oneshot::Sender<()>,
}

impl CallbackSender {
    /// Delivers the outcome and asks the listener to stop accepting.
    pub fn complete(self, outcome: CallbackOutcome) {
        let _ = self.result.send(outcome);
        let _ = self.shutdown.send(());
    }
}

/// Shared state for the callback route.
#[derive(Clone)]
pub struct CallbackState {
    pub slot: Arc<Mutex<Option<CallbackSender>>>,
    pub policy: MalformedPolicy,
}

/// Single-shot listener for the OAuth redirect.
///
/// Binds eagerly so a busy port fails before the browser is opened, serves
/// `GET /callback` until exactly one result is produced, then shuts down and
/// releases the socket.
pub struct CallbackReceiver {
    listener: TcpListener,
    policy: MalformedPolicy,
}

impl CallbackReceiver {
    /// Binds `127.0.0.1:{port}`. Port 0 picks an ephemeral port; use
    /// [`local_addr`](Self::local_addr) to learn which one.
    pub async fn bind(port: u16, policy: MalformedPolicy) -> Result<Self, AuthError> {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AuthError::Bind { port, source })?;

        Ok(CallbackReceiver { listener, policy })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until the redirect produces a result, then stops the listener.
    ///
    /// With `Some(timeout)` the wait is bounded and expiry yields
    /// `AuthError::Timeout`; with `None` it blocks until a result arrives.
    /// On the untimed path the listener is fully shut down before this
    /// returns, so the port is free again for the caller.
    pub async fn receive(
        self,
        timeout: Option<Duration>,
    ) -> Result<AuthorizationResult, AuthError> {
        let (result_tx, result_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let state = CallbackState {
            slot: Arc::new(Mutex::new(Some(CallbackSender {
                result: result_tx,
                shutdown: shutdown_tx,
            }))),
            policy: self.policy,
        };

        let app = Router::new().route(
            config::CALLBACK_PATH,
            get(api::callback).layer(Extension(state)),
        );

        let server = axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
        let server_task = tokio::spawn(async move { server.await });

        let outcome = match timeout {
            Some(limit) => match time::timeout(limit, result_rx).await {
                Ok(received) => received,
                Err(_) => {
                    server_task.abort();
                    return Err(AuthError::Timeout(limit));
                }
            },
            None => result_rx.await,
        };

        // Graceful shutdown lets the in-flight response reach the browser;
        // awaiting the task releases the socket before the caller proceeds.
        let _ = server_task.await;

        match outcome {
            Ok(result) => result,
            // The only way the sender drops without sending is the listener
            // dying underneath us.
            Err(_) => Err(AuthError::ReceiverClosed),
        }
    }
}
