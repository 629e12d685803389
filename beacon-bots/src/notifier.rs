//! Notifier trait and a hub for driving several notifiers together.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{Msg, Result};

/// A chat bot that relays [`Msg`]s somewhere.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Hand a message over for delivery.
    ///
    /// Returning `Ok` means the message was accepted, not that it arrived.
    async fn send_msg(&self, msg: &Msg) -> Result<()>;

    /// Launch background delivery, running until `shutdown` is cancelled.
    fn start(&self, shutdown: CancellationToken) -> Result<()>;

    /// Human-readable bot name.
    fn bot_name(&self) -> &'static str;
}

/// Fans messages out to every registered notifier.
#[derive(Default, Clone)]
pub struct NotifierHub {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotifierHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notifier.
    pub fn add(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifiers.push(Arc::new(notifier));
        self
    }

    /// Add a notifier that is also held elsewhere.
    pub fn add_shared(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.bot_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    /// Start every notifier with the same shutdown token.
    ///
    /// Stops at the first failure; notifiers started before it keep running
    /// until the token is cancelled.
    pub fn start_all(&self, shutdown: &CancellationToken) -> Result<()> {
        for notifier in &self.notifiers {
            notifier.start(shutdown.clone())?;
        }
        Ok(())
    }

    /// Send to every notifier concurrently, one result per notifier in
    /// registration order.
    pub async fn broadcast(&self, msg: &Msg) -> Vec<Result<()>> {
        let results = join_all(self.notifiers.iter().map(|n| n.send_msg(msg))).await;

        for (notifier, result) in self.notifiers.iter().zip(&results) {
            if let Err(e) = result {
                warn!(bot = notifier.bot_name(), error = %e, "Notifier did not accept message");
            }
        }

        results
    }
}
