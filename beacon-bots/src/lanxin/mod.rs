//! Lanxin (蓝信) group bot
//!
//! Messages handed to [`LanxinBot::send_msg`] are passed to a background
//! worker one at a time. The worker signs and POSTs each message; delivery
//! failures never reach the caller and are instead logged and published to
//! [`LanxinBot::subscribe_failures`] subscribers.
//!
//! ```no_run
//! use beacon_bots::{LanxinBot, Msg, Notifier};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> beacon_bots::Result<()> {
//! let bot = LanxinBot::new("secret", "https://apigw.lanxin.cn/v1/bot/hook/messages/create?hook_token=abc", "")?;
//! bot.start(CancellationToken::new())?;
//! bot.send_msg(&Msg::new("CVE-2024-0001").with_link("https://example.com")).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod worker;

pub use config::{ENV_PREFIX, LanxinSettings};
pub use worker::DeliveryFailure;

use crate::message::{Msg, format_msg};
use crate::notifier::Notifier;
use crate::signature::LanxinSigner;
use crate::{BotError, Result};
use async_trait::async_trait;
use beacon_config::Validate;
use beacon_http_client::{build_client, build_client_with_proxy};
use parking_lot::Mutex;
use std::fmt;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use worker::{DeliveryWorker, Handoff, run_error_sink};

/// Display name of the Lanxin bot
pub const LANXIN_BOT_NAME: &str = "lanxin bot";

const FAILURE_CAPACITY: usize = 64;

type Receivers = (mpsc::Receiver<Handoff>, mpsc::Receiver<BotError>);

/// Notifier posting text messages to a Lanxin group bot webhook
pub struct LanxinBot {
    webhook: String,
    proxy: String,
    signer: LanxinSigner,
    http: reqwest::Client,
    msg_tx: mpsc::Sender<Handoff>,
    err_tx: mpsc::Sender<BotError>,
    receivers: Mutex<Option<Receivers>>,
    failures: broadcast::Sender<DeliveryFailure>,
}

impl LanxinBot {
    /// Create a bot with default HTTP settings.
    ///
    /// Only the proxy is checked here; an empty secret or webhook surfaces
    /// later as a delivery failure. Use [`LanxinBot::from_settings`] for
    /// validated construction.
    pub fn new(
        secret: impl Into<String>,
        webhook: impl Into<String>,
        proxy: impl Into<String>,
    ) -> Result<Self> {
        let proxy = proxy.into();
        let http = build_client_with_proxy(&proxy)?;
        Ok(Self::with_client(secret.into(), webhook.into(), proxy, http))
    }

    /// Validate settings and create a bot from them.
    pub fn from_settings(settings: &LanxinSettings) -> Result<Self> {
        settings.validate()?;
        let http = build_client(&settings.http_config())?;
        Ok(Self::with_client(
            settings.secret.clone(),
            settings.webhook.clone(),
            settings.proxy.clone(),
            http,
        ))
    }

    /// Create a bot from `LANXIN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_settings(&LanxinSettings::from_env()?)
    }

    fn with_client(secret: String, webhook: String, proxy: String, http: reqwest::Client) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(1);
        let (err_tx, err_rx) = mpsc::channel(1);
        let (failures, _) = broadcast::channel(FAILURE_CAPACITY);

        debug!(webhook = %webhook, proxied = !proxy.is_empty(), "Created Lanxin bot");

        Self {
            webhook,
            proxy,
            signer: LanxinSigner::new(secret),
            http,
            msg_tx,
            err_tx,
            receivers: Mutex::new(Some((msg_rx, err_rx))),
            failures,
        }
    }

    pub fn webhook(&self) -> &str {
        &self.webhook
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    /// Whether [`Notifier::start`] has been called successfully.
    pub fn is_started(&self) -> bool {
        self.receivers.lock().is_none()
    }

    /// Receive every delivery failure from now on.
    pub fn subscribe_failures(&self) -> broadcast::Receiver<DeliveryFailure> {
        self.failures.subscribe()
    }

    /// Fan-out to several webhooks is not available for Lanxin.
    pub async fn send_msg_all_webhooks(&self, _msg: &Msg) -> Result<()> {
        Err(BotError::Unsupported("sending to all webhooks"))
    }
}

#[async_trait]
impl Notifier for LanxinBot {
    fn bot_name(&self) -> &'static str {
        LANXIN_BOT_NAME
    }

    fn start(&self, shutdown: CancellationToken) -> Result<()> {
        let runtime = Handle::try_current().map_err(|_| BotError::NoRuntime)?;
        let (msg_rx, err_rx) = self.receivers.lock().take().ok_or(BotError::AlreadyStarted)?;

        let worker = DeliveryWorker {
            webhook: self.webhook.clone(),
            signer: self.signer.clone(),
            http: self.http.clone(),
        };

        runtime.spawn(worker.run(msg_rx, self.err_tx.clone(), shutdown.clone()));
        runtime.spawn(run_error_sink(
            LANXIN_BOT_NAME,
            err_rx,
            self.failures.clone(),
            shutdown,
        ));

        info!("{} started", LANXIN_BOT_NAME);
        Ok(())
    }

    /// Returns once the worker has taken the message, before it is delivered.
    async fn send_msg(&self, msg: &Msg) -> Result<()> {
        let (accepted, ack) = oneshot::channel();
        let handoff = Handoff {
            content: format_msg(msg),
            accepted,
        };

        self.msg_tx
            .send(handoff)
            .await
            .map_err(|_| BotError::Stopped)?;
        ack.await.map_err(|_| BotError::Stopped)
    }
}

impl fmt::Debug for LanxinBot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanxinBot")
            .field("webhook", &self.webhook)
            .field("proxy", &self.proxy)
            .field("started", &self.is_started())
            .finish_non_exhaustive()
    }
}
