//! Send one bulletin to a Lanxin group bot.
//!
//! ```text
//! LANXIN_SECRET=... LANXIN_WEBHOOK='https://apigw.lanxin.cn/v1/bot/hook/messages/create?hook_token=...' \
//!     cargo run --example lanxin_notify
//! ```
//!
//! Set `LANXIN_PROXY` to route through an HTTP proxy.

use beacon::prelude::*;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let _guard = LogConfig::new()
        .level(LogLevel::Debug)
        .format(LogFormat::Pretty)
        .init()?;

    let settings = LanxinSettings::from_env()?;
    info!(settings = ?settings, "Loaded Lanxin settings");

    let bot = LanxinBot::from_settings(&settings)?;
    let mut failures = bot.subscribe_failures();

    let shutdown = CancellationToken::new();
    bot.start(shutdown.clone())?;

    let msg = Msg::new("CVE-2024-3094: xz/liblzma backdoor")
        .with_summary("Malicious code in upstream xz tarballs 5.6.0 and 5.6.1")
        .with_published("2024-03-29")
        .with_link("https://nvd.nist.gov/vuln/detail/CVE-2024-3094");

    bot.send_msg(&msg).await?;
    info!("Message handed to {}", bot.bot_name());

    // Give the worker time to deliver before shutting down.
    match tokio::time::timeout(Duration::from_secs(5), failures.recv()).await {
        Ok(Ok(failure)) => error!(code = ?failure.code, "Delivery failed: {}", failure.message),
        _ => info!("No delivery failure reported"),
    }

    shutdown.cancel();
    Ok(())
}
