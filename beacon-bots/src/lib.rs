//! # Beacon Bots
//!
//! Chat webhook notifiers for relaying security bulletins and similar
//! announcements.
//!
//! ## Features
//!
//! - **Lanxin**: signed text messages to a Lanxin group bot webhook
//! - **Background delivery**: `send_msg` returns once the message is
//!   accepted, a worker task does the HTTP call
//! - **Failure reporting**: delivery errors are logged and can be
//!   subscribed to
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use beacon_bots::{LanxinBot, Msg, Notifier};
//! use tokio_util::sync::CancellationToken;
//!
//! let shutdown = CancellationToken::new();
//! let bot = LanxinBot::from_env()?;
//! bot.start(shutdown.clone())?;
//!
//! bot.send_msg(&Msg::new("CVE-2024-3094").with_link("https://nvd.nist.gov/vuln/detail/CVE-2024-3094"))
//!     .await?;
//!
//! shutdown.cancel();
//! ```

mod error;
mod message;
mod notifier;

pub mod lanxin;
pub mod payload;
pub mod signature;
pub mod status;

pub use error::BotError;
pub use lanxin::{DeliveryFailure, LANXIN_BOT_NAME, LanxinBot, LanxinSettings};
pub use message::{Msg, format_msg};
pub use notifier::{Notifier, NotifierHub};

/// Re-exported so callers can build shutdown tokens without a direct dependency.
pub use tokio_util::sync::CancellationToken;

/// Result type for notifier operations.
pub type Result<T> = std::result::Result<T, BotError>;
