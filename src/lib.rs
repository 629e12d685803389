// Beacon - relay announcements to chat webhook bots
//
// This library wires together the notifier core, HTTP client factory,
// configuration loading and logging setup.

// Re-export notifier functionality
pub use beacon_bots::*;

pub use beacon_http_client as http_client;

#[cfg(feature = "config")]
pub use beacon_config as config;

#[cfg(feature = "log")]
pub use beacon_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BotError,
        CancellationToken,
        DeliveryFailure,
        LanxinBot,
        LanxinSettings,
        Msg,
        Notifier,
        NotifierHub,
        Result,
        format_msg,
    };

    #[cfg(feature = "log")]
    pub use beacon_log::{LogConfig, LogFormat, LogLevel, LogOutput};

    pub use async_trait::async_trait;
}
