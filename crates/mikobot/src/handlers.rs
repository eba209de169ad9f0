//! The bot's event handlers.
//!
//! One handler struct covers all three session events:
//! - registration: apply bot mode when advertised, join the configured
//!   channels
//! - chat messages: purr when patted, scramble when called cute,
//!   optionally echo "meow"
//! - keepalive pings: occasionally meow into the first channel

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use mikobot_client::{ChatMessage, EventHandler, Session};
use mikobot_proto::ctcp;

use crate::config::BotConfig;
use crate::replies;
use crate::rng::uniform;

/// Substring that triggers a scramble denial.
const CUTE_TRIGGER: &str = "mikobot cute";

/// The keyword, and the reply, for the meow behaviors.
const MEOW: &str = "meow";

/// The one event handler the bot registers.
pub struct MikoHandler {
    config: Arc<BotConfig>,
}

impl MikoHandler {
    pub fn new(config: Arc<BotConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EventHandler for MikoHandler {
    async fn on_registered(&self, session: &Session) {
        match session.isupport("BOT") {
            Some(flag) if !flag.is_empty() => {
                let nick = session.current_nick();
                info!(flag = %flag, "Server advertises a bot mode, applying");
                if let Err(err) = session.send_mode(&nick, &format!("+{flag}")).await {
                    warn!(error = %err, "Failed to queue the bot mode change");
                }
            }
            _ => debug!("No bot mode advertised"),
        }

        for channel in &self.config.channels {
            info!(channel = %channel, "Joining");
            if let Err(err) = session.join(channel).await {
                warn!(error = %err, channel = %channel, "Failed to queue the join");
            }
        }
    }

    async fn on_message(&self, session: &Session, msg: &ChatMessage) {
        let text = msg.text.to_lowercase();

        // The triggers are independent; one message may earn several
        // replies, queued in trigger order.
        let pat = ctcp::action(&format!("pats {}", session.current_nick())).to_lowercase();
        if text.contains(&pat) {
            debug!(target = %msg.reply_target, "Patted, purring");
            if let Err(err) = session.privmsg(&msg.reply_target, &replies::purr()).await {
                warn!(error = %err, "Failed to queue the purr reply");
            }
        }

        if text.contains(CUTE_TRIGGER) {
            debug!(target = %msg.reply_target, "Called cute, scrambling");
            if let Err(err) = session.privmsg(&msg.reply_target, &replies::scramble()).await {
                warn!(error = %err, "Failed to queue the scramble reply");
            }
        }

        if self.config.behavior.echo_meow && text.contains(MEOW) {
            debug!(target = %msg.reply_target, "Echoing a meow");
            if let Err(err) = session.privmsg(&msg.reply_target, MEOW).await {
                warn!(error = %err, "Failed to queue the meow echo");
            }
        }
    }

    async fn on_ping(&self, session: &Session) {
        let behavior = &self.config.behavior;
        if uniform(behavior.meow_low, behavior.meow_high) != behavior.meow_low {
            return;
        }
        let Some(channel) = self.config.channels.first() else {
            return;
        };
        debug!(channel = %channel, "Keepalive meow");
        if let Err(err) = session.privmsg(channel, MEOW).await {
            warn!(error = %err, "Failed to queue the keepalive meow");
        }
    }
}
