//! Menu Session
//!
//! One interactive session is a loop over [`SessionState`]:
//!
//! ```text
//! ShowMenu ──(exit chosen)──────────────────────► Exit
//!    │
//!    └─(action, target, channel)─► PerformAction ──► ShowMenu
//! ```
//!
//! End of input on any prompt moves straight to `Exit`.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use relay_core::Order;

use crate::application::ports::{
    NoticeLevel, OrderPublisher, PromptError, PublishOutcome, PublishTarget, Terminal,
};
use crate::domain::order_generator::OrderGenerator;
use crate::infrastructure::config::SimulatorConfig;

/// Default channel name offered at the prompt.
pub const DEFAULT_CHANNEL: &str = "default";

/// Default item for a hand-entered order.
pub const DEFAULT_ITEM: &str = "Test Product";

/// Default amount for a hand-entered order.
pub const DEFAULT_AMOUNT: f64 = 100.0;

/// Default batch size for the "multiple" action.
pub const DEFAULT_BATCH_SIZE: f64 = 5.0;

// =============================================================================
// Session Types
// =============================================================================

/// Top-level menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Prompt for every field of one order.
    Single,
    /// Send a batch of generated orders.
    Multiple,
    /// Send one generated order.
    Random,
    /// Leave the session.
    Exit,
}

impl MenuAction {
    /// All entries, in menu order.
    pub const ALL: [Self; 4] = [Self::Single, Self::Multiple, Self::Random, Self::Exit];

    /// Menu label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Single => "Send single order",
            Self::Multiple => "Send multiple orders",
            Self::Random => "Send random order",
            Self::Exit => "Exit",
        }
    }
}

/// What the operator asked for on one pass through the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Chosen action (never `Exit`).
    pub action: MenuAction,
    /// Private or public endpoint.
    pub target: PublishTarget,
    /// Logical channel name.
    pub channel: String,
}

/// Session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Draw the banner and ask for the next action.
    ShowMenu,
    /// Run one action, then pause.
    PerformAction(PublishRequest),
    /// Session is over.
    Exit,
}

/// Counters reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Menu actions performed.
    pub actions: usize,
    /// Orders the relay accepted.
    pub sent: usize,
    /// Orders that failed.
    pub failed: usize,
}

/// Display and pacing settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Private endpoint shown in the banner.
    pub api_url: String,
    /// Truncated secret shown in the banner.
    pub secret_preview: String,
    /// Pause after each order of a batch.
    pub order_delay: Duration,
}

impl From<&SimulatorConfig> for SessionSettings {
    fn from(config: &SimulatorConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            secret_preview: config.time_token_secret.preview(),
            order_delay: config.order_delay,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Interactive publisher session.
pub struct SimulatorSession<P, T, R = StdRng> {
    publisher: P,
    terminal: T,
    generator: OrderGenerator<R>,
    settings: SessionSettings,
    summary: SessionSummary,
}

impl<P, T, R> SimulatorSession<P, T, R>
where
    P: OrderPublisher,
    T: Terminal,
    R: Rng + Send,
{
    /// Assemble a session.
    pub const fn new(
        publisher: P,
        terminal: T,
        generator: OrderGenerator<R>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            publisher,
            terminal,
            generator,
            settings,
            summary: SessionSummary {
                actions: 0,
                sent: 0,
                failed: 0,
            },
        }
    }

    /// Counters so far.
    pub const fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// The terminal adapter.
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Consume the session, returning the terminal adapter.
    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Drive the session until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] if the console fails. End of input is
    /// not an error.
    pub async fn run(&mut self) -> Result<SessionSummary, PromptError> {
        let mut state = SessionState::ShowMenu;

        loop {
            if state == SessionState::Exit {
                self.terminal.notify(NoticeLevel::Farewell, "Goodbye!");
                tracing::info!(
                    actions = self.summary.actions,
                    sent = self.summary.sent,
                    failed = self.summary.failed,
                    "Session ended"
                );
                return Ok(self.summary);
            }

            state = match self.step(state).await {
                Ok(next) => next,
                Err(PromptError::Closed) => {
                    tracing::debug!("Input closed, leaving session");
                    SessionState::Exit
                }
                Err(e) => return Err(e),
            };
        }
    }

    /// Advance one transition.
    ///
    /// # Errors
    ///
    /// Propagates prompt failures, including [`PromptError::Closed`].
    pub async fn step(&mut self, state: SessionState) -> Result<SessionState, PromptError> {
        match state {
            SessionState::ShowMenu => self.show_menu().await,
            SessionState::PerformAction(request) => {
                self.perform(&request).await?;
                self.summary.actions += 1;
                self.terminal.notify(NoticeLevel::Info, "");
                self.terminal.pause("Press Enter to continue...").await?;
                Ok(SessionState::ShowMenu)
            }
            SessionState::Exit => Ok(SessionState::Exit),
        }
    }

    async fn show_menu(&mut self) -> Result<SessionState, PromptError> {
        self.terminal.clear();
        self.terminal
            .notify(NoticeLevel::Title, "Backend Order Simulator");
        let endpoint = format!("Microservice URL: {}", self.settings.api_url);
        self.terminal.notify(NoticeLevel::Muted, &endpoint);
        let secret = format!("Time Token Secret: {}", self.settings.secret_preview);
        self.terminal.notify(NoticeLevel::Muted, &secret);
        self.terminal.notify(NoticeLevel::Info, "");

        let labels = MenuAction::ALL.map(|a| a.label());
        let choice = self.terminal.select("Select an action:", &labels, 0).await?;
        let action = MenuAction::ALL[choice.min(MenuAction::ALL.len() - 1)];
        if action == MenuAction::Exit {
            return Ok(SessionState::Exit);
        }

        let targets = [PublishTarget::Private, PublishTarget::Public];
        let target_labels = targets.map(|t| t.label());
        let choice = self
            .terminal
            .select("Select channel to publish to:", &target_labels, 0)
            .await?;
        let target = targets[choice.min(targets.len() - 1)];

        let channel = self
            .terminal
            .input("Channel name to publish to:", DEFAULT_CHANNEL)
            .await?;

        Ok(SessionState::PerformAction(PublishRequest {
            action,
            target,
            channel,
        }))
    }

    async fn perform(&mut self, request: &PublishRequest) -> Result<(), PromptError> {
        tracing::debug!(
            action = ?request.action,
            target = request.target.as_str(),
            channel = %request.channel,
            "Performing menu action"
        );

        match request.action {
            MenuAction::Single => self.send_single(request).await,
            MenuAction::Multiple => self.send_multiple(request).await,
            MenuAction::Random => {
                self.send_random(request).await;
                Ok(())
            }
            MenuAction::Exit => Ok(()),
        }
    }

    async fn send_single(&mut self, request: &PublishRequest) -> Result<(), PromptError> {
        let default_id = format!("order-{}", chrono::Utc::now().timestamp_millis());
        let id = self.terminal.input("Order ID:", &default_id).await?;
        let item = self.terminal.input("Item:", DEFAULT_ITEM).await?;
        let amount = self.terminal.number("Amount:", DEFAULT_AMOUNT).await?;

        let order = Order::new(id, item, amount);
        if let Err(e) = order.validate() {
            tracing::warn!(error = %e, "Order will likely be rejected by the relay");
        }

        match self.publish(&order, request).await {
            PublishOutcome::Sent { .. } => {
                self.terminal
                    .notify(NoticeLevel::Success, "Order sent successfully!");
            }
            PublishOutcome::Failed { error } => {
                let line = format!("Failed to send order: {error}");
                self.terminal.notify(NoticeLevel::Failure, &line);
            }
        }
        Ok(())
    }

    async fn send_multiple(&mut self, request: &PublishRequest) -> Result<(), PromptError> {
        let count = loop {
            let value = self
                .terminal
                .number("How many orders to send?", DEFAULT_BATCH_SIZE)
                .await?;
            if value > 0.0 {
                break batch_size(value);
            }
            self.terminal
                .notify(NoticeLevel::Failure, "Please enter a positive number");
        };

        let heading = format!("Sending {count} orders...");
        self.terminal.notify(NoticeLevel::Info, &heading);

        for i in 1..=count {
            let order = self.generator.generate();
            let (level, line) = match self.publish(&order, request).await {
                PublishOutcome::Sent { .. } => (
                    NoticeLevel::Success,
                    format!("[{i}/{count}] Order {} sent", order.id),
                ),
                PublishOutcome::Failed { error } => (
                    NoticeLevel::Failure,
                    format!("[{i}/{count}] Failed: {error}"),
                ),
            };
            self.terminal.notify(level, &line);

            tokio::time::sleep(self.settings.order_delay).await;
        }
        Ok(())
    }

    async fn send_random(&mut self, request: &PublishRequest) {
        let order = self.generator.generate();
        let generated = format!(
            "Generated order: {} | {} | {}",
            order.id,
            order.item,
            order.amount_display()
        );
        self.terminal.notify(NoticeLevel::Info, &generated);

        match self.publish(&order, request).await {
            PublishOutcome::Sent { .. } => {
                self.terminal
                    .notify(NoticeLevel::Success, "Random order sent successfully!");
            }
            PublishOutcome::Failed { error } => {
                let line = format!("Failed to send order: {error}");
                self.terminal.notify(NoticeLevel::Failure, &line);
            }
        }
    }

    async fn publish(&mut self, order: &Order, request: &PublishRequest) -> PublishOutcome {
        let outcome = self
            .publisher
            .publish(order, request.target, &request.channel)
            .await;
        if outcome.is_sent() {
            self.summary.sent += 1;
        } else {
            self.summary.failed += 1;
        }
        outcome
    }
}

/// Whole orders to send for a positive prompt answer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn batch_size(value: f64) -> u32 {
    value.floor().min(f64::from(u32::MAX)) as u32
}
