//! Menu Session Integration Tests
//!
//! Scripted stdin drives the real console adapter through the session state
//! machine against a recording publisher.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use backend_simulator::{
    ConsoleTerminal, OrderGenerator, OrderPublisher, PublishOutcome, PublishTarget,
    SessionSettings, SessionState, SessionSummary, SimulatorSession,
};
use relay_core::Order;
use tokio::io::BufReader;

type Call = (Order, PublishTarget, String);
type ScriptTerminal = ConsoleTerminal<BufReader<&'static [u8]>, Vec<u8>>;

#[derive(Clone, Default)]
struct RecordingPublisher {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_on: Option<usize>,
}

impl RecordingPublisher {
    fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderPublisher for RecordingPublisher {
    async fn publish(&self, order: &Order, target: PublishTarget, channel: &str) -> PublishOutcome {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((order.clone(), target, channel.to_string()));
            calls.len()
        };

        if self.fail_on == Some(n) {
            PublishOutcome::Failed {
                error: "boom".to_string(),
            }
        } else {
            PublishOutcome::Sent { response: None }
        }
    }
}

fn settings() -> SessionSettings {
    SessionSettings {
        api_url: "http://localhost:8080/update".to_string(),
        secret_preview: "your-time-...".to_string(),
        order_delay: Duration::ZERO,
    }
}

fn session(
    publisher: RecordingPublisher,
    script: &'static str,
) -> SimulatorSession<RecordingPublisher, ScriptTerminal> {
    let terminal = ConsoleTerminal::new(BufReader::new(script.as_bytes()), Vec::new(), false);
    SimulatorSession::new(publisher, terminal, OrderGenerator::seeded(11), settings())
}

async fn run_script(
    publisher: RecordingPublisher,
    script: &'static str,
) -> (SessionSummary, String) {
    let mut session = session(publisher, script);
    let summary = session.run().await.unwrap();
    let output = String::from_utf8(session.into_terminal().into_writer()).unwrap();
    (summary, output)
}

#[tokio::test]
async fn single_order_with_typed_fields() {
    let publisher = RecordingPublisher::default();
    // single, private, channel "vip", id, item, amount, Enter, exit
    let script = "1\n1\nvip\nmy-id\nWidget\n42\n\n4\n";

    let (summary, output) = run_script(publisher.clone(), script).await;

    assert_eq!(
        publisher.calls(),
        vec![(
            Order::new("my-id", "Widget", 42.0),
            PublishTarget::Private,
            "vip".to_string()
        )]
    );
    assert_eq!(
        summary,
        SessionSummary {
            actions: 1,
            sent: 1,
            failed: 0
        }
    );
    assert!(output.contains("Backend Order Simulator"));
    assert!(output.contains("Microservice URL: http://localhost:8080/update"));
    assert!(output.contains("Time Token Secret: your-time-..."));
    assert!(output.contains("Order sent successfully!"));
    assert!(output.contains("Press Enter to continue..."));
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn single_order_defaults() {
    let publisher = RecordingPublisher::default();
    let script = "1\n\n\n\n\n\n\n4\n";

    run_script(publisher.clone(), script).await;

    let calls = publisher.calls();
    assert_eq!(calls.len(), 1);
    let (order, target, channel) = &calls[0];
    assert!(order.id.starts_with("order-"));
    assert_eq!(order.item, "Test Product");
    assert_eq!(order.amount, 100.0);
    assert_eq!(*target, PublishTarget::Private);
    assert_eq!(channel, "default");
}

#[tokio::test]
async fn multiple_orders_reprompt_and_report_each() {
    let publisher = RecordingPublisher::failing_on(2);
    // multiple, public, default channel, count 0 (rejected), count 3, Enter, then EOF
    let script = "2\n2\n\n0\n3\n\n";

    let (summary, output) = run_script(publisher.clone(), script).await;

    let calls = publisher.calls();
    assert_eq!(calls.len(), 3);
    assert!(
        calls
            .iter()
            .all(|(_, target, channel)| *target == PublishTarget::Public && channel == "default")
    );
    assert_eq!(
        summary,
        SessionSummary {
            actions: 1,
            sent: 2,
            failed: 1
        }
    );
    assert!(output.contains("Please enter a positive number"));
    assert!(output.contains("Sending 3 orders..."));
    assert!(output.contains(&format!("[1/3] Order {} sent", calls[0].0.id)));
    assert!(output.contains("[2/3] Failed: boom"));
    assert!(output.contains(&format!("[3/3] Order {} sent", calls[2].0.id)));
}

#[tokio::test]
async fn random_order_failure_is_reported() {
    let publisher = RecordingPublisher::failing_on(1);
    let script = "3\n1\nalerts\n\n4\n";

    let (summary, output) = run_script(publisher.clone(), script).await;

    let calls = publisher.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.validate().is_ok());
    assert_eq!(calls[0].2, "alerts");
    assert_eq!(summary.failed, 1);
    assert!(output.contains(&format!("Generated order: {}", calls[0].0.id)));
    assert!(output.contains("Failed to send order: boom"));
}

#[tokio::test]
async fn end_of_input_mid_menu_exits_cleanly() {
    let publisher = RecordingPublisher::default();

    let (summary, output) = run_script(publisher.clone(), "3\n").await;

    assert!(publisher.calls().is_empty());
    assert_eq!(summary, SessionSummary::default());
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn menu_step_transitions() {
    let mut session = session(RecordingPublisher::default(), "2\n2\nops\n4\n");

    let request = match session.step(SessionState::ShowMenu).await.unwrap() {
        SessionState::PerformAction(request) => request,
        other => panic!("expected an action, got {other:?}"),
    };
    assert_eq!(request.target, PublishTarget::Public);
    assert_eq!(request.channel, "ops");

    let exit = session.step(SessionState::ShowMenu).await.unwrap();
    assert_eq!(exit, SessionState::Exit);
    assert_eq!(
        session.step(SessionState::Exit).await.unwrap(),
        SessionState::Exit
    );
}
