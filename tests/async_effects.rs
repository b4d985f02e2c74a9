//! Effects that start asynchronous work and report back through `send`.
//!
//! The host here is a tokio task: the observer wakes it whenever a
//! transition schedules effects, and it flushes in response.

use reactive_fsm::{Cleanup, Machine, Observer, StateMachineBuilder, StateNode};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

const RETRY_LIMIT: u32 = 3;

#[derive(Clone, Debug, Default, PartialEq)]
struct Fetch {
    retry: u32,
    data: String,
}

type Node = StateNode<&'static str, &'static str, Fetch>;
type FetchMachine = Machine<&'static str, &'static str, Fetch>;

struct Wake(mpsc::UnboundedSender<()>);

impl Observer for Wake {
    fn effects_scheduled(&self) {
        let _ = self.0.send(());
    }
}

/// Scripted responses: `Some(body)` succeeds, `None` fails.
fn fetch_machine(
    responses: Vec<Option<&'static str>>,
    attempts: Arc<AtomicUsize>,
    wake: mpsc::UnboundedSender<()>,
) -> FetchMachine {
    let responses = Arc::new(Mutex::new(VecDeque::from(responses)));

    StateMachineBuilder::default()
        .initial("idle")
        .observer(Wake(wake))
        .state("idle", Node::new().on("fetch", "loading"))
        .state(
            "loading",
            Node::new()
                .on("success", "done")
                .on("error", "failed")
                .effect(move |args| {
                    let send = args.send.clone();
                    let set_context = args.set_context.clone();
                    let responses = Arc::clone(&responses);
                    let attempts = Arc::clone(&attempts);
                    tokio::spawn(async move {
                        tokio::task::yield_now().await;
                        attempts.fetch_add(1, Ordering::SeqCst);
                        let response = responses.lock().unwrap().pop_front().flatten();
                        match response {
                            Some(body) => {
                                set_context.set(move |ctx| Fetch {
                                    data: body.to_string(),
                                    ..ctx.clone()
                                });
                                send.send("success");
                            }
                            None => send.send("error"),
                        }
                    });
                    None
                }),
        )
        .state("done", Node::new())
        .state(
            "failed",
            Node::new().on("retry", "loading").effect(|args| {
                if args.context.retry < RETRY_LIMIT {
                    args.set_context.set(|ctx| Fetch {
                        retry: ctx.retry + 1,
                        ..ctx.clone()
                    });
                    args.send.send("retry");
                }
                None
            }),
        )
        .build()
        .unwrap()
}

/// Flush on every wake-up until `settled` holds with no effects pending.
async fn drive(
    machine: &FetchMachine,
    wake: &mut mpsc::UnboundedReceiver<()>,
    settled: impl Fn(&FetchMachine) -> bool,
) {
    let run = async {
        loop {
            machine.flush().unwrap();
            if !machine.has_pending_effects() && settled(machine) {
                return;
            }
            wake.recv().await;
        }
    };

    tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("machine did not settle");
}

#[tokio::test]
async fn fetch_succeeds_after_retries() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let attempts = Arc::new(AtomicUsize::new(0));
    let machine = fetch_machine(vec![None, None, Some("luke")], Arc::clone(&attempts), tx);
    machine.flush().unwrap();

    machine.send("fetch");
    drive(&machine, &mut rx, |m| m.snapshot().matches(&"done")).await;

    let snapshot = machine.snapshot();
    assert_eq!(snapshot.context().retry, 2);
    assert_eq!(snapshot.context().data, "luke");
    assert!(snapshot.next_events().is_empty());
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn fetch_gives_up_at_retry_limit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let attempts = Arc::new(AtomicUsize::new(0));
    let machine = fetch_machine(vec![None; 10], Arc::clone(&attempts), tx);
    machine.flush().unwrap();

    machine.send("fetch");
    drive(&machine, &mut rx, |m| {
        let snapshot = m.snapshot();
        snapshot.matches(&"failed") && snapshot.context().retry >= RETRY_LIMIT
    })
    .await;

    let snapshot = machine.snapshot();
    assert_eq!(snapshot.value(), &"failed");
    assert_eq!(snapshot.context().retry, RETRY_LIMIT);
    assert_eq!(snapshot.context().data, "");
    assert_eq!(snapshot.next_events(), &["retry"]);
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
}

mod cancellation {
    use super::*;

    type Slot = Arc<Mutex<Option<JoinHandle<()>>>>;

    /// `loading` waits for `release` before reporting success.
    fn build(release: Arc<Notify>, slot: Slot, abort_on_exit: bool) -> FetchMachine {
        StateMachineBuilder::default()
            .initial("idle")
            .state("idle", Node::new().on("fetch", "loading"))
            .state(
                "loading",
                Node::new()
                    .on("cancel", "idle")
                    .on("success", "done")
                    .effect(move |args| {
                        let send = args.send.clone();
                        let release = Arc::clone(&release);
                        let handle = tokio::spawn(async move {
                            release.notified().await;
                            send.send("success");
                        });
                        let abort = handle.abort_handle();
                        *slot.lock().unwrap() = Some(handle);
                        abort_on_exit.then(|| Cleanup::new(move || abort.abort()))
                    }),
            )
            .state("done", Node::new())
            .build()
            .unwrap()
    }

    fn take(slot: &Slot) -> JoinHandle<()> {
        slot.lock().unwrap().take().unwrap()
    }

    #[tokio::test]
    async fn stale_send_after_exit_is_ignored() {
        let release = Arc::new(Notify::new());
        let slot = Slot::default();
        let machine = build(Arc::clone(&release), Arc::clone(&slot), false);
        machine.flush().unwrap();

        machine.act(|m| m.send("fetch")).unwrap();
        machine.act(|m| m.send("cancel")).unwrap();
        release.notify_one();
        take(&slot).await.unwrap();

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.value(), &"idle");
        assert_eq!(snapshot.event().name(), Some(&"cancel"));
        assert!(!machine.has_pending_effects());
    }

    #[tokio::test]
    async fn cleanup_aborts_in_flight_work() {
        let release = Arc::new(Notify::new());
        let slot = Slot::default();
        let machine = build(Arc::clone(&release), Arc::clone(&slot), true);
        machine.flush().unwrap();

        machine.act(|m| m.send("fetch")).unwrap();
        let handle = take(&slot);
        machine.act(|m| m.send("cancel")).unwrap();

        let outcome = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("aborted task did not finish");
        assert!(outcome.unwrap_err().is_cancelled());
        assert_eq!(machine.snapshot().value(), &"idle");
    }
}
