//! Engine integration tests: real time, short deadlines.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use beacon_scheduler::{ScheduledJob, Scheduler, SchedulerError};

fn in_ms(ms: i64) -> chrono::DateTime<Utc> {
    Utc::now() + chrono::Duration::milliseconds(ms)
}

struct Running {
    handle: beacon_scheduler::SchedulerHandle,
    rx: mpsc::Receiver<ScheduledJob>,
    stop: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

fn start_engine() -> Running {
    let (tx, rx) = mpsc::channel(256);
    let engine = Scheduler::new(tx);
    let handle = engine.handle();
    let (stop, stop_rx) = watch::channel(false);
    let task = tokio::spawn(engine.run(stop_rx));
    Running {
        handle,
        rx,
        stop,
        task,
    }
}

async fn recv_within(rx: &mut mpsc::Receiver<ScheduledJob>, ms: u64) -> ScheduledJob {
    tokio::time::timeout(Duration::from_millis(ms), rx.recv())
        .await
        .expect("job did not fire in time")
        .expect("fired channel closed")
}

#[tokio::test]
async fn job_fires_exactly_once_and_leaves_the_queue() {
    let mut eng = start_engine();

    let id = eng
        .handle
        .schedule(in_ms(300), "chat-1", "stand up")
        .unwrap();
    assert_eq!(eng.handle.pending(), 1);

    let fired = recv_within(&mut eng.rx, 1500).await;
    assert_eq!(fired.id, id);
    assert_eq!(fired.destination, "chat-1");
    assert_eq!(fired.payload, "stand up");
    assert_eq!(eng.handle.pending(), 0);

    // Nothing else ever arrives for this job.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(eng.rx.try_recv().is_err());

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}

#[tokio::test]
async fn stop_before_any_fire_discards_everything() {
    let mut eng = start_engine();

    for i in 0..100i64 {
        eng.handle
            .schedule(in_ms(5_000 + i), "chat-1", format!("job {i}"))
            .unwrap();
    }
    assert_eq!(eng.handle.pending(), 100);

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();

    // Engine gone → sender dropped → recv drains to None with zero items.
    assert!(eng.rx.recv().await.is_none());
}

#[tokio::test]
async fn earlier_insert_rearms_the_wait() {
    let mut eng = start_engine();

    let late = eng.handle.schedule(in_ms(2_000), "chat-1", "late").unwrap();
    // The engine is now sleeping towards +2s; this must cut in front.
    let early = eng.handle.schedule(in_ms(200), "chat-1", "early").unwrap();

    let first = recv_within(&mut eng.rx, 1000).await;
    assert_eq!(first.id, early, "earlier deadline must fire first");
    assert_eq!(eng.handle.pending(), 1);

    eng.handle.cancel(late);
    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}

#[tokio::test]
async fn equal_deadlines_fire_in_insertion_order() {
    let mut eng = start_engine();

    let at = in_ms(300);
    let a = eng.handle.schedule(at, "chat-1", "a").unwrap();
    let b = eng.handle.schedule(at, "chat-1", "b").unwrap();

    assert_eq!(recv_within(&mut eng.rx, 1500).await.id, a);
    assert_eq!(recv_within(&mut eng.rx, 1500).await.id, b);

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}

#[tokio::test]
async fn cancel_removes_a_pending_job() {
    let mut eng = start_engine();

    let id = eng.handle.schedule(in_ms(300), "chat-1", "never").unwrap();
    eng.handle.cancel(id);
    assert_eq!(eng.handle.pending(), 0);

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(eng.rx.try_recv().is_err(), "cancelled job must not fire");

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}

#[tokio::test]
async fn cancel_of_unknown_or_fired_id_is_a_noop() {
    let mut eng = start_engine();

    // Unknown id.
    eng.handle.cancel(Uuid::new_v4());
    assert_eq!(eng.handle.pending(), 0);

    // Already fired.
    let id = eng.handle.schedule(in_ms(200), "chat-1", "x").unwrap();
    let fired = recv_within(&mut eng.rx, 1000).await;
    assert_eq!(fired.id, id);
    eng.handle.cancel(id);
    assert_eq!(eng.handle.pending(), 0);

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}

#[tokio::test]
async fn past_deadline_is_rejected() {
    let eng = start_engine();

    let err = eng
        .handle
        .schedule(Utc::now() - chrono::Duration::seconds(1), "chat-1", "no")
        .unwrap_err();
    assert!(matches!(err, SchedulerError::PastTime { .. }));
    assert_eq!(eng.handle.pending(), 0);

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}

#[tokio::test]
async fn scheduling_keeps_working_while_engine_waits() {
    let mut eng = start_engine();

    // A far-future job keeps the engine asleep; inserts must still return
    // immediately and land in the queue.
    eng.handle.schedule(in_ms(10_000), "chat-1", "far").unwrap();
    for i in 0..50i64 {
        eng.handle
            .schedule(in_ms(8_000 + i), "chat-1", "filler")
            .unwrap();
    }
    assert_eq!(eng.handle.pending(), 51);

    // And an early job still preempts the whole pile.
    let early = eng.handle.schedule(in_ms(200), "chat-1", "go").unwrap();
    assert_eq!(recv_within(&mut eng.rx, 1000).await.id, early);

    eng.stop.send(true).unwrap();
    eng.task.await.unwrap();
}
