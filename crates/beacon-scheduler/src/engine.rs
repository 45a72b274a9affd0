use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch, Notify};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};
use crate::types::ScheduledJob;

/// Queue position: fire time first, insertion order as the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct QueueKey {
    fire_at: DateTime<Utc>,
    seq: u64,
}

#[derive(Default)]
struct JobQueue {
    by_time: BTreeMap<QueueKey, ScheduledJob>,
    by_id: HashMap<Uuid, QueueKey>,
    next_seq: u64,
}

/// State shared between the engine loop and every handle.
struct Shared {
    queue: Mutex<JobQueue>,
    /// Pinged on insert so the engine re-evaluates its sleep deadline.
    rearm: Notify,
}

/// Cloneable mutation handle usable while the engine loop runs.
///
/// `schedule` and `cancel` never block beyond the queue lock (log-time map
/// operations), so command handling is never stalled by a pending wait.
#[derive(Clone)]
pub struct SchedulerHandle {
    shared: Arc<Shared>,
}

impl SchedulerHandle {
    /// Insert a one-shot job. Rejects deadlines that are not strictly in
    /// the future; otherwise returns the new job id immediately.
    pub fn schedule(
        &self,
        fire_at: DateTime<Utc>,
        destination: impl Into<String>,
        payload: impl Into<String>,
    ) -> Result<Uuid> {
        let now = Utc::now();
        if fire_at <= now {
            return Err(SchedulerError::PastTime { fire_at, now });
        }

        let id = Uuid::new_v4();
        {
            let mut q = self.shared.queue.lock().unwrap();
            let key = QueueKey {
                fire_at,
                seq: q.next_seq,
            };
            q.next_seq += 1;
            q.by_time.insert(
                key,
                ScheduledJob {
                    id,
                    fire_at,
                    destination: destination.into(),
                    payload: payload.into(),
                },
            );
            q.by_id.insert(id, key);
        }
        // The new deadline may be earlier than the one the engine is
        // currently sleeping towards.
        self.shared.rearm.notify_one();

        debug!(job_id = %id, fire_at = %fire_at, "job scheduled");
        Ok(id)
    }

    /// Remove a pending job. Unknown or already-fired ids are a silent
    /// no-op: the cancel-vs-fire race is expected and harmless.
    pub fn cancel(&self, id: Uuid) {
        let mut q = self.shared.queue.lock().unwrap();
        if let Some(key) = q.by_id.remove(&id) {
            q.by_time.remove(&key);
            info!(job_id = %id, "job cancelled");
        }
    }

    /// Number of jobs currently waiting to fire.
    pub fn pending(&self) -> usize {
        self.shared.queue.lock().unwrap().by_time.len()
    }
}

/// The owning engine. Construct once at startup, hand out
/// [`SchedulerHandle`]s, then consume it with [`Scheduler::run`]; the
/// by-value receiver makes a second start unrepresentable.
pub struct Scheduler {
    shared: Arc<Shared>,
    fired_tx: mpsc::Sender<ScheduledJob>,
}

impl Scheduler {
    /// Fired jobs are sent to `fired_tx` for delivery routing. The handoff
    /// uses `try_send` so the engine loop is never stalled by a slow
    /// consumer.
    pub fn new(fired_tx: mpsc::Sender<ScheduledJob>) -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(JobQueue::default()),
                rearm: Notify::new(),
            }),
            fired_tx,
        }
    }

    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Main loop. Waits until the earliest deadline, fires everything due,
    /// repeats. Exits promptly when `shutdown` flips to `true`, discarding
    /// whatever is still pending.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("scheduler engine started");
        loop {
            self.fire_due();

            let next = {
                let q = self.shared.queue.lock().unwrap();
                q.by_time.keys().next().map(|k| k.fire_at)
            };

            tokio::select! {
                _ = wait_until(next) => {}
                _ = self.shared.rearm.notified() => {}
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        let discarded = self.shared.queue.lock().unwrap().by_time.len();
        if discarded > 0 {
            warn!(count = discarded, "scheduler stopping; pending jobs discarded");
        }
        info!("scheduler engine stopped");
    }

    /// Pop and forward every job whose deadline has arrived. Each job is
    /// removed from the queue before the handoff, so it can never fire
    /// twice, and a failed handoff never re-queues it.
    fn fire_due(&self) {
        let now = Utc::now();
        loop {
            let job = {
                let mut q = self.shared.queue.lock().unwrap();
                if !q.by_time.keys().next().is_some_and(|k| k.fire_at <= now) {
                    break;
                }
                let Some((_, job)) = q.by_time.pop_first() else {
                    break;
                };
                q.by_id.remove(&job.id);
                job
            };

            info!(job_id = %job.id, destination = %job.destination, "job fired");
            if let Err(e) = self.fired_tx.try_send(job) {
                warn!("fired-job channel full or closed, job dropped: {e}");
            }
        }
    }
}

/// Sleep until `deadline`, or forever when the queue is empty (an insert
/// wakes the loop through the `Notify` arm instead).
async fn wait_until(deadline: Option<DateTime<Utc>>) {
    match deadline {
        Some(at) => {
            let now = Utc::now();
            if at > now {
                let dur = (at - now).to_std().unwrap_or(std::time::Duration::ZERO);
                tokio::time::sleep(dur).await;
            }
            // Already due: return so the loop fires it right away.
        }
        None => std::future::pending::<()>().await,
    }
}
