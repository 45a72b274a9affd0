//! Delivery loop for fired jobs: one send attempt each, best effort.

use tokio::sync::mpsc;
use tracing::{info, warn};

use beacon_core::outbound::Outbound;

use crate::types::ScheduledJob;

/// Consumes fired jobs and performs exactly one outbound send per job.
///
/// A failed send is logged with its cause and the job is dropped: no
/// retry, no requeue, and the requester is not notified. One job's failure
/// never affects the jobs behind it.
pub struct Dispatcher<O: Outbound> {
    outbound: O,
    /// Header line prepended to every reminder (club branding). Empty
    /// delivers the payload bare.
    banner: String,
}

impl<O: Outbound> Dispatcher<O> {
    pub fn new(outbound: O, banner: impl Into<String>) -> Self {
        Self {
            outbound,
            banner: banner.into(),
        }
    }

    /// Run until the engine side closes the channel.
    pub async fn run(self, mut rx: mpsc::Receiver<ScheduledJob>) {
        info!("dispatcher started");
        while let Some(job) = rx.recv().await {
            let text = if self.banner.is_empty() {
                job.payload.clone()
            } else {
                format!("{}\n\n{}", self.banner, job.payload)
            };

            match self.outbound.send_text(&job.destination, &text).await {
                Ok(()) => {
                    info!(job_id = %job.id, destination = %job.destination, "reminder delivered");
                }
                Err(e) => {
                    warn!(job_id = %job.id, error = %e, "reminder delivery failed, job dropped");
                }
            }
        }
        info!("dispatcher stopped (channel closed)");
    }
}
