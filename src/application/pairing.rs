// Pairing service - Timed mock of connecting a new sensor
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

/// How long each step of a pairing attempt is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingDelays {
    pub searching: Duration,
    pub connected: Duration,
}

impl Default for PairingDelays {
    fn default() -> Self {
        Self {
            searching: Duration::from_millis(2000),
            connected: Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingStatus {
    #[default]
    Idle,
    Searching,
    Connected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PairingProgress {
    pub status: PairingStatus,
    pub device_id: Option<String>,
    /// Set once the success message has been shown long enough.
    pub complete: bool,
}

/// One pairing attempt. Dropping it cancels any step still pending.
#[derive(Debug)]
#[must_use = "dropping a pairing session cancels it"]
pub struct PairingSession {
    progress: watch::Receiver<PairingProgress>,
    task: JoinHandle<()>,
}

impl PairingSession {
    pub fn begin(device_id: &str, delays: PairingDelays) -> Self {
        let (sender, progress) = watch::channel(PairingProgress {
            status: PairingStatus::Searching,
            device_id: Some(device_id.to_string()),
            complete: false,
        });
        tracing::info!("Pairing with {}", device_id);

        Self {
            progress,
            task: tokio::spawn(run_pairing(sender, delays)),
        }
    }

    pub fn progress(&self) -> PairingProgress {
        self.progress.borrow().clone()
    }

    pub fn is_complete(&self) -> bool {
        self.progress.borrow().complete
    }
}

impl Drop for PairingSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_pairing(progress: watch::Sender<PairingProgress>, delays: PairingDelays) {
    time::sleep(delays.searching).await;
    progress.send_modify(|p| p.status = PairingStatus::Connected);
    tracing::info!(
        "Paired with {}",
        progress.borrow().device_id.as_deref().unwrap_or_default()
    );

    time::sleep(delays.connected).await;
    progress.send_modify(|p| p.complete = true);
}
