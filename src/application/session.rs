// Session service - Navigation state and the per-screen resources it owns
use crate::application::live_feed::{FeedConfig, FeedError, FeedSession, LiveFeed};
use crate::application::pairing::{PairingDelays, PairingProgress, PairingSession};
use crate::domain::account::{Settings, Toggle};
use crate::domain::navigation::{NavigationContext, Screen, Transition};
use crate::domain::readings::Feedback;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    #[error("devices are paired from the connect screen, not {0}")]
    WrongScreen(Screen),
    #[error("already pairing with {0}")]
    Busy(String),
}

/// One user's UI session. The live feed runs only while the live screen is
/// showing, and a pairing attempt lives only while the connect screen is.
pub struct Session {
    navigation: NavigationContext,
    settings: Settings,
    feedback: Option<Feedback>,
    feed: LiveFeed,
    feed_config: FeedConfig,
    live: Option<FeedSession>,
    pairing_delays: PairingDelays,
    pairing: Option<PairingSession>,
}

impl Session {
    pub fn new(feed: LiveFeed, feed_config: FeedConfig, pairing_delays: PairingDelays) -> Self {
        Self {
            navigation: NavigationContext::default(),
            settings: Settings::default(),
            feedback: None,
            feed,
            feed_config,
            live: None,
            pairing_delays,
            pairing: None,
        }
    }

    pub fn current_screen(&mut self) -> Screen {
        self.settle();
        self.navigation.current()
    }

    pub fn navigate(&mut self, to: Screen) -> Result<Transition, FeedError> {
        self.settle();

        if to == Screen::Live {
            if self.live.is_none() {
                let session = self
                    .feed
                    .start(self.feed_config.clone(), StdRng::from_os_rng())?;
                self.live = Some(session);
            }
        } else if let Some(session) = self.live.take() {
            session.stop();
        }

        if to != Screen::Connect && self.pairing.take().is_some() {
            tracing::info!("Pairing cancelled");
        }

        let transition = self.navigation.navigate(to);
        tracing::info!("Navigated {} -> {}", transition.from, transition.to);
        Ok(transition)
    }

    /// Window size the live screen charts, whether or not the feed is running.
    pub fn feed_capacity(&self) -> usize {
        self.feed_config.capacity
    }

    pub fn connect_device(&mut self, device_id: &str) -> Result<PairingProgress, PairingError> {
        let screen = self.current_screen();
        if screen != Screen::Connect {
            return Err(PairingError::WrongScreen(screen));
        }
        if let Some(pairing) = &self.pairing {
            let busy_with = pairing.progress().device_id.unwrap_or_default();
            return Err(PairingError::Busy(busy_with));
        }

        let pairing = PairingSession::begin(device_id, self.pairing_delays);
        let progress = pairing.progress();
        self.pairing = Some(pairing);
        Ok(progress)
    }

    pub fn pairing_progress(&mut self) -> PairingProgress {
        self.settle();
        self.pairing
            .as_ref()
            .map(PairingSession::progress)
            .unwrap_or_default()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn toggle_setting(&mut self, toggle: Toggle) -> Settings {
        self.settings.flip(toggle);
        self.settings
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn give_feedback(&mut self, choice: Feedback) -> Option<Feedback> {
        self.feedback = Feedback::toggle(self.feedback, choice);
        self.feedback
    }

    /// Release anything the current screen holds.
    pub fn close(&mut self) {
        self.pairing = None;
        self.live = None;
        self.feed.stop();
    }

    /// A finished pairing returns to the device list.
    fn settle(&mut self) {
        if self.pairing.as_ref().is_some_and(PairingSession::is_complete) {
            self.pairing = None;
            let transition = self.navigation.navigate(Screen::Devices);
            tracing::info!("Pairing finished, navigated {} -> {}", transition.from, transition.to);
        }
    }
}
