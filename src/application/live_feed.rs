// Live feed service - Simulated rolling telemetry driven by a tokio interval
use crate::application::jitter_source::JitterSource;
use crate::domain::series::Series;
use crate::domain::telemetry::{JitterTable, Parameter, Reading, TimeLabel};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub tick_interval: Duration,
    pub capacity: usize,
    pub seed: Vec<Reading>,
    pub jitter: JitterTable,
}

impl FeedConfig {
    pub fn new(tick_interval: Duration, capacity: usize, seed: Vec<Reading>) -> Self {
        Self {
            tick_interval,
            capacity,
            seed,
            jitter: JitterTable::default(),
        }
    }

    pub fn with_jitter(mut self, jitter: JitterTable) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn validate(&self) -> Result<(), FeedError> {
        if self.tick_interval.is_zero() {
            return Err(FeedError::ZeroInterval);
        }
        if self.capacity == 0 {
            return Err(FeedError::ZeroCapacity);
        }
        if self.seed.is_empty() {
            return Err(FeedError::EmptySeed);
        }
        for pair in self.seed.windows(2) {
            let (previous, found) = (pair[0].time_label, pair[1].time_label);
            if previous.next() != Some(found) {
                return Err(FeedError::NonConsecutiveSeed { previous, found });
            }
        }
        if let Some(last) = self.seed.last().filter(|r| r.time_label.next().is_none()) {
            return Err(FeedError::ExhaustedLabels(last.time_label));
        }
        for parameter in Parameter::ALL {
            let amplitude = self.jitter.spec(parameter).amplitude;
            if !amplitude.is_finite() || amplitude < 0.0 {
                return Err(FeedError::InvalidAmplitude {
                    parameter,
                    amplitude,
                });
            }
        }
        if self.jitter.tds.decimals != 0 {
            return Err(FeedError::FractionalTds(self.jitter.tds.decimals));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
    #[error("window capacity must be at least 1")]
    ZeroCapacity,
    #[error("seed series must contain at least one reading")]
    EmptySeed,
    #[error("seed label {found} does not follow {previous}")]
    NonConsecutiveSeed { previous: TimeLabel, found: TimeLabel },
    #[error("seed ends at label {0}, which has no successor")]
    ExhaustedLabels(TimeLabel),
    #[error("jitter amplitude for {parameter} must be finite and non-negative, got {amplitude}")]
    InvalidAmplitude { parameter: Parameter, amplitude: f64 },
    #[error("tds is whole ppm, jitter precision must be 0 decimals (got {0})")]
    FractionalTds(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    #[default]
    Idle,
    Running,
}

/// Everything a chart or value card needs, published once per tick.
#[derive(Debug, Clone, Default)]
pub struct FeedFrame {
    pub state: FeedState,
    pub series: Series,
    pub latest: Option<Reading>,
    generation: u64,
}

struct FeedInner {
    frames: watch::Sender<FeedFrame>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FeedInner {
    fn task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns false once the run this tick belongs to has been stopped or replaced.
    fn apply_tick(&self, generation: u64, jitter: &JitterTable, source: &mut dyn JitterSource) -> bool {
        let mut current = true;
        self.frames.send_if_modified(|frame| {
            if frame.generation != generation || frame.state != FeedState::Running {
                current = false;
                return false;
            }
            let next = frame.series.advance(jitter, || source.unit()).cloned();
            let Some(reading) = next else {
                tracing::error!(
                    "Live feed has no label after {}, stopping",
                    frame.series.latest().map(|r| r.time_label.to_string()).unwrap_or_default()
                );
                frame.state = FeedState::Idle;
                frame.generation += 1;
                current = false;
                return true;
            };
            tracing::debug!(
                "Live tick {}: temp={} ph={} do={} tds={} turbidity={}",
                reading.time_label,
                reading.temperature,
                reading.ph,
                reading.dissolved_oxygen,
                reading.tds,
                reading.turbidity
            );
            frame.latest = Some(reading);
            true
        });
        current
    }

    /// Stop the feed, or only the given run when `generation` is set.
    fn halt(&self, generation: Option<u64>) {
        let mut task = self.task();
        let mut halted = false;
        self.frames.send_if_modified(|frame| {
            if frame.state == FeedState::Idle {
                return false;
            }
            if generation.is_some_and(|g| g != frame.generation) {
                return false;
            }
            frame.state = FeedState::Idle;
            frame.generation += 1;
            halted = true;
            true
        });
        if halted {
            if let Some(handle) = task.take() {
                handle.abort();
            }
            tracing::info!("Live feed stopped");
        }
    }
}

/// Timer-driven telemetry simulator. Cloning shares the same feed.
#[derive(Clone)]
pub struct LiveFeed {
    inner: Arc<FeedInner>,
}

impl LiveFeed {
    pub fn new() -> Self {
        let (frames, _) = watch::channel(FeedFrame::default());
        Self {
            inner: Arc::new(FeedInner {
                frames,
                task: Mutex::new(None),
            }),
        }
    }

    /// Re-seed the window and begin ticking. Starting a running feed replaces
    /// the previous run, so only one timer is ever active.
    pub fn start<J>(&self, config: FeedConfig, source: J) -> Result<FeedSession, FeedError>
    where
        J: JitterSource + 'static,
    {
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected live feed configuration: {}", e);
            return Err(e);
        }

        let mut task = self.inner.task();
        if let Some(previous) = task.take() {
            previous.abort();
        }

        let mut generation = 0;
        self.inner.frames.send_modify(|frame| {
            frame.generation += 1;
            generation = frame.generation;
            frame.state = FeedState::Running;
            frame.series = Series::from_seed(config.capacity, config.seed.iter().cloned());
            frame.latest = frame.series.latest().cloned();
        });

        let seeded = self.inner.frames.borrow().series.len();
        tracing::info!(
            "Live feed started: every {:?}, window of {}, {} readings seeded",
            config.tick_interval,
            config.capacity,
            seeded
        );

        *task = Some(tokio::spawn(run_ticks(
            Arc::downgrade(&self.inner),
            generation,
            config.tick_interval,
            config.jitter,
            Box::new(source),
        )));

        Ok(FeedSession {
            feed: Arc::downgrade(&self.inner),
            generation,
        })
    }

    /// Idempotent.
    pub fn stop(&self) {
        self.inner.halt(None);
    }

    /// Snapshot of the current run, or of the last one once stopped.
    pub fn frame(&self) -> FeedFrame {
        self.inner.frames.borrow().clone()
    }
}

#[cfg(test)]
impl LiveFeed {
    pub fn state(&self) -> FeedState {
        self.inner.frames.borrow().state
    }

    pub fn series(&self) -> Vec<Reading> {
        self.inner.frames.borrow().series.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Reading> {
        self.inner.frames.borrow().latest.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedFrame> {
        self.inner.frames.subscribe()
    }
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one run of the feed. Dropping it stops that run; a session
/// left over from a replaced run has no effect.
#[derive(Debug)]
#[must_use = "dropping a feed session stops the feed"]
pub struct FeedSession {
    feed: Weak<FeedInner>,
    generation: u64,
}

impl FeedSession {
    pub fn stop(self) {}
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        if let Some(inner) = self.feed.upgrade() {
            inner.halt(Some(self.generation));
        }
    }
}

async fn run_ticks(
    feed: Weak<FeedInner>,
    generation: u64,
    period: Duration,
    jitter: JitterTable,
    mut source: Box<dyn JitterSource>,
) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(inner) = feed.upgrade() else {
            break;
        };
        if !inner.apply_tick(generation, &jitter, source.as_mut()) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TICK: Duration = Duration::from_millis(3000);

    struct Constant(f64);

    impl JitterSource for Constant {
        fn unit(&mut self) -> f64 {
            self.0
        }
    }

    fn reading(tick: u32) -> Reading {
        Reading {
            time_label: TimeLabel::new(tick),
            temperature: 28.3,
            ph: 7.1,
            dissolved_oxygen: 7.5,
            tds: 445,
            turbidity: 12.2,
        }
    }

    fn labels(feed: &LiveFeed) -> Vec<String> {
        feed.series().iter().map(|r| r.time_label.to_string()).collect()
    }

    #[test]
    fn test_validate_rejects_bad_configuration() {
        let base = FeedConfig::new(TICK, 20, vec![reading(0)]);
        assert_eq!(base.validate(), Ok(()));

        let config = FeedConfig { capacity: 0, ..base.clone() };
        assert_eq!(config.validate(), Err(FeedError::ZeroCapacity));

        let config = FeedConfig { seed: vec![], ..base.clone() };
        assert_eq!(config.validate(), Err(FeedError::EmptySeed));

        let config = FeedConfig { tick_interval: Duration::ZERO, ..base.clone() };
        assert_eq!(config.validate(), Err(FeedError::ZeroInterval));

        let config = FeedConfig { seed: vec![reading(0), reading(2)], ..base.clone() };
        assert_eq!(
            config.validate(),
            Err(FeedError::NonConsecutiveSeed {
                previous: TimeLabel::new(0),
                found: TimeLabel::new(2),
            })
        );

        let config = FeedConfig { seed: vec![reading(u32::MAX)], ..base.clone() };
        assert_eq!(
            config.validate(),
            Err(FeedError::ExhaustedLabels(TimeLabel::new(u32::MAX)))
        );

        let mut jitter = JitterTable::default();
        jitter.ph.amplitude = -0.1;
        let config = base.clone().with_jitter(jitter);
        assert!(matches!(
            config.validate(),
            Err(FeedError::InvalidAmplitude { parameter: Parameter::Ph, .. })
        ));

        let mut jitter = JitterTable::default();
        jitter.tds.decimals = 1;
        let config = base.with_jitter(jitter);
        assert_eq!(config.validate(), Err(FeedError::FractionalTds(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_rejects_invalid_config_and_stays_idle() {
        let feed = LiveFeed::new();
        let result = feed.start(FeedConfig::new(TICK, 0, vec![reading(0)]), Constant(0.5));
        assert_eq!(result.err(), Some(FeedError::ZeroCapacity));
        assert_eq!(feed.state(), FeedState::Idle);
        assert!(feed.series().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_of_two_slides_each_tick() {
        let feed = LiveFeed::new();
        let _session = feed
            .start(FeedConfig::new(TICK, 2, vec![reading(0)]), StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(feed.state(), FeedState::Running);
        assert_eq!(labels(&feed), ["00"]);

        let mut frames = feed.subscribe();
        let started = Instant::now();

        frames.changed().await.unwrap();
        assert!(started.elapsed() >= TICK);
        assert_eq!(labels(&feed), ["00", "01"]);
        assert_eq!(feed.series()[0], reading(0));

        frames.changed().await.unwrap();
        assert_eq!(labels(&feed), ["01", "02"]);

        let frame = feed.frame();
        assert_eq!(frame.latest.as_ref(), frame.series.latest());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_apply_jitter_from_injected_source() {
        let feed = LiveFeed::new();
        let _session = feed
            .start(FeedConfig::new(TICK, 20, vec![reading(0)]), Constant(0.0))
            .unwrap();

        let mut frames = feed.subscribe();
        frames.changed().await.unwrap();

        let latest = feed.latest().unwrap();
        assert_eq!(latest.time_label, TimeLabel::new(1));
        assert_eq!(latest.temperature, 28.2);
        assert_eq!(latest.dissolved_oxygen, 7.4);
        assert_eq!(latest.tds, 443);
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_stops_when_labels_run_out() {
        let feed = LiveFeed::new();
        let _session = feed
            .start(FeedConfig::new(TICK, 20, vec![reading(u32::MAX - 1)]), Constant(0.5))
            .unwrap();

        time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(labels(&feed), ["4294967294", "4294967295"]);
        assert_eq!(feed.state(), FeedState::Running);

        time::sleep(TICK).await;
        assert_eq!(feed.state(), FeedState::Idle);
        assert_eq!(labels(&feed), ["4294967294", "4294967295"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_sources_reproduce_series() {
        let config = FeedConfig::new(TICK, 20, vec![reading(0), reading(1)]);
        let first = LiveFeed::new();
        let second = LiveFeed::new();
        let _a = first.start(config.clone(), StdRng::seed_from_u64(42)).unwrap();
        let _b = second.start(config, StdRng::seed_from_u64(42)).unwrap();

        time::sleep(TICK * 5 + Duration::from_millis(1)).await;

        assert_eq!(first.series().len(), 7);
        assert_eq!(first.series(), second.series());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_series_and_is_idempotent() {
        let feed = LiveFeed::new();
        let _session = feed
            .start(FeedConfig::new(TICK, 20, vec![reading(0)]), StdRng::seed_from_u64(3))
            .unwrap();

        time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(feed.series().len(), 2);

        feed.stop();
        feed.stop();
        assert_eq!(feed.state(), FeedState::Idle);

        time::sleep(TICK * 4).await;
        assert_eq!(feed.series().len(), 2);
        assert_eq!(feed.latest().unwrap().time_label, TimeLabel::new(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_session_stops_feed() {
        let feed = LiveFeed::new();
        let session = feed
            .start(FeedConfig::new(TICK, 20, vec![reading(0)]), StdRng::seed_from_u64(5))
            .unwrap();
        drop(session);
        assert_eq!(feed.state(), FeedState::Idle);

        time::sleep(TICK * 2).await;
        assert_eq!(feed.series().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_reseeds_with_a_single_timer() {
        let feed = LiveFeed::new();
        let stale = feed
            .start(FeedConfig::new(TICK, 20, vec![reading(0)]), StdRng::seed_from_u64(7))
            .unwrap();
        time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(feed.series().len(), 2);

        let _session = feed
            .start(FeedConfig::new(TICK, 20, vec![reading(10)]), StdRng::seed_from_u64(8))
            .unwrap();
        drop(stale);
        assert_eq!(feed.state(), FeedState::Running);
        assert_eq!(labels(&feed), ["10"]);

        time::sleep(TICK + Duration::from_millis(1)).await;
        assert_eq!(labels(&feed), ["10", "11"]);
    }
}
