use crate::application::live_feed::FeedConfig;
use crate::application::pairing::PairingDelays;
use crate::application::responder::GREETING;
use crate::domain::telemetry::{JitterTable, Reading, TimeLabel};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub connect: ConnectSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_seed")]
    pub seed: Vec<Reading>,
    #[serde(default)]
    pub jitter: JitterTable,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            capacity: default_capacity(),
            seed: default_seed(),
            jitter: JitterTable::default(),
        }
    }
}

impl FeedSettings {
    pub fn to_feed_config(&self) -> FeedConfig {
        FeedConfig::new(
            Duration::from_millis(self.tick_interval_ms),
            self.capacity,
            self.seed.clone(),
        )
        .with_jitter(self.jitter.clone())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantSettings {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            greeting: default_greeting(),
        }
    }
}

impl AssistantSettings {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

/// Timings of the mock device pairing flow
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectSettings {
    #[serde(default = "default_searching_ms")]
    pub searching_ms: u64,
    #[serde(default = "default_connected_ms")]
    pub connected_ms: u64,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        Self {
            searching_ms: default_searching_ms(),
            connected_ms: default_connected_ms(),
        }
    }
}

impl ConnectSettings {
    pub fn delays(&self) -> PairingDelays {
        PairingDelays {
            searching: Duration::from_millis(self.searching_ms),
            connected: Duration::from_millis(self.connected_ms),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_tick_interval_ms() -> u64 {
    3000
}

fn default_capacity() -> usize {
    20
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_searching_ms() -> u64 {
    2000
}

fn default_connected_ms() -> u64 {
    1500
}

fn default_greeting() -> String {
    GREETING.to_string()
}

/// Pond 1 baseline the live screen opens with
fn default_seed() -> Vec<Reading> {
    [
        (28.3, 7.1, 7.5, 445, 12.2),
        (28.4, 7.2, 7.6, 448, 12.5),
        (28.5, 7.2, 7.7, 450, 12.4),
        (28.6, 7.1, 7.8, 452, 12.3),
    ]
    .into_iter()
    .zip(0..)
    .map(|((temperature, ph, dissolved_oxygen, tds, turbidity), tick)| Reading {
        time_label: TimeLabel::new(tick),
        temperature,
        ph,
        dissolved_oxygen,
        tds,
        turbidity,
    })
    .collect()
}

/// Load `config/fishmate.{toml,yaml,json}` if present; built-in defaults otherwise.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_with(config::File::with_name("config/fishmate").required(false))
}

fn load_with<S>(source: S) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder().add_source(source).build()?;

    Ok(settings.try_deserialize()?)
}
