// Responder trait and the keyword-matching advisory responder
use async_trait::async_trait;
use std::time::Duration;

pub const GREETING: &str = "Hello! I'm your Fishmate AI assistant. How can I help you with your aquaculture operations today?";

#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce the assistant's reply to one user message
    async fn respond(&self, prompt: &str) -> String;
}

/// Pre-written advisories the assistant can give
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    PondFourCritical,
    TemperatureRange,
    PondSummary,
    Capabilities,
}

impl Advisory {
    pub fn text(self) -> &'static str {
        match self {
            Advisory::PondFourCritical => {
                "Pond 4 is showing critical conditions. The temperature is too high (31.2°C) and dissolved oxygen is low (5.5 mg/L). I recommend:\n\n1. Increase aeration immediately\n2. Add shade covers to reduce temperature\n3. Reduce feeding temporarily\n4. Monitor every 2 hours"
            }
            Advisory::TemperatureRange => {
                "The optimal temperature for most aquaculture species is 26-29°C. Pond 4 is exceeding this range. Consider increasing water circulation or adding shade structures."
            }
            Advisory::PondSummary => {
                "Based on current data:\n\n✓ Ponds 1 & 2 are performing well\n⚠️ Pond 3 needs attention - reconnect the sensor\n❌ Pond 4 requires immediate action\n\nWould you like specific recommendations for any pond?"
            }
            Advisory::Capabilities => {
                "I can help you with pond conditions, water quality analysis, and recommendations. What would you like to know?"
            }
        }
    }
}

/// Checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], Advisory)] = &[
    (&["pond 4", "critical"], Advisory::PondFourCritical),
    (&["temperature"], Advisory::TemperatureRange),
    (&["recommend", "suggest"], Advisory::PondSummary),
];

/// Answers from a fixed rule table after a simulated processing delay.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    latency: Duration,
}

impl CannedResponder {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn advise(prompt: &str) -> Advisory {
        let lowered = prompt.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(_, advisory)| *advisory)
            .unwrap_or(Advisory::Capabilities)
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, prompt: &str) -> String {
        tokio::time::sleep(self.latency).await;
        let advisory = Self::advise(prompt);
        tracing::debug!("Assistant matched {:?} for {:?}", advisory, prompt);
        advisory.text().to_string()
    }
}
