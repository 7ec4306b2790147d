// In-memory catalog implementation backed by fixed fixtures
use crate::application::catalog_repository::CatalogRepository;
use crate::domain::account::Profile;
use crate::domain::device::{AvailableDevice, Device, LastSync, Signal};
use crate::domain::pond::{Condition, Pond, PondVitals};
use crate::domain::readings::{HistoryPoint, ReadingCard, ReadingsOverview, Trend};
use crate::domain::telemetry::Parameter;
use anyhow::Result;
use async_trait::async_trait;

const RECOMMENDATION: &str = "All water parameters are within optimal ranges. Continue regular monitoring and maintain current feeding schedule.";

#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

fn vitals(temperature: f64, ph: f64, dissolved_oxygen: f64, tds: i64) -> PondVitals {
    PondVitals {
        temperature,
        ph,
        dissolved_oxygen,
        tds,
    }
}

#[async_trait]
impl CatalogRepository for MockCatalog {
    async fn list_ponds(&self) -> Result<Vec<Pond>> {
        Ok(vec![
            Pond::new(1, vitals(28.5, 7.2, 7.8, 450), Condition::Healthy, true)
                .located_at("Main Pond")
                .stocked_with("Tilapia"),
            Pond::new(2, vitals(27.3, 7.5, 8.1, 425), Condition::Healthy, true)
                .located_at("East Pond")
                .stocked_with("Catfish"),
            Pond::new(3, vitals(29.1, 6.8, 6.5, 580), Condition::AtRisk, false)
                .located_at("West Pond"),
            Pond::new(4, vitals(31.2, 6.2, 5.5, 720), Condition::Critical, true),
        ])
    }

    async fn list_devices(&self) -> Result<Vec<Device>> {
        Ok(vec![
            Device::new(
                "FM-2024-001",
                "Pond 1 Sensor",
                "Main Pond",
                true,
                85,
                LastSync::minutes_ago(2),
                "v2.1.3",
            ),
            Device::new(
                "FM-2024-002",
                "Pond 2 Sensor",
                "East Pond",
                true,
                92,
                LastSync::minutes_ago(5),
                "v2.1.3",
            ),
            Device::new(
                "FM-2024-003",
                "Pond 3 Sensor",
                "West Pond",
                false,
                15,
                LastSync::hours_ago(2),
                "v2.0.8",
            ),
        ])
    }

    async fn available_devices(&self) -> Result<Vec<AvailableDevice>> {
        Ok(vec![
            AvailableDevice::new("FM-2024-005", "Fishmate Sensor Pro", Signal::Strong, 2),
            AvailableDevice::new("FM-2024-006", "Fishmate Sensor Pro", Signal::Medium, 8),
            AvailableDevice::new("FM-2024-007", "Fishmate Sensor Basic", Signal::Strong, 3),
        ])
    }

    async fn readings_overview(&self) -> Result<ReadingsOverview> {
        let cards = vec![
            ReadingCard::new(Parameter::Temperature, 28.5, 1, Trend::Stable),
            ReadingCard::new(Parameter::Ph, 7.2, 1, Trend::Up),
            ReadingCard::new(Parameter::DissolvedOxygen, 7.8, 1, Trend::Stable),
            ReadingCard::new(Parameter::Tds, 450.0, 0, Trend::Stable),
            ReadingCard::new(Parameter::Turbidity, 12.5, 1, Trend::Stable),
        ];
        let history = [
            ("00:00", 7.0),
            ("04:00", 7.2),
            ("08:00", 7.5),
            ("12:00", 7.8),
            ("16:00", 7.6),
            ("20:00", 7.4),
        ]
        .into_iter()
        .map(|(time, value)| HistoryPoint::new(time, value))
        .collect();

        Ok(ReadingsOverview {
            pond_name: "Pond 1".to_string(),
            cards,
            history_parameter: Parameter::Ph,
            history,
            recommendation: RECOMMENDATION.to_string(),
        })
    }

    async fn profile(&self) -> Result<Profile> {
        Ok(Profile {
            full_name: "John Anderson".to_string(),
            role: "Aquaculture Farmer".to_string(),
            email: "john@fishmate.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "Portland, Oregon, USA".to_string(),
            member_since: "January 2024".to_string(),
            uptime_percent: 98,
        })
    }
}
