// Pond service - Use cases for the pond, device, readings and profile screens
use crate::application::catalog_repository::CatalogRepository;
use crate::domain::account::{FarmStats, Profile};
use crate::domain::device::{AvailableDevice, Device};
use crate::domain::pond::Pond;
use crate::domain::readings::ReadingsOverview;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    pub profile: Profile,
    pub stats: FarmStats,
}

#[derive(Clone)]
pub struct PondService {
    repository: Arc<dyn CatalogRepository>,
}

impl PondService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_ponds(&self) -> anyhow::Result<Vec<Pond>> {
        self.repository.list_ponds().await
    }

    pub async fn list_devices(&self) -> anyhow::Result<Vec<Device>> {
        self.repository.list_devices().await
    }

    pub async fn available_devices(&self) -> anyhow::Result<Vec<AvailableDevice>> {
        self.repository.available_devices().await
    }

    pub async fn readings_overview(&self) -> anyhow::Result<ReadingsOverview> {
        self.repository.readings_overview().await
    }

    pub async fn profile_overview(&self) -> anyhow::Result<ProfileOverview> {
        let profile = self.repository.profile().await?;
        let ponds = self.repository.list_ponds().await?;
        let devices = self.repository.list_devices().await?;

        let stats = FarmStats {
            active_ponds: ponds.len(),
            iot_devices: devices.len(),
            uptime_percent: profile.uptime_percent,
        };
        Ok(ProfileOverview { profile, stats })
    }
}
