// Repository trait for pond catalog data access
use crate::domain::account::Profile;
use crate::domain::device::{AvailableDevice, Device};
use crate::domain::pond::Pond;
use crate::domain::readings::ReadingsOverview;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all ponds with their latest condition
    async fn list_ponds(&self) -> anyhow::Result<Vec<Pond>>;

    /// List all registered sensor devices
    async fn list_devices(&self) -> anyhow::Result<Vec<Device>>;

    /// Unpaired sensors in range of the connect screen
    async fn available_devices(&self) -> anyhow::Result<Vec<AvailableDevice>>;

    /// Reading cards, history and recommendation for the featured pond
    async fn readings_overview(&self) -> anyhow::Result<ReadingsOverview>;

    async fn profile(&self) -> anyhow::Result<Profile>;
}
