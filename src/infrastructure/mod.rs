// Infrastructure layer - Configuration, fixtures and HTTP encoding
pub mod config;
pub mod http_response;
pub mod mock_catalog;
