// Application layer - Use cases and timer-driven services
pub mod assistant;
pub mod catalog_repository;
pub mod jitter_source;
pub mod live_feed;
pub mod pairing;
pub mod pond_service;
pub mod responder;
pub mod session;
