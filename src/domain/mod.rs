// Domain layer - Pond monitoring models, free of timers and I/O
pub mod account;
pub mod chat;
pub mod device;
pub mod navigation;
pub mod pond;
pub mod readings;
pub mod series;
pub mod telemetry;
