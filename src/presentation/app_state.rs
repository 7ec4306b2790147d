// Application state for HTTP handlers
use crate::application::assistant::Assistant;
use crate::application::live_feed::LiveFeed;
use crate::application::pond_service::PondService;
use crate::application::session::Session;
use tokio::sync::Mutex;

pub struct AppState {
    pub pond_service: PondService,
    pub assistant: Assistant,
    pub live_feed: LiveFeed,
    pub session: Mutex<Session>,
}
