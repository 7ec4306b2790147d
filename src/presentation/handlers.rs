// HTTP request handlers
use crate::application::live_feed::FeedState;
use crate::application::pairing::PairingProgress;
use crate::domain::account::{Settings, Toggle};
use crate::domain::device::{AvailableDevice, Device};
use crate::domain::navigation::Screen;
use crate::domain::pond::Pond;
use crate::domain::readings::{Feedback, ReadingsOverview};
use crate::domain::series::Series;
use crate::domain::telemetry::Reading;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
struct ScreenView {
    screen: Screen,
}

#[derive(Serialize)]
struct ReadingsView {
    #[serde(flatten)]
    overview: ReadingsOverview,
    feedback: Option<Feedback>,
}

#[derive(Serialize)]
struct FeedbackView {
    feedback: Option<Feedback>,
}

#[derive(Serialize)]
struct LiveView {
    state: FeedState,
    capacity: usize,
    series: Series,
    latest: Option<Reading>,
}

#[derive(Serialize)]
struct ConnectView {
    screen: Screen,
    pairing: PairingProgress,
    available: Vec<AvailableDevice>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

async fn render<T: Serialize>(headers: &HeaderMap, data: &T) -> Response {
    match json_response(data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn current_screen(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let screen = state.session.lock().await.current_screen();
    render(&headers, &ScreenView { screen }).await
}

/// Switch screens; entering or leaving the live screen starts or stops the feed
pub async fn navigate(
    Path(screen): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let screen: Screen = match screen.parse() {
        Ok(screen) => screen,
        Err(e) => {
            tracing::warn!("Navigation rejected: {}", e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    let result = state.session.lock().await.navigate(screen);
    match result {
        Ok(transition) => render(&headers, &transition).await,
        Err(e) => {
            tracing::error!("Could not open {} screen: {}", screen, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn list_ponds(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.pond_service.list_ponds().await {
        Ok(ponds) => render(&headers, &ponds).await,
        Err(e) => {
            tracing::error!("Error fetching ponds: {}", e);
            // Return empty list on error
            render(&headers, &Vec::<Pond>::new()).await
        }
    }
}

pub async fn list_devices(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.pond_service.list_devices().await {
        Ok(devices) => render(&headers, &devices).await,
        Err(e) => {
            tracing::error!("Error fetching devices: {}", e);
            render(&headers, &Vec::<Device>::new()).await
        }
    }
}

pub async fn readings_overview(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let overview = match state.pond_service.readings_overview().await {
        Ok(overview) => overview,
        Err(e) => {
            tracing::error!("Error fetching readings: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let feedback = state.session.lock().await.feedback();
    render(&headers, &ReadingsView { overview, feedback }).await
}

pub async fn give_feedback(
    Path(choice): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Ok(choice) = choice.parse::<Feedback>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let feedback = state.session.lock().await.give_feedback(choice);
    render(&headers, &FeedbackView { feedback }).await
}

pub async fn settings(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let settings: Settings = state.session.lock().await.settings();
    render(&headers, &settings).await
}

pub async fn toggle_setting(
    Path(toggle): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Ok(toggle) = toggle.parse::<Toggle>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let settings = state.session.lock().await.toggle_setting(toggle);
    render(&headers, &settings).await
}

pub async fn profile(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.pond_service.profile_overview().await {
        Ok(overview) => render(&headers, &overview).await,
        Err(e) => {
            tracing::error!("Error fetching profile: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Unpaired sensors and the progress of the current pairing attempt
pub async fn connect_screen(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let available = match state.pond_service.available_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            tracing::error!("Error fetching available devices: {}", e);
            Vec::new()
        }
    };
    let (screen, pairing) = {
        let mut session = state.session.lock().await;
        let pairing = session.pairing_progress();
        (session.current_screen(), pairing)
    };
    render(&headers, &ConnectView { screen, pairing, available }).await
}

/// Start pairing with a sensor from the available list
pub async fn pair_device(
    Path(device_id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let known = match state.pond_service.available_devices().await {
        Ok(devices) => devices.iter().any(|d| d.id == device_id),
        Err(e) => {
            tracing::error!("Error fetching available devices: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    if !known {
        tracing::warn!("Pairing requested for unknown device {}", device_id);
        return StatusCode::NOT_FOUND.into_response();
    }

    let result = state.session.lock().await.connect_device(&device_id);
    match result {
        Ok(progress) => render(&headers, &progress).await,
        Err(e) => {
            tracing::warn!("Pairing rejected: {}", e);
            StatusCode::CONFLICT.into_response()
        }
    }
}

/// Current live window and snapshot
pub async fn live_view(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let capacity = state.session.lock().await.feed_capacity();
    let frame = state.live_feed.frame();
    let view = LiveView {
        state: frame.state,
        capacity,
        series: frame.series,
        latest: frame.latest,
    };
    render(&headers, &view).await
}

pub async fn transcript(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    render(&headers, &state.assistant.transcript()).await
}

/// Accept a chat message; the reply lands in the transcript after the configured delay
pub async fn submit_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> StatusCode {
    match state.assistant.submit(&request.text) {
        Some(_) => StatusCode::ACCEPTED,
        None => StatusCode::NO_CONTENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::assistant::Assistant;
    use crate::application::live_feed::LiveFeed;
    use crate::application::pond_service::PondService;
    use crate::application::responder::{Advisory, CannedResponder, GREETING};
    use crate::application::pairing::PairingDelays;
    use crate::application::session::Session;
    use crate::infrastructure::config::FeedSettings;
    use crate::infrastructure::mock_catalog::MockCatalog;
    use axum::http::{header, HeaderValue};
    use std::time::Duration;
    use tokio::sync::Mutex;

    fn app_state() -> Arc<AppState> {
        let live_feed = LiveFeed::new();
        let session = Session::new(
            live_feed.clone(),
            FeedSettings::default().to_feed_config(),
            PairingDelays::default(),
        );
        Arc::new(AppState {
            pond_service: PondService::new(Arc::new(MockCatalog)),
            assistant: Assistant::new(
                GREETING,
                Arc::new(CannedResponder::new(Duration::from_millis(1000))),
            ),
            live_feed,
            session: Mutex::new(session),
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_screen_is_not_found() {
        let state = app_state();
        let response = navigate(Path("dashboard".to_string()), HeaderMap::new(), State(state)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_screen_drives_live_view() {
        let state = app_state();

        let view = body_json(live_view(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(view["state"], "idle");
        assert_eq!(view["capacity"], 20);
        assert_eq!(view["series"].as_array().unwrap().len(), 0);

        let response = navigate(Path("live".to_string()), HeaderMap::new(), State(state.clone())).await;
        let transition = body_json(response).await;
        assert_eq!(transition["from"], "login");
        assert_eq!(transition["to"], "live");

        tokio::time::sleep(Duration::from_millis(3001)).await;
        let view = body_json(live_view(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(view["state"], "running");
        assert_eq!(view["capacity"], 20);
        let series = view["series"].as_array().unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series[4]["time_label"], "04");
        assert_eq!(view["latest"], series[4]);

        navigate(Path("ponds".to_string()), HeaderMap::new(), State(state.clone())).await;
        let view = body_json(live_view(HeaderMap::new(), State(state)).await).await;
        assert_eq!(view["state"], "idle");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pairing_flow_ends_on_device_list() {
        let state = app_state();

        let response = pair_device(Path("FM-2024-005".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        navigate(Path("connect".to_string()), HeaderMap::new(), State(state.clone())).await;
        let view = body_json(connect_screen(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(view["pairing"]["status"], "idle");
        assert_eq!(view["available"].as_array().unwrap().len(), 3);

        let response = pair_device(Path("FM-2024-999".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = pair_device(Path("FM-2024-007".to_string()), HeaderMap::new(), State(state.clone())).await;
        let progress = body_json(response).await;
        assert_eq!(progress["status"], "searching");
        assert_eq!(progress["device_id"], "FM-2024-007");

        tokio::time::sleep(Duration::from_millis(2001)).await;
        let view = body_json(connect_screen(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(view["pairing"]["status"], "connected");
        assert_eq!(view["screen"], "connect");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let current = body_json(current_screen(HeaderMap::new(), State(state)).await).await;
        assert_eq!(current["screen"], "devices");
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_round_trip() {
        let state = app_state();

        let status = submit_chat(
            State(state.clone()),
            Json(ChatRequest { text: "   ".to_string() }),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let status = submit_chat(
            State(state.clone()),
            Json(ChatRequest { text: "Can you recommend something?".to_string() }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let messages = body_json(transcript(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(messages.as_array().unwrap().len(), 2);
        assert_eq!(messages[1]["role"], "user");

        tokio::time::sleep(Duration::from_millis(1001)).await;
        let messages = body_json(transcript(HeaderMap::new(), State(state)).await).await;
        assert_eq!(messages.as_array().unwrap().len(), 3);
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[2]["content"], Advisory::PondSummary.text());
    }

    #[tokio::test]
    async fn test_ponds_are_served_with_display_conditions() {
        let ponds = body_json(list_ponds(HeaderMap::new(), State(app_state())).await).await;
        let conditions: Vec<&str> = ponds
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["condition"].as_str().unwrap())
            .collect();
        assert_eq!(conditions, ["Healthy", "Healthy", "At Risk", "Critical"]);
    }

    #[tokio::test]
    async fn test_feedback_and_settings_toggle() {
        let state = app_state();

        let response = give_feedback(Path("like".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(body_json(response).await["feedback"], "like");

        let readings = body_json(readings_overview(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(readings["feedback"], "like");
        assert_eq!(readings["pond_name"], "Pond 1");
        assert_eq!(readings["cards"].as_array().unwrap().len(), 5);

        let response = give_feedback(Path("like".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert!(body_json(response).await["feedback"].is_null());

        let response = toggle_setting(Path("auto_sync".to_string()), HeaderMap::new(), State(state.clone())).await;
        assert_eq!(body_json(response).await["auto_sync"], false);

        let response = toggle_setting(Path("volume".to_string()), HeaderMap::new(), State(state)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_brotli_when_client_accepts_it() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("br"));
        let response = list_devices(headers, State(app_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }

    #[tokio::test]
    async fn test_profile_includes_farm_stats() {
        let profile = body_json(profile(HeaderMap::new(), State(app_state())).await).await;
        assert_eq!(profile["profile"]["member_since"], "January 2024");
        assert_eq!(profile["stats"]["active_ponds"], 4);
        assert_eq!(profile["stats"]["uptime_percent"], 98);
        assert!(profile["profile"].get("uptime_percent").is_none());
    }
}
