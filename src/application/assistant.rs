// Assistant service - Chat transcript with delayed canned replies
use crate::application::responder::Responder;
use crate::domain::chat::ChatMessage;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Append-only chat transcript. Each accepted submission schedules its own
/// reply; replies are never merged or cancelled.
#[derive(Clone)]
pub struct Assistant {
    transcript: Arc<watch::Sender<Vec<ChatMessage>>>,
    responder: Arc<dyn Responder>,
}

impl Assistant {
    pub fn new(greeting: impl Into<String>, responder: Arc<dyn Responder>) -> Self {
        let (transcript, _) = watch::channel(vec![ChatMessage::assistant(greeting)]);
        Self {
            transcript: Arc::new(transcript),
            responder,
        }
    }

    /// Blank input is ignored and returns `None`.
    pub fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let prompt = text.trim();
        if prompt.is_empty() {
            tracing::debug!("Ignoring blank chat submission");
            return None;
        }
        let prompt = prompt.to_string();
        self.transcript
            .send_modify(|messages| messages.push(ChatMessage::user(prompt.clone())));

        let transcript = self.transcript.clone();
        let responder = self.responder.clone();
        Some(tokio::spawn(async move {
            let reply = responder.respond(&prompt).await;
            transcript.send_modify(|messages| messages.push(ChatMessage::assistant(reply)));
        }))
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.borrow().clone()
    }
}
