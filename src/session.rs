use crate::client::ImagenClient;
use crate::error::EmberlightError;
use crate::types::{AspectRatio, GeneratedImage, GenerationRequest};

/// Represents the lifecycle state of a generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No attempt has been started since the last reset.
    #[default]
    Idle,
    /// A request has been sent but no response has been received yet.
    InFlight,
    /// The last attempt produced images.
    Succeeded,
    /// The last attempt failed; see the session's error message.
    Failed,
}

/// An immutable snapshot of the inputs for one attempt, taken when the
/// attempt begins so later edits to the form cannot affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// The composed prompt string sent to the provider.
    pub prompt: String,
    /// The requested width:height class.
    pub aspect_ratio: AspectRatio,
}

/// Owns the mutable state of one generation attempt: the user-edited
/// request, a status flag, the result set, and the error message.
///
/// At most one request may be in flight. A second submission while a
/// request is pending is a silent no-op: not queued, not an error. The
/// state lives in memory only and is never persisted.
///
/// The state machine is split into [`begin`](Session::begin) and
/// [`complete`](Session::complete) so every transition can be exercised
/// without any I/O; [`generate`](Session::generate) wires the two around
/// the actual client call.
#[derive(Debug, Default)]
pub struct Session {
    request: GenerationRequest,
    status: SessionStatus,
    results: Vec<String>,
    error_message: Option<String>,
}

impl Session {
    /// Creates an idle session with an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle session holding the given request.
    pub fn with_request(request: GenerationRequest) -> Self {
        Self {
            request,
            ..Default::default()
        }
    }

    /// The current user-edited request.
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Mutable access to the request fields, for the form to edit.
    pub fn request_mut(&mut self) -> &mut GenerationRequest {
        &mut self.request
    }

    /// The current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Data URLs of the last successful attempt, in provider order.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// The user-facing message of the last failed attempt.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Whether a request is currently pending.
    pub fn is_in_flight(&self) -> bool {
        self.status == SessionStatus::InFlight
    }

    /// Whether a submission would start an attempt right now.
    ///
    /// A view uses this to disable its submit action: an empty prompt is
    /// recovered by disabling submission, never by showing an error.
    pub fn can_generate(&self) -> bool {
        self.request.is_valid() && !self.is_in_flight()
    }

    /// Begins an attempt.
    ///
    /// Returns `None` without touching any state when the prompt is empty
    /// or a request is already in flight (the duplicate-submission guard).
    /// Otherwise transitions to [`SessionStatus::InFlight`], clears the
    /// previous results and error message so a retry never shows stale
    /// content, and returns the snapshot to send.
    pub fn begin(&mut self) -> Option<PreparedRequest> {
        if !self.can_generate() {
            return None;
        }
        self.status = SessionStatus::InFlight;
        self.results.clear();
        self.error_message = None;
        Some(PreparedRequest {
            prompt: self.request.composed_prompt(),
            aspect_ratio: self.request.aspect_ratio,
        })
    }

    /// Completes the attempt begun by the last [`begin`](Session::begin).
    ///
    /// On success the session holds the images as data URLs in provider
    /// order; on failure it holds the short user-facing message derived
    /// from the error kind. Either way the session leaves `InFlight` and
    /// remains usable for a retry.
    pub fn complete(&mut self, outcome: Result<Vec<GeneratedImage>, EmberlightError>) {
        match outcome {
            Ok(images) => {
                self.results = images.iter().map(GeneratedImage::to_data_url).collect();
                self.status = SessionStatus::Succeeded;
            }
            Err(error) => {
                tracing::warn!(%error, "generation attempt failed");
                self.error_message = Some(error.user_message().to_string());
                self.status = SessionStatus::Failed;
            }
        }
    }

    /// Runs one full generation attempt against `client`.
    ///
    /// A no-op when the prompt is empty or a request is already in flight.
    /// [`complete`](Session::complete) runs on both the success and the
    /// failure path, so once the returned future resolves the session is
    /// never left in `InFlight`. Dropping the future mid-await cancels the
    /// outbound call and returns the session to `Idle`, ready for a fresh
    /// attempt.
    pub async fn generate(&mut self, client: &ImagenClient) {
        let Some(prepared) = self.begin() else {
            return;
        };
        let mut guard = FlightGuard {
            session: self,
            completed: false,
        };
        let outcome = client.generate(&prepared.prompt, prepared.aspect_ratio).await;
        guard.session.complete(outcome);
        guard.completed = true;
    }
}

/// Restores `Idle` when a generation attempt is dropped before it
/// completes, so an abandoned call can never leave the session stuck in
/// `InFlight`.
struct FlightGuard<'a> {
    session: &'a mut Session,
    completed: bool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.completed && self.session.is_in_flight() {
            tracing::debug!("generation attempt dropped mid-flight, resetting session");
            self.session.status = SessionStatus::Idle;
        }
    }
}
