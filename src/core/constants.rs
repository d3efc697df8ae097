//! Fixed strings shared by the conversation core and the CLI.

/// Default system prompt sent as the first context entry of every request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are MediBot, a precise and empathetic medical support assistant. \
Answer with concise, factual guidance based on trusted medical knowledge. \
If you are unsure, clearly state that the information is unavailable.";

/// The synthetic assistant message every transcript starts with.
pub const GREETING: &str = "Hi, I am MediBot. Ask me anything about your health concerns and I will share evidence-based guidance.";

/// Assistant message appended when an exchange fails.
pub const FALLBACK_REPLY: &str =
    "I ran into an issue reaching the server. Please try again in a moment.";

/// Error slot text when a failure carries neither detail nor message.
pub const REQUEST_FAILED: &str = "Request failed";

/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable overriding the configured backend origin.
pub const API_BASE_ENV: &str = "MEDIBOT_API_BASE";

/// Chat route, relative to the backend origin.
pub const CHAT_ENDPOINT: &str = "api/chat";
