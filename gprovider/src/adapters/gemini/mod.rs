mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub use provider::GeminiProvider;
pub use transport::{GeminiHttpTransport, GeminiTransport};
pub use types::{GEMINI_BASE_URL, GeminiMethod, GeminiModel};
