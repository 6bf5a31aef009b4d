#[cfg(feature = "provider-gemini")]
pub mod gemini;

#[cfg(feature = "provider-openrouter")]
pub mod openrouter;
