// Adapters layer: concrete implementations of the domain ports (http, session storage, notifications).

pub mod http;
pub mod notifier;
pub mod session_store;

pub use http::HttpCommerceApi;
pub use notifier::{ConsoleNotifier, RecordingNotifier};
pub use session_store::{FileSessionStore, MemorySessionStore};
