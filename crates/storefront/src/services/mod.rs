//! Collaborator service traits and in-memory implementations.

pub mod assistant;
pub mod auth;
pub mod notification;

pub use assistant::{
    AssistantError, AssistantService, FALLBACK_REPLY, InMemoryAssistantService, SYSTEM_PROMPT,
};
pub use auth::{AuthError, AuthService, InMemoryAuthService, Session};
pub use notification::{
    InMemoryNotificationService, NotificationError, NotificationService, SentConfirmation,
};
