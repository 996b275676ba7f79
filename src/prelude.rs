//! Convenience re-exports for common use.

pub use crate::auth::{AccessToken, CredentialResolver, IdentityProvider, MetadataIdentity};
pub use crate::client::AnswerClient;
pub use crate::config::Config;
pub use crate::error::{AssistError, Result};
pub use crate::normalize::{collect_answer, single_answer_text, AssistChunk};
pub use crate::session::SessionState;
pub use crate::tool::{SearchTool, Tool, ToolParameters};
