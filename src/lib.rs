//! Session-aware client for the Rocket.Chat REST and realtime APIs.
//!
//! ARCHITECTURE
//! ============
//! ```text
//! ClientOptions / positional args
//!         |
//!         v
//! ConnectionConfig --> RestClient (api/v1)  --+
//!                  --> WsClient (websocket) --+--> RocketChatClient
//!                                             |      |- login coordinator
//!                         Session <-----------+      |- facades (groups, chat, ...)
//! ```
//!
//! Every operation is an `async fn` returning `Result<_, ClientError>`.
//! Callers that prefer completion callbacks use [`completion::Completion`]
//! or [`completion::resolve`] over the same futures.
//!
//! ```no_run
//! use rocketchat::{ConnectionConfig, PageQuery, RocketChatClient};
//!
//! # async fn run() -> Result<(), rocketchat::ClientError> {
//! let config = ConnectionConfig::positional("http", "localhost", 3000, "alice", "secret");
//! let client = RocketChatClient::connect(config).await?;
//! let groups = client.groups().list(&PageQuery::new().with_count(20)).await?;
//! println!("{groups}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use api::{HistoryOptions, PageQuery};
pub use client::{LoginData, LoginState, RocketChatClient};
pub use completion::{Callback, Completion, resolve};
pub use config::{ClientOptions, ConnectionConfig};
pub use error::ClientError;
pub use session::{Credentials, Session};
pub use transport::{HttpMethod, RealtimeTransport, RequestDescriptor, RequestTransport};
