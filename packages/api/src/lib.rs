//! # API crate: typed client for the CallVault server
//!
//! This crate is the single place the rest of the workspace talks to the
//! server from. It owns the one [`ApiClient`] instance semantics (auth header
//! attachment, centralized failure classification, session eviction on
//! rejected credentials) and exposes a typed wrapper per server router.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | Authenticated transport: bearer + legacy `x-token` headers, 401 eviction outside the login endpoints |
//! | [`error`] | [`ApiError`] taxonomy (validation, auth, duplicate, transient, download) |
//! | [`models`] | Wire models: [`User`], [`Permission`], [`Recording`], [`RecorderState`], ... |
//! | [`auth`] | `POST /login`, `POST /token`, `POST /register` |
//! | [`recordings`] | Recordings collection, detail, delete, authorized audio/transcript downloads |
//! | [`recorder`] | Recorder status polling and `start_recording`, with local meet-link validation |
//! | [`users`] | Current user profile, name patch, admin user management |
//! | [`permissions`] | Per-user group permissions, admin grant/update/revoke |

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod permissions;
pub mod recorder;
pub mod recordings;
pub mod users;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    DeleteResponse, Permission, RecorderStatus, RecorderState, Recording, RecordingSource,
    Speaker, TranscriptSegment, User,
};
pub use recorder::validate_meet_url;
