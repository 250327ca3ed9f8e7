//! Typed host-domain contracts for the dashboard panel.
//!
//! This crate is the API-first boundary for platform services consumed by
//! the dashboard runtime: the durable record store holding the persisted
//! dashboard blob, host notifications, the credential/session provider used
//! by the issue-tracker widget, and shared time helpers. Concrete host
//! adapters (webview storage, editor commands) live outside this workspace;
//! the in-memory and no-op adapters here cover tests and headless targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod notifications;
pub mod session;
pub mod storage;
pub mod time;

pub use notifications::{NoopNotificationService, NotificationFuture, NotificationService};
pub use session::{
    resolve_auth_state, AuthDisplayState, CredentialProvider, MemoryCredentialProvider,
    NoopCredentialProvider, SessionCredentials, SessionFuture,
};
pub use storage::record_store::{
    DashboardRecordStore, MemoryRecordStore, NoopRecordStore, RecordStoreFuture,
    DASHBOARD_STATE_KEY,
};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
