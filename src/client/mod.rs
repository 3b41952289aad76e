//! Client side of the task list: an HTTP binding to the store and the
//! UI-independent state the terminal front-end renders.

pub mod api;
pub mod task_client;
