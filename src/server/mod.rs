//! TCP listener and the per-connection task supervisor.

pub mod listener;
