//! Cycle Event Log: append-only, dated, typed events per user, plus the
//! placeholder prediction endpoint.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
