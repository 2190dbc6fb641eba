//! User Directory: maps external subject ids to local profile rows.
//!
//! Layout: `contract` (pure models + exposable errors), `domain` (service and
//! repository port), `infra` (SeaORM storage adapter + migrations),
//! `api` (REST surface).

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
