//! Helmdrive Client - reconciles declared releases against the helm CLI
//!
//! The helm v2 CLI is an imperative tool with no machine-readable output
//! mode. This crate drives it anyway: it builds invocation arguments from a
//! validated [`HelmConfig`](helmdrive_core::HelmConfig), runs helm as a
//! subprocess, and scrapes the tabular listing back into typed state.
//!
//! - [`exec`]: one-shot subprocess execution with captured diagnostics
//! - [`listing`]: defensive parsing of `helm list` output
//! - [`client`]: the stateless [`HelmClient`] reconciler
//!
//! Every operation re-derives truth by querying helm; nothing is cached or
//! retried, so any failed operation can simply be reissued.

pub mod client;
pub mod error;
pub mod exec;
pub mod listing;

pub use client::HelmClient;
pub use error::{ClientError, Result};
