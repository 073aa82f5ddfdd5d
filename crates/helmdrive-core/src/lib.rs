//! Helmdrive Core - types shared by the release reconciler
//!
//! This crate provides the foundational types for helmdrive:
//! - `HelmConfig` / `ChartSource`: connection and behavior options
//! - `ReleaseSpec`: the caller's declared release
//! - `ObservedRelease` / `ReleaseStatus`: one fresh read of live state
//! - `overrides`: canonical minified-JSON form for override payloads

pub mod config;
pub mod error;
pub mod overrides;
pub mod release;

pub use config::{ChartSource, HelmConfig};
pub use error::{CoreError, Result};
pub use overrides::{normalize, normalize_lenient};
pub use release::{ObservedRelease, ReleaseSpec, ReleaseStatus};
