//! # supportctl-core
//!
//! Typed client for the AWS Support API (version `2013-04-15`).
//!
//! The service speaks JSON over HTTPS: every operation is a signed
//! `POST /` naming its target in the `X-Amz-Target` header. This crate
//! provides:
//!
//! - [`types`]: request and response shapes with exact wire field names
//! - [`operations`]: the operation table, one zero-sized type per operation
//! - [`transport`] and [`signing`]: the SigV4-signed JSON transport
//! - [`SupportClient`]: one async method per operation
//! - [`pagination`]: helpers that follow `nextToken` to the end
//! - [`config`]: named profiles, credential resolution and retry settings
//!
//! Cases, severities, categories and Trusted Advisor checks are all owned by
//! the service; the client performs no validation or caching of its own.
//!
//! ```rust,no_run
//! use supportctl_core::{SupportClient, types::CreateCaseRequest, types::SeverityCode};
//!
//! # async fn example() -> supportctl_core::Result<()> {
//! let client = SupportClient::new("AKIDEXAMPLE", "secret", "us-east-1")?;
//! let created = client
//!     .create_case(
//!         CreateCaseRequest::new("Instance unreachable", "i-0abc stopped answering")
//!             .with_severity(SeverityCode::High),
//!     )
//!     .await?;
//! println!("{:?}", created.case_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod operations;
pub mod pagination;
pub mod signing;
pub mod transport;
pub mod types;

pub use client::{SupportClient, SupportClientBuilder};
pub use error::{Result, SupportError};
pub use operations::{OPERATIONS, Operation, OperationInfo};
pub use signing::Credentials;
pub use transport::{JsonClient, Transport};
