//! # rucaptcha-solver
//!
//! An async Rust client for the [rucaptcha](https://rucaptcha.com) image
//! captcha solving service.
//!
//! ## Features
//!
//! - **Any image source**: URLs, local files, raw bytes or base64 text.
//! - **Submit and poll**: uploads the image, then polls at a fixed interval
//!   until a worker answers or the service reports a failure.
//! - **Timeouts and cancellation**: optional overall poll timeout and
//!   `CancellationToken` support, so long polls never leak requests.
//! - **Proxy Support**: HTTP and SOCKS5 proxies through `rquest`.
//! - **Account helpers**: balance lookup and bad-answer reporting.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rucaptcha_solver::Solver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let solver = Solver::builder("your-api-key").build()?;
//!
//!     let result = solver
//!         .solve("https://upload.wikimedia.org/wikipedia/commons/6/69/Captcha.jpg")
//!         .await?;
//!
//!     println!("id: {}", result.id);
//!     println!("answer: {}", result.answer);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## With Options
//!
//! ```ignore
//! use rucaptcha_solver::{Solver, SolveOptions};
//! use std::time::Duration;
//!
//! let solver = Solver::builder("your-api-key")
//!     .retry_interval(Duration::from_secs(5))
//!     .timeout(Duration::from_secs(120))
//!     .build()?;
//!
//! let options = SolveOptions::new().numeric(1).length(4, 6);
//! let result = solver.solve_with_options("/tmp/captcha.png", &options).await?;
//! ```

#![allow(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod models;
pub mod options;
pub mod transport;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports for convenience
pub use client::{Solver, SolverBuilder};
pub use config::SolverConfig;
pub use error::{ImageFetchError, Result, SolverError, TransportError};
pub use image::ImageInput;
pub use models::{PollOutcome, SolveResult, SubmissionId};
pub use options::SolveOptions;
pub use transport::{HttpTransport, Transport};
pub use tokio_util::sync::CancellationToken;
