//! # truckersmp-api
//!
//! Typed endpoints and models for the TruckersMP web API, executed through the
//! request pipeline in [`truckersmp_core`].
//!
//! ```no_run
//! use truckersmp_api::TruckersMpClient;
//! use truckersmp_core::{CompanyId, EventId};
//!
//! # async fn run() -> truckersmp_api::Result<()> {
//! let client = TruckersMpClient::builder()
//!     .build()
//!     .expect("default configuration is valid");
//!
//! let event = client.company_event(CompanyId::new(5), EventId::new(10)).await?;
//! println!("{} departs from {}", event.name(), event.departure().city());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod models;
pub mod requests;

pub use client::{TruckersMpClient, TruckersMpClientBuilder};
pub use truckersmp_core::{Error, Result};
