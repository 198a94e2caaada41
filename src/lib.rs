//! Laser API client library
//!
//! This library drives a remote laser CAD/CAM application over line-delimited
//! JSON-RPC:
//!
//! - `ipc` - TCP transport, framing and JSON-RPC envelopes
//! - `geometry` - vectors, transforms, bounding boxes
//! - `units` - inches/millimeters conversion
//! - `interface` - unit-aware call surface shared by all handles
//! - `handles` - loops, bodies, project items and etches on the server
//! - `client` - the high-level `ApiClient`
//!
//! # Usage
//!
//! ```ignore
//! use laser_api::{ApiClient, ClientConfig, Units};
//!
//! let client = ApiClient::new(ClientConfig::load()?.with_units(Units::Inches));
//! println!("{}", client.project_name().await?);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod interface;
pub mod ipc;
pub mod units;

pub use client::{ApiClient, BodySource, ScratchPad};
pub use config::ClientConfig;
pub use error::ApiError;
pub use geometry::{Aabb, GeometryError, Transform, Vector, Xyr};
pub use units::Units;
