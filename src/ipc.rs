//! IPC client for communication with the laser CAD/CAM server.
//!
//! This module is the transport boundary: a single persistent TCP
//! connection carrying JSON-RPC 2.0 requests and responses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐            TCP              ┌─────────────────────┐
//! │  laser_api      │  ◄─────────────────────────►│  CAD/CAM server     │
//! │  (RpcClient)    │   JSON-RPC 2.0 + newlines   │  (geometry kernel)  │
//! └─────────────────┘                             └─────────────────────┘
//! ```
//!
//! # Protocol
//!
//! Each message is one JSON value followed by `\n`:
//!
//! ```text
//! {"jsonrpc":"2.0","method":"GetBodyBounds","params":["b-17"],"id":4}\n
//! {"jsonrpc":"2.0","result":{"MinX":0,"MinY":0,"MaxX":25.4,"MaxY":25.4},"id":4}\n
//! ```
//!
//! All lengths on the wire are millimeters.
//!
//! # Usage
//!
//! ```ignore
//! use laser_api::ipc::RpcClient;
//! use serde_json::Value;
//!
//! let mut client = RpcClient::new("localhost", 5000);
//! let result = client.call("GetProjectName", Value::Null).await?;
//! ```

mod client;
mod framing;
mod protocol;

pub use client::{IpcError, RpcClient, DEFAULT_HOST, DEFAULT_PORT};
pub use framing::{write_frame, Frame, FrameEnd, FrameReader, RECEIVE_TIMEOUT};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
