//! TCP client for JSON-RPC 2.0 communication with the laser CAD/CAM server.
//!
//! This module provides `RpcClient`, an async client that owns a single
//! persistent connection, opens it lazily on the first call, and exchanges
//! one newline-framed request/response pair per call.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use thiserror::Error;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::ipc::framing::{write_frame, FrameEnd, FrameReader};
use crate::ipc::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default server TCP port.
pub const DEFAULT_PORT: u16 = 5000;

/// IPC-specific error types.
///
/// These errors provide actionable messages for common failure modes
/// when communicating with the server.
#[derive(Debug, Error)]
pub enum IpcError {
    /// Failed to connect to the server.
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] io::Error),

    /// An operation that needs a live connection was called without one.
    #[error("Socket is not connected")]
    NotConnected,

    /// Received bytes were not a UTF-8 JSON value.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Well-formed JSON that is not a valid JSON-RPC response.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Server returned a JSON-RPC error response.
    #[error("Server error {code}: {message}")]
    ServerError {
        /// JSON-RPC error code
        code: i32,
        /// Error message, verbatim from the server
        message: String,
        /// Optional additional data
        data: Option<Value>,
    },

    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for IpcError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused => {
                IpcError::ConnectionFailed(err)
            }
            _ => IpcError::Io(err),
        }
    }
}

impl From<JsonRpcError> for IpcError {
    fn from(err: JsonRpcError) -> Self {
        IpcError::ServerError {
            code: err.code,
            message: err.message,
            data: err.data,
        }
    }
}

/// An open connection split into its two halves.
struct Connection {
    reader: FrameReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

/// JSON-RPC client over a single TCP connection.
///
/// # Connection Lifecycle
///
/// - `connect()` - Open the connection if none is open (idempotent)
/// - `call()` - Connect if needed, send one request, read one response
/// - `close()` - Drop the connection (idempotent)
///
/// There is no retry and no reconnection on failure. A failed call leaves
/// the connection as it was; the next call reuses it, or opens a new one
/// after `close()`.
///
/// Calls take `&mut self`, so one request is in flight at a time.
///
/// # Example
///
/// ```ignore
/// use laser_api::ipc::RpcClient;
/// use serde_json::{json, Value};
///
/// let mut client = RpcClient::new("localhost", 5000);
/// let name = client.call("GetProjectName", Value::Null).await?;
/// let bounds = client.call("GetBodyBounds", json!(["body-id"])).await?;
/// ```
pub struct RpcClient {
    host: String,
    port: u16,
    connection: Option<Connection>,
    /// Monotonically increasing request ID counter.
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a client. No connection is opened until the first call.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connection: None,
            request_id: AtomicU64::new(1),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Open the TCP connection if it is not already open.
    ///
    /// # Errors
    ///
    /// Returns `IpcError::ConnectionFailed` if the TCP connect fails.
    pub async fn connect(&mut self) -> Result<(), IpcError> {
        if self.connection.is_some() {
            return Ok(());
        }

        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(IpcError::ConnectionFailed)?;
        let (read_half, write_half) = stream.into_split();

        self.connection = Some(Connection {
            reader: FrameReader::new(read_half),
            writer: write_half,
        });
        tracing::info!("Connected to server at {}:{}", self.host, self.port);
        Ok(())
    }

    /// Drop the connection if one is open.
    pub fn close(&mut self) {
        if self.connection.take().is_some() {
            tracing::info!("Closed connection to {}:{}", self.host, self.port);
        }
    }

    /// Send a JSON-RPC 2.0 request and wait for the response.
    ///
    /// This method:
    /// 1. Builds a JSON-RPC 2.0 request with auto-incremented ID
    /// 2. Connects if needed and sends it as one newline-terminated frame
    /// 3. Reads one response frame (1s per-read timeout)
    /// 4. Parses the response and extracts the result or error
    ///
    /// # Arguments
    ///
    /// * `method` - The RPC method name (e.g., "GetBodyBounds")
    /// * `params` - Positional parameters as a JSON array, or `Value::Null`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let id = client.call("LoopCreate", Value::Null).await?;
    /// ```
    pub async fn call(&mut self, method: &str, params: Value) -> Result<Value, IpcError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        self.call_request(&request).await
    }

    /// Send an already-built request and wait for its response.
    pub async fn call_request(&mut self, request: &JsonRpcRequest) -> Result<Value, IpcError> {
        self.connect().await?;
        self.send(request).await?;
        self.receive(request.id).await
    }

    /// Read the response to request `request_id` from the open connection.
    ///
    /// Replies to earlier requests (a lower numeric `id`) are late answers to
    /// calls that were cancelled or timed out; they are logged and skipped.
    ///
    /// # Errors
    ///
    /// - `IpcError::NotConnected` if no connection is open
    /// - `IpcError::Decode` if the frame is not UTF-8 JSON, including an
    ///   empty or truncated frame left by a timeout
    /// - `IpcError::ServerError` if the server answered with an error object
    /// - `IpcError::Protocol` if the JSON is not a JSON-RPC response, or it
    ///   answers a request other than `request_id`
    pub async fn receive(&mut self, request_id: u64) -> Result<Value, IpcError> {
        loop {
            let response = self.receive_response().await?;
            let id = response.id.clone();

            match id.as_ref() {
                Some(id) if id.as_u64() == Some(request_id) => {
                    return Self::into_result(response);
                }
                Some(id) if id.as_u64().is_some_and(|stale| stale < request_id) => {
                    tracing::warn!(
                        stale_id = %id,
                        expected_id = request_id,
                        "Discarding response to an earlier request"
                    );
                }
                // The server could not read the request id
                None | Some(Value::Null) if response.error.is_some() => {
                    return Self::into_result(response);
                }
                id => {
                    return Err(IpcError::Protocol(format!(
                        "Response id {} does not match request id {}",
                        id.map_or_else(|| "<missing>".to_string(), Value::to_string),
                        request_id
                    )));
                }
            }
        }
    }

    /// Read and decode one frame as a JSON-RPC response envelope.
    async fn receive_response(&mut self) -> Result<JsonRpcResponse, IpcError> {
        let connection = self.connection.as_mut().ok_or(IpcError::NotConnected)?;
        let frame = connection.reader.read_frame().await?;
        tracing::debug!(bytes = frame.bytes.len(), end = ?frame.end, "Received frame");

        let text = String::from_utf8(frame.bytes)
            .map_err(|e| IpcError::Decode(format!("Response is not valid UTF-8: {}", e)))?;

        let payload: Value = serde_json::from_str(&text).map_err(|e| {
            IpcError::Decode(match frame.end {
                FrameEnd::Delimited => format!("Invalid JSON: {}", e),
                FrameEnd::Closed => format!("Invalid JSON before connection closed: {}", e),
                FrameEnd::TimedOut => format!("Invalid JSON after read timeout: {}", e),
            })
        })?;

        serde_json::from_value(payload)
            .map_err(|e| IpcError::Protocol(format!("Malformed response envelope: {}", e)))
    }

    /// Generate the next request ID.
    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn send(&mut self, request: &JsonRpcRequest) -> Result<(), IpcError> {
        let connection = self.connection.as_mut().ok_or(IpcError::NotConnected)?;

        let request_json = serde_json::to_string(request)
            .map_err(|e| IpcError::Protocol(format!("Failed to serialize request: {}", e)))?;

        tracing::debug!(method = %request.method, id = request.id, "Sending request");
        write_frame(&mut connection.writer, &request_json).await?;
        Ok(())
    }

    /// Extract the result or error from a matched response.
    fn into_result(response: JsonRpcResponse) -> Result<Value, IpcError> {
        if let Some(err) = response.error {
            return Err(err.into());
        }

        response
            .result
            .ok_or_else(|| IpcError::Protocol("Response missing both result and error".to_string()))
    }
}
