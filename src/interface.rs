//! Unit-aware call surface shared by the client and every remote handle.
//!
//! [`ApiInterface`] pairs a shared unit setting with the shared transport.
//! It offers unit conversion as a service: handles convert geometry into
//! millimeters before building a request and convert results back after
//! the response arrives. [`ApiInterface::invoke`] itself never touches the
//! payload.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{ApiError, Result};
use crate::geometry::{Aabb, Vector, Xyr};
use crate::ipc::{IpcError, RpcClient};
use crate::units::Units;

/// Values that carry lengths and can move between client units and mm.
///
/// Implemented for `f64` as a bare length; never pass an angle through it.
pub trait UnitConvert: Sized {
    fn to_mm(self, units: Units) -> Self;
    fn from_mm(self, units: Units) -> Self;
}

impl UnitConvert for f64 {
    fn to_mm(self, units: Units) -> Self {
        units.to_mm(self)
    }

    fn from_mm(self, units: Units) -> Self {
        units.from_mm(self)
    }
}

impl UnitConvert for Vector {
    fn to_mm(self, units: Units) -> Self {
        Vector::new(units.to_mm(self.x), units.to_mm(self.y))
    }

    fn from_mm(self, units: Units) -> Self {
        Vector::new(units.from_mm(self.x), units.from_mm(self.y))
    }
}

/// Rotation is unit-independent and passes through unchanged.
impl UnitConvert for Xyr {
    fn to_mm(self, units: Units) -> Self {
        Xyr::new(units.to_mm(self.x), units.to_mm(self.y), self.r)
    }

    fn from_mm(self, units: Units) -> Self {
        Xyr::new(units.from_mm(self.x), units.from_mm(self.y), self.r)
    }
}

impl UnitConvert for Aabb {
    fn to_mm(self, units: Units) -> Self {
        Aabb::new(self.min_bound.to_mm(units), self.max_bound.to_mm(units))
    }

    fn from_mm(self, units: Units) -> Self {
        Aabb::new(self.min_bound.from_mm(units), self.max_bound.from_mm(units))
    }
}

/// Unit setting shared between a client and the handles it creates.
#[derive(Debug, Clone)]
pub struct SharedUnits(Arc<AtomicU8>);

impl SharedUnits {
    pub fn new(units: Units) -> Self {
        Self(Arc::new(AtomicU8::new(Self::encode(units))))
    }

    pub fn get(&self) -> Units {
        match self.0.load(Ordering::Relaxed) {
            0 => Units::Inches,
            _ => Units::Mm,
        }
    }

    pub fn set(&self, units: Units) {
        self.0.store(Self::encode(units), Ordering::Relaxed);
    }

    fn encode(units: Units) -> u8 {
        match units {
            Units::Inches => 0,
            Units::Mm => 1,
        }
    }
}

/// Unit provider plus transport, cloned into every handle.
#[derive(Clone)]
pub struct ApiInterface {
    units: SharedUnits,
    transport: Arc<Mutex<RpcClient>>,
}

impl ApiInterface {
    pub fn new(units: SharedUnits, transport: Arc<Mutex<RpcClient>>) -> Self {
        Self { units, transport }
    }

    /// Units in effect right now. Read at every conversion, so a change on
    /// the client applies to handles created earlier.
    pub fn units(&self) -> Units {
        self.units.get()
    }

    /// Client units to server millimeters.
    pub fn convert_to_api<T: UnitConvert>(&self, value: T) -> T {
        value.to_mm(self.units())
    }

    /// Server millimeters to client units.
    pub fn convert_from_api<T: UnitConvert>(&self, value: T) -> T {
        value.from_mm(self.units())
    }

    /// Forward a raw call to the transport. Calls from clones of this
    /// interface are serialized by the transport lock.
    pub async fn invoke(&self, method: &str, params: Value) -> Result<Value, IpcError> {
        let mut transport = self.transport.lock().await;
        transport.call(method, params).await
    }

    /// [`ApiInterface::invoke`] and deserialize the result.
    pub async fn invoke_as<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let result = self.invoke(method, params).await?;
        serde_json::from_value(result).map_err(|source| ApiError::UnexpectedResult {
            method: method.to_string(),
            source,
        })
    }

    pub(crate) async fn close(&self) {
        self.transport.lock().await.close();
    }
}
