//! Loop handles and the loop scratch pad.

use serde_json::{json, Value};

use super::BodyHandle;
use crate::error::Result;
use crate::geometry::Vector;
use crate::interface::ApiInterface;

/// A closed boundary curve in the server's scratch workspace.
#[derive(Clone)]
pub struct LoopHandle {
    id: String,
    interface: ApiInterface,
}

impl_handle_identity!(LoopHandle);

impl LoopHandle {
    pub(crate) fn new(id: String, interface: ApiInterface) -> Self {
        Self { id, interface }
    }

    /// Create a scratch body with this loop as its outer boundary.
    /// Same call as [`BodyScratchPad::create`](super::BodyScratchPad::create).
    pub async fn create_body(&self) -> Result<BodyHandle> {
        let id: String = self
            .interface
            .invoke_as("BodyCreate", json!([self.id]))
            .await?;
        Ok(BodyHandle::new(id, self.interface.clone()))
    }
}

/// Creates loops in the scratch workspace.
#[derive(Clone)]
pub struct LoopScratchPad {
    interface: ApiInterface,
}

impl LoopScratchPad {
    pub(crate) fn new(interface: ApiInterface) -> Self {
        Self { interface }
    }

    /// Create an empty loop.
    pub async fn create(&self) -> Result<LoopHandle> {
        let id: String = self.interface.invoke_as("LoopCreate", Value::Null).await?;
        Ok(LoopHandle::new(id, self.interface.clone()))
    }

    /// Create a circular loop. `center` and `radius` are in client units.
    pub async fn circle(&self, center: Vector, radius: f64) -> Result<LoopHandle> {
        let center = self.interface.convert_to_api(center);
        let radius = self.interface.convert_to_api(radius);
        let id: String = self
            .interface
            .invoke_as("LoopCircle", json!([center.x, center.y, radius]))
            .await?;
        Ok(LoopHandle::new(id, self.interface.clone()))
    }
}
