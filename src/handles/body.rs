//! Body handles: regions bounded by loops, edited with boolean operations.

use serde::Deserialize;
use serde_json::{json, Value};

use super::LoopHandle;
use crate::error::Result;
use crate::geometry::{Aabb, Vector, Xyr};
use crate::interface::ApiInterface;

/// `GetBodyBounds` result, in millimeters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BodyBounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

/// A body in the server's scratch workspace.
#[derive(Clone)]
pub struct BodyHandle {
    id: String,
    interface: ApiInterface,
}

impl_handle_identity!(BodyHandle);

impl BodyHandle {
    pub(crate) fn new(id: String, interface: ApiInterface) -> Self {
        Self { id, interface }
    }

    /// Apply `tool` to the body. A positive loop is added (union), a
    /// negative loop is cut away.
    pub async fn operate(&self, tool: &LoopHandle) -> Result<Value> {
        let result = self
            .interface
            .invoke("BodyOperate", json!([self.id, tool.id()]))
            .await?;
        Ok(result)
    }

    /// Apply one copy of `tool` per transform in a single call, for
    /// patterned features. Transforms are in client units.
    pub async fn operate_copies(&self, tool: &LoopHandle, transforms: &[Xyr]) -> Result<Value> {
        let transforms: Vec<Xyr> = transforms
            .iter()
            .map(|xyr| self.interface.convert_to_api(*xyr))
            .collect();
        let result = self
            .interface
            .invoke("BodyOperateCopies", json!([self.id, tool.id(), transforms]))
            .await?;
        Ok(result)
    }

    /// Insert `boundary` as an inner boundary without any checks.
    ///
    /// The server rejects a positive loop. A loop that crosses one of the
    /// body's existing boundaries leaves the body in an undefined state.
    pub async fn add_inner_unchecked(&self, boundary: &LoopHandle) -> Result<Value> {
        let result = self
            .interface
            .invoke("InsertLoopIntoBody", json!([self.id, boundary.id()]))
            .await?;
        Ok(result)
    }

    /// Current bounds in client units.
    pub async fn bounds(&self) -> Result<Aabb> {
        let b: BodyBounds = self
            .interface
            .invoke_as("GetBodyBounds", json!([self.id]))
            .await?;
        Ok(Aabb::new(
            self.interface.convert_from_api(Vector::new(b.min_x, b.min_y)),
            self.interface.convert_from_api(Vector::new(b.max_x, b.max_y)),
        ))
    }
}

/// Creates bodies in the scratch workspace.
#[derive(Clone)]
pub struct BodyScratchPad {
    interface: ApiInterface,
}

impl BodyScratchPad {
    pub(crate) fn new(interface: ApiInterface) -> Self {
        Self { interface }
    }

    /// Create a body whose outer boundary is `outer`.
    pub async fn create(&self, outer: &LoopHandle) -> Result<BodyHandle> {
        let id: String = self
            .interface
            .invoke_as("BodyCreate", json!([outer.id()]))
            .await?;
        Ok(BodyHandle::new(id, self.interface.clone()))
    }
}
