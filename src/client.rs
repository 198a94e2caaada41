//! High-level client: project methods, entity creation and the scratch pad.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::handles::{
    BodyHandle, BodyScratchPad, EntityDescriptor, EtchItem, LoopHandle, LoopScratchPad,
    ProjectEntity, ProjectItem,
};
use crate::interface::{ApiInterface, SharedUnits};
use crate::ipc::RpcClient;
use crate::units::Units;

/// Source geometry for a new body entity.
#[derive(Debug, Clone, Copy)]
pub enum BodySource<'a> {
    Loop(&'a LoopHandle),
    Body(&'a BodyHandle),
}

impl<'a> From<&'a LoopHandle> for BodySource<'a> {
    fn from(handle: &'a LoopHandle) -> Self {
        BodySource::Loop(handle)
    }
}

impl<'a> From<&'a BodyHandle> for BodySource<'a> {
    fn from(handle: &'a BodyHandle) -> Self {
        BodySource::Body(handle)
    }
}

/// Factories for temporary loops and bodies that are not yet project items.
#[derive(Clone)]
pub struct ScratchPad {
    loops: LoopScratchPad,
    bodies: BodyScratchPad,
}

impl ScratchPad {
    fn new(interface: &ApiInterface) -> Self {
        Self {
            loops: LoopScratchPad::new(interface.clone()),
            bodies: BodyScratchPad::new(interface.clone()),
        }
    }

    pub fn loops(&self) -> &LoopScratchPad {
        &self.loops
    }

    pub fn bodies(&self) -> &BodyScratchPad {
        &self.bodies
    }
}

/// Client for the laser CAD/CAM application.
///
/// The connection opens on the first call. All geometry passed in or
/// returned is in the client's current [`Units`].
///
/// # Example
///
/// ```ignore
/// use laser_api::{ApiClient, ClientConfig, Units, Vector};
///
/// let client = ApiClient::new(ClientConfig::default().with_units(Units::Inches));
/// let outline = client.scratch().loops().circle(Vector::new(1.0, 1.0), 0.5).await?;
/// let body = client.scratch().bodies().create(&outline).await?;
/// let bounds = body.bounds().await?;
/// client.close().await;
/// ```
pub struct ApiClient {
    config: ClientConfig,
    units: SharedUnits,
    interface: ApiInterface,
    scratch: ScratchPad,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let units = SharedUnits::new(config.units);
        let transport = Arc::new(Mutex::new(RpcClient::new(config.host.clone(), config.port)));
        let interface = ApiInterface::new(units.clone(), transport);
        let scratch = ScratchPad::new(&interface);

        Self {
            config,
            units,
            interface,
            scratch,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn units(&self) -> Units {
        self.units.get()
    }

    /// Change display units. Applies to every handle from this client,
    /// including ones created earlier.
    pub fn set_units(&self, units: Units) {
        self.units.set(units);
    }

    pub fn interface(&self) -> &ApiInterface {
        &self.interface
    }

    pub fn scratch(&self) -> &ScratchPad {
        &self.scratch
    }

    /// Close the connection. The next call reconnects.
    pub async fn close(&self) {
        self.interface.close().await;
    }

    // =========================================================================
    // Project
    // =========================================================================

    pub async fn project_name(&self) -> Result<String> {
        self.interface.invoke_as("GetProjectName", Value::Null).await
    }

    pub async fn project_path(&self) -> Result<String> {
        self.interface.invoke_as("GetProjectPath", Value::Null).await
    }

    pub async fn project_save_as(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path_param(path.as_ref())?;
        Ok(self.interface.invoke("SaveProjectAs", json!([path])).await?)
    }

    pub async fn project_create_new(&self) -> Result<Value> {
        Ok(self.interface.invoke("CreateNewProject", Value::Null).await?)
    }

    pub async fn project_open(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path_param(path.as_ref())?;
        Ok(self.interface.invoke("OpenProject", json!([path])).await?)
    }

    // =========================================================================
    // Project tree
    // =========================================================================

    pub async fn project_items(&self) -> Result<Vec<ProjectEntity>> {
        let entries: Vec<EntityDescriptor> =
            self.interface.invoke_as("GetEntities", Value::Null).await?;
        Ok(entries
            .into_iter()
            .map(|entry| ProjectEntity::from_descriptor(entry, self.interface.clone()))
            .collect())
    }

    /// Promote a scratch loop or body to a body entity in the project tree.
    pub async fn create_body<'a>(&self, source: impl Into<BodySource<'a>>) -> Result<ProjectItem> {
        let (method, id) = match source.into() {
            BodySource::Loop(handle) => ("CreateBodyEntityFromLoop", handle.id()),
            BodySource::Body(handle) => ("CreateBodyEntityFromBody", handle.id()),
        };
        let id: String = self.interface.invoke_as(method, json!([id])).await?;
        Ok(ProjectItem::new(id, self.interface.clone()))
    }

    /// Add an empty etch entity to the project tree.
    pub async fn create_etch(&self) -> Result<EtchItem> {
        let id: String = self
            .interface
            .invoke_as("CreateEtchEntityEmpty", Value::Null)
            .await?;
        Ok(EtchItem::from_item(ProjectItem::new(
            id,
            self.interface.clone(),
        )))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

fn path_param(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        ApiError::InvalidArgument(format!("path is not valid UTF-8: {}", path.display()))
    })
}
