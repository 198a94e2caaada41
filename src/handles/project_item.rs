//! Project tree items and the entity factory behind `GetEntities`.

use serde::Deserialize;
use serde_json::json;

use super::EtchItem;
use crate::error::Result;
use crate::geometry::Xyr;
use crate::interface::ApiInterface;

/// Prefix of the type name the server gives etch entities.
const ETCH_TYPE_PREFIX: &str = "Etch";

/// One entry of the `GetEntities` result.
///
/// Servers send either a bare id or an object with the id and type name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntityDescriptor {
    Id(String),
    Detailed {
        #[serde(rename = "Id")]
        id: String,
        #[serde(rename = "TypeName", default)]
        type_name: Option<String>,
    },
}

impl EntityDescriptor {
    pub fn id(&self) -> &str {
        match self {
            EntityDescriptor::Id(id) => id,
            EntityDescriptor::Detailed { id, .. } => id,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            EntityDescriptor::Id(_) => None,
            EntityDescriptor::Detailed { type_name, .. } => type_name.as_deref(),
        }
    }
}

/// An entity in the project tree.
#[derive(Clone)]
pub struct ProjectItem {
    id: String,
    pub(super) interface: ApiInterface,
}

impl_handle_identity!(ProjectItem);

impl ProjectItem {
    pub(crate) fn new(id: String, interface: ApiInterface) -> Self {
        Self { id, interface }
    }

    pub async fn name(&self) -> Result<String> {
        self.interface
            .invoke_as("GetEntityName", json!([self.id]))
            .await
    }

    pub async fn set_name(&self, name: &str) -> Result<()> {
        self.interface
            .invoke("SetEntityName", json!([self.id, name]))
            .await?;
        Ok(())
    }

    /// Server type name, e.g. `"Rectangle"` or `"Circle"`.
    pub async fn type_name(&self) -> Result<String> {
        self.interface
            .invoke_as("GetEntityTypeName", json!([self.id]))
            .await
    }

    /// Placement relative to the origin parent, in client units.
    pub async fn origin(&self) -> Result<Xyr> {
        let origin: Xyr = self
            .interface
            .invoke_as("GetEntityOrigin", json!([self.id]))
            .await?;
        Ok(self.interface.convert_from_api(origin))
    }

    pub async fn set_origin(&self, origin: Xyr) -> Result<()> {
        let origin = self.interface.convert_to_api(origin);
        self.interface
            .invoke("SetEntityOrigin", json!([self.id, origin]))
            .await?;
        Ok(())
    }

    /// The item this one is placed relative to, or `None` for the project root.
    pub async fn origin_parent(&self) -> Result<Option<ProjectItem>> {
        let parent: Option<String> = self
            .interface
            .invoke_as("GetEntityOriginParent", json!([self.id]))
            .await?;
        Ok(parent.map(|id| ProjectItem::new(id, self.interface.clone())))
    }

    pub async fn set_origin_parent(&self, parent: Option<&ProjectItem>) -> Result<()> {
        let parent_id = parent.map(|p| p.id.as_str());
        self.interface
            .invoke("SetEntityOriginParent", json!([self.id, parent_id]))
            .await?;
        Ok(())
    }
}

/// A project tree entity, typed by kind where the client knows it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectEntity {
    Etch(EtchItem),
    Item(ProjectItem),
}

impl ProjectEntity {
    /// Pick the handle type for a `GetEntities` entry.
    pub fn from_descriptor(descriptor: EntityDescriptor, interface: ApiInterface) -> Self {
        let is_etch = descriptor
            .type_name()
            .is_some_and(|name| name.starts_with(ETCH_TYPE_PREFIX));
        let id = match descriptor {
            EntityDescriptor::Id(id) => id,
            EntityDescriptor::Detailed { id, .. } => id,
        };

        let item = ProjectItem::new(id, interface);
        if is_etch {
            ProjectEntity::Etch(EtchItem::from_item(item))
        } else {
            ProjectEntity::Item(item)
        }
    }

    /// The generic project item view.
    pub fn as_item(&self) -> &ProjectItem {
        match self {
            ProjectEntity::Etch(etch) => etch.as_item(),
            ProjectEntity::Item(item) => item,
        }
    }

    pub fn id(&self) -> &str {
        self.as_item().id()
    }
}
