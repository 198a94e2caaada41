//! Typed handles for entities that live on the server.
//!
//! A handle is a server-assigned identifier plus a clone of the
//! [`ApiInterface`](crate::interface::ApiInterface). It holds no copy of
//! the entity's state; every accessor is a round trip. Two handles are equal
//! when their ids are equal.

macro_rules! impl_handle_identity {
    ($handle:ty) => {
        impl $handle {
            /// Server-assigned identifier.
            pub fn id(&self) -> &str {
                &self.id
            }
        }

        impl PartialEq for $handle {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $handle {}

        impl std::hash::Hash for $handle {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl std::fmt::Debug for $handle {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($handle))
                    .field("id", &self.id)
                    .finish()
            }
        }
    };
}

mod body;
mod etch;
mod loops;
mod project_item;

pub use body::{BodyHandle, BodyScratchPad};
pub use etch::{EtchItem, TextStyle};
pub use loops::{LoopHandle, LoopScratchPad};
pub use project_item::{EntityDescriptor, ProjectEntity, ProjectItem};
