//! Resource Registry - which resources each service exposes.

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{CategoriesResource, ResourceDefinition, ServerInfoResource};
use super::service::ResourceEntry;
use crate::core::config::ServiceKind;

/// Helper function to create an annotated resource from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Get all resources of the given service as ResourceEntries.
pub fn get_all_resources(service: ServiceKind) -> Vec<ResourceEntry> {
    match service {
        ServiceKind::Calculator => vec![build_resource::<ServerInfoResource>()],
        ServiceKind::Expense => vec![build_resource::<CategoriesResource>()],
    }
}
