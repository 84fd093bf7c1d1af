//! Server info resource definition.

use serde::Serialize;

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tools::definitions::{AddTool, RandomNumberTool};

/// Fixed metadata document of the calculator service.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfoDocument {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub tools: Vec<&'static str>,
    pub author: &'static str,
}

impl Default for ServerInfoDocument {
    fn default() -> Self {
        Self {
            name: "Simple Calculator Server",
            version: "1.0",
            description: "A server that performs basic arithmetic operations and generates random numbers.",
            tools: vec![AddTool::NAME, RandomNumberTool::NAME],
            author: "Your Name",
        }
    }
}

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ServerInfoResource {
    /// The document serialized with four-space indentation.
    pub fn render() -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        ServerInfoDocument::default().serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "info://server";
    const NAME: &'static str = "server_info";
    const DESCRIPTION: &'static str = "Returns information about the server in JSON format.";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::ServerInfo
    }
}
