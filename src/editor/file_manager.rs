//! File management system for the node editor
//!
//! Handles the persisted graph document format, saving, loading, and the
//! current-file state shown in the title bar.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use egui::Pos2;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::preset::PresetStore;
use crate::constants::persistence::{CREATOR, DOCUMENT_VERSION};
use crate::error::{PersistenceError, PersistenceResult};
use crate::nodes::{AttachmentSlot, Connection, Node, NodeGraph, NodeId, NodeMode, NodeParameter, NodeType, ParameterType};

/// Persisted graph document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub connections: Vec<ConnectionData>,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// Metadata for save files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub created: String,  // RFC 3339 timestamp
    pub modified: String, // RFC 3339 timestamp
    pub creator: String,
}

impl DocumentMetadata {
    fn now() -> Self {
        let timestamp = chrono::Utc::now().to_rfc3339();
        Self {
            created: timestamp.clone(),
            modified: timestamp,
            creator: CREATOR.to_string(),
        }
    }
}

/// One node record
///
/// Attachments are written both as forward links on the host and as back
/// links on the child. Either side alone is enough to restore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<NodeMode>,
    #[serde(default)]
    pub parameters: Vec<ParameterData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_sensor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_action_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_attachments: Vec<ParameterAttachmentData>,
    /// Single-slot form written by older versions; read only
    #[serde(default, skip_serializing)]
    pub attached_parameter_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_control_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_action_control_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_parameter_host_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterData {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterAttachmentData {
    pub slot_index: usize,
    pub parameter_node_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionData {
    pub output_node_id: String,
    pub input_node_id: String,
    pub output_socket: usize,
    pub input_socket: usize,
}

/// Read and parse a document
pub fn read_document(path: &Path) -> PersistenceResult<GraphDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a document, creating parent directories as needed
pub fn write_document(path: &Path, document: &GraphDocument) -> PersistenceResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }
    let json_content = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json_content).map_err(|e| PersistenceError::io(path, e))
}

impl NodeGraph {
    /// Snapshot the graph as a document, nodes in render order
    pub fn to_document(&self) -> GraphDocument {
        let uuid_of = |id: NodeId| self.node(id).map(|n| n.uuid().to_string());

        let nodes = self
            .nodes()
            .map(|node| {
                let parent = node.parent();
                let parent_in = |wanted: fn(AttachmentSlot) -> bool| {
                    parent.filter(|link| wanted(link.slot)).and_then(|link| uuid_of(link.host))
                };
                NodeData {
                    id: node.uuid().to_string(),
                    node_type: node.node_type(),
                    x: node.position().x,
                    y: node.position().y,
                    mode: node.mode(),
                    parameters: node
                        .parameters()
                        .iter()
                        .map(|p| ParameterData {
                            name: p.name().to_string(),
                            parameter_type: p.parameter_type(),
                            value: p.value().to_string(),
                        })
                        .collect(),
                    attached_sensor_id: node.attached_sensor().and_then(uuid_of),
                    attached_action_id: node.attached_action().and_then(uuid_of),
                    parameter_attachments: node
                        .attached_parameters()
                        .filter_map(|(slot_index, child)| {
                            Some(ParameterAttachmentData {
                                slot_index,
                                parameter_node_id: uuid_of(child)?,
                            })
                        })
                        .collect(),
                    attached_parameter_id: None,
                    parent_control_id: parent_in(|slot| slot == AttachmentSlot::Sensor),
                    parent_action_control_id: parent_in(|slot| slot == AttachmentSlot::Action),
                    parent_parameter_host_id: parent_in(|slot| matches!(slot, AttachmentSlot::Parameter(_))),
                }
            })
            .collect();

        let connections = self
            .connections()
            .iter()
            .filter_map(|c| {
                Some(ConnectionData {
                    output_node_id: uuid_of(c.from_node)?,
                    input_node_id: uuid_of(c.to_node)?,
                    output_socket: c.from_socket,
                    input_socket: c.to_socket,
                })
            })
            .collect();

        GraphDocument {
            version: DOCUMENT_VERSION.to_string(),
            metadata: Some(DocumentMetadata::now()),
            nodes,
            connections,
        }
    }

    /// Build a fresh graph from a document
    ///
    /// References to unknown nodes are dropped with a warning, as are
    /// connections touching a sensor. The result is clean.
    pub fn from_document(document: &GraphDocument) -> NodeGraph {
        let mut graph = NodeGraph::new();

        // Nodes, keeping their identity and stored parameters
        let mut ids: HashMap<&str, NodeId> = HashMap::new();
        let mut records: Vec<(&NodeData, NodeId)> = Vec::with_capacity(document.nodes.len());
        for data in &document.nodes {
            if ids.contains_key(data.id.as_str()) {
                warn!("Duplicate node id {} in document, keeping the first", data.id);
                continue;
            }
            let parameters = data
                .parameters
                .iter()
                .map(|p| NodeParameter::new(p.name.as_str(), p.parameter_type, p.value.as_str()))
                .collect();
            let node = Node::rehydrate(data.id.as_str(), data.node_type, Pos2::new(data.x, data.y), data.mode, parameters);
            let id = graph.add_node(node);
            ids.insert(data.id.as_str(), id);
            records.push((data, id));
        }

        let resolve = |reference: &Option<String>| -> Option<NodeId> {
            let uuid = reference.as_deref()?;
            let id = ids.get(uuid).copied();
            if id.is_none() {
                warn!("Dropping reference to missing node {}", uuid);
            }
            id
        };

        // Sensors
        for (data, id) in &records {
            if let Some(sensor) = resolve(&data.attached_sensor_id) {
                if !graph.attach_sensor(*id, sensor) {
                    warn!("Node {} rejected sensor {}", data.id, sensor);
                }
            }
        }
        for (data, id) in &records {
            if let Some(host) = resolve(&data.parent_control_id) {
                if !graph.attach_sensor(host, *id) {
                    warn!("Sensor {} could not rejoin its control node", data.id);
                }
            }
        }

        // Actions
        for (data, id) in &records {
            if let Some(child) = resolve(&data.attached_action_id) {
                if !graph.attach_action(*id, child) {
                    warn!("Node {} rejected action {}", data.id, child);
                }
            }
        }
        for (data, id) in &records {
            if let Some(host) = resolve(&data.parent_action_control_id) {
                if !graph.attach_action(host, *id) {
                    warn!("Action {} could not rejoin its control node", data.id);
                }
            }
        }

        // Parameters
        for (data, id) in &records {
            if !data.parameter_attachments.is_empty() {
                let mut attachments: Vec<&ParameterAttachmentData> = data.parameter_attachments.iter().collect();
                attachments.sort_by_key(|attachment| attachment.slot_index);
                for attachment in attachments {
                    let reference = Some(attachment.parameter_node_id.clone());
                    if let Some(parameter) = resolve(&reference) {
                        if !graph.attach_parameter(*id, parameter, attachment.slot_index) {
                            warn!(
                                "Node {} rejected parameter {} in slot {}",
                                data.id, attachment.parameter_node_id, attachment.slot_index
                            );
                        }
                    }
                }
            } else if let Some(parameter) = resolve(&data.attached_parameter_id) {
                if !graph.attach_parameter_default(*id, parameter) {
                    warn!("Node {} rejected parameter {}", data.id, parameter);
                }
            }
        }
        for (data, id) in &records {
            if graph.parent_of(*id).is_some() {
                continue;
            }
            if let Some(host) = resolve(&data.parent_parameter_host_id) {
                if !graph.attach_parameter_default(host, *id) {
                    warn!("Parameter {} could not rejoin its host", data.id);
                }
            }
        }

        // Connections
        for data in &document.connections {
            let endpoints = (
                ids.get(data.output_node_id.as_str()).copied(),
                ids.get(data.input_node_id.as_str()).copied(),
            );
            let (Some(from), Some(to)) = endpoints else {
                warn!(
                    "Failed to restore connection {} -> {}: missing node(s)",
                    data.output_node_id, data.input_node_id
                );
                continue;
            };
            let touches_sensor = [from, to]
                .iter()
                .any(|id| graph.node(*id).is_some_and(|n| n.is_sensor()));
            if touches_sensor {
                warn!("Dropping connection attached to a sensor node");
                continue;
            }
            graph
                .connections
                .push(Connection::new(from, data.output_socket, to, data.input_socket));
        }

        // Render order as stored, then a full layout pass
        graph.z_order = records.iter().map(|(_, id)| *id).collect();
        let roots: Vec<NodeId> = graph
            .z_order
            .iter()
            .copied()
            .filter(|id| graph.parent_of(*id).is_none())
            .collect();
        for root in roots {
            graph.refresh_layout(root);
        }
        graph.mark_clean();

        info!(
            "Loaded {} nodes and {} connections",
            graph.node_count(),
            graph.connections().len()
        );
        graph
    }

    /// Replace the contents of this graph with a document
    pub fn load_document(&mut self, document: &GraphDocument) {
        let loaded = NodeGraph::from_document(document);
        self.replace_contents(loaded);
    }

    /// Write the graph to an arbitrary path
    pub fn export_to_path(&mut self, path: &Path) -> PersistenceResult<()> {
        self.commit_field_edits();
        write_document(path, &self.to_document())?;
        self.mark_clean();
        info!("Exported graph to {}", path.display());
        Ok(())
    }

    /// Replace the graph with a document read from an arbitrary path
    ///
    /// The workspace is left dirty since it no longer matches its preset.
    pub fn import_from_path(&mut self, path: &Path) -> PersistenceResult<()> {
        let document = read_document(path)?;
        self.load_document(&document);
        self.mark_dirty();
        info!("Imported graph from {}", path.display());
        Ok(())
    }

    /// Save to the active preset
    pub fn save(&mut self, store: &PresetStore) -> PersistenceResult<PathBuf> {
        let path = store.path_for(self.active_preset())?;
        self.commit_field_edits();
        write_document(&path, &self.to_document())?;
        self.mark_clean();
        Ok(path)
    }

    /// Load the active preset; returns false when it has never been saved
    pub fn load(&mut self, store: &PresetStore) -> PersistenceResult<bool> {
        let path = store.path_for(self.active_preset())?;
        if !path.is_file() {
            return Ok(false);
        }
        let document = read_document(&path)?;
        self.load_document(&document);
        self.mark_clean();
        Ok(true)
    }

    pub fn has_saved_graph(&self, store: &PresetStore) -> bool {
        store.exists(self.active_preset())
    }
}

/// Tracks which file the editor is working on
#[derive(Debug, Clone, Default)]
pub struct FileManager {
    /// Current file path (None if unsaved/new file)
    current_file_path: Option<PathBuf>,
}

impl FileManager {
    /// Create a new file manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current file path
    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    /// Get display name for the current file
    pub fn get_file_display_name(&self, graph: &NodeGraph) -> String {
        let file_name = match &self.current_file_path {
            Some(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("Unknown")
                .to_string(),
            None => "Untitled".to_string(),
        };
        if graph.is_dirty() {
            format!("{}*", file_name)
        } else {
            file_name
        }
    }

    /// Forget the current file
    pub fn new_file(&mut self) {
        self.current_file_path = None;
    }

    /// Save the graph to a file and make it the current file
    pub fn save_to_file(&mut self, file_path: &Path, graph: &mut NodeGraph) -> PersistenceResult<()> {
        graph.export_to_path(file_path)?;
        self.current_file_path = Some(file_path.to_path_buf());
        Ok(())
    }

    /// Load a graph from a file and make it the current file
    pub fn load_from_file(&mut self, file_path: &Path, graph: &mut NodeGraph) -> PersistenceResult<()> {
        let document = read_document(file_path)?;
        graph.load_document(&document);
        graph.mark_clean();
        self.current_file_path = Some(file_path.to_path_buf());
        Ok(())
    }

    /// Save to the current file, if there is one
    pub fn save_file(&mut self, graph: &mut NodeGraph) -> PersistenceResult<bool> {
        match self.current_file_path.clone() {
            Some(path) => self.save_to_file(&path, graph).map(|()| true),
            None => Ok(false),
        }
    }
}
