//! Just enough glTF 2.0 to bound a model: the JSON document (plain `.gltf`
//! or the JSON chunk of a `.glb`), the node hierarchy, and the `min`/`max`
//! of every POSITION accessor. Vertex buffers are never read.

use std::collections::HashMap;

use glam::{DMat4, DQuat, DVec3};
use serde::Deserialize;
use tracing::debug;

use super::error::SceneError;
use super::fit::Aabb;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const GLB_VERSION: u32 = 2;
const GLB_CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const GLB_HEADER_LEN: usize = 12;
const GLB_CHUNK_HEADER_LEN: usize = 8;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    scene: Option<usize>,
    scenes: Vec<SceneDef>,
    nodes: Vec<NodeDef>,
    meshes: Vec<MeshDef>,
    accessors: Vec<AccessorDef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SceneDef {
    nodes: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NodeDef {
    children: Vec<usize>,
    mesh: Option<usize>,
    matrix: Option<[f64; 16]>,
    translation: Option<[f64; 3]>,
    rotation: Option<[f64; 4]>,
    scale: Option<[f64; 3]>,
}

impl NodeDef {
    /// `matrix` wins over TRS; both are column-major as in glTF.
    fn local_transform(&self) -> DMat4 {
        if let Some(m) = self.matrix {
            return DMat4::from_cols_array(&m);
        }
        DMat4::from_scale_rotation_translation(
            self.scale.map_or(DVec3::ONE, DVec3::from),
            self.rotation.map_or(DQuat::IDENTITY, DQuat::from_array),
            self.translation.map_or(DVec3::ZERO, DVec3::from),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MeshDef {
    primitives: Vec<PrimitiveDef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PrimitiveDef {
    attributes: HashMap<String, usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AccessorDef {
    min: Option<Vec<f64>>,
    max: Option<Vec<f64>>,
}

/// World-space bounds of the default scene of a `.gltf` or `.glb` asset.
pub fn model_bounds(bytes: &[u8]) -> Result<Aabb, SceneError> {
    let doc = parse_document(bytes)?;
    let bounds = doc.scene_bounds()?;
    if bounds.is_empty() {
        return Err(SceneError::Empty);
    }
    Ok(bounds)
}

fn parse_document(bytes: &[u8]) -> Result<Document, SceneError> {
    let json = if read_u32(bytes, 0) == Some(GLB_MAGIC) {
        glb_json_chunk(bytes)?
    } else {
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
    };
    serde_json::from_slice(json).map_err(|e| SceneError::Format(format!("glTF JSON: {}", e)))
}

fn glb_json_chunk(bytes: &[u8]) -> Result<&[u8], SceneError> {
    let version = read_u32(bytes, 4).ok_or_else(|| truncated("header"))?;
    if version != GLB_VERSION {
        return Err(SceneError::Format(format!(
            "unsupported GLB version {}",
            version
        )));
    }
    let total = read_u32(bytes, 8).ok_or_else(|| truncated("header"))? as usize;
    if total > bytes.len() {
        return Err(truncated("body"));
    }
    let chunk_len = read_u32(bytes, GLB_HEADER_LEN).ok_or_else(|| truncated("chunk header"))?;
    let chunk_type = read_u32(bytes, GLB_HEADER_LEN + 4).ok_or_else(|| truncated("chunk header"))?;
    if chunk_type != GLB_CHUNK_JSON {
        return Err(SceneError::Format("first GLB chunk is not JSON".into()));
    }
    let start = GLB_HEADER_LEN + GLB_CHUNK_HEADER_LEN;
    let end = start + chunk_len as usize;
    if end > total {
        return Err(truncated("JSON chunk"));
    }
    Ok(&bytes[start..end])
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

fn truncated(what: &str) -> SceneError {
    SceneError::Format(format!("truncated GLB {}", what))
}

impl Document {
    fn scene_bounds(&self) -> Result<Aabb, SceneError> {
        let roots = self.root_nodes()?;
        if roots.is_empty() {
            // Meshes with no node hierarchy at all: take them as authored.
            debug!("glTF has no nodes, bounding {} meshes directly", self.meshes.len());
            let mut bounds = Aabb::EMPTY;
            for mesh in 0..self.meshes.len() {
                bounds = bounds.union(&self.mesh_bounds(mesh)?);
            }
            return Ok(bounds);
        }

        let mut bounds = Aabb::EMPTY;
        for root in roots {
            bounds = bounds.union(&self.node_bounds(root, &DMat4::IDENTITY, 0)?);
        }
        Ok(bounds)
    }

    /// Nodes of the default scene; without scenes, every node nobody
    /// lists as a child.
    fn root_nodes(&self) -> Result<Vec<usize>, SceneError> {
        if !self.scenes.is_empty() {
            let index = self.scene.unwrap_or(0);
            let scene = self
                .scenes
                .get(index)
                .ok_or_else(|| out_of_range("scene", index))?;
            return Ok(scene.nodes.clone());
        }
        let mut is_child = vec![false; self.nodes.len()];
        for node in &self.nodes {
            for &child in &node.children {
                if let Some(flag) = is_child.get_mut(child) {
                    *flag = true;
                }
            }
        }
        Ok((0..self.nodes.len()).filter(|&i| !is_child[i]).collect())
    }

    fn node_bounds(&self, index: usize, parent: &DMat4, depth: usize) -> Result<Aabb, SceneError> {
        // A well-formed hierarchy is a tree, so it can never be deeper than
        // the node count.
        if depth > self.nodes.len() {
            return Err(SceneError::Format("node hierarchy has a cycle".into()));
        }
        let node = self
            .nodes
            .get(index)
            .ok_or_else(|| out_of_range("node", index))?;
        let world = *parent * node.local_transform();

        let mut bounds = match node.mesh {
            Some(mesh) => self.mesh_bounds(mesh)?.transformed(&world),
            None => Aabb::EMPTY,
        };
        for &child in &node.children {
            bounds = bounds.union(&self.node_bounds(child, &world, depth + 1)?);
        }
        Ok(bounds)
    }

    fn mesh_bounds(&self, index: usize) -> Result<Aabb, SceneError> {
        let mesh = self
            .meshes
            .get(index)
            .ok_or_else(|| out_of_range("mesh", index))?;
        let mut bounds = Aabb::EMPTY;
        for primitive in &mesh.primitives {
            let Some(&accessor) = primitive.attributes.get("POSITION") else {
                continue;
            };
            let acc = self
                .accessors
                .get(accessor)
                .ok_or_else(|| out_of_range("accessor", accessor))?;
            match (&acc.min, &acc.max) {
                (Some(min), Some(max)) if min.len() >= 3 && max.len() >= 3 => {
                    bounds = bounds.union(&Aabb::new(
                        [min[0], min[1], min[2]],
                        [max[0], max[1], max[2]],
                    ));
                }
                _ => {
                    return Err(SceneError::Format(format!(
                        "POSITION accessor {} has no min/max",
                        accessor
                    )));
                }
            }
        }
        Ok(bounds)
    }
}

fn out_of_range(kind: &str, index: usize) -> SceneError {
    SceneError::Format(format!("{} index {} out of range", kind, index))
}
