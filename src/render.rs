//! Optional Graphviz rendering of the tree.
//!
//! Rendering is diagnostic only. Callers go through [`TreeRenderer`] and
//! never let a [`RenderError`] end a run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::RenderError;
use crate::huffman::Node;

pub trait TreeRenderer {
    /// Renders `root` and returns the path of the produced image.
    fn render(&self, root: &Node) -> Result<PathBuf, RenderError>;
}

/// Renderer used when visualisation is switched off.
pub struct NoRenderer;

impl TreeRenderer for NoRenderer {
    fn render(&self, _root: &Node) -> Result<PathBuf, RenderError> {
        Err(RenderError::Disabled)
    }
}

/// Writes `<base>.dot` and runs `dot -Tpng` to produce `<base>.png`.
pub struct DotRenderer {
    base: PathBuf,
}

impl DotRenderer {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn dot_path(&self) -> PathBuf {
        self.base.with_extension("dot")
    }

    pub fn image_path(&self) -> PathBuf {
        self.base.with_extension("png")
    }
}

impl TreeRenderer for DotRenderer {
    fn render(&self, root: &Node) -> Result<PathBuf, RenderError> {
        let dot_path = self.dot_path();
        let image_path = self.image_path();
        if let Some(parent) = dot_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dot_path, to_dot(root))?;
        debug!("Wrote DOT description to {}", dot_path.display());

        run_dot(&dot_path, &image_path)?;
        info!("Tree image saved to {}", image_path.display());
        Ok(image_path)
    }
}

fn run_dot(dot_path: &Path, image_path: &Path) -> Result<(), RenderError> {
    let status = Command::new("dot")
        .arg("-Tpng")
        .arg("-o")
        .arg(image_path)
        .arg(dot_path)
        .status()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => RenderError::Unavailable,
            _ => RenderError::Io(e),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(RenderError::Failed(status))
    }
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Graphviz description of the tree, top to bottom, with `0`/`1` edges.
pub fn to_dot(root: &Node) -> String {
    let mut out = String::from("digraph huffman {\n    rankdir=TB;\n");
    let mut next_id = 0usize;
    // (node, parent id and edge bit)
    let mut stack = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        let id = next_id;
        next_id += 1;

        let label = match node.symbol() {
            Some(symbol) => format!("{}\\n({})", escape_label(symbol), node.freq()),
            None => format!("({})", node.freq()),
        };
        out.push_str(&format!("    n{} [label=\"{}\"];\n", id, label));

        if let Some((parent_id, bit)) = parent {
            out.push_str(&format!("    n{} -> n{} [label=\"{}\"];\n", parent_id, id, bit));
        }

        if let Node::Internal { left, right, .. } = node {
            stack.push((right.as_ref(), Some((id, '1'))));
            stack.push((left.as_ref(), Some((id, '0'))));
        }
    }

    out.push_str("}\n");
    out
}
