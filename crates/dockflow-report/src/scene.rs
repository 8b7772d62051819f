//! Explicit PyMOL scene construction.
//!
//! PyMOL's own session state is ambient and persists across commands; here a
//! render is described by a [`RenderScene`] value instead, built fresh for
//! each image and emitted as a `.pml` script. Independent renders therefore
//! reset nothing because they share nothing.

use std::path::Path;

/// Accumulates PyMOL commands for one render, starting from a blank session.
#[derive(Debug, Clone)]
pub struct RenderScene {
    commands: Vec<String>,
}

impl RenderScene {
    /// A scene whose first command wipes any inherited viewer state.
    pub fn new() -> Self {
        Self {
            commands: vec!["reinitialize".to_string(), "bg_color white".to_string()],
        }
    }

    /// Load a structure file under a named object.
    pub fn load(&mut self, path: &Path, name: &str) -> &mut Self {
        self.commands.push(format!("load {}, {name}", path.display()));
        self
    }

    /// Color a selection.
    pub fn color(&mut self, color: &str, selection: &str) -> &mut Self {
        self.commands.push(format!("color {color}, {selection}"));
        self
    }

    /// Stick representation for a selection.
    pub fn show_sticks(&mut self, selection: &str) -> &mut Self {
        self.commands.push(format!("show sticks, {selection}"));
        self
    }

    /// Cartoon representation for a selection.
    pub fn show_cartoon(&mut self, selection: &str) -> &mut Self {
        self.commands.push(format!("show cartoon, {selection}"));
        self
    }

    /// Least-squares structural superposition of `mobile` onto `target`.
    pub fn align(&mut self, mobile: &str, target: &str) -> &mut Self {
        self.commands.push(format!("align {mobile}, {target}"));
        self
    }

    /// Frame the view on a selection.
    pub fn orient(&mut self, selection: &str) -> &mut Self {
        self.commands.push(format!("orient {selection}"));
        self
    }

    /// Ray-trace and save a still image.
    pub fn render_png(&mut self, path: &Path) -> &mut Self {
        self.commands.push("ray 1200, 900".to_string());
        self.commands.push(format!("png {}, dpi=150", path.display()));
        self
    }

    /// Emit the scene as a `.pml` script for `pymol -cq`.
    pub fn to_script(&self) -> String {
        let mut script = self.commands.join("\n");
        script.push_str("\nquit\n");
        script
    }
}

impl Default for RenderScene {
    fn default() -> Self {
        Self::new()
    }
}
