//! SVG document rendering for block layouts.
//!
//! Produces a standalone SVG with the source's canvas size as its viewBox,
//! an optional `<style>` block coloring each class, and one `<rect>` per
//! block inside a single group.

use std::collections::BTreeMap;

use crate::blocks::{Rect, StyleClass};
use crate::transform::BlockLayout;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Default id prefix for the generated group.
pub const DEFAULT_ID: &str = "codeblocks";

/// Fill color per style class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<StyleClass, String>,
}

impl Default for Palette {
    /// Editor-like dark theme colors.
    fn default() -> Self {
        let colors = [
            (StyleClass::Parenthesis, "rgb(0, 105, 243)"),
            (StyleClass::Space, "rgb(0, 122, 216)"),
            (StyleClass::Comment, "rgb(106, 153, 81)"),
            (StyleClass::Function, "rgb(220, 220, 138)"),
            (StyleClass::AccessModifier, "rgb(79, 193, 255)"),
            (StyleClass::PrimitiveType, "rgb(156, 220, 254)"),
            (StyleClass::ConditionalStatement, "rgb(0, 89, 206)"),
            (StyleClass::JumpStatement, "rgb(189, 87, 129)"),
            (StyleClass::VariableDeclarationConst, "rgb(77, 201, 176)"),
            (StyleClass::VariableDeclarationLet, "rgb(197, 134, 160)"),
        ]
        .into_iter()
        .map(|(class, color)| (class, color.to_string()))
        .collect();

        Self { colors }
    }
}

impl Palette {
    /// Palette with no colors; renders no `<style>` block.
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    /// Replace colors by class name. Unknown names are skipped with a warning.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (name, color) in overrides {
            match StyleClass::from_name(name) {
                Some(class) => {
                    self.colors.insert(class, color.clone());
                }
                None => log::warn!("Ignoring color for unknown class '{}'", name),
            }
        }
        self
    }

    pub fn color(&self, class: StyleClass) -> Option<&str> {
        self.colors.get(&class).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// How the SVG document is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Prefix for the group id (`{id}-code-blocks-group`).
    pub id: String,
    /// Colors to embed, if any.
    pub palette: Option<Palette>,
    /// Corner radius applied to every rect.
    pub border_radius: Option<f32>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            palette: Some(Palette::default()),
            border_radius: None,
        }
    }
}

/// Escape text for use in XML attributes and character data.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_style(palette: &Palette) -> String {
    let mut style = String::from("  <style>\n");
    for (class, color) in &palette.colors {
        style.push_str(&format!(
            "    .{} {{ fill: {}; }}\n",
            class.name(),
            escape_xml(color)
        ));
    }
    style.push_str("  </style>\n");
    style
}

fn render_rect(rect: &Rect, border_radius: Option<f32>) -> String {
    let mut element = format!(
        "    <rect width=\"{}\" height=\"{}\" x=\"{}\" y=\"{}\" class=\"{}\"",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        rect.class.name()
    );
    if let Some(radius) = border_radius {
        element.push_str(&format!(" rx=\"{}\"", radius));
    }
    element.push_str("/>\n");
    element
}

/// Render `layout` as a complete SVG document.
pub fn render_svg(layout: &BlockLayout, options: &RenderOptions) -> String {
    let mut output = format!(
        "<svg xmlns=\"{ns}\" xmlns:svg=\"{ns}\" viewBox=\"0 0 {} {}\">\n",
        layout.width,
        layout.height,
        ns = SVG_NAMESPACE
    );

    if let Some(palette) = options.palette.as_ref().filter(|p| !p.is_empty()) {
        output.push_str(&render_style(palette));
    }

    output.push_str(&format!(
        "  <g id=\"{}-code-blocks-group\">\n",
        escape_xml(&options.id)
    ));
    for rect in &layout.rects {
        output.push_str(&render_rect(rect, options.border_radius));
    }
    output.push_str("  </g>\n");
    output.push_str("</svg>\n");

    output
}
