//! Compiles a block sequence into a self-contained HTML email document.
//!
//! Compilation is pure: the same blocks and target always produce the same
//! bytes. Block data never causes an error. Unknown types are skipped and
//! missing or malformed attributes fall back to literal defaults. Only an
//! invalid [`RenderTarget`] is rejected.

use crate::model::Block;
use serde::{Deserialize, Serialize};

pub mod html;
mod rules;
mod shell;

pub use html::{Element, Node, css_value, normalize_url, social_url};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("render width must be positive, got {0}")]
    InvalidWidth(u32),
    #[error("invalid value for {field}: {value:?}")]
    InvalidTargetValue { field: &'static str, value: String },
}

/// Layout and theme for one compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderTarget {
    /// Content width in pixels.
    pub width: u32,
    pub background_color: String,
    pub content_background_color: String,
    pub font_family: String,
    pub border_radius: String,
    pub content_padding: String,
    /// Document `<title>`.
    pub title: String,
    /// Footer line under the content; `None` omits it.
    pub branding: Option<String>,
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self {
            width: 600,
            background_color: "#f3f4f6".to_string(),
            content_background_color: "#ffffff".to_string(),
            font_family: "sans-serif".to_string(),
            border_radius: "0px".to_string(),
            content_padding: "0px".to_string(),
            title: "Email Template".to_string(),
            branding: Some("Sent with Portyo".to_string()),
        }
    }
}

impl RenderTarget {
    pub fn validate(&self) -> Result<(), CompileError> {
        if self.width == 0 {
            return Err(CompileError::InvalidWidth(self.width));
        }
        let css_fields = [
            ("backgroundColor", &self.background_color),
            ("contentBackgroundColor", &self.content_background_color),
            ("fontFamily", &self.font_family),
            ("borderRadius", &self.border_radius),
            ("contentPadding", &self.content_padding),
        ];
        for (field, value) in css_fields {
            if !html::is_safe_css(value) {
                return Err(CompileError::InvalidTargetValue {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Renders `blocks` top to bottom inside the email shell.
pub fn compile(blocks: &[Block], target: &RenderTarget) -> Result<String, CompileError> {
    target.validate()?;
    let rows = blocks
        .iter()
        .filter_map(|block| rules::render(block, target, 0))
        .map(|fragment| shell::row(fragment, target));
    Ok(shell::document(rows, target))
}

/// Renders a single block fragment without the row wrapper or shell.
///
/// Returns `Ok(None)` for blocks that render nothing, such as unknown types.
pub fn render_block(block: &Block, target: &RenderTarget) -> Result<Option<String>, CompileError> {
    target.validate()?;
    Ok(rules::render(block, target, 0).map(|fragment| fragment.render()))
}
