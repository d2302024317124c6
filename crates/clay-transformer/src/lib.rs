//! Clay declaration rewriting.
//!
//! Clay offers a styled-components-like syntax whose styles are extracted at
//! build time. This crate is the build step: it finds clay declarations in
//! `.tsx`/`.jsx` modules and rewrites them into calls the extraction library
//! understands. It handles:
//! - Filtering modules by path and by a cheap token scan
//! - Matching element, extension and global-style declarations
//! - Rendering replacements and injecting the imports they need
//! - Building source maps for position mapping
//!
//! # Example
//!
//! ```
//! use clay_transformer::ClayPlugin;
//!
//! let plugin = ClayPlugin::new();
//! let output = plugin
//!     .transform("const Box = clay.div`color:red;`;", "/src/Box.tsx")
//!     .expect("declaration is rewritten");
//!
//! assert!(output.code.contains("<div {...props}"));
//! assert!(output.code.contains("css`color:red;`"));
//! ```

mod const_decls;
mod error;
mod filter;
mod imports;
mod options;
mod placeholder;
mod plugin;
mod render;
mod rules;
mod transform;

pub use error::TransformError;
pub use filter::{is_eligible, might_contain_clay};
pub use imports::{css_import, global_style_import};
pub use options::{
    TransformOptions, DEFAULT_GLOBAL_STYLE_ALIAS, DEFAULT_GLOBAL_STYLE_IDENT, DEFAULT_LIBRARY,
    DEFAULT_NAMESPACE, DEFAULT_VENDOR_DIR,
};
pub use placeholder::{
    create_global_style, Clay, ClayComponent, GlobalStyleComponent, PlaceholderError, CLAY,
};
pub use plugin::{unified_plugins, ClayPlugin, Enforce, PluginDescriptor, TransformOutput};
pub use rules::{Capture, DeclarationMatch, RuleKind, RuleSet};
pub use transform::{transform, RewrittenDeclaration, TransformResult, Transformer};
