//! Stand-ins for clay's public API.
//!
//! `clay.div`...``, `clay(Base)`...`` and `createGlobalStyle`...`` are meant
//! to be rewritten away before a module runs. These types give the API its
//! shape; every runtime path through them fails with
//! [`PlaceholderError::NotTransformed`], which means the plugin never ran.

use crate::plugin::ClayPlugin;
use thiserror::Error;

/// Clay API used without the plugin having rewritten it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error(
        "{api} should be transformed by {plugin}. \
         Make sure the plugin is configured in your vite.config.ts and appears before ecsstatic.",
        plugin = ClayPlugin::NAME
    )]
    NotTransformed {
        /// The API that was reached at runtime.
        api: &'static str,
    },
}

/// A styled component produced by a clay declaration. Uninhabited: only a
/// rewritten module has real components.
#[derive(Debug)]
pub enum ClayComponent {}

/// A component that only applies global styles. Uninhabited for the same
/// reason as [`ClayComponent`].
#[derive(Debug)]
pub enum GlobalStyleComponent {}

/// The `clay` namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clay {
    _private: (),
}

/// The value user code reaches as `clay`.
pub static CLAY: Clay = Clay { _private: () };

impl Clay {
    /// `clay.tag`css``
    pub fn element(&self, _tag: &str, _css: &str) -> Result<ClayComponent, PlaceholderError> {
        Err(PlaceholderError::NotTransformed { api: "clay" })
    }

    /// `clay(Base)`css``
    pub fn extend(&self, _base: &str, _css: &str) -> Result<ClayComponent, PlaceholderError> {
        Err(PlaceholderError::NotTransformed { api: "clay" })
    }
}

/// `createGlobalStyle`css``
pub fn create_global_style(_css: &str) -> Result<GlobalStyleComponent, PlaceholderError> {
    Err(PlaceholderError::NotTransformed {
        api: "createGlobalStyle",
    })
}
