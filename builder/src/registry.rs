//! The shared engine instance that grammar modules register against.
//!
//! Inside the pack the core engine is bound to one variable, and every
//! grammar calls `registerLanguage` on it. A [`Registry`] is built once per
//! run from the configured variable name and handed by reference to the
//! rewriter and the assembler, so both agree on the name.

use crate::module::ModuleId;

/// Names the shared engine instance and renders the code that uses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    instance_name: String,
}

impl Registry {
    /// Create a registry for the given instance variable.
    #[must_use]
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
        }
    }

    /// The variable holding the shared engine.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Declaration binding `value` to the shared instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use highlight_pack_builder::registry::Registry;
    ///
    /// let registry = Registry::new("highlightGlobalInstance");
    /// assert_eq!(
    ///     registry.declaration("hljs"),
    ///     "var highlightGlobalInstance = hljs;"
    /// );
    /// ```
    #[must_use]
    pub fn declaration(&self, value: &str) -> String {
        format!("var {} = {value};", self.instance_name)
    }

    /// Call registering `value` under `id` against the shared instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use highlight_pack_builder::module::ModuleId;
    /// use highlight_pack_builder::registry::Registry;
    ///
    /// let registry = Registry::new("highlightGlobalInstance");
    /// assert_eq!(
    ///     registry.registration(&ModuleId::from("rust"), "rust"),
    ///     "highlightGlobalInstance.registerLanguage('rust', rust)"
    /// );
    /// ```
    #[must_use]
    pub fn registration(&self, id: &ModuleId, value: &str) -> String {
        format!("{}.registerLanguage('{id}', {value})", self.instance_name)
    }
}
