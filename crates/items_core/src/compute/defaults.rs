//! Runtime and bundling options shared by every function.

use serde::Serialize;

/// Function runtime version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Runtime {
    #[default]
    Nodejs20x,
    Nodejs22x,
}

impl Runtime {
    /// Provider runtime identifier, e.g. `nodejs20.x`.
    pub fn identifier(self) -> &'static str {
        match self {
            Runtime::Nodejs20x => "nodejs20.x",
            Runtime::Nodejs22x => "nodejs22.x",
        }
    }
}

/// Packaging options handed to the provisioning engine's bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundlingOptions {
    /// Modules left out of the bundle because the runtime provides them.
    pub external_modules: Vec<String>,
    /// Lock file used to resolve dependency versions.
    pub deps_lock_file_path: Option<String>,
    pub minify: bool,
    pub source_map: bool,
}

impl Default for BundlingOptions {
    fn default() -> Self {
        Self {
            external_modules: vec!["aws-sdk".to_string()],
            deps_lock_file_path: Some("lambdas/package-lock.json".to_string()),
            minify: false,
            source_map: false,
        }
    }
}

/// Immutable options applied to every function descriptor.
///
/// Constructed once and passed by reference into each
/// [`FunctionDescriptor::new`](super::FunctionDescriptor::new) call, so all
/// five functions are guaranteed to share the same runtime and bundling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDefaults {
    pub runtime: Runtime,
    /// Exported handler symbol inside each entry file.
    pub handler: String,
    pub memory_size_mb: u32,
    pub timeout_secs: u32,
    pub bundling: BundlingOptions,
}

impl Default for FunctionDefaults {
    fn default() -> Self {
        Self {
            runtime: Runtime::default(),
            handler: "handler".to_string(),
            memory_size_mb: 128,
            timeout_secs: 3,
            bundling: BundlingOptions::default(),
        }
    }
}
