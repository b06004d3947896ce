//! Kernel registry: lookup of dot product kernels by name.

use crate::error::{BenchError, BenchResult};
use crate::math::dot_product::{self, DotProductKernel};

/// Name of the default reference kernel
pub const DEFAULT_REFERENCE: &str = "scalar";

/// Candidates tried in order when none is requested, fastest first.
const CANDIDATE_PREFERENCE: &[&str] = &["x86_64-avx2", "x86_64-sse2", "unrolled"];

/// All kernels available for benchmarking
pub struct KernelRegistry {
    kernels: Vec<Box<dyn DotProductKernel>>,
}

impl KernelRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kernels: Vec::new(),
        }
    }

    /// Registry holding every built-in kernel
    pub fn with_default_kernels() -> Self {
        let mut registry = Self::new();
        for kernel in dot_product::builtin_kernels() {
            registry.register(kernel);
        }
        registry
    }

    /// Register a kernel
    pub fn register<K: DotProductKernel + 'static>(&mut self, kernel: K) {
        self.kernels.push(Box::new(kernel));
    }

    pub fn all(&self) -> &[Box<dyn DotProductKernel>] {
        &self.kernels
    }

    /// Find kernel by name
    pub fn find(&self, name: &str) -> Option<&dyn DotProductKernel> {
        self.kernels
            .iter()
            .find(|k| k.name() == name)
            .map(|k| k.as_ref())
    }

    /// Like [`find`](Self::find), but a missing name is an error.
    pub fn resolve(&self, name: &str) -> BenchResult<&dyn DotProductKernel> {
        self.find(name).ok_or_else(|| BenchError::UnknownKernel {
            name: name.to_string(),
        })
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.kernels.iter().map(|k| k.name()).collect()
    }

    /// The fastest preferred candidate that can run on this machine.
    pub fn default_candidate(&self) -> Option<&dyn DotProductKernel> {
        CANDIDATE_PREFERENCE
            .iter()
            .filter_map(|name| self.find(name))
            .find(|k| k.check_capability().is_ok())
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::with_default_kernels()
    }
}
