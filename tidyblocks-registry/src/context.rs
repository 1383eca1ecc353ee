//! Decode context

use tidyblocks_core::{Family, MalformedEncoding};

/// Default nesting limit for encoded trees
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Position and limits for one decode traversal
///
/// The context records the array indices leading from the root of the input
/// to the value being decoded, rendered as a JSON Pointer in errors.
#[derive(Debug, Clone)]
pub struct DecodeContext {
    path: Vec<usize>,
    max_depth: usize,
}

impl DecodeContext {
    pub fn new() -> Self {
        Self {
            path: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// JSON Pointer of the current position ("" at the root)
    pub fn pointer(&self) -> String {
        self.path.iter().map(|i| format!("/{}", i)).collect()
    }

    /// JSON Pointer of a child of the current position
    pub fn pointer_to(&self, index: usize) -> String {
        format!("{}/{}", self.pointer(), index)
    }

    /// Run `f` positioned at child `index`; the position is restored afterwards.
    pub fn descend<T, E>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        self.path.push(index);
        let result = f(self);
        self.path.pop();
        result
    }

    /// Fail once the traversal is nested deeper than the limit
    pub fn check_depth(&self, family: Family) -> Result<(), MalformedEncoding> {
        if self.depth() > self.max_depth {
            return Err(MalformedEncoding::depth_limit(family, self.max_depth).with_path(self.pointer()));
        }
        Ok(())
    }
}

impl Default for DecodeContext {
    fn default() -> Self {
        Self::new()
    }
}
