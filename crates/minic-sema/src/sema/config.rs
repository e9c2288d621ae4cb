//! Analyzer configuration

/// Configuration options for a [`SemanticAnalyzer`](super::SemanticAnalyzer) run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Deepest statement/expression nesting the traversal will follow
    pub max_depth: usize,
}

impl AnalyzerConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
