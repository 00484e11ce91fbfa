/// Resource limits that keep knowledge loading and evaluation predictable
///
/// Evaluation cost is proportional to the number of rules times the number of
/// points in the output universe, so both are bounded when knowledge is loaded.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum knowledge file size in bytes
    /// Real usage: ~10KB, Limit: 5MB
    pub max_knowledge_bytes: usize,

    /// Maximum parenthesis nesting depth of a rule condition
    /// Real usage: ~2 levels, Limit: 64
    pub max_expression_depth: usize,

    /// Maximum number of grid points in any universe
    /// Real usage: ~100-2000, Limit: 1,000,000
    pub max_universe_points: usize,

    /// Maximum number of rules in a knowledge base
    /// Real usage: ~10-50, Limit: 10,000
    pub max_rules: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_knowledge_bytes: 5 * 1024 * 1024, // 5 MB
            max_expression_depth: 64,
            max_universe_points: 1_000_000,
            max_rules: 10_000,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
