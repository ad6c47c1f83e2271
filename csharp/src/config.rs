//! Parser limits.
//!
//! Namespaces and type declarations nest (`namespace N { class A { ... } }`),
//! and the parser recurses once per level of either.
//! [`ParseConfig::max_nesting_depth`] bounds that recursion so adversarial
//! input cannot exhaust the stack.
//!
//! # Example
//!
//! ```
//! use reprgen_csharp::ParseConfig;
//!
//! let config = ParseConfig::new().with_max_nesting_depth(16);
//! assert_eq!(config.max_nesting_depth, 16);
//! ```

use crate::CsError;

/// Configuration for the C# parser.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_nesting_depth` | 64 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum combined depth of nested namespaces and type declarations.
    ///
    /// Default: 64
    pub max_nesting_depth: usize,
}

impl Default for ParseConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_nesting_depth: 64,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

/// Tracks type-declaration nesting while parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enter one nesting level.
    ///
    /// Returns `Err(CsError::NestingLimitExceeded)` if the new depth would
    /// exceed `limit`.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> Result<(), CsError> {
        self.depth = self.depth.saturating_add(1);
        if self.depth > limit {
            Err(CsError::NestingLimitExceeded {
                depth: self.depth,
                limit,
            })
        } else {
            Ok(())
        }
    }

    /// Leave one nesting level. Extra calls saturate at zero.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(ParseConfig::default().max_nesting_depth, 64);
        assert_eq!(ParseConfig::new(), ParseConfig::DEFAULT);
    }

    #[test]
    fn guard_counts_levels() {
        let mut guard = RecursionGuard::new();
        guard.enter(2).unwrap();
        guard.enter(2).unwrap();
        assert_eq!(guard.depth(), 2);

        guard.exit();
        assert_eq!(guard.depth(), 1);
    }

    #[test]
    fn guard_rejects_past_the_limit() {
        let mut guard = RecursionGuard::new();
        for _ in 0..3 {
            guard.enter(3).unwrap();
        }
        assert_eq!(
            guard.enter(3),
            Err(CsError::NestingLimitExceeded { depth: 4, limit: 3 })
        );
    }

    #[test]
    fn guard_exit_saturates() {
        let mut guard = RecursionGuard::new();
        guard.exit();
        assert_eq!(guard.depth(), 0);
    }
}
