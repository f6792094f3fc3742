//! Application Configuration
//!
//! Configuration for the puzzle application layer.

/// Puzzle application configuration
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    /// Page size when the client does not ask for one
    pub default_page_size: u32,
    /// Hard ceiling on client-requested page sizes
    pub max_page_size: u32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            default_page_size: 12,
            max_page_size: 100,
        }
    }
}

impl PuzzleConfig {
    /// Clamp a client-requested page number to [0, ..)
    pub fn clamp_page(&self, page: Option<i64>) -> u32 {
        match page {
            Some(p) => p.max(0) as u32,
            None => 0,
        }
    }

    /// Clamp a client-requested page size to [0, max], falling back to
    /// the default when absent
    pub fn clamp_limit(&self, limit: Option<i64>) -> u32 {
        match limit {
            Some(l) => l.clamp(0, self.max_page_size as i64) as u32,
            None => self.default_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PuzzleConfig::default();
        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.max_page_size, 100);
    }

    #[test]
    fn test_clamping() {
        let config = PuzzleConfig::default();

        assert_eq!(config.clamp_page(None), 0);
        assert_eq!(config.clamp_page(Some(-3)), 0);
        assert_eq!(config.clamp_page(Some(4)), 4);

        assert_eq!(config.clamp_limit(None), 12);
        assert_eq!(config.clamp_limit(Some(-1)), 0);
        assert_eq!(config.clamp_limit(Some(50)), 50);
        assert_eq!(config.clamp_limit(Some(500)), 100);
    }
}
