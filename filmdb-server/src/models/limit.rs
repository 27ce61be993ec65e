//! Row limit for list endpoints

use serde::Deserialize;

/// Rows returned by a list call when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 20;

/// `?limit=N` query parameter.
///
/// There is no upper bound. The type is unsigned so a negative limit is
/// rejected by the query extractor before it reaches the store.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

impl LimitParams {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_twenty() {
        assert_eq!(LimitParams::default().limit(), 20);
    }

    #[test]
    fn explicit_limit_is_kept() {
        assert_eq!(LimitParams { limit: Some(0) }.limit(), 0);
        assert_eq!(LimitParams { limit: Some(5000) }.limit(), 5000);
    }
}
