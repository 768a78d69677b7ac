/// Generation counter used to discard results of superseded requests.
///
/// A request captures the epoch current when it was issued; its result is
/// applied only if the epoch is still current on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    /// Move to the next generation and return it.
    pub fn advance(&mut self) -> Epoch {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let mut epoch = Epoch::default();
        let first = epoch.advance();
        let second = epoch.advance();
        assert!(second > first);
        assert_eq!(epoch, second);
        assert_ne!(first, second);
    }
}
