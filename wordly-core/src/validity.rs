use async_trait::async_trait;

/// Answer from the external dictionary-validity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
    /// The oracle could not answer (timeout, network failure). Callers
    /// fail open and accept the guess.
    Unknown,
}

/// Capability interface for the "is this an accepted word?" oracle. The
/// engine never talks to the network directly; production wires in an
/// HTTP-backed implementation, tests substitute a double.
#[async_trait]
pub trait WordValidityOracle: Send + Sync {
    async fn check(&self, word: &str) -> Validity;
}

/// Oracle double that accepts every word.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl WordValidityOracle for AcceptAll {
    async fn check(&self, _word: &str) -> Validity {
        Validity::Valid
    }
}

/// Oracle double that rejects every word.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

#[async_trait]
impl WordValidityOracle for RejectAll {
    async fn check(&self, _word: &str) -> Validity {
        Validity::Invalid
    }
}

/// Oracle double simulating an unreachable dictionary service.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysUnknown;

#[async_trait]
impl WordValidityOracle for AlwaysUnknown {
    async fn check(&self, _word: &str) -> Validity {
        Validity::Unknown
    }
}
