use crate::error::DomainResult;
use crate::types::MovebankDocument;

/// Trait for persisting the export document
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait DocumentWriter: Send + Sync {
    /// Write the whole document, replacing any previous output
    fn write(&self, document: &MovebankDocument) -> DomainResult<()>;
}
