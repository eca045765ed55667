use crate::di::Container;
use crate::error::Result;

/// Trait for types that can be built from the DI container
///
/// Usually implemented through `#[derive(Injectable)]`.
///
/// # Example
/// ```
/// use foobars::{Container, FooBar, Injectable, Repository};
/// use std::sync::Arc;
///
/// #[derive(Injectable)]
/// pub struct AuditService {
///     repository: Arc<dyn Repository<FooBar>>,
///     #[inject(default)]
///     label: String,
/// }
///
/// // Nothing is bound, so construction fails instead of producing a half-built service.
/// assert!(AuditService::inject(&Container::new()).is_err());
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Create an instance by resolving dependencies from the container
    ///
    /// # Errors
    /// Returns an error if any required dependency is not found in the container.
    fn inject(container: &Container) -> Result<Self>;
}
