use crate::controller::FooBarsController;
use crate::di::{Container, Injectable};
use crate::entity::FooBar;
use crate::error::{FooBarsError, Result};
use crate::repository::{MemoryRepository, Repository};
use std::sync::Arc;

/// Trait for application modules
///
/// A module registers the providers and controllers of one feature.
pub trait Module {
    /// Register all providers and controllers in this module
    fn register(container: &mut Container) -> Result<()>;
}

/// Registers the FooBar repository and controller.
///
/// A `dyn Repository<FooBar>` bound before registration is kept; otherwise a
/// [`MemoryRepository`] is registered and bound.
pub struct FooBarsModule;

impl Module for FooBarsModule {
    fn register(container: &mut Container) -> Result<()> {
        if !container.contains::<dyn Repository<FooBar>>() {
            let repository = MemoryRepository::<FooBar>::inject(container)?;
            container.register(repository);
            container.register_trait::<dyn Repository<FooBar>, MemoryRepository<FooBar>, _>(|r| {
                r as Arc<dyn Repository<FooBar>>
            });
            tracing::debug!("bound in-memory FooBar repository");
        }

        let controller =
            FooBarsController::inject(container).map_err(|e| FooBarsError::ModuleRegistrationFailed {
                message: format!("FooBarsModule: {}", e),
            })?;
        container.register(controller);
        Ok(())
    }
}
