use crate::error::{FooBarsError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

type Instance = Arc<dyn Any + Send + Sync>;

/// Turns a concrete instance into an `Arc<Arc<dyn Trait>>`, erased as `Instance`.
type CasterFn = Arc<dyn Fn(Instance) -> Option<Instance> + Send + Sync>;

#[derive(Clone)]
struct Binding {
    implementation: TypeId,
    implementation_name: &'static str,
    cast: CasterFn,
}

/// Thread-safe dependency injection container.
///
/// Concrete services are keyed by their `TypeId`. Trait objects are resolved
/// through a binding that names the concrete service and knows how to upcast it.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, Instance>,
    bindings: DashMap<TypeId, Binding>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_shared(Arc::new(instance))
    }

    /// Register an instance that is already shared elsewhere
    pub fn register_shared<T: 'static + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), instance);
        self
    }

    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let cast: CasterFn = Arc::new(move |instance: Instance| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            Some(Arc::new(trait_obj) as Instance)
        });

        self.bindings.insert(
            TypeId::of::<Trait>(),
            Binding {
                implementation: TypeId::of::<Impl>(),
                implementation_name: type_name::<Impl>(),
                cast,
            },
        );
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let instance = self
            .services
            .get(&TypeId::of::<T>())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FooBarsError::DependencyNotFound {
                type_name: type_name::<T>().to_string(),
            })?;

        instance
            .downcast::<T>()
            .map_err(|_| FooBarsError::DowncastFailed {
                type_name: type_name::<T>().to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let binding = self
            .bindings
            .get(&TypeId::of::<T>())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FooBarsError::DependencyNotFound {
                type_name: format!("No binding registered for '{}'", type_name::<T>()),
            })?;

        let instance = self
            .services
            .get(&binding.implementation)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FooBarsError::DependencyNotFound {
                type_name: format!(
                    "'{}' bound to '{}' but not registered",
                    type_name::<T>(),
                    binding.implementation_name
                ),
            })?;

        let downcast_failed = || FooBarsError::DowncastFailed {
            type_name: format!("{} as {}", binding.implementation_name, type_name::<T>()),
        };

        let wrapper = (binding.cast)(instance)
            .ok_or_else(downcast_failed)?
            .downcast::<Arc<T>>()
            .map_err(|_| downcast_failed())?;
        Ok(wrapper.as_ref().clone())
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.bindings.contains_key(&type_id)
    }
}
