//! JSON Patch (RFC 6902) documents applied to typed resources
//!
//! A [`PatchDocument<T>`] is the request body of a `PATCH`. It is applied by
//! round-tripping the resource through `serde_json::Value`:
//!
//! 1. the resource is serialized,
//! 2. every operation runs in order against the JSON value,
//! 3. the result is deserialized back into `T`.
//!
//! Failures never panic or abort early. Each one is recorded in the
//! [`ModelState`] under the resource's type name, later operations still run,
//! and the resource is only overwritten if the final value is a valid `T`.

use crate::validation::ModelState;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::marker::PhantomData;
use thiserror::Error;

mod pointer;

pub use pointer::Pointer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("'{0}' is not a valid JSON pointer")]
    InvalidPointer(String),

    #[error("The target location '{0}' was not found")]
    PathNotFound(String),

    #[error("The index in '{0}' is out of bounds")]
    IndexOutOfBounds(String),

    #[error("The document root cannot be removed")]
    RootRemoval,

    #[error("Cannot move '{from}' into its own child '{path}'")]
    MoveIntoChild { from: String, path: String },

    #[error("The value at '{0}' does not match the expected value")]
    TestFailed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    pub fn name(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Remove { .. } => "remove",
            PatchOperation::Replace { .. } => "replace",
            PatchOperation::Move { .. } => "move",
            PatchOperation::Copy { .. } => "copy",
            PatchOperation::Test { .. } => "test",
        }
    }

    pub fn apply(&self, document: &mut Value) -> Result<(), PatchError> {
        match self {
            PatchOperation::Add { path, value } => Pointer::parse(path)?.add(document, value.clone()),
            PatchOperation::Remove { path } => Pointer::parse(path)?.remove(document).map(drop),
            PatchOperation::Replace { path, value } => {
                Pointer::parse(path)?.replace(document, value.clone())
            }
            PatchOperation::Move { from, path } => {
                let source = Pointer::parse(from)?;
                let target = Pointer::parse(path)?;
                if source == target {
                    return source.get(document).map(drop);
                }
                if target.starts_with(&source) {
                    return Err(PatchError::MoveIntoChild {
                        from: from.clone(),
                        path: path.clone(),
                    });
                }
                let value = source.remove(document)?;
                target.add(document, value)
            }
            PatchOperation::Copy { from, path } => {
                let value = Pointer::parse(from)?.get(document)?.clone();
                Pointer::parse(path)?.add(document, value)
            }
            PatchOperation::Test { path, value } => {
                let pointer = Pointer::parse(path)?;
                if pointer.get(document)? == value {
                    Ok(())
                } else {
                    Err(PatchError::TestFailed(pointer.as_str().to_string()))
                }
            }
        }
    }
}

/// Ordered list of operations targeting a `T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct PatchDocument<T> {
    operations: Vec<PatchOperation>,
    #[serde(skip)]
    target: PhantomData<fn() -> T>,
}

impl<T> PatchDocument<T> {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self {
            operations,
            target: PhantomData,
        }
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }
}

impl<T: Serialize + DeserializeOwned> PatchDocument<T> {
    /// Apply every operation to `target`, recording failures in `state`.
    pub fn apply_to(&self, target: &mut T, state: &mut ModelState) {
        let key = short_type_name::<T>();

        let mut document = match serde_json::to_value(&*target) {
            Ok(document) => document,
            Err(e) => {
                state.add_error(key, e.to_string());
                return;
            }
        };

        for operation in &self.operations {
            if let Err(e) = operation.apply(&mut document) {
                state.add_error(key, format!("The {} operation failed: {}", operation.name(), e));
            }
        }

        match serde_json::from_value::<T>(document) {
            Ok(patched) => *target = patched,
            Err(e) => state.add_error(key, format!("The patched {} is invalid: {}", key, e)),
        }
    }
}

/// `crate::entity::FooBar` becomes `FooBar`
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}
