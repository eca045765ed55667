use serde::{Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Display};
use std::hash::Hash;

mod foobar;

pub use foobar::FooBar;

/// Primary key types usable with the repositories in this crate.
///
/// The default value is the "unsaved" key.
pub trait EntityKey:
    Copy + Eq + Hash + Default + Display + Debug + Send + Sync + 'static
{
    /// Key for the `n`th generated row, or `None` once the key space is exhausted.
    fn from_sequence(n: u64) -> Option<Self>;
}

macro_rules! impl_entity_key {
    ($($ty:ty),*) => {
        $(
            impl EntityKey for $ty {
                fn from_sequence(n: u64) -> Option<Self> {
                    <$ty>::try_from(n).ok()
                }
            }
        )*
    };
}

impl_entity_key!(i32, i64, u32, u64);

/// A persistable record identified by a primary key
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Key: EntityKey;

    /// Name used in messages and error keys
    const NAME: &'static str;

    fn key(&self) -> Self::Key;

    fn set_key(&mut self, key: Self::Key);

    /// `true` until the entity has been assigned a key by a repository
    fn is_new(&self) -> bool {
        self.key() == Self::Key::default()
    }
}
