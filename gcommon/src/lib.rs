//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use gcommon::{GenerationConfig, Registry};
//!
//! let config = GenerationConfig::default().with_temperature(0.3).with_top_k(40);
//! let mut registry = Registry::new();
//! registry.insert("alpha".to_string(), 1_u32);
//!
//! assert_eq!(config.temperature, Some(0.3));
//! assert_eq!(registry.get("alpha"), Some(&1));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use gcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod model {
    //! Sampling overrides shared by every provider request type.
    //!
    //! Unset fields mean "use the provider default" and are left off the wire.
    //!
    //! ```rust
    //! use gcommon::GenerationConfig;
    //!
    //! let config = GenerationConfig::default()
    //!     .with_temperature(0.2)
    //!     .with_max_output_tokens(128)
    //!     .with_stop_sequence("###");
    //!
    //! assert_eq!(config.temperature, Some(0.2));
    //! assert_eq!(config.max_output_tokens, Some(128));
    //! assert_eq!(config.stop_sequences, vec!["###".to_string()]);
    //! assert!(!config.is_empty());
    //! ```

    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct GenerationConfig {
        pub stop_sequences: Vec<String>,
        pub temperature: Option<f32>,
        pub max_output_tokens: Option<u32>,
        pub top_p: Option<f32>,
        pub top_k: Option<u32>,
    }

    impl GenerationConfig {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
            self.max_output_tokens = Some(max_output_tokens);
            self
        }

        pub fn with_top_p(mut self, top_p: f32) -> Self {
            self.top_p = Some(top_p);
            self
        }

        pub fn with_top_k(mut self, top_k: u32) -> Self {
            self.top_k = Some(top_k);
            self
        }

        pub fn with_stop_sequence(mut self, stop: impl Into<String>) -> Self {
            self.stop_sequences.push(stop.into());
            self
        }

        pub fn with_stop_sequences(mut self, stops: Vec<String>) -> Self {
            self.stop_sequences = stops;
            self
        }

        /// True when every field is unset.
        pub fn is_empty(&self) -> bool {
            self.stop_sequences.is_empty()
                && self.temperature.is_none()
                && self.max_output_tokens.is_none()
                && self.top_p.is_none()
                && self.top_k.is_none()
        }
    }
}

pub mod registry {
    //! Insertion-ordered registry used by runtime registries.
    //!
    //! Re-inserting an existing key replaces the value in its original slot, so
    //! iteration order always reflects first registration.
    //!
    //! ```rust
    //! use gcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("alpha".to_string(), 1_u32);
    //! registry.insert("beta".to_string(), 2_u32);
    //! registry.insert("alpha".to_string(), 3_u32);
    //!
    //! assert_eq!(registry.values().copied().collect::<Vec<_>>(), vec![3, 2]);
    //! assert!(registry.contains_key("alpha"));
    //! ```

    use std::borrow::Borrow;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: Vec<(K, V)>,
    }

    impl<K, V> Default for Registry<K, V> {
        fn default() -> Self {
            Self { items: Vec::new() }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts `value` under `key`, returning the replaced value if any.
        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            match self.position(&key) {
                Some(index) => Some(std::mem::replace(&mut self.items[index].1, value)),
                None => {
                    self.items.push((key, value));
                    None
                }
            }
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + ?Sized,
        {
            self.position(key).map(|index| &self.items[index].1)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + ?Sized,
        {
            self.position(key).map(|index| self.items.remove(index).1)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + ?Sized,
        {
            self.position(key).is_some()
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.items.iter().map(|(key, _)| key)
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.items.iter().map(|(_, value)| value)
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }

        fn position<Q>(&self, key: &Q) -> Option<usize>
        where
            K: Borrow<Q>,
            Q: Eq + ?Sized,
        {
            self.items
                .iter()
                .position(|(candidate, _)| Borrow::<Q>::borrow(candidate) == key)
        }
    }
}

pub use future::BoxFuture;
pub use model::GenerationConfig;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, Registry};

    #[test]
    fn generation_config_builder_helpers_set_values() {
        let config = GenerationConfig::default()
            .with_temperature(0.3)
            .with_max_output_tokens(123)
            .with_top_p(0.9)
            .with_top_k(16)
            .with_stop_sequences(vec!["END".to_string()]);

        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.max_output_tokens, Some(123));
        assert_eq!(config.top_p, Some(0.9));
        assert_eq!(config.top_k, Some(16));
        assert_eq!(config.stop_sequences, vec!["END".to_string()]);
        assert!(GenerationConfig::default().is_empty());
    }

    #[test]
    fn generic_registry_basic_lifecycle() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.insert("alpha".to_string(), 1_u32);
        assert_eq!(registry.get("alpha"), Some(&1));
        assert!(registry.contains_key("alpha"));
        assert_eq!(registry.len(), 1);

        let removed = registry.remove("alpha");
        assert_eq!(removed, Some(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_keeps_first_registration_slot_on_replace() {
        let mut registry = Registry::new();
        registry.insert("a".to_string(), 1_u32);
        registry.insert("b".to_string(), 2_u32);
        registry.insert("c".to_string(), 3_u32);

        let replaced = registry.insert("a".to_string(), 10);
        assert_eq!(replaced, Some(1));
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(registry.get("a"), Some(&10));
    }
}
