pub use self::bit_set::*;

mod bit_set;

pub type FastHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
