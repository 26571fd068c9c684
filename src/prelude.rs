pub use crate::ds::{IntrusiveList, ShardSelector, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::LruCore;
pub use crate::policy::sharded_lru::{ShardedLruCache, ShardedLruCacheBuilder};
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
