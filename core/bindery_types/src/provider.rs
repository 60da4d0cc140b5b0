//! Providers: deferred producers of a bound value.

use std::fmt;
use std::sync::Arc;

/// A cloneable handle that produces a `T` on demand.
///
/// A registry binds "requests for a `Provider<T>`" under a key whose type is
/// this struct applied to `T`, kept distinct from requests for `T` itself.
pub struct Provider<T: ?Sized> {
    get: Arc<dyn Fn() -> Arc<T> + Send + Sync>,
}

impl<T: ?Sized> Provider<T> {
    pub fn new(get: impl Fn() -> Arc<T> + Send + Sync + 'static) -> Self {
        Provider { get: Arc::new(get) }
    }

    /// Produce a value.
    #[inline]
    pub fn get(&self) -> Arc<T> {
        (self.get)()
    }
}

impl<T: ?Sized> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Provider {
            get: Arc::clone(&self.get),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Provider(..)")
    }
}
