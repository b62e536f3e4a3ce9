//! Per-host DDP address cache with TTL and failure-driven invalidation (§4.5).

use std::collections::HashMap;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const TTL: Duration = Duration::from_secs(5 * 60);

struct Entry {
    addr: SocketAddr,
    cached_at: Instant,
}

/// Caches resolved `(host, port) -> SocketAddr` so repeated sends don't
/// re-resolve hostnames every frame. Entries expire after [`TTL`] or on
/// explicit invalidation after a send failure.
#[derive(Default)]
pub struct AddressCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl AddressCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `host:port`, reusing a cached address (with `port` re-stamped
    /// onto it) if present and not expired.
    pub fn resolve(&self, host: &str, port: u16) -> std::io::Result<SocketAddr> {
        let key = host.to_string();
        {
            let entries = self.entries.lock().expect("address cache mutex poisoned");
            if let Some(entry) = entries.get(&key) {
                if entry.cached_at.elapsed() < TTL {
                    let mut addr = entry.addr;
                    addr.set_port(port);
                    return Ok(addr);
                }
            }
        }

        let resolved = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no address resolved"))?;

        self.entries
            .lock()
            .expect("address cache mutex poisoned")
            .insert(key, Entry { addr: resolved, cached_at: Instant::now() });

        Ok(resolved)
    }

    /// Purges the cached entry for `host`, forcing the next [`resolve`](Self::resolve) to re-resolve.
    pub fn invalidate(&self, host: &str) {
        self.entries.lock().expect("address cache mutex poisoned").remove(host);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("address cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_and_caches_loopback() {
        let cache = AddressCache::new();
        let addr = cache.resolve("127.0.0.1", 4048).unwrap();
        assert_eq!(addr.port(), 4048);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = AddressCache::new();
        cache.resolve("127.0.0.1", 4048).unwrap();
        cache.invalidate("127.0.0.1");
        assert!(cache.is_empty());
    }

    #[test]
    fn repeated_resolve_reuses_cached_port_restamp() {
        let cache = AddressCache::new();
        let a = cache.resolve("127.0.0.1", 1000).unwrap();
        let b = cache.resolve("127.0.0.1", 2000).unwrap();
        assert_eq!(a.ip(), b.ip());
        assert_eq!(b.port(), 2000);
        assert_eq!(cache.len(), 1);
    }
}
