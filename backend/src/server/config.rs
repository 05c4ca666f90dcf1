//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use orders::domain::RelayHandle;
use orders::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) relay: RelayHandle,
    pub(crate) shutdown_timeout: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` that submits
    /// order-created events through `relay`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, relay: RelayHandle) -> Self {
        Self {
            bind_addr,
            relay,
            shutdown_timeout: Duration::from_secs(10),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without a pool the server answers with fixture ports, which is only
    /// useful for smoke tests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Grace period granted to in-flight requests once shutdown begins.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}
