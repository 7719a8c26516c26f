//! Visitor sessions and their view scopes.
//!
//! Every browser gets an opaque `viaenv-session` cookie. The id only keys a
//! [`ViewScope`]; it authorizes nothing. A visitor holds one scope at a
//! time: entering a different page replaces it, and dropping the old scope
//! aborts its pending copy-badge timer. Idle sessions are evicted by
//! [`session_sweeper`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::{RwLock, watch};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use viaenv_core::route::Route;
use viaenv_core::view::ViewScope;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "viaenv-session";

/// Upper bound on live sessions. Entering a new one at the cap evicts the
/// least recently seen.
pub const MAX_SESSIONS: usize = 10_000;

/// Idle lifetime of a session that was only ever seen once.
const UNRETURNED_IDLE: Duration = Duration::from_secs(60);

/// Opaque visitor id carried by the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Middleware that resolves the visitor's [`SessionId`].
///
/// Reads the session cookie, or mints a new id when it is missing or
/// malformed. The id is injected into the request extensions; a freshly
/// minted one is also set on the response.
pub async fn session_middleware(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()));

    let (id, fresh) = match existing {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };
    req.extensions_mut().insert(id);

    let response = next.run(req).await;
    if !fresh {
        return response;
    }

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), response).into_response()
}

struct Entry {
    scope: Arc<ViewScope>,
    last_seen: Instant,
    /// Seen on more than one request.
    returned: bool,
}

/// All live view scopes, keyed by session.
pub struct SessionStore {
    scopes: RwLock<HashMap<SessionId, Entry>>,
    copy_delay: Duration,
    idle: Duration,
    capacity: usize,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("copy_delay", &self.copy_delay)
            .field("idle", &self.idle)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(copy_delay: Duration, idle: Duration) -> Self {
        Self {
            scopes: RwLock::new(HashMap::new()),
            copy_delay,
            idle,
            capacity: MAX_SESSIONS,
        }
    }

    /// Cap the number of live sessions.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// The scope for `session` on `route`.
    ///
    /// Returns the existing scope when the visitor is still on the same
    /// page. Otherwise a fresh scope replaces the old one, which tears the
    /// old one down once no request holds it any more.
    pub async fn enter(&self, session: SessionId, route: Route) -> Arc<ViewScope> {
        let now = Instant::now();
        let mut scopes = self.scopes.write().await;

        let returned = match scopes.get_mut(&session) {
            Some(entry) if entry.scope.route() == route => {
                entry.last_seen = now;
                entry.returned = true;
                return Arc::clone(&entry.scope);
            }
            Some(entry) => {
                debug!(%session, from = ?entry.scope.route(), to = ?route, "view scope replaced");
                true
            }
            None => {
                if scopes.len() >= self.capacity {
                    evict_oldest(&mut scopes);
                }
                false
            }
        };

        let scope = Arc::new(ViewScope::new(route, self.copy_delay));
        scopes.insert(
            session,
            Entry {
                scope: Arc::clone(&scope),
                last_seen: now,
                returned,
            },
        );
        scope
    }

    /// How long a copy badge lives in every scope this store creates.
    #[must_use]
    pub fn copy_delay(&self) -> Duration {
        self.copy_delay
    }

    /// Evict sessions idle for longer than the configured lifetime.
    /// Sessions seen only once get the shorter of that and one minute.
    ///
    /// Returns the number of sessions evicted.
    pub async fn sweep(&self) -> usize {
        let idle = self.idle;
        let unreturned = idle.min(UNRETURNED_IDLE);
        let mut scopes = self.scopes.write().await;
        let before = scopes.len();
        scopes.retain(|_, entry| {
            let limit = if entry.returned { idle } else { unreturned };
            entry.last_seen.elapsed() < limit
        });
        before - scopes.len()
    }

    pub async fn len(&self) -> usize {
        self.scopes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.scopes.read().await.is_empty()
    }
}

fn evict_oldest(scopes: &mut HashMap<SessionId, Entry>) {
    let oldest = scopes
        .iter()
        .min_by_key(|(_, entry)| entry.last_seen)
        .map(|(id, _)| *id);
    if let Some(id) = oldest {
        scopes.remove(&id);
        debug!(session = %id, "session evicted at capacity");
    }
}

/// Background worker that periodically evicts idle sessions.
pub async fn session_sweeper(
    store: Arc<SessionStore>,
    shutdown: &mut watch::Receiver<bool>,
    interval_secs: u64,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    info!(interval_secs, "session sweeper started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let count = store.sweep().await;
                if count > 0 {
                    info!(count, "idle sessions evicted");
                }
            }
            _ = shutdown.changed() => {
                info!("session sweeper shutting down");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_millis(2000), Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn same_page_reuses_scope() {
        let store = store();
        let id = SessionId::new();
        let a = store.enter(id, Route::Environments).await;
        let b = store.enter(id, Route::Environments).await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_are_isolated() {
        let store = store();
        let a = store.enter(SessionId::new(), Route::Environments).await;
        let b = store.enter(SessionId::new(), Route::Environments).await;
        a.copy().mark("1").await;
        assert_eq!(b.copy().current().await, None);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_page_drops_the_badge() {
        let store = store();
        let id = SessionId::new();
        store.enter(id, Route::Environments).await.copy().mark("1").await;

        store.enter(id, Route::Users).await;
        let back = store.enter(id, Route::Environments).await;
        assert_eq!(back.copy().current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_evicts_only_idle_sessions() {
        let store = store();
        let stale = SessionId::new();
        let fresh = SessionId::new();
        store.enter(stale, Route::Logs).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        store.enter(fresh, Route::Logs).await;
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(store.sweep().await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_sessions_expire_early() {
        let store = SessionStore::new(Duration::from_millis(2000), Duration::from_secs(1800));
        let once = SessionId::new();
        let twice = SessionId::new();
        store.enter(once, Route::Environments).await;
        store.enter(twice, Route::Environments).await;
        store.enter(twice, Route::Environments).await;

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(store.sweep().await, 1);
        assert!(store.scopes.read().await.contains_key(&twice));
    }

    #[tokio::test(start_paused = true)]
    async fn full_store_evicts_least_recently_seen() {
        let store = store().with_capacity(2);
        let first = SessionId::new();
        let second = SessionId::new();
        let third = SessionId::new();
        store.enter(first, Route::Users).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        store.enter(second, Route::Users).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        store.enter(third, Route::Users).await;

        assert_eq!(store.len().await, 2);
        let scopes = store.scopes.read().await;
        assert!(!scopes.contains_key(&first));
        assert!(scopes.contains_key(&second) && scopes.contains_key(&third));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_stops_on_shutdown() {
        let store = Arc::new(store());
        let (tx, mut rx) = watch::channel(false);
        let worker = tokio::spawn({
            let store = Arc::clone(&store);
            async move { session_sweeper(store, &mut rx, 1).await }
        });

        store.enter(SessionId::new(), Route::Help).await;
        tokio::time::sleep(Duration::from_millis(62_500)).await;
        assert!(store.is_empty().await);

        let _ = tx.send(true);
        assert!(tokio::time::timeout(Duration::from_secs(1), worker).await.is_ok());
    }

    #[test]
    fn malformed_cookie_is_ignored() {
        assert_eq!(SessionId::parse("not-a-uuid"), None);
        let id = SessionId::new();
        assert_eq!(SessionId::parse(&id.to_string()), Some(id));
    }
}
