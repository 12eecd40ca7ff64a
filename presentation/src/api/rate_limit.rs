//! Per-client-IP fixed-window rate limiting.

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Windows kept before stale ones are swept
const SWEEP_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct WindowTable {
    clients: HashMap<IpAddr, Window>,
    last_sweep: Option<Instant>,
}

impl WindowTable {
    /// Drop expired windows, at most once per window length
    fn sweep(&mut self, now: Instant, window: Duration) {
        if self.clients.len() < SWEEP_THRESHOLD {
            return;
        }
        if let Some(last) = self.last_sweep
            && now.duration_since(last) < window
        {
            return;
        }

        let before = self.clients.len();
        self.clients
            .retain(|_, w| now.duration_since(w.started) < window);
        self.last_sweep = Some(now);
        debug!(
            "Swept {} expired rate-limit windows",
            before - self.clients.len()
        );
    }
}

/// At most `limit` requests per client IP in each `window`.
///
/// Windows are fixed: the counter resets when a window expires rather than
/// sliding with every request.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<WindowTable>,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(WindowTable::default()),
        }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Count a request from `ip` at `now`; `false` means it must be refused
    pub fn check(&self, ip: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        windows.sweep(now, self.window);

        let entry = windows.clients.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.limit {
            return false;
        }
        entry.count += 1;
        true
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clients
            .len()
    }
}

/// Middleware refusing clients over budget with 429.
///
/// Requests without a peer address (in-process calls) are not limited.
pub async fn limit_by_ip(
    State(limiter): State<Arc<FixedWindowLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if let Some(ip) = peer
        && !limiter.check(ip, Instant::now())
    {
        debug!("Rate limit exceeded for {}", ip);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "message": format!("Rate limit exceeded: {} per 1 minute", limiter.limit())
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = FixedWindowLimiter::per_minute(3);
        let now = Instant::now();

        assert!(limiter.check(ip(1), now));
        assert!(limiter.check(ip(1), now));
        assert!(limiter.check(ip(1), now));
        assert!(!limiter.check(ip(1), now));
    }

    #[test]
    fn test_clients_are_counted_separately() {
        let limiter = FixedWindowLimiter::per_minute(1);
        let now = Instant::now();

        assert!(limiter.check(ip(1), now));
        assert!(limiter.check(ip(2), now));
        assert!(!limiter.check(ip(1), now));
    }

    #[test]
    fn test_window_resets() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check(ip(1), start));
        assert!(!limiter.check(ip(1), start + Duration::from_secs(59)));
        assert!(limiter.check(ip(1), start + Duration::from_secs(60)));
    }

    #[test]
    fn test_stale_windows_swept_at_most_once_per_window() {
        let limiter = FixedWindowLimiter::per_minute(5);
        let start = Instant::now();
        let at = |secs| start + Duration::from_secs(secs);
        let many = |i: u32| IpAddr::from(std::net::Ipv4Addr::from(0x0b00_0000 + i));

        for i in 0..SWEEP_THRESHOLD as u32 {
            assert!(limiter.check(many(i), start));
        }

        // First sweep: nothing has expired yet
        assert!(limiter.check(ip(1), at(30)));
        assert_eq!(limiter.tracked_clients(), SWEEP_THRESHOLD + 1);

        // The early windows expired, but the last sweep is too recent
        assert!(limiter.check(ip(2), at(61)));
        assert_eq!(limiter.tracked_clients(), SWEEP_THRESHOLD + 2);

        // A full window after the last sweep: expired clients go
        assert!(limiter.check(ip(3), at(91)));
        assert_eq!(limiter.tracked_clients(), 2);
    }
}
