use crate::error::AppError;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Expired windows are swept, at most once per window, once the map grows
/// past this many clients.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct WindowState {
    count: u32,
    reset_at: Instant,
}

#[derive(Default)]
struct Windows {
    clients: HashMap<String, WindowState>,
    last_pruned: Option<Instant>,
}

impl Windows {
    fn prune(&mut self, now: Instant, window: Duration) {
        if self.clients.len() <= PRUNE_THRESHOLD {
            return;
        }
        if let Some(last) = self.last_pruned {
            if now < last + window {
                return;
            }
        }
        self.clients.retain(|_, state| state.reset_at > now);
        self.last_pruned = Some(now);
    }
}

/// Fixed-window request counter keyed by client identity.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        RateLimiter {
            max_requests: max_requests.max(1),
            window,
            windows: Mutex::new(Windows::default()),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count one request for `client_id` at `now`. Returns false when the
    /// client has already used its budget for the current window.
    pub async fn check_and_record(&self, client_id: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;
        windows.prune(now, self.window);

        let state = windows
            .clients
            .entry(client_id.to_string())
            .or_insert(WindowState {
                count: 0,
                reset_at: now + self.window,
            });

        if now >= state.reset_at {
            state.count = 0;
            state.reset_at = now + self.window;
        }

        if state.count >= self.max_requests {
            return false;
        }
        state.count += 1;
        true
    }
}

/// Client identity: first `X-Forwarded-For` hop, then `X-Real-IP`, then the
/// socket peer.
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    match peer {
        Some(addr) => addr.ip().to_string(),
        None => "unknown".to_string(),
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let client = client_id(request.headers(), peer);

    if !limiter.check_and_record(&client, Instant::now()).await {
        tracing::info!(client = %client, "Rate limit exceeded for {}", client);
        return AppError::RateLimited.into_response();
    }

    next.run(request).await
}
