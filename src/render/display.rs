//! Display fallbacks for missing backend data.
//!
//! Missing timestamps render as "just now", missing avatars as a
//! deterministic color + initial derived from the username. These are the
//! only "defaults" this layer imposes on backend entities.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

/// "just now", "5m ago", "3h ago", "2d ago", then an absolute date.
pub fn relative_time(ts: Option<DateTime<Utc>>) -> String {
    let Some(ts) = ts else {
        return "just now".to_string();
    };
    let delta = Utc::now().signed_duration_since(ts);
    if delta < Duration::zero() {
        // Clock skew between backend and this host.
        return "just now".to_string();
    }
    let secs = delta.num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 60 * 60 {
        format!("{}m ago", delta.num_minutes())
    } else if secs < 24 * 60 * 60 {
        format!("{}h ago", delta.num_hours())
    } else if secs < 7 * 24 * 60 * 60 {
        format!("{}d ago", delta.num_days())
    } else {
        ts.format("%b %-d, %Y").to_string()
    }
}

/// Countdown label for the story viewer. Purely cosmetic; whether a story is
/// still live is decided by the backend returning it at all.
pub fn expires_label(expires_at: Option<DateTime<Utc>>) -> String {
    let Some(at) = expires_at else {
        return String::new();
    };
    let left = at.signed_duration_since(Utc::now());
    if left <= Duration::zero() {
        "expired".to_string()
    } else if left.num_minutes() < 60 {
        format!("expires in {}m", left.num_minutes().max(1))
    } else {
        format!("expires in {}h", left.num_hours())
    }
}

/// Deterministic fallback avatar color for a username.
///
/// High bits are masked off each channel so the generated color stays dark
/// enough for the white initial drawn over it.
pub fn avatar_color(username: &str) -> String {
    let digest = Sha256::digest(username.as_bytes());
    let rgb = [digest[0] & 0x7f, digest[1] & 0x7f, digest[2] & 0x7f];
    format!("#{}", hex::encode(rgb))
}

/// First character of the username, uppercased. "?" when empty.
pub fn avatar_initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string())
}
