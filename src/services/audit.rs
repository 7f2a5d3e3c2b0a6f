use crate::models::{AuditEvent, AuditEventKind};
use actix_web::http::header::{HeaderMap, USER_AGENT};
use actix_web::HttpRequest;
use std::collections::VecDeque;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use uuid::Uuid;

/// Proxy headers consulted for the client address, in priority order
const CLIENT_IP_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];

/// Who sent a request, as far as the headers tell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientContext {
    pub fn from_request(req: &HttpRequest) -> Self {
        let headers = req.headers();
        Self {
            ip: extract_client_ip(headers, req.peer_addr()),
            user_agent: headers
                .get(USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
        }
    }
}

/// Work out the client address from proxy headers, falling back to the peer
///
/// `X-Forwarded-For` may carry a chain, possibly spread over repeated
/// headers; the first parseable entry is the originating client.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    CLIENT_IP_HEADERS
        .iter()
        .find_map(|name| {
            headers
                .get_all(*name)
                .filter_map(|value| value.to_str().ok())
                .find_map(|raw| raw.split(',').find_map(parse_ip))
        })
        .or_else(|| peer.map(|addr| addr.ip()))
}

fn parse_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("unknown") {
        return None;
    }

    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
        .or_else(|| {
            raw.strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .and_then(|inner| inner.parse().ok())
        })
}

/// Bounded in-memory audit trail
///
/// The oldest event is dropped once `capacity` is reached. Every recorded
/// event is also logged.
pub struct AuditLog {
    events: Mutex<VecDeque<AuditEvent>>,
    capacity: usize,
}

impl AuditLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    pub fn record(
        &self,
        kind: AuditEventKind,
        session_id: Option<Uuid>,
        client: &ClientContext,
        detail: serde_json::Value,
    ) -> AuditEvent {
        let event = AuditEvent {
            id: Uuid::new_v4(),
            kind,
            session_id,
            client_ip: client.ip,
            user_agent: client.user_agent.clone(),
            detail,
            occurred_at: chrono::Utc::now(),
        };

        tracing::info!(
            event_id = %event.id,
            kind = %event.kind,
            session_id = ?event.session_id,
            client_ip = ?event.client_ip,
            "Audit event recorded"
        );

        let mut events = self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());

        event
    }

    /// Most recent events first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        let events = self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        events.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use serde_json::json;

    fn ip(raw: &str) -> IpAddr {
        raw.parse().unwrap()
    }

    #[test]
    fn test_forwarded_for_takes_first_valid_entry() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "unknown, 203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();

        assert_eq!(extract_client_ip(req.headers(), None), Some(ip("203.0.113.7")));
    }

    #[test]
    fn test_repeated_forwarded_for_headers_are_scanned_in_order() {
        let req = TestRequest::default()
            .append_header(("X-Forwarded-For", "unknown"))
            .append_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();

        assert_eq!(extract_client_ip(req.headers(), None), Some(ip("203.0.113.7")));
    }

    #[test]
    fn test_header_precedence() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "garbage"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .insert_header(("CF-Connecting-IP", "192.0.2.9"))
            .to_http_request();
        assert_eq!(extract_client_ip(req.headers(), None), Some(ip("198.51.100.2")));

        let req = TestRequest::default()
            .insert_header(("CF-Connecting-IP", "192.0.2.9"))
            .to_http_request();
        assert_eq!(extract_client_ip(req.headers(), None), Some(ip("192.0.2.9")));
    }

    #[test]
    fn test_accepts_ports_and_brackets() {
        assert_eq!(parse_ip("203.0.113.7:8080"), Some(ip("203.0.113.7")));
        assert_eq!(parse_ip("[2001:db8::1]:443"), Some(ip("2001:db8::1")));
        assert_eq!(parse_ip("[2001:db8::1]"), Some(ip("2001:db8::1")));
        assert_eq!(parse_ip(" 2001:db8::2 "), Some(ip("2001:db8::2")));
        assert_eq!(parse_ip("unknown"), None);
        assert_eq!(parse_ip(""), None);
    }

    #[test]
    fn test_falls_back_to_peer() {
        let req = TestRequest::default().to_http_request();
        let peer: SocketAddr = "192.0.2.44:5123".parse().unwrap();

        assert_eq!(extract_client_ip(req.headers(), Some(peer)), Some(ip("192.0.2.44")));
        assert_eq!(extract_client_ip(req.headers(), None), None);
    }

    #[test]
    fn test_context_from_request() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .insert_header(("User-Agent", "kiosk/1.0"))
            .to_http_request();

        let client = ClientContext::from_request(&req);
        assert_eq!(client.ip, Some(ip("198.51.100.2")));
        assert_eq!(client.user_agent.as_deref(), Some("kiosk/1.0"));
    }

    #[test]
    fn test_log_is_bounded_and_newest_first() {
        let log = AuditLog::new(2);
        let client = ClientContext::default();

        log.record(AuditEventKind::SessionStarted, None, &client, json!({}));
        log.record(AuditEventKind::CriterionToggled, None, &client, json!({}));
        log.record(AuditEventKind::SearchPerformed, None, &client, json!({"results": 3}));

        let recent = log.recent(10);
        assert_eq!(log.len(), 2);
        assert_eq!(recent[0].kind, AuditEventKind::SearchPerformed);
        assert_eq!(recent[1].kind, AuditEventKind::CriterionToggled);
        assert_eq!(recent[0].detail["results"], 3);
        assert_eq!(log.recent(1).len(), 1);
    }
}
