//! Deep links into a media server's web client.

use crate::backend::BackendKind;
use crate::types::ServerConnectionDescriptor;

/// Trims the hostname and forces exactly one trailing `/`. Blank input yields `None`.
pub fn normalize_host(hostname: &str) -> Option<String> {
    let trimmed = hostname.trim().trim_end_matches('/');
    if trimmed.is_empty() { return None; }
    Some(format!("{}/", trimmed))
}

/// Picks the base URL from the first configured server, falling back to the backend default.
pub fn base_url(kind: BackendKind, first: Option<&ServerConnectionDescriptor>) -> String {
    first
        .and_then(|s| normalize_host(&s.hostname))
        .unwrap_or_else(|| kind.default_base_url().to_string())
}

pub fn item_url(base: &str, item_id: &str, server_id: &str) -> String {
    format!("{}web/index.html#!/item?id={}&serverId={}", base, item_id, server_id)
}

/// Deep link for `item_id` against the first server of `servers` (or the backend default).
pub fn deep_link(kind: BackendKind, servers: &[ServerConnectionDescriptor], item_id: &str) -> String {
    let first = servers.first();
    let server_id = first.map(|s| s.server_id.as_str()).unwrap_or_default();
    item_url(&base_url(kind, first), item_id, server_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(hostname: &str, server_id: &str) -> ServerConnectionDescriptor {
        ServerConnectionDescriptor { name: None, hostname: hostname.into(), server_id: server_id.into() }
    }

    #[test]
    fn normalize_host_collapses_trailing_slashes() {
        assert_eq!(normalize_host("http://test.com").as_deref(), Some("http://test.com/"));
        assert_eq!(normalize_host("http://test.com/").as_deref(), Some("http://test.com/"));
        assert_eq!(normalize_host("http://test.com///").as_deref(), Some("http://test.com/"));
        assert_eq!(normalize_host("http://test.com/emby").as_deref(), Some("http://test.com/emby/"));
        assert_eq!(normalize_host(""), None);
        assert_eq!(normalize_host("   "), None);
    }

    #[test]
    fn configured_host_is_used() {
        let url = deep_link(BackendKind::Emby, &[server("http://test.com/", "8")], "1");
        assert_eq!(url, "http://test.com/web/index.html#!/item?id=1&serverId=8");
        let url = deep_link(BackendKind::Jellyfin, &[server("http://test.com", "8")], "1");
        assert_eq!(url, "http://test.com/web/index.html#!/item?id=1&serverId=8");
    }

    #[test]
    fn empty_host_falls_back_to_default() {
        let url = deep_link(BackendKind::Emby, &[server("", "8")], "1");
        assert_eq!(url, "https://app.emby.media/web/index.html#!/item?id=1&serverId=8");
    }

    #[test]
    fn empty_host_falls_back_to_jellyfin_default() {
        let url = deep_link(BackendKind::Jellyfin, &[server("", "8")], "1");
        assert_eq!(url, "http://localhost:8096/web/index.html#!/item?id=1&serverId=8");
        let url = deep_link(BackendKind::Jellyfin, &[], "1");
        assert_eq!(url, "http://localhost:8096/web/index.html#!/item?id=1&serverId=");
    }

    #[test]
    fn only_the_first_server_counts() {
        let servers = [server("", "8"), server("http://other.com/", "9")];
        let url = deep_link(BackendKind::Jellyfin, &servers, "1");
        assert_eq!(url, "http://localhost:8096/web/index.html#!/item?id=1&serverId=8");
    }

    #[test]
    fn no_servers_leaves_server_id_empty() {
        let url = deep_link(BackendKind::Emby, &[], "42");
        assert_eq!(url, "https://app.emby.media/web/index.html#!/item?id=42&serverId=");
    }
}
