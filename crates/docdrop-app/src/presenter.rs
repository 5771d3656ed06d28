//! Reconciliation and presentation of the two "my uploads" sources.
//!
//! Selection rule: the remote snapshot is the list whenever a fetch has
//! completed at least once since the view opened (zero entries included);
//! otherwise the local cache is. The rule is deliberately simplistic and
//! isolated here so a merge-by-identity policy could replace it without
//! touching admission or transport.

use chrono::{DateTime, Utc};
use docdrop_core::models::{CachedUploadRecord, DisplayEntry, RemoteFileRecord};

#[derive(Debug, Default)]
pub struct Presenter {
    remote: Option<Vec<RemoteFileRecord>>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the remote snapshot wholesale. An empty listing still counts
    /// as a completed fetch and supersedes the cache.
    pub fn set_remote(&mut self, records: Vec<RemoteFileRecord>) {
        self.remote = Some(records);
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// The current list for display: remote if fetched, else cached.
    pub fn current_list(&self, cached: &[CachedUploadRecord]) -> Vec<DisplayEntry> {
        match &self.remote {
            Some(remote) => remote.iter().map(remote_entry).collect(),
            None => cached.iter().map(cached_entry).collect(),
        }
    }
}

fn remote_entry(record: &RemoteFileRecord) -> DisplayEntry {
    let timestamp = DateTime::<Utc>::from_timestamp(record.modified, 0)
        .map(|t| format_timestamp(&t))
        .unwrap_or_else(|| "unknown".to_string());

    DisplayEntry {
        display_name: escape_html(&record.name),
        display_size: format_size(record.size),
        display_timestamp: escape_html(&timestamp),
        download_href: Some(escape_html(&record.url)),
    }
}

fn cached_entry(record: &CachedUploadRecord) -> DisplayEntry {
    DisplayEntry {
        display_name: escape_html(&record.name),
        display_size: format_size(record.size),
        display_timestamp: escape_html(&format_timestamp(&record.uploaded_at)),
        download_href: None,
    }
}

fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

/// Humanize a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}

/// Escape text for interpolation into markup. File names and URLs originate
/// from user- or server-controlled data and must never be parsed as
/// structure.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn cached(name: &str) -> CachedUploadRecord {
        CachedUploadRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            size: 2048,
            content_type: "application/pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    fn remote(name: &str, url: &str) -> RemoteFileRecord {
        RemoteFileRecord {
            name: name.to_string(),
            size: 1_500_000,
            modified: 1_700_000_000,
            url: url.to_string(),
        }
    }

    #[test]
    fn falls_back_to_cache_before_any_fetch() {
        let presenter = Presenter::new();
        let list = presenter.current_list(&[cached("a.pdf"), cached("b.pdf")]);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].display_name, "a.pdf");
        assert!(list[0].download_href.is_none());
    }

    #[test]
    fn remote_supersedes_cache_once_fetched() {
        let mut presenter = Presenter::new();
        presenter.set_remote(vec![remote("server.pdf", "/files/server.pdf")]);

        let list = presenter.current_list(&[cached("local.pdf")]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].display_name, "server.pdf");
        assert_eq!(list[0].download_href.as_deref(), Some("/files/server.pdf"));
    }

    #[test]
    fn empty_remote_fetch_still_supersedes_cache() {
        let mut presenter = Presenter::new();
        presenter.set_remote(Vec::new());

        let list = presenter.current_list(&[cached("local.pdf")]);
        assert!(list.is_empty());
    }

    #[test]
    fn refetch_replaces_snapshot_wholesale() {
        let mut presenter = Presenter::new();
        presenter.set_remote(vec![remote("old.pdf", "/files/old.pdf")]);
        presenter.set_remote(vec![remote("new.pdf", "/files/new.pdf")]);

        let list = presenter.current_list(&[]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].display_name, "new.pdf");
    }

    #[test]
    fn display_name_with_markup_renders_as_escaped_text() {
        let mut presenter = Presenter::new();
        presenter.set_remote(vec![remote(
            "<script>alert(1)</script>.pdf",
            "javascript:alert('x')",
        )]);

        let list = presenter.current_list(&[]);
        assert_eq!(
            list[0].display_name,
            "&lt;script&gt;alert(1)&lt;/script&gt;.pdf"
        );
        assert_eq!(
            list[0].download_href.as_deref(),
            Some("javascript:alert(&#39;x&#39;)")
        );
    }

    #[test]
    fn escape_html_covers_all_specials() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
        assert_eq!(escape_html("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn format_size_picks_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1_500_000), "1.4 MB");
    }
}
