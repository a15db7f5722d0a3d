use url::Url;

/// A typed validation target parsed from one scanned payload.
///
/// Ephemeral: lives only for the duration of one scan's processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// One-time reservation check-in.
    Reservation { code: String },
    /// Unlimited event access code.
    Access { code: String },
}

impl ScanTarget {
    /// Parse a raw decoded string into a target.
    ///
    /// `http(s)` URLs are inspected for `access` or `checkin` path markers
    /// (matched case-insensitively; the code segment keeps its original
    /// case), falling back to the last path segment as a reservation code.
    /// Anything else is taken whole as a bare reservation code. Empty or
    /// whitespace-only input yields no target.
    pub fn parse(raw: &str) -> Option<ScanTarget> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(url) = Url::parse(s) {
            if matches!(url.scheme(), "http" | "https") {
                return Self::from_url(&url);
            }
        }

        // Plain text without an http(s) URL: assume a reservation code.
        Some(ScanTarget::Reservation {
            code: s.to_string(),
        })
    }

    fn from_url(url: &Url) -> Option<ScanTarget> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|parts| parts.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        let position =
            |marker: &str| segments.iter().position(|p| p.eq_ignore_ascii_case(marker));

        if let Some(idx) = position("access") {
            if let Some(code) = segments.get(idx + 1) {
                return Some(ScanTarget::Access {
                    code: (*code).to_string(),
                });
            }
        }

        if let Some(idx) = position("checkin") {
            if let Some(code) = segments.get(idx + 1) {
                return Some(ScanTarget::Reservation {
                    code: (*code).to_string(),
                });
            }
        }

        segments.last().map(|last| ScanTarget::Reservation {
            code: (*last).to_string(),
        })
    }

    /// The code this target validates.
    pub fn code(&self) -> &str {
        match self {
            ScanTarget::Reservation { code } | ScanTarget::Access { code } => code,
        }
    }
}
