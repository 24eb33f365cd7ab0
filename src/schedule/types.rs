use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Matches a schedule token by substring containment; anything that
    /// names none of POST/PUT/DELETE is a GET.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.contains("POST") {
            HttpMethod::Post
        } else if token.contains("PUT") {
            HttpMethod::Put
        } else if token.contains("DELETE") {
            HttpMethod::Delete
        } else {
            HttpMethod::Get
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Check applied to a completed transfer. New kinds extend this enum and
/// its dispatch in `verify` without changing the call contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationKind {
    Code,
}

impl VerificationKind {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "code" => Some(VerificationKind::Code),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VerificationKind::Code => "code",
        }
    }

    #[must_use]
    pub const fn default_expected(self) -> &'static str {
        match self {
            VerificationKind::Code => "200",
        }
    }
}

/// One scheduled fetch with its verification expectation.
#[derive(Debug, Clone)]
pub struct Request {
    /// Position in final schedule order (offset ascending, then line
    /// order); assigned when the schedule is built.
    pub slot: usize,
    pub offset_ms: u64,
    pub url: String,
    pub method: HttpMethod,
    pub kind: VerificationKind,
    pub expected: String,
}

/// Requests grouped by fire-time offset. Offsets are visited in
/// ascending order; insertion order inside a bucket is preserved. Fixed
/// once built; the dispatcher only drains it.
#[derive(Debug, Default)]
pub struct Schedule {
    buckets: BTreeMap<u64, Vec<Request>>,
}

impl Schedule {
    pub(super) fn from_buckets(mut buckets: BTreeMap<u64, Vec<Request>>) -> Self {
        let mut slot = 0usize;
        for request in buckets.values_mut().flatten() {
            request.slot = slot;
            slot = slot.saturating_add(1);
        }
        Self { buckets }
    }

    #[must_use]
    pub const fn buckets(&self) -> &BTreeMap<u64, Vec<Request>> {
        &self.buckets
    }

    /// Iterates requests in final schedule order.
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.buckets.values().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
