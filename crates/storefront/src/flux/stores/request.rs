//! Latest-request tracking shared by the fetch-backed stores.

use crate::flux::RequestId;

/// Remembers the most recently started request of one fetch kind.
///
/// A response is applied only when it answers that request; anything older
/// is stale and dropped.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LatestRequest {
    latest: Option<RequestId>,
    loading: bool,
}

impl LatestRequest {
    pub(crate) const fn latest(self) -> Option<RequestId> {
        self.latest
    }

    pub(crate) const fn is_loading(self) -> bool {
        self.loading
    }

    pub(crate) const fn start(&mut self, request: RequestId) {
        self.latest = Some(request);
        self.loading = true;
    }

    /// Settle `request` if it is the latest one. Returns `false` for a stale
    /// response, which must not touch the store.
    pub(crate) fn settle(&mut self, request: RequestId, fetch: &'static str) -> bool {
        if self.latest != Some(request) {
            tracing::debug!(
                fetch,
                request = request.as_u64(),
                latest = ?self.latest.map(RequestId::as_u64),
                "dropping stale response"
            );
            return false;
        }
        self.loading = false;
        true
    }
}
