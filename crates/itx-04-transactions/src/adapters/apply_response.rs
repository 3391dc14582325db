use crate::domain::entities::ChangedAccount;
use crate::ports::outbound::ApplyResponse;
use itx_02_accounts::WrappedAccount;

/// Apply response that keeps everything it is given.
#[derive(Debug, Default)]
pub struct CollectingApplyResponse {
    pub changed: Vec<ChangedAccount>,
    pub receipts: Vec<WrappedAccount>,
    pub failure: Option<String>,
}

impl CollectingApplyResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

impl ApplyResponse for CollectingApplyResponse {
    fn add_changed_account(&mut self, changed: ChangedAccount) {
        self.changed.push(changed);
    }

    fn set_failed(&mut self, reason: &str) {
        self.failure = Some(reason.to_string());
    }

    fn append_receipt(&mut self, receipt: WrappedAccount) {
        self.receipts.push(receipt);
    }
}
