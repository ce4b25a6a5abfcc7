use fastnum::UD128;
use tracing::{debug, info};

use crate::{
    client::OrderSubmitter,
    error::FormError,
    num,
    types::{
        Asset, DetailField, DetailRule, DetailRules, Network, OrderRequest, OrderResponse,
        PaymentMethod,
    },
};

/// Notification shown after the order service accepted the order.
pub const ORDER_CREATED: &str = "Заявка успешно создана!";

/// Notification shown when the order service refused without a reason.
pub const ORDER_REJECTED: &str = "Заявка отклонена";

/// Lifecycle of a single submission attempt.
///
/// A form only ever rests in `Idle` or `Submitting`. The terminal state of
/// the last attempt is [`SubmitOutcome::state`] of [`OrderForm::last_outcome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of a submission attempt, as surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created)
    }

    pub fn message(&self) -> &str {
        match self {
            SubmitOutcome::Created => ORDER_CREATED,
            SubmitOutcome::Rejected(message) => message,
        }
    }

    /// Terminal state of the attempt that produced this outcome.
    pub fn state(&self) -> SubmissionState {
        match self {
            SubmitOutcome::Created => SubmissionState::Succeeded,
            SubmitOutcome::Rejected(_) => SubmissionState::Failed,
        }
    }
}

impl From<OrderResponse> for SubmitOutcome {
    fn from(value: OrderResponse) -> Self {
        if value.success {
            SubmitOutcome::Created
        } else {
            SubmitOutcome::Rejected(
                value
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| ORDER_REJECTED.to_string()),
            )
        }
    }
}

/// Reason the draft can not be submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftIssue {
    /// Amount is empty, unparsable or not greater than zero.
    NonPositiveAmount,
    /// Payment details do not satisfy the rule of the active method.
    InvalidDetails(DetailRule),
    /// Active method requires a bank and none is set.
    MissingBank,
}

/// Order being edited.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct OrderDraft {
    network: Network,
    asset: Asset,
    method: PaymentMethod,
    bank_name: String,
    amount_text: String,
    details_text: String,
}

impl OrderDraft {
    pub fn network(&self) -> Network {
        self.network
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn details_text(&self) -> &str {
        &self.details_text
    }
}

/// Order form controller.
///
/// Owns the [`OrderDraft`] and keeps its fields consistent with each other:
/// the asset is always valid for the network, and payment details are reset
/// whenever the payment method changes.
///
/// Submission is split into [`Self::begin_submit`] and [`Self::finish_submit`]
/// for event-loop driven callers, [`Self::submit`] chains both around the
/// [`OrderSubmitter`] call. At most one submission is in flight at a time.
#[derive(Clone, Debug, Default)]
pub struct OrderForm {
    draft: OrderDraft,
    rules: DetailRules,
    state: SubmissionState,
    last_outcome: Option<SubmitOutcome>,
}

impl OrderForm {
    pub fn new(rules: DetailRules) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn rules(&self) -> &DetailRules {
        &self.rules
    }

    /// `Submitting` between `begin_submit` and `finish_submit`, `Idle`
    /// otherwise.
    pub fn submission_state(&self) -> SubmissionState {
        self.state
    }

    /// Outcome of the most recent completed submission.
    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn set_network(&mut self, network: Network) {
        self.draft.network = network;
        if !network.supports(self.draft.asset) {
            debug!(
                %network,
                old = %self.draft.asset,
                new = %network.default_asset(),
                "asset not available on network, resetting"
            );
            self.draft.asset = network.default_asset();
        }
    }

    pub fn set_asset(&mut self, asset: Asset) -> Result<(), FormError> {
        if !self.draft.network.supports(asset) {
            return Err(FormError::UnsupportedAsset {
                network: self.draft.network.to_string(),
                asset: asset.to_string(),
            });
        }
        self.draft.asset = asset;
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.draft.method = method;
        self.draft.details_text.clear();
    }

    /// Stores the amount with everything but digits and a single decimal
    /// point removed.
    pub fn set_amount_text(&mut self, raw: &str) {
        self.draft.amount_text = num::sanitize_amount(raw);
    }

    pub fn set_details_text(&mut self, raw: &str) {
        self.draft.details_text = raw.to_string();
    }

    pub fn set_bank_name(&mut self, raw: &str) {
        self.draft.bank_name = raw.to_string();
    }

    /// Label and placeholder of the details input for the active method.
    pub fn detail_field(&self) -> DetailField {
        self.draft.method.detail_field()
    }

    pub fn detail_rule(&self) -> DetailRule {
        self.rules.rule(self.draft.method)
    }

    /// Whether the bank input is part of the form.
    pub fn shows_bank(&self) -> bool {
        self.draft.method.requires_bank()
    }

    /// Parsed amount, if the text is a valid number.
    pub fn amount(&self) -> Option<UD128> {
        num::parse_amount(&self.draft.amount_text)
    }

    /// Everything preventing submission, empty for a valid draft.
    pub fn issues(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if !num::is_positive_amount(&self.draft.amount_text) {
            issues.push(DraftIssue::NonPositiveAmount);
        }
        let rule = self.detail_rule();
        if !rule.check(&self.draft.details_text) {
            issues.push(DraftIssue::InvalidDetails(rule));
        }
        if self.shows_bank() && self.draft.bank_name.trim().is_empty() {
            issues.push(DraftIssue::MissingBank);
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues().is_empty()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.state != SubmissionState::Submitting && self.is_valid()
    }

    /// Request built from the current draft.
    pub fn snapshot(&self) -> OrderRequest {
        OrderRequest {
            network: self.draft.network,
            asset: self.draft.asset,
            method: self.draft.method,
            amount: self.draft.amount_text.clone(),
            details: self.draft.details_text.clone(),
            bank: self
                .shows_bank()
                .then(|| self.draft.bank_name.clone()),
        }
    }

    /// Checks preconditions and marks the form as submitting.
    pub fn begin_submit(&mut self) -> Result<OrderRequest, FormError> {
        if self.state == SubmissionState::Submitting {
            return Err(FormError::InFlight);
        }
        if !self.is_valid() {
            return Err(FormError::Invalid);
        }
        self.state = SubmissionState::Submitting;
        let request = self.snapshot();
        debug!(?request, "submitting order");
        Ok(request)
    }

    /// Applies the order service reply to the in-flight submission.
    ///
    /// Amount and details are cleared only when the order was created.
    pub fn finish_submit(&mut self, response: OrderResponse) -> Result<SubmitOutcome, FormError> {
        if self.state != SubmissionState::Submitting {
            return Err(FormError::NotSubmitting);
        }

        let outcome = SubmitOutcome::from(response);
        if outcome.is_success() {
            self.draft.amount_text.clear();
            self.draft.details_text.clear();
            info!(state = ?outcome.state(), "order created");
        } else {
            info!(state = ?outcome.state(), reason = outcome.message(), "order rejected");
        }

        self.state = SubmissionState::Idle;
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Submits the draft through `submitter` and applies the reply.
    pub async fn submit<S: OrderSubmitter>(
        &mut self,
        submitter: &S,
    ) -> Result<SubmitOutcome, FormError> {
        let request = self.begin_submit()?;
        let response = submitter.create_order(&request).await;
        self.finish_submit(response)
    }
}

#[cfg(test)]
mod tests;
