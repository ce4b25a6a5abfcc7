use tracing::{debug, warn};

use super::{DraftIssue, OrderForm, SelectOption, Selector, SubmitOutcome};
use crate::{
    client::OrderSubmitter,
    error::FormError,
    types::{Asset, BANKS, DetailRules, Network, OrderRequest, OrderResponse, PaymentMethod},
};

/// Selector-backed field of the sell screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Network,
    Asset,
    Method,
    Bank,
}

/// Order creation screen: an [`OrderForm`] plus one [`Selector`] per
/// enumerated field.
///
/// Selector commits are forwarded to the form, and the form's cascades are
/// reflected back into the selectors: the asset options follow the network,
/// and the bank selector exists only while the method requires a bank.
/// At most one selector is focused at a time.
#[derive(Clone, Debug)]
pub struct SellScreen {
    form: OrderForm,
    network: Selector,
    asset: Selector,
    method: Selector,
    bank: Selector,
    focused: Option<Field>,
}

fn network_options() -> Vec<SelectOption> {
    Network::ALL
        .iter()
        .map(|n| SelectOption::new(n.label()).with_aliases(n.aliases().iter().copied()))
        .collect()
}

fn asset_options(network: Network) -> Vec<SelectOption> {
    network
        .assets()
        .iter()
        .map(|a| SelectOption::new(a.ticker()))
        .collect()
}

fn method_options() -> Vec<SelectOption> {
    PaymentMethod::ALL
        .iter()
        .map(|m| SelectOption::new(m.label()).with_aliases(m.aliases().iter().copied()))
        .collect()
}

fn bank_options() -> Vec<SelectOption> {
    BANKS.iter().map(|b| SelectOption::new(*b)).collect()
}

impl SellScreen {
    pub fn new(rules: DetailRules) -> Self {
        Self::with_form(OrderForm::new(rules))
    }

    pub fn with_form(form: OrderForm) -> Self {
        let draft = form.draft();
        let network = Selector::new(network_options(), draft.network().label());
        let asset = Selector::new(asset_options(draft.network()), draft.asset().ticker());
        let method = Selector::new(method_options(), draft.method().label());
        let bank = Selector::new(bank_options(), draft.bank_name()).allow_custom();
        Self {
            form,
            network,
            asset,
            method,
            bank,
            focused: None,
        }
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn selector(&self, field: Field) -> &Selector {
        match field {
            Field::Network => &self.network,
            Field::Asset => &self.asset,
            Field::Method => &self.method,
            Field::Bank => &self.bank,
        }
    }

    fn selector_mut(&mut self, field: Field) -> &mut Selector {
        match field {
            Field::Network => &mut self.network,
            Field::Asset => &mut self.asset,
            Field::Method => &mut self.method,
            Field::Bank => &mut self.bank,
        }
    }

    pub fn focused(&self) -> Option<Field> {
        self.focused
    }

    /// Selector fields currently part of the form, in presentation order.
    pub fn visible_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Network, Field::Asset, Field::Method];
        if self.form.shows_bank() {
            fields.push(Field::Bank);
        }
        fields
    }

    pub fn is_visible(&self, field: Field) -> bool {
        field != Field::Bank || self.form.shows_bank()
    }

    /// Focuses `field`, blurring the previously focused selector first.
    pub fn focus(&mut self, field: Field) -> Result<(), FormError> {
        if !self.is_visible(field) {
            return Ok(());
        }
        if self.focused.is_some_and(|f| f != field) {
            self.blur()?;
        }
        self.focused = Some(field);
        self.selector_mut(field).focus();
        Ok(())
    }

    /// Replaces the query of the focused selector.
    pub fn type_text(&mut self, text: &str) -> Result<(), FormError> {
        let Some(field) = self.focused else {
            return Ok(());
        };
        if let Some(value) = self.selector_mut(field).type_text(text) {
            // Auto-commit leaves the input
            self.focused = None;
            self.apply(field, &value)?;
        }
        Ok(())
    }

    /// Picks the `index`-th match of the focused selector and leaves it.
    pub fn select_match(&mut self, index: usize) -> Result<(), FormError> {
        let Some(field) = self.focused else {
            return Ok(());
        };
        let Some(value) = self.selector_mut(field).select_match(index) else {
            return Ok(());
        };
        self.apply(field, &value)?;
        self.blur()
    }

    /// Leaves the focused selector, committing or reverting its input.
    pub fn blur(&mut self) -> Result<(), FormError> {
        let Some(field) = self.focused.take() else {
            return Ok(());
        };
        match self.selector_mut(field).blur() {
            Some(value) => self.apply(field, &value),
            None => Ok(()),
        }
    }

    pub fn set_amount_text(&mut self, raw: &str) {
        self.form.set_amount_text(raw);
    }

    pub fn set_details_text(&mut self, raw: &str) {
        self.form.set_details_text(raw);
    }

    pub fn issues(&self) -> Vec<DraftIssue> {
        self.form.issues()
    }

    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    pub fn begin_submit(&mut self) -> Result<OrderRequest, FormError> {
        self.blur()?;
        self.form.begin_submit()
    }

    pub fn finish_submit(&mut self, response: OrderResponse) -> Result<SubmitOutcome, FormError> {
        self.form.finish_submit(response)
    }

    pub async fn submit<S: OrderSubmitter>(
        &mut self,
        submitter: &S,
    ) -> Result<SubmitOutcome, FormError> {
        self.blur()?;
        self.form.submit(submitter).await
    }

    fn apply(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        debug!(?field, %value, "selector committed");
        let result = match field {
            Field::Network => Network::from_label(value).map_err(FormError::from).map(|network| {
                self.form.set_network(network);
                self.asset.set_options(asset_options(network));
            }),
            Field::Asset => Asset::from_ticker(value)
                .map_err(FormError::from)
                .and_then(|asset| self.form.set_asset(asset)),
            Field::Method => PaymentMethod::from_label(value)
                .map_err(FormError::from)
                .map(|method| self.form.set_payment_method(method)),
            Field::Bank => {
                self.form.set_bank_name(value);
                Ok(())
            }
        };
        if let Err(e) = &result {
            warn!(%e, ?field, "selector value rejected by the form");
        }
        self.sync_selectors();
        result
    }

    fn sync_selectors(&mut self) {
        let draft = self.form.draft();
        self.network.sync(draft.network().label());
        self.asset.sync(draft.asset().ticker());
        self.method.sync(draft.method().label());
        self.bank.sync(draft.bank_name());
    }
}
