//! Test doubles and fixtures.
//!
//! [`MockSubmitter`] stands in for the order service: it records every
//! request and answers from a script, falling back to a default reply.
//! It can also never answer, to exercise in-flight behavior.
//!
//! [`DraftBuilder`] provides a convenient way to get an [`OrderForm`] with
//! controlled field values.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{
    client::OrderSubmitter,
    state::OrderForm,
    types::{Asset, DetailRules, Network, OrderRequest, OrderResponse, PaymentMethod},
};

/// Scripted reply of the [`MockSubmitter`].
#[derive(Clone, Debug)]
pub enum Reply {
    Respond(OrderResponse),
    /// Never resolves.
    Hang,
}

#[derive(Debug)]
struct MockState {
    script: VecDeque<Reply>,
    default: Reply,
    requests: Vec<OrderRequest>,
}

/// In-memory order service.
#[derive(Clone, Debug)]
pub struct MockSubmitter {
    state: Arc<Mutex<MockState>>,
}

impl MockSubmitter {
    pub fn new(default: Reply) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                script: VecDeque::new(),
                default,
                requests: Vec::new(),
            })),
        }
    }

    pub fn accepting() -> Self {
        Self::new(Reply::Respond(OrderResponse::accepted()))
    }

    pub fn rejecting(message: &str) -> Self {
        Self::new(Reply::Respond(OrderResponse::rejected(message)))
    }

    /// Behaves like the HTTP client when the service can not be reached.
    pub fn unavailable() -> Self {
        Self::new(Reply::Respond(OrderResponse::unavailable()))
    }

    pub fn hanging() -> Self {
        Self::new(Reply::Hang)
    }

    /// Queues a reply used before the default one.
    pub fn then(self, reply: Reply) -> Self {
        self.state.lock().unwrap().script.push_back(reply);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl OrderSubmitter for MockSubmitter {
    fn create_order(
        &self,
        request: &OrderRequest,
    ) -> impl Future<Output = OrderResponse> + Send {
        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            let default = state.default.clone();
            state.script.pop_front().unwrap_or(default)
        };
        async move {
            match reply {
                Reply::Respond(response) => response,
                Reply::Hang => futures::future::pending().await,
            }
        }
    }
}

/// Builds an [`OrderForm`] with the given draft values.
#[derive(Debug, Default)]
pub struct DraftBuilder {
    rules: DetailRules,
    network: Network,
    asset: Option<Asset>,
    method: PaymentMethod,
    amount: String,
    details: String,
    bank: String,
}

impl DraftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(mut self, rules: DetailRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Defaults to the first asset of the network.
    pub fn asset(mut self, asset: Asset) -> Self {
        self.asset = Some(asset);
        self
    }

    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    pub fn amount(mut self, amount: &str) -> Self {
        self.amount = amount.to_string();
        self
    }

    pub fn details(mut self, details: &str) -> Self {
        self.details = details.to_string();
        self
    }

    pub fn bank(mut self, bank: &str) -> Self {
        self.bank = bank.to_string();
        self
    }

    /// # Panics
    ///
    /// If the asset is not available on the network.
    pub fn build(self) -> OrderForm {
        let mut form = OrderForm::new(self.rules);
        form.set_network(self.network);
        if let Some(asset) = self.asset {
            form.set_asset(asset).expect("asset available on network");
        }
        form.set_payment_method(self.method);
        form.set_amount_text(&self.amount);
        form.set_details_text(&self.details);
        form.set_bank_name(&self.bank);
        form
    }
}

/// Valid TRC20 USDT order paid out to a bank card.
pub fn card_form() -> OrderForm {
    DraftBuilder::new()
        .network(Network::Tron)
        .asset(Asset::Usdt)
        .method(PaymentMethod::BankCard)
        .amount("50")
        .details("1111222233334444")
        .build()
}

/// Valid TON order paid out through a transfer by phone.
pub fn sbp_form() -> OrderForm {
    DraftBuilder::new()
        .network(Network::Ton)
        .method(PaymentMethod::Sbp)
        .amount("12.5")
        .details("+7 900 123-45-67")
        .bank("Сбербанк")
        .build()
}
