//! Tests for the order form controller.

use fastnum::udec128;

use super::*;
use crate::{testing, types::SERVICE_UNAVAILABLE};

fn card_form() -> OrderForm {
    testing::card_form()
}

#[test]
fn test_network_change_keeps_asset_valid() {
    for from in Network::ALL {
        for &asset in from.assets() {
            for to in Network::ALL {
                let mut form = OrderForm::default();
                form.set_network(from);
                form.set_asset(asset).unwrap();

                form.set_network(to);
                assert_eq!(form.draft().network(), to);
                assert!(to.supports(form.draft().asset()), "{from} {asset} -> {to}");
            }
        }
    }
}

#[test]
fn test_network_change_preserves_supported_asset() {
    let mut form = OrderForm::default();
    form.set_asset(Asset::Usdt).unwrap();

    form.set_network(Network::Tron);
    assert_eq!(form.draft().asset(), Asset::Usdt);

    form.set_network(Network::Ethereum);
    assert_eq!(form.draft().asset(), Asset::Usdt);

    form.set_asset(Asset::Usdc).unwrap();
    form.set_network(Network::BnbSmartChain);
    assert_eq!(form.draft().asset(), Asset::Bnb);
}

#[test]
fn test_set_asset_rejects_foreign_ticker() {
    let mut form = OrderForm::default();
    form.set_network(Network::BnbSmartChain);
    assert!(matches!(
        form.set_asset(Asset::Trx),
        Err(FormError::UnsupportedAsset { .. })
    ));
    assert_eq!(form.draft().asset(), Asset::Bnb);
}

#[test]
fn test_method_change_clears_details() {
    for method in PaymentMethod::ALL {
        let mut form = card_form();
        form.set_payment_method(method);
        assert_eq!(form.draft().details_text(), "");
        assert_eq!(form.shows_bank(), method.requires_bank());
        assert_eq!(form.detail_field(), method.detail_field());
    }
}

#[test]
fn test_amount_is_filtered_while_typing() {
    let mut form = OrderForm::default();
    form.set_amount_text("1a2,5.0.1");
    assert_eq!(form.draft().amount_text(), "125.01");
    assert_eq!(form.amount(), Some(udec128!(125.01)));
}

#[test]
fn test_non_positive_amount_is_invalid() {
    for amount in ["", "0", "0.0", ".", "abc"] {
        let mut form = card_form();
        form.set_amount_text(amount);
        assert!(!form.is_valid(), "amount {amount:?}");
        assert_eq!(form.issues(), vec![DraftIssue::NonPositiveAmount]);
    }
}

#[test]
fn test_card_number_must_have_sixteen_digits() {
    let mut form = card_form();
    assert!(form.is_valid());

    form.set_details_text("1111 2222 3333 4444");
    assert!(form.is_valid());

    for details in ["111122223333444", "11112222333344445", "", "1111 2222 3333 444x"] {
        form.set_details_text(details);
        assert!(!form.is_valid(), "details {details:?}");
        assert_eq!(
            form.issues(),
            vec![DraftIssue::InvalidDetails(DetailRule::ExactDigits(16))]
        );
    }
}

#[test]
fn test_bank_required_for_sbp() {
    let mut form = testing::sbp_form();
    assert!(form.is_valid());

    form.set_bank_name("");
    assert_eq!(form.issues(), vec![DraftIssue::MissingBank]);

    form.set_bank_name("   ");
    assert!(!form.is_valid());

    form.set_bank_name("Мой банк");
    assert!(form.is_valid());
    assert_eq!(form.snapshot().bank.as_deref(), Some("Мой банк"));
}

#[test]
fn test_bank_ignored_for_other_methods() {
    let mut form = card_form();
    form.set_bank_name("ВТБ");
    assert!(form.is_valid());
    assert_eq!(form.snapshot().bank, None);
}

#[test]
fn test_thresholds_are_configurable() {
    let rules = DetailRules::default().with_rule(PaymentMethod::EWallet, DetailRule::MinLength(10));
    let mut form = OrderForm::new(rules);
    form.set_payment_method(PaymentMethod::EWallet);
    form.set_amount_text("10");

    form.set_details_text("wallet1");
    assert!(!form.is_valid());

    form.set_details_text("wallet1234");
    assert!(form.is_valid());
}

#[test]
fn test_begin_submit_guards() {
    let mut form = card_form();
    form.set_amount_text("0");
    assert_eq!(form.begin_submit(), Err(FormError::Invalid));
    assert_eq!(form.submission_state(), SubmissionState::Idle);

    form.set_amount_text("50");
    let request = form.begin_submit().unwrap();
    assert_eq!(request, form.snapshot());
    assert_eq!(form.submission_state(), SubmissionState::Submitting);
    assert!(!form.can_submit());

    assert_eq!(form.begin_submit(), Err(FormError::InFlight));
}

#[test]
fn test_finish_without_submission() {
    let mut form = card_form();
    assert_eq!(
        form.finish_submit(OrderResponse::accepted()),
        Err(FormError::NotSubmitting)
    );
    assert_eq!(form.draft().amount_text(), "50");
}

#[test]
fn test_finish_success_clears_amount_and_details() {
    let mut form = card_form();
    form.begin_submit().unwrap();

    let outcome = form.finish_submit(OrderResponse::accepted()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Created);
    assert_eq!(outcome.message(), ORDER_CREATED);
    assert_eq!(form.submission_state(), SubmissionState::Idle);
    assert_eq!(form.draft().amount_text(), "");
    assert_eq!(form.draft().details_text(), "");
    assert_eq!(form.draft().network(), Network::Tron);
    assert_eq!(form.last_outcome(), Some(&SubmitOutcome::Created));
}

#[test]
fn test_finish_rejection_keeps_draft() {
    let mut form = card_form();
    let before = form.draft().clone();

    form.begin_submit().unwrap();
    let outcome = form
        .finish_submit(OrderResponse::rejected("Лимит превышен"))
        .unwrap();
    assert_eq!(outcome.message(), "Лимит превышен");
    assert_eq!(form.draft(), &before);
    assert_eq!(form.submission_state(), SubmissionState::Idle);

    form.begin_submit().unwrap();
    let outcome = form
        .finish_submit(OrderResponse {
            success: false,
            message: None,
        })
        .unwrap();
    assert_eq!(outcome.message(), ORDER_REJECTED);
}

#[test]
fn test_terminal_state_comes_from_last_outcome() {
    let mut form = card_form();
    assert_eq!(form.last_outcome(), None);

    form.begin_submit().unwrap();
    form.finish_submit(OrderResponse::rejected("Лимит превышен")).unwrap();
    assert_eq!(form.submission_state(), SubmissionState::Idle);
    assert_eq!(
        form.last_outcome().map(SubmitOutcome::state),
        Some(SubmissionState::Failed)
    );

    form.begin_submit().unwrap();
    assert_eq!(form.submission_state(), SubmissionState::Submitting);
    form.finish_submit(OrderResponse::accepted()).unwrap();
    assert_eq!(form.submission_state(), SubmissionState::Idle);
    assert_eq!(
        form.last_outcome().map(SubmitOutcome::state),
        Some(SubmissionState::Succeeded)
    );
}

#[tokio::test]
async fn test_submit_through_collaborator() {
    let submitter = testing::MockSubmitter::accepting();
    let mut form = card_form();

    let outcome = form.submit(&submitter).await.unwrap();
    assert!(outcome.is_success());

    let requests = submitter.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount, "50");
    assert_eq!(requests[0].details, "1111222233334444");
}

#[tokio::test]
async fn test_submit_unavailable_service() {
    let submitter = testing::MockSubmitter::unavailable();
    let mut form = card_form();

    let outcome = form.submit(&submitter).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected(SERVICE_UNAVAILABLE.to_string()));
    assert_eq!(form.draft().amount_text(), "50");
    assert_eq!(form.submission_state(), SubmissionState::Idle);
}

#[test]
fn test_hanging_submission_stays_in_flight() {
    let submitter = testing::MockSubmitter::hanging();
    let mut form = card_form();

    let mut task = tokio_test::task::spawn(form.submit(&submitter));
    tokio_test::assert_pending!(task.poll());
    tokio_test::assert_pending!(task.poll());
    drop(task);

    assert_eq!(form.submission_state(), SubmissionState::Submitting);
    assert!(!form.can_submit());
    assert_eq!(submitter.requests().len(), 1);
}
