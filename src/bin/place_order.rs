//! Place order binary - submits a single sell order and prints the outcome.

use std::process::exit;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use p2p_desk::{
    client::HttpClient,
    config::EnvConfig,
    state::{DraftIssue, OrderForm, SelectOption, filter_options},
    types::{Asset, DetailRule, Network, PaymentMethod},
};

#[derive(Parser, Debug)]
#[command(name = "place_order")]
#[command(about = "Submit a sell order to the P2P order service")]
struct Args {
    /// Order service base URL, overrides P2P_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate and submit an order
    Submit {
        /// Network label or alias, e.g. "trc20"
        #[arg(short, long)]
        network: String,

        /// Asset ticker, defaults to the first asset of the network
        #[arg(short, long)]
        asset: Option<String>,

        /// Payment method label or alias, e.g. "card"
        #[arg(short, long)]
        method: String,

        /// Amount of the asset to sell
        #[arg(long)]
        amount: String,

        /// Payment details: phone, card or wallet number
        #[arg(short, long)]
        details: String,

        /// Receiving bank, required for transfers by phone
        #[arg(short, long, default_value = "")]
        bank: String,

        /// Validate only, do not submit
        #[arg(long)]
        dry_run: bool,
    },
    /// Print current exchange rates
    Rates,
}

fn options<T: Copy>(
    items: &[T],
    label: impl Fn(T) -> &'static str,
    aliases: impl Fn(T) -> &'static [&'static str],
) -> Vec<SelectOption> {
    items
        .iter()
        .map(|&item| SelectOption::new(label(item)).with_aliases(aliases(item).iter().copied()))
        .collect()
}

/// Resolves a user query the way the desk selectors do: an exact label wins,
/// otherwise the query must match a single option.
fn resolve(kind: &str, options: &[SelectOption], query: &str) -> Result<String, String> {
    if let Some(exact) = options.iter().find(|o| o.label().eq_ignore_ascii_case(query)) {
        return Ok(exact.label().to_string());
    }
    match filter_options(options, query).as_slice() {
        [only] => Ok(only.label().to_string()),
        [] => Err(format!("No {kind} matches {query:?}")),
        many => Err(format!(
            "Ambiguous {kind} {query:?}, candidates: {}",
            many.iter().map(|o| o.label()).join(", ")
        )),
    }
}

fn issue_text(issue: &DraftIssue) -> String {
    match issue {
        DraftIssue::NonPositiveAmount => "amount must be a number greater than zero".to_string(),
        DraftIssue::InvalidDetails(DetailRule::ExactDigits(n)) => {
            format!("details must contain exactly {n} digits")
        }
        DraftIssue::InvalidDetails(DetailRule::MinLength(n)) => {
            format!("details must be at least {n} characters long")
        }
        DraftIssue::MissingBank => "bank is required for this payment method".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_form(
    env_config: &EnvConfig,
    network: &str,
    asset: Option<&str>,
    method: &str,
    amount: &str,
    details: &str,
    bank: &str,
) -> Result<OrderForm, String> {
    let rules = env_config.detail_rules().map_err(|e| e.to_string())?;
    let mut form = OrderForm::new(rules);

    let networks = options(&Network::ALL, |n| n.label(), |n| n.aliases());
    let network = Network::from_label(&resolve("network", &networks, network)?)
        .map_err(|e| e.to_string())?;
    form.set_network(network);

    if let Some(asset) = asset {
        let assets: Vec<_> = network
            .assets()
            .iter()
            .map(|a| SelectOption::new(a.ticker()))
            .collect();
        let asset = Asset::from_ticker(&resolve("asset", &assets, asset)?)
            .map_err(|e| e.to_string())?;
        form.set_asset(asset).map_err(|e| e.to_string())?;
    }

    let methods = options(&PaymentMethod::ALL, |m| m.label(), |m| m.aliases());
    let method = PaymentMethod::from_label(&resolve("payment method", &methods, method)?)
        .map_err(|e| e.to_string())?;
    form.set_payment_method(method);

    form.set_amount_text(amount);
    form.set_details_text(details);
    form.set_bank_name(bank);
    Ok(form)
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "warn");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let client = match env_config
        .endpoint(args.api_url.as_deref())
        .map_err(|e| e.to_string())
        .and_then(|endpoint| HttpClient::new(endpoint).map_err(|e| e.to_string()))
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Invalid order service configuration: {}", e);
            exit(1);
        }
    };

    match args.command {
        Command::Rates => match client.get_rates().await {
            Ok(rates) => match serde_json::to_string_pretty(&rates) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Failed to format rates: {}", e);
                    exit(1);
                }
            },
            Err(e) => {
                eprintln!("Failed to fetch rates: {}", e);
                exit(1);
            }
        },
        Command::Submit {
            network,
            asset,
            method,
            amount,
            details,
            bank,
            dry_run,
        } => {
            let mut form = match build_form(
                &env_config,
                &network,
                asset.as_deref(),
                &method,
                &amount,
                &details,
                &bank,
            ) {
                Ok(form) => form,
                Err(e) => {
                    eprintln!("{}", e);
                    exit(1);
                }
            };

            let issues = form.issues();
            if !issues.is_empty() {
                for issue in &issues {
                    eprintln!("Invalid order: {}", issue_text(issue));
                }
                exit(1);
            }

            let request = form.snapshot();
            println!(
                "{} {} via {} -> {}",
                request.amount, request.asset, request.network, request.method
            );
            if dry_run {
                println!("Order is valid, not submitted");
                return;
            }

            match form.submit(&client).await {
                Ok(outcome) if outcome.is_success() => println!("{}", outcome.message()),
                Ok(outcome) => {
                    eprintln!("{}", outcome.message());
                    exit(1);
                }
                Err(e) => {
                    eprintln!("Failed to submit order: {}", e);
                    exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_aliases() {
        let networks = options(&Network::ALL, |n| n.label(), |n| n.aliases());
        assert_eq!(
            resolve("network", &networks, "trc20").unwrap(),
            Network::Tron.label()
        );
        assert_eq!(
            resolve("network", &networks, "ton (the open network)").unwrap(),
            Network::Ton.label()
        );
        assert!(resolve("network", &networks, "solana").is_err());
    }

    #[test]
    fn test_build_form() {
        let form = build_form(
            &EnvConfig::default(),
            "tron",
            Some("usdc"),
            "card",
            "50",
            "1111 2222 3333 4444",
            "",
        )
        .unwrap();
        assert!(form.is_valid());
        assert_eq!(form.draft().asset(), Asset::Usdc);
        assert_eq!(form.draft().method(), PaymentMethod::BankCard);
    }

    #[test]
    fn test_build_form_reports_issues() {
        let form = build_form(&EnvConfig::default(), "ton", None, "sbp", "0", "123", "").unwrap();
        assert_eq!(form.issues().len(), 3);
    }
}
