use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::UnknownOption;

/// Banks offered for instant transfers by phone number.
/// The bank selector accepts free text as well, this list is a convenience.
pub const BANKS: [&str; 8] = [
    "Сбербанк",
    "Т-Банк",
    "ВТБ",
    "Альфа-Банк",
    "Газпромбанк",
    "Райффайзенбанк",
    "Озон Банк",
    "Совкомбанк",
];

/// Way the seller receives fiat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    /// Instant transfer by phone number through the fast payment system.
    #[default]
    Sbp,
    BankCard,
    EWallet,
    MobileTopUp,
}

/// Label and placeholder of the payment details input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub placeholder: &'static str,
}

/// Acceptance rule for payment details, applied to the text with all
/// whitespace removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailRule {
    /// Exactly `n` ASCII digits, e.g. a card number.
    ExactDigits(usize),
    /// At least `n` characters.
    MinLength(usize),
}

impl DetailRule {
    pub fn check(&self, text: &str) -> bool {
        let mut compact = text.chars().filter(|c| !c.is_whitespace());
        match *self {
            DetailRule::ExactDigits(n) => {
                let mut count = 0;
                for c in compact.by_ref() {
                    if !c.is_ascii_digit() {
                        return false;
                    }
                    count += 1;
                }
                count == n
            }
            DetailRule::MinLength(n) => compact.count() >= n,
        }
    }
}

/// Detail rule per payment method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailRules {
    pub sbp: DetailRule,
    pub bank_card: DetailRule,
    pub e_wallet: DetailRule,
    pub mobile_top_up: DetailRule,
}

impl Default for DetailRules {
    fn default() -> Self {
        Self {
            sbp: DetailRule::MinLength(10),
            bank_card: DetailRule::ExactDigits(16),
            e_wallet: DetailRule::MinLength(5),
            mobile_top_up: DetailRule::MinLength(10),
        }
    }
}

impl DetailRules {
    pub fn rule(&self, method: PaymentMethod) -> DetailRule {
        match method {
            PaymentMethod::Sbp => self.sbp,
            PaymentMethod::BankCard => self.bank_card,
            PaymentMethod::EWallet => self.e_wallet,
            PaymentMethod::MobileTopUp => self.mobile_top_up,
        }
    }

    pub fn with_rule(mut self, method: PaymentMethod, rule: DetailRule) -> Self {
        match method {
            PaymentMethod::Sbp => self.sbp = rule,
            PaymentMethod::BankCard => self.bank_card = rule,
            PaymentMethod::EWallet => self.e_wallet = rule,
            PaymentMethod::MobileTopUp => self.mobile_top_up = rule,
        }
        self
    }
}

impl PaymentMethod {
    /// All methods in presentation order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Sbp,
        PaymentMethod::BankCard,
        PaymentMethod::EWallet,
        PaymentMethod::MobileTopUp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Sbp => "СБП (перевод по номеру телефона)",
            PaymentMethod::BankCard => "Банковская карта",
            PaymentMethod::EWallet => "Электронный кошелёк",
            PaymentMethod::MobileTopUp => "Пополнение мобильного",
        }
    }

    /// Lowercase alternative spellings, used by the searchable selector only.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PaymentMethod::Sbp => &["sbp", "сбп", "phone", "телефон"],
            PaymentMethod::BankCard => &["card", "карта", "visa", "mastercard", "мир"],
            PaymentMethod::EWallet => &["wallet", "кошелек", "кошелёк", "юmoney"],
            PaymentMethod::MobileTopUp => &["mobile", "topup", "мобильный"],
        }
    }

    pub fn detail_field(&self) -> DetailField {
        match self {
            PaymentMethod::Sbp => DetailField {
                label: "Номер телефона",
                placeholder: "+7 900 000-00-00",
            },
            PaymentMethod::BankCard => DetailField {
                label: "Номер карты",
                placeholder: "0000 0000 0000 0000",
            },
            PaymentMethod::EWallet => DetailField {
                label: "Номер кошелька",
                placeholder: "Кошелёк или e-mail",
            },
            PaymentMethod::MobileTopUp => DetailField {
                label: "Номер телефона для пополнения",
                placeholder: "+7 900 000-00-00",
            },
        }
    }

    /// Only transfers by phone need to know the receiving bank.
    pub fn requires_bank(&self) -> bool {
        matches!(self, PaymentMethod::Sbp)
    }

    pub fn from_label(label: &str) -> Result<Self, UnknownOption> {
        Self::ALL
            .into_iter()
            .find(|m| m.label() == label)
            .ok_or_else(|| UnknownOption::new("payment method", label))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_digits_rule() {
        let rule = DetailRule::ExactDigits(16);
        assert!(rule.check("1111222233334444"));
        assert!(rule.check("1111 2222 3333 4444"));
        assert!(!rule.check("1111 2222 3333 444"));
        assert!(!rule.check("1111 2222 3333 44445"));
        assert!(!rule.check("1111-2222-3333-4444"));
        assert!(!rule.check(""));
    }

    #[test]
    fn test_min_length_rule_counts_chars() {
        let rule = DetailRule::MinLength(5);
        assert!(rule.check("кошел"));
        assert!(!rule.check("к о ш"));
        assert!(rule.check("  abcde  "));
        assert!(DetailRule::MinLength(0).check(""));
    }

    #[test]
    fn test_only_sbp_requires_bank() {
        let with_bank: Vec<_> = PaymentMethod::ALL
            .into_iter()
            .filter(PaymentMethod::requires_bank)
            .collect();
        assert_eq!(with_bank, vec![PaymentMethod::Sbp]);
    }

    #[test]
    fn test_rule_overrides() {
        let rules = DetailRules::default().with_rule(PaymentMethod::EWallet, DetailRule::MinLength(8));
        assert_eq!(rules.rule(PaymentMethod::EWallet), DetailRule::MinLength(8));
        assert_eq!(rules.rule(PaymentMethod::BankCard), DetailRule::ExactDigits(16));
    }
}
