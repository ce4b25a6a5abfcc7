use tracing::debug;

/// Minimum query length (in characters) for a single match to be committed
/// without an explicit selection.
pub const AUTO_COMMIT_MIN_CHARS: usize = 3;

/// Entry of a [`Selector`] option list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    label: String,
    aliases: Vec<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Case-insensitive substring match against the label (hyphens ignored
    /// on both sides) or any of the aliases.
    pub fn matches(&self, query: &str) -> bool {
        let query = normalize(query);
        normalize(&self.label).contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(&query))
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase().replace('-', "")
}

/// Options matching the query, in list order. An empty query matches all.
pub fn filter_options<'a>(options: &'a [SelectOption], query: &str) -> Vec<&'a SelectOption> {
    options.iter().filter(|o| o.matches(query)).collect()
}

/// Searchable input over a small fixed list of strings.
///
/// While not editing, the rendered text is the committed value. Focusing
/// clears the input and starts a filter query; the pre-edit value is kept as
/// a fallback restored on blur unless the typed text is a valid option (or
/// free text is allowed).
///
/// Every method returning `Some(value)` has committed `value`, which the
/// owner must propagate to its model.
///
/// Picking an option from the list must be reported through [`Self::select`]
/// before the matching [`Self::blur`]: a selection marks the edit as settled,
/// and the blur that follows only closes the list.
#[derive(Clone, Debug)]
pub struct Selector {
    options: Vec<SelectOption>,
    allow_custom: bool,
    committed: String,
    fallback: String,
    query: String,
    editing: bool,
    selection_made: bool,
}

impl Selector {
    pub fn new(options: Vec<SelectOption>, committed: impl Into<String>) -> Self {
        let committed = committed.into();
        Self {
            options,
            allow_custom: false,
            fallback: committed.clone(),
            committed,
            query: String::new(),
            editing: false,
            selection_made: false,
        }
    }

    /// Accepts any non-empty typed text on blur, not only listed options.
    pub fn allow_custom(mut self) -> Self {
        self.allow_custom = true;
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replaces the option list, e.g. when it depends on another field.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Text shown in the input.
    pub fn text(&self) -> &str {
        if self.editing {
            &self.query
        } else {
            &self.committed
        }
    }

    /// Mirrors a value changed by the owner. Ignored while editing, the
    /// owner's value is picked up on the next sync after blur.
    pub fn sync(&mut self, value: &str) {
        if !self.editing {
            self.committed = value.to_string();
            self.fallback = value.to_string();
        }
    }

    /// Options matching the current query.
    pub fn matches(&self) -> Vec<&SelectOption> {
        filter_options(&self.options, &self.query)
    }

    pub fn focus(&mut self) {
        self.selection_made = false;
        self.fallback = self.committed.clone();
        self.query.clear();
        self.editing = true;
    }

    /// Updates the query. Commits the only match of a long enough query,
    /// unless free text is allowed: the typed text may be a longer custom
    /// value starting with an option, it is committed on blur.
    pub fn type_text(&mut self, text: &str) -> Option<String> {
        if !self.editing {
            self.focus();
        }
        self.selection_made = false;
        self.query = text.to_string();

        if self.allow_custom || self.query.chars().count() < AUTO_COMMIT_MIN_CHARS {
            return None;
        }
        let label = match self.matches().as_slice() {
            [only] => only.label().to_string(),
            _ => return None,
        };
        debug!(%label, query = %self.query, "auto-committing single match");
        self.commit_selection(label)
    }

    /// Commits a listed option, as if it was clicked.
    /// Returns `None` if the label is not in the option list.
    pub fn select(&mut self, label: &str) -> Option<String> {
        let label = self.options.iter().find(|o| o.label() == label)?.label().to_string();
        self.commit_selection(label)
    }

    /// Commits the `index`-th entry of [`Self::matches`].
    pub fn select_match(&mut self, index: usize) -> Option<String> {
        let label = self.matches().get(index)?.label().to_string();
        self.commit_selection(label)
    }

    /// Leaves the input.
    pub fn blur(&mut self) -> Option<String> {
        if self.selection_made {
            self.selection_made = false;
            self.editing = false;
            self.query.clear();
            return None;
        }
        if !self.editing {
            return None;
        }

        let typed = std::mem::take(&mut self.query);
        self.editing = false;
        let listed = self.options.iter().any(|o| o.label() == typed);
        if typed.is_empty() || (!listed && !self.allow_custom) {
            debug!(%typed, fallback = %self.fallback, "reverting selector input");
            self.committed = self.fallback.clone();
            return None;
        }

        self.committed = typed.clone();
        self.fallback = typed.clone();
        Some(typed)
    }

    fn commit_selection(&mut self, label: String) -> Option<String> {
        self.selection_made = true;
        self.committed = label.clone();
        self.fallback = label.clone();
        self.query.clear();
        self.editing = false;
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(labels: &[&str]) -> Vec<SelectOption> {
        labels.iter().map(|l| SelectOption::new(*l)).collect()
    }

    fn networks() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Tron (TRC20)").with_aliases(["trc20", "tron"]),
            SelectOption::new("Ethereum (ERC20)").with_aliases(["erc20", "eth"]),
            SelectOption::new("BNB Smart Chain (BEP20)").with_aliases(["bep20", "bsc"]),
        ]
    }

    #[test]
    fn test_matching_rule() {
        let options = networks();
        let labels = |q: &str| {
            filter_options(&options, q)
                .into_iter()
                .map(|o| o.label().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(labels("").len(), 3);
        assert_eq!(labels("TRC-20"), vec!["Tron (TRC20)"]);
        assert_eq!(labels("bsc"), vec!["BNB Smart Chain (BEP20)"]);
        assert_eq!(labels("20"), labels(""));
        assert_eq!(labels("RC2"), vec!["Tron (TRC20)", "Ethereum (ERC20)"]);
        // Substring containment only, no fuzzy matching
        assert!(labels("trx20").is_empty());
    }

    #[test]
    fn test_focus_clears_input() {
        let mut selector = Selector::new(tickers(&["USDT", "USDC"]), "USDT");
        assert_eq!(selector.text(), "USDT");

        selector.focus();
        assert!(selector.is_editing());
        assert_eq!(selector.text(), "");
        assert_eq!(selector.committed(), "USDT");
        assert_eq!(selector.matches().len(), 2);
    }

    #[test]
    fn test_auto_commit_unique_match() {
        let mut selector = Selector::new(tickers(&["USDT", "USDC"]), "USDT");
        selector.focus();

        assert_eq!(selector.type_text("U"), None);
        assert_eq!(selector.type_text("US"), None);
        assert_eq!(selector.type_text("USD"), None);
        assert_eq!(selector.type_text("USDC"), Some("USDC".to_string()));
        assert!(!selector.is_editing());
        assert_eq!(selector.committed(), "USDC");

        // Trailing blur after auto-commit is a no-op
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.committed(), "USDC");
    }

    #[test]
    fn test_no_auto_commit_for_short_query() {
        let mut selector = Selector::new(tickers(&["TON", "USDT", "NOT", "DOGS"]), "TON");
        selector.focus();
        assert_eq!(selector.type_text("DO"), None);
        assert_eq!(selector.matches().len(), 1);
        assert!(selector.is_editing());
    }

    #[test]
    fn test_select_then_blur_keeps_selection() {
        let mut selector = Selector::new(tickers(&["USDT", "TRX", "USDC"]), "USDT");
        selector.focus();
        selector.type_text("x");

        assert_eq!(selector.select("TRX"), Some("TRX".to_string()));
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.committed(), "TRX");
        assert_eq!(selector.text(), "TRX");
    }

    #[test]
    fn test_select_match_by_index() {
        let mut selector = Selector::new(networks(), "Tron (TRC20)");
        selector.focus();
        selector.type_text("e");
        assert_eq!(selector.matches().len(), 2);
        assert_eq!(
            selector.select_match(1),
            Some("BNB Smart Chain (BEP20)".to_string())
        );
        assert_eq!(selector.select_match(5), None);
    }

    #[test]
    fn test_blur_reverts_unknown_text() {
        let mut selector = Selector::new(tickers(&["USDT", "USDC"]), "USDT");
        selector.focus();
        selector.type_text("doge");

        assert_eq!(selector.blur(), None);
        assert_eq!(selector.committed(), "USDT");
        assert_eq!(selector.text(), "USDT");
        assert!(!selector.is_editing());
    }

    #[test]
    fn test_blur_reverts_empty_text() {
        let mut selector = Selector::new(tickers(&["USDT"]), "USDT").allow_custom();
        selector.focus();
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.committed(), "USDT");
    }

    #[test]
    fn test_blur_commits_exact_option() {
        let mut selector = Selector::new(tickers(&["USDT", "USDT0"]), "USDT0");
        selector.focus();
        // Two matches, no auto-commit
        assert_eq!(selector.type_text("USDT"), None);
        assert_eq!(selector.blur(), Some("USDT".to_string()));
        assert_eq!(selector.committed(), "USDT");
    }

    #[test]
    fn test_blur_commits_custom_text() {
        let mut selector = Selector::new(tickers(&["Сбербанк", "ВТБ"]), "").allow_custom();
        selector.focus();
        selector.type_text("Мой банк");

        assert_eq!(selector.blur(), Some("Мой банк".to_string()));
        assert_eq!(selector.committed(), "Мой банк");

        // The committed custom value is the next fallback
        selector.focus();
        selector.type_text("");
        assert_eq!(selector.blur(), None);
        assert_eq!(selector.committed(), "Мой банк");
    }

    #[test]
    fn test_no_auto_commit_for_custom_text() {
        let mut selector = Selector::new(tickers(&["Сбербанк", "ВТБ"]), "").allow_custom();
        selector.focus();

        let mut typed = String::new();
        for c in "ВТБ Онлайн".chars() {
            typed.push(c);
            assert_eq!(selector.type_text(&typed), None);
            assert!(selector.is_editing());
        }
        assert_eq!(selector.blur(), Some("ВТБ Онлайн".to_string()));
        assert_eq!(selector.committed(), "ВТБ Онлайн");
    }

    #[test]
    fn test_sync_ignored_while_editing() {
        let mut selector = Selector::new(tickers(&["USDT", "ETH"]), "USDT");
        selector.sync("ETH");
        assert_eq!(selector.committed(), "ETH");

        selector.focus();
        selector.sync("USDT");
        assert_eq!(selector.committed(), "ETH");
    }

    #[test]
    fn test_select_unknown_label() {
        let mut selector = Selector::new(tickers(&["USDT"]), "USDT");
        selector.focus();
        assert_eq!(selector.select("BTC"), None);
        assert!(selector.is_editing());
    }
}
