//! Russian UI strings.

use p2p_desk::types::Screen;

pub const EXCHANGE_NAME: &str = "P2P Desk";
pub const FOOTER: &str = "© 2026 P2P Desk • Безопасно и анонимно";

pub fn screen_title(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "Главная",
        Screen::Sell => "Продать",
        Screen::Profile => "Профиль",
        Screen::Rewards => "Награды",
        Screen::Auth => "Войти",
    }
}

pub mod home {
    pub const TITLE: &str = "Продайте криптовалюту";
    pub const ACCENT: &str = "за рубли";
    pub const SUB: &str = "Быстрый обмен без регистрации: выберите сеть, укажите реквизиты и получите перевод.";
    pub const BUTTON: &str = "Enter: создать заявку";
    pub const STEPS: [(&str, &str); 3] = [
        ("1. Заявка", "Выберите сеть, актив и способ получения"),
        ("2. Перевод", "Отправьте криптовалюту на указанный адрес"),
        ("3. Выплата", "Получите рубли на карту или по СБП"),
    ];
}

pub mod sell {
    pub const TITLE: &str = "Создание заявки";
    pub const NETWORK: &str = "Сеть";
    pub const ASSET: &str = "Актив";
    pub const METHOD: &str = "Способ получения";
    pub const AMOUNT: &str = "Сумма";
    pub const BANK: &str = "Банк";
    pub const AMOUNT_PLACEHOLDER: &str = "0.00";
    pub const BANK_PLACEHOLDER: &str = "Выберите или введите банк";
    pub const SELECT_PLACEHOLDER: &str = "Выберите...";
    pub const NO_MATCHES: &str = "Ничего не найдено";
    pub const OPTIONS: &str = "Варианты";
    pub const SUBMIT: &str = "Создать заявку";
    pub const SUBMITTING: &str = "Загрузка...";
    pub const INVALID_AMOUNT: &str = "Укажите сумму больше нуля";
    pub const INVALID_DETAILS: &str = "Проверьте реквизиты";
    pub const MISSING_BANK: &str = "Укажите банк";
}

pub mod profile {
    pub const TITLE: &str = "Личный кабинет";
    pub const TABS: [&str; 3] = ["Активные", "Завершённые", "Отменённые"];
    pub const EMPTY: &str = "У вас пока нет заявок";
}

pub mod rewards {
    pub const TITLE: &str = "Программа лояльности";
    pub const SUBTITLE: &str = "Получайте бонусы за каждую сделку";
    pub const STATS: [(&str, &str); 3] = [
        ("Уровень", "Новичок"),
        ("Бонусы", "0"),
        ("Сделок", "0"),
    ];
    pub const ITEMS: [(&str, &str); 3] = [
        ("Кэшбэк 0.5%", "За каждую завершённую заявку"),
        ("Реферальный бонус", "Пригласите друга и получите 10% его комиссии"),
        ("Повышенный курс", "Для пользователей уровня «Профи»"),
    ];
}

pub mod auth {
    pub const TITLE: &str = "Вход";
    pub const EMAIL: &str = "Email";
    pub const PASSWORD: &str = "Пароль";
    pub const BUTTON: &str = "Войти";
}

pub const HELP: &str =
    "F1-F5 экраны • Tab/Shift+Tab поля • ↑↓ Enter выбор • Esc отмена • Ctrl+S отправить • Ctrl+Q выход";
