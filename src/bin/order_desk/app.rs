//! Order desk application state and event loop.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use p2p_desk::{
    client::{HttpClient, OrderSubmitter},
    state::{Field, SellScreen},
    store::{FileStore, Navigator},
    types::{DetailRules, OrderResponse, Screen},
};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

const INPUT_TICK: Duration = Duration::from_millis(50);

/// Input of the sell screen holding the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Select(Field),
    Amount,
    Details,
    Submit,
}

/// Message shown in the status line.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// Mounted sell screen.
#[derive(Debug)]
pub struct SellView {
    pub screen: SellScreen,
    pub focus: Focus,
    /// Highlighted entry of the focused selector's matches.
    pub highlighted: usize,
    /// Ticket of the in-flight submission.
    pending: Option<u64>,
}

impl SellView {
    fn new(rules: DetailRules) -> Self {
        Self {
            screen: SellScreen::new(rules),
            focus: Focus::Select(Field::Network),
            highlighted: 0,
            pending: None,
        }
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<_> = self
            .screen
            .visible_fields()
            .into_iter()
            .map(Focus::Select)
            .collect();
        // Amount goes right after the asset
        order.insert(2, Focus::Amount);
        order.push(Focus::Details);
        order.push(Focus::Submit);
        order
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = order[(current + delta).rem_euclid(len) as usize];
        self.set_focus(next);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.highlighted = 0;
        let result = match focus {
            Focus::Select(field) => self.screen.focus(field),
            _ => self.screen.blur(),
        };
        if let Err(e) = result {
            debug!(%e, "selector input dropped");
        }
    }

    /// Whether the focused selector has its option list open.
    pub fn is_listing(&self) -> bool {
        matches!(self.focus, Focus::Select(field) if self.screen.focused() == Some(field))
    }

    fn handle_select_key(&mut self, field: Field, key: KeyEvent) {
        if !self.is_listing() {
            match key.code {
                KeyCode::Enter | KeyCode::Down | KeyCode::Char(_) | KeyCode::Backspace => {
                    if let Err(e) = self.screen.focus(field) {
                        debug!(%e, "selector input dropped");
                    }
                }
                _ => return,
            }
            if matches!(key.code, KeyCode::Enter | KeyCode::Down) {
                return;
            }
        }

        let result = match key.code {
            KeyCode::Char(c) => {
                let mut query = self.screen.selector(field).query().to_string();
                query.push(c);
                self.highlighted = 0;
                self.screen.type_text(&query)
            }
            KeyCode::Backspace => {
                let mut query = self.screen.selector(field).query().to_string();
                query.pop();
                self.highlighted = 0;
                self.screen.type_text(&query)
            }
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Ok(())
            }
            KeyCode::Down => {
                let matches = self.screen.selector(field).matches().len();
                if self.highlighted + 1 < matches {
                    self.highlighted += 1;
                }
                Ok(())
            }
            KeyCode::Enter => self.screen.select_match(self.highlighted),
            KeyCode::Esc => self.screen.blur(),
            _ => Ok(()),
        };
        if let Err(e) = result {
            debug!(%e, "selector input dropped");
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        let current = match self.focus {
            Focus::Amount => self.screen.form().draft().amount_text(),
            Focus::Details => self.screen.form().draft().details_text(),
            _ => return,
        };
        let mut text = current.to_string();
        match key.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }
        match self.focus {
            Focus::Amount => self.screen.set_amount_text(&text),
            _ => self.screen.set_details_text(&text),
        }
    }
}

/// Reply of a spawned submission.
#[derive(Debug)]
struct Reply {
    ticket: u64,
    response: OrderResponse,
}

/// Terminal order desk.
pub struct App {
    navigator: Navigator<FileStore>,
    rules: DetailRules,
    client: HttpClient,
    sell: Option<SellView>,
    notice: Option<Notice>,
    next_ticket: u64,
    reply_tx: mpsc::UnboundedSender<Reply>,
    reply_rx: mpsc::UnboundedReceiver<Reply>,
    exit: bool,
}

impl App {
    pub fn new(navigator: Navigator<FileStore>, rules: DetailRules, client: HttpClient) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let sell = (navigator.current() == Screen::Sell).then(|| SellView::new(rules));
        Self {
            navigator,
            rules,
            client,
            sell,
            notice: None,
            next_ticket: 0,
            reply_tx,
            reply_rx,
            exit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn sell(&self) -> Option<&SellView> {
        self.sell.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut input_tick = tokio::time::interval(INPUT_TICK);
        terminal.draw(|frame| crate::ui::render(frame, self))?;
        while !self.exit {
            tokio::select! {
                biased;
                reply = self.reply_rx.recv() => {
                    let reply = reply.ok_or(Error::ChannelClosed)?;
                    self.on_reply(reply);
                }
                _ = input_tick.tick() => {
                    if !self.poll_input()? {
                        continue;
                    }
                }
            }
            terminal.draw(|frame| crate::ui::render(frame, self))?;
        }
        Ok(())
    }

    /// Drains pending terminal events, returns whether any was handled.
    fn poll_input(&mut self) -> Result<bool> {
        let mut handled = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key);
                    handled = true;
                }
                Event::Resize(..) => handled = true,
                _ => {}
            }
        }
        Ok(handled)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.exit = true;
                return;
            }
            KeyCode::Char('s') if ctrl => {
                self.submit();
                return;
            }
            KeyCode::F(n @ 1..=5) => {
                self.navigate(Screen::ALL[usize::from(n) - 1]);
                return;
            }
            _ => {}
        }

        match self.screen() {
            Screen::Home if key.code == KeyCode::Enter => self.navigate(Screen::Sell),
            Screen::Sell => self.handle_sell_key(key),
            _ => {}
        }
    }

    fn handle_sell_key(&mut self, key: KeyEvent) {
        let Some(view) = self.sell.as_mut() else {
            return;
        };
        let focus = view.focus;
        match key.code {
            KeyCode::Tab => view.move_focus(1),
            KeyCode::BackTab => view.move_focus(-1),
            _ => match focus {
                Focus::Select(field) => view.handle_select_key(field, key),
                Focus::Amount | Focus::Details => view.handle_text_key(key),
                Focus::Submit if key.code == KeyCode::Enter => self.submit(),
                Focus::Submit => {}
            },
        }
    }

    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.screen() {
            return;
        }
        if let Err(e) = self.navigator.navigate(screen) {
            warn!(%e, %screen, "failed to persist active screen");
        }
        self.sell = (screen == Screen::Sell).then(|| SellView::new(self.rules));
        self.notice = None;
        debug!(%screen, "navigated");
    }

    fn submit(&mut self) {
        let Some(view) = self.sell.as_mut() else {
            return;
        };
        let request = match view.screen.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                debug!(%e, "submit ignored");
                return;
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        view.pending = Some(ticket);
        self.notice = None;

        let client = self.client.clone();
        let reply_tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let response = client.create_order(&request).await;
            // Receiver lives as long as the app
            let _ = reply_tx.send(Reply { ticket, response });
        });
    }

    fn on_reply(&mut self, reply: Reply) {
        let Some(view) = self
            .sell
            .as_mut()
            .filter(|view| view.pending == Some(reply.ticket))
        else {
            info!(ticket = reply.ticket, "discarding reply for unmounted form");
            return;
        };
        view.pending = None;
        match view.screen.finish_submit(reply.response) {
            Ok(outcome) => {
                self.notice = Some(Notice {
                    text: outcome.message().to_string(),
                    is_error: !outcome.is_success(),
                })
            }
            Err(e) => warn!(%e, "unexpected submission reply"),
        }
    }
}
