//! Rendering of the order desk screens.

use p2p_desk::{
    state::{DraftIssue, Field, SubmissionState},
    types::Screen,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::{
    app::{App, Focus, SellView},
    locale,
};

const ACCENT: Color = Color::Yellow;
const MUTED: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_nav(frame, chunks[0], app.screen());
    match app.screen() {
        Screen::Home => render_home(frame, chunks[1]),
        Screen::Sell => {
            if let Some(view) = app.sell() {
                render_sell(frame, chunks[1], view);
            }
        }
        Screen::Profile => render_profile(frame, chunks[1]),
        Screen::Rewards => render_rewards(frame, chunks[1]),
        Screen::Auth => render_auth(frame, chunks[1]),
    }
    render_status(frame, chunks[2], app);
    frame.render_widget(
        Paragraph::new(locale::HELP).style(Style::default().fg(MUTED)),
        chunks[3],
    );
}

fn render_nav(frame: &mut Frame, area: Rect, current: Screen) {
    let titles: Vec<_> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| format!("F{} {}", i + 1, locale::screen_title(*s)))
        .collect();
    let selected = Screen::ALL.iter().position(|s| *s == current).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", locale::EXCHANGE_NAME),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
        )
        .select(selected)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match app.notice() {
        Some(notice) => {
            let color = if notice.is_error { Color::Red } else { Color::Green };
            Line::from(Span::styled(
                notice.text.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(locale::FOOTER, Style::default().fg(MUTED))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_home(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", locale::home::TITLE),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                locale::home::ACCENT,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
        Line::styled(locale::home::SUB, Style::default().fg(Color::Gray)),
        Line::raw(""),
        Line::styled(locale::home::BUTTON, Style::default().fg(ACCENT)),
        Line::raw(""),
    ];
    for (title, text) in locale::home::STEPS {
        lines.push(Line::from(vec![
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(text, Style::default().fg(Color::Gray)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Network => locale::sell::NETWORK,
        Field::Asset => locale::sell::ASSET,
        Field::Method => locale::sell::METHOD,
        Field::Bank => locale::sell::BANK,
    }
}

fn input_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { ACCENT } else { Color::White };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn input_line<'a>(text: &'a str, placeholder: &'a str, editing: bool) -> Line<'a> {
    let mut spans = vec![if text.is_empty() {
        Span::styled(placeholder, Style::default().fg(MUTED))
    } else {
        Span::raw(text)
    }];
    if editing {
        spans.push(Span::styled(
            "_",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}

fn render_sell(frame: &mut Frame, area: Rect, view: &SellView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", locale::sell::TITLE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let screen = &view.screen;
    let form = screen.form();
    let draft = form.draft();

    let mut rows: Vec<(Focus, String, Line)> = Vec::new();
    for field in [Field::Network, Field::Asset] {
        rows.push(selector_row(view, field));
    }
    rows.push((
        Focus::Amount,
        format!("{} {}", locale::sell::AMOUNT, draft.asset()),
        input_line(
            draft.amount_text(),
            locale::sell::AMOUNT_PLACEHOLDER,
            view.focus == Focus::Amount,
        ),
    ));
    rows.push(selector_row(view, Field::Method));
    if screen.is_visible(Field::Bank) {
        rows.push(selector_row(view, Field::Bank));
    }
    let detail_field = form.detail_field();
    rows.push((
        Focus::Details,
        detail_field.label.to_string(),
        input_line(
            draft.details_text(),
            detail_field.placeholder,
            view.focus == Focus::Details,
        ),
    ));

    let mut constraints = vec![Constraint::Length(3); rows.len() + 1];
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[0]);

    for (slot, (focus, title, line)) in slots.iter().zip(rows) {
        let block = input_block(format!(" {title} "), view.focus == focus);
        frame.render_widget(Paragraph::new(line).block(block), *slot);
    }
    render_submit(frame, slots[slots.len() - 2], view);

    match view.focus {
        Focus::Select(field) if view.is_listing() => {
            render_options(frame, columns[1], view, field)
        }
        _ => render_issues(frame, columns[1], &screen.issues()),
    }
}

fn selector_row(view: &SellView, field: Field) -> (Focus, String, Line<'_>) {
    let selector = view.screen.selector(field);
    let placeholder = match field {
        Field::Bank => locale::sell::BANK_PLACEHOLDER,
        _ => locale::sell::SELECT_PLACEHOLDER,
    };
    let listing = view.is_listing() && view.focus == Focus::Select(field);
    (
        Focus::Select(field),
        field_label(field).to_string(),
        input_line(selector.text(), placeholder, listing),
    )
}

fn render_submit(frame: &mut Frame, area: Rect, view: &SellView) {
    let form = view.screen.form();
    let in_flight = form.submission_state() == SubmissionState::Submitting;
    let label = if in_flight {
        locale::sell::SUBMITTING
    } else {
        locale::sell::SUBMIT
    };
    let style = if form.can_submit() {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_uppercase(), style))
            .alignment(Alignment::Center)
            .block(input_block(String::new(), view.focus == Focus::Submit)),
        area,
    );
}

fn render_options(frame: &mut Frame, area: Rect, view: &SellView, field: Field) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", locale::sell::OPTIONS));
    let matches = view.screen.selector(field).matches();
    if matches.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                locale::sell::NO_MATCHES,
                Style::default().fg(MUTED),
            ))
            .block(block),
            area,
        );
        return;
    }

    let items: Vec<_> = matches
        .iter()
        .map(|option| ListItem::new(option.label().to_string()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(view.highlighted));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_issues(frame: &mut Frame, area: Rect, issues: &[DraftIssue]) {
    let lines: Vec<_> = issues
        .iter()
        .map(|issue| {
            let text = match issue {
                DraftIssue::NonPositiveAmount => locale::sell::INVALID_AMOUNT,
                DraftIssue::InvalidDetails(_) => locale::sell::INVALID_DETAILS,
                DraftIssue::MissingBank => locale::sell::MISSING_BANK,
            };
            Line::styled(format!("• {text}"), Style::default().fg(MUTED))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_profile(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", locale::profile::TITLE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);
    frame.render_widget(
        Tabs::new(locale::profile::TABS)
            .select(0)
            .highlight_style(Style::default().fg(ACCENT)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(locale::profile::EMPTY)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
}

fn render_rewards(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::styled(
            locale::rewards::TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(locale::rewards::SUBTITLE, Style::default().fg(MUTED)),
        Line::raw(""),
    ];
    lines.extend(locale::rewards::STATS.iter().map(|(name, value)| {
        Line::from(vec![
            Span::styled(format!("{name}: "), Style::default().fg(Color::Gray)),
            Span::styled(*value, Style::default().fg(ACCENT)),
        ])
    }));
    lines.push(Line::raw(""));
    lines.extend(locale::rewards::ITEMS.iter().map(|(name, text)| {
        Line::from(vec![
            Span::styled(*name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" — "),
            Span::styled(*text, Style::default().fg(Color::Gray)),
        ])
    }));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_auth(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            locale::auth::TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(format!("{}: ", locale::auth::EMAIL), Style::default().fg(MUTED)),
        Line::styled(
            format!("{}: ", locale::auth::PASSWORD),
            Style::default().fg(MUTED),
        ),
        Line::raw(""),
        Line::styled(
            locale::auth::BUTTON.to_uppercase(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
