mod address_page;
mod block_page;
mod contracts_page;
mod helper;
mod tx_page;

use address_page::draw_address_result;
use block_page::draw_block_result;
use contracts_page::draw_contracts;
use helper::*;
use tx_page::draw_tx_result;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, HomeFocus, Screen};
use crate::search::SearchQuery;

const TITLE_ART: &str = r#"
███╗   ███╗ ██████╗ ███╗   ██╗███████╗██╗  ██╗
████╗ ████║██╔═══██╗████╗  ██║██╔════╝╚██╗██╔╝
██╔████╔██║██║   ██║██╔██╗ ██║█████╗   ╚███╔╝
██║╚██╔╝██║██║   ██║██║╚██╗██║██╔══╝   ██╔██╗
██║ ╚═╝ ██║╚██████╔╝██║ ╚████║███████╗██╔╝ ██╗
╚═╝     ╚═╝ ╚═════╝ ╚═╝  ╚═══╝╚══════╝╚═╝  ╚═╝
"#;

/// Below this height the home screen uses a one-line title
const FULL_TITLE_MIN_HEIGHT: u16 = 40;

const NAV_HELP: &str = "↑↓ navigate • Enter select • b back • h home • Esc quit";
const NAV_HELP_NO_LIST: &str = "b back • h home • Esc quit";

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Home => draw_home(frame, app),
        Screen::Loading(msg) => draw_loading(frame, msg),
        Screen::BlockResult(result) => draw_block_result(frame, app, result),
        Screen::TxResult(result) => draw_tx_result(frame, app, result),
        Screen::AddressResult(result) => draw_address_result(frame, app, result),
        Screen::Contracts(result) => draw_contracts(frame, app, result),
        Screen::Error(msg) => draw_error(frame, msg),
    }
}

fn draw_home(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.needs_api_setup() {
        draw_api_setup(frame, app, area);
    } else {
        draw_search_home(frame, app, area);
    }
}

fn draw_title(frame: &mut Frame, area: Rect, full: bool) {
    let title = if full {
        Paragraph::new(TITLE_ART)
    } else {
        Paragraph::new("monex")
    };
    frame.render_widget(
        title
            .style(Style::default().fg(Color::Magenta).bold())
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_api_setup(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(8), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(3), // Spacing
        Constraint::Length(5), // API input box
        Constraint::Length(2), // Spacing
        Constraint::Length(1), // Help
        Constraint::Min(0),    // Padding
    ])
    .split(area);

    draw_title(frame, chunks[0], true);

    let subtitle = Paragraph::new("Terminal Monad Explorer")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    // API input box
    let api_area = centered_rect(70, chunks[3]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" ⚡ Indexer API Required ")
        .title_style(Style::default().fg(Color::Yellow));

    let inner_area = block.inner(api_area);
    frame.render_widget(block, api_area);

    let input_chunks = Layout::vertical([
        Constraint::Length(1), // Label
        Constraint::Length(1), // Input
    ])
    .split(inner_area);

    let label = Paragraph::new("Enter your indexer API URL (e.g., http://localhost:3000):")
        .style(Style::default().fg(Color::White));
    frame.render_widget(label, input_chunks[0]);

    let inner_width = input_chunks[1].width as usize;
    let scroll = app.api_input.visual_scroll(inner_width);

    let display_text = if app.api_input.value().is_empty() {
        Span::styled("https://...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.api_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text).scroll((0, scroll as u16));
    frame.render_widget(input, input_chunks[1]);

    // Cursor
    let cursor_x =
        input_chunks[1].x + (app.api_input.visual_cursor().saturating_sub(scroll)) as u16;
    let cursor_y = input_chunks[1].y;
    if cursor_x < input_chunks[1].x + input_chunks[1].width {
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    let help = Paragraph::new("Press Enter to connect • Esc to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_search_home(frame: &mut Frame, app: &App, area: Rect) {
    let recent_searches = app.get_recent_searches();
    let has_history = !recent_searches.is_empty();
    let full_title = area.height >= FULL_TITLE_MIN_HEIGHT;

    // History section height (max 5 items + 2 for border)
    let history_height = if has_history {
        (recent_searches.len().min(5) + 2) as u16
    } else {
        0
    };

    let chunks = Layout::vertical([
        Constraint::Length(if full_title { 8 } else { 1 }), // Title
        Constraint::Length(1),                              // Subtitle
        Constraint::Length(1),                              // Spacing
        Constraint::Length(3),                              // Search bar
        Constraint::Length(1),                              // Preview
        Constraint::Length(history_height),                 // History
        Constraint::Min(6),                                 // Live widgets
        Constraint::Length(1),                              // API status
        Constraint::Length(1),                              // Help
    ])
    .split(area);

    draw_title(frame, chunks[0], full_title);

    let subtitle = Paragraph::new("Terminal Monad Explorer")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    // Search bar
    let search_area = centered_rect(60, chunks[3]);
    let search_selected =
        app.home_focus == HomeFocus::Search && app.selected_history_index.is_none();
    draw_search_bar_with_selection(frame, app, search_area, search_selected);

    draw_search_preview(frame, app, centered_rect(60, chunks[4]));

    if has_history {
        let history_area = centered_rect(60, chunks[5]);
        draw_history_list(frame, app, history_area);
    }

    // Live widgets side by side
    let live = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[6]);
    draw_latest_blocks(frame, app, live[0]);
    draw_latest_transactions(frame, app, live[1]);

    // API status
    let api_status = match app.api_url() {
        Some(url) => {
            let truncated = truncate_end(url, 50);
            Line::from(vec![
                Span::styled("API: ", Style::default().fg(Color::DarkGray)),
                Span::styled(truncated, Style::default().fg(Color::Green)),
            ])
        }
        None => Line::from(vec![
            Span::styled("API: ", Style::default().fg(Color::DarkGray)),
            Span::styled("Not configured", Style::default().fg(Color::Yellow)),
        ]),
    };
    let api_widget = Paragraph::new(api_status).alignment(Alignment::Center);
    frame.render_widget(api_widget, chunks[7]);

    let help_text = match app.home_focus {
        HomeFocus::Search if has_history => {
            "Enter search • ↑↓ history • Del remove • Tab widgets • Esc quit"
        }
        HomeFocus::Search => "Enter to search • Tab widgets • Esc quit",
        HomeFocus::Blocks | HomeFocus::Transactions => {
            "↑↓ navigate • Enter open • Tab next • c contracts • Esc quit"
        }
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[8]);
}

/// One line under the search bar: what the input is and where Enter goes
fn draw_search_preview(frame: &mut Frame, app: &App, area: Rect) {
    let preview = &app.search_preview;
    if preview.query().is_empty() {
        return;
    }

    let line = match (preview.classification(), preview.url()) {
        (SearchQuery::Unknown, _) | (_, None) => Line::from(Span::styled(
            preview.classification().description(),
            Style::default().fg(Color::DarkGray),
        )),
        (query, Some(url)) => {
            let mut spans = vec![
                Span::styled(
                    format!("{} ", query.label()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("→ {url}"), Style::default().fg(Color::Gray)),
            ];

            if preview.is_loading() {
                spans.push(Span::styled(
                    "  looking up…",
                    Style::default().fg(Color::DarkGray),
                ));
            } else if let Some(meta) = preview.metadata() {
                spans.push(Span::styled(
                    format!("  {}", meta.name),
                    Style::default().fg(Color::Green),
                ));
                if meta.verified() {
                    spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
                }
            }

            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Title for a live widget, with its refresh state
fn live_title(name: &str, refreshing: bool, failed: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {name} "))];
    if refreshing {
        spans.push(Span::styled(
            "Updating… ",
            Style::default().fg(Color::Yellow),
        ));
    } else if failed {
        spans.push(Span::styled(
            "Refresh failed ",
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn live_block(title: Line<'static>, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(title)
}

fn draw_latest_blocks(frame: &mut Frame, app: &App, area: Rect) {
    let list = &app.latest_blocks;
    let focused = app.home_focus == HomeFocus::Blocks;
    let block = live_block(
        live_title("⛓ Latest Blocks", list.is_refreshing(), list.refresh_failed()),
        focused,
    );

    if list.is_empty() {
        let empty = Paragraph::new("No blocks available")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = list
        .items()
        .iter()
        .enumerate()
        .map(|(i, b)| {
            format_block_row(
                b,
                app.now,
                focused && i == app.live_selected,
                list.is_new(&b.number),
            )
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_latest_transactions(frame: &mut Frame, app: &App, area: Rect) {
    let list = &app.latest_transactions;
    let focused = app.home_focus == HomeFocus::Transactions;
    let block = live_block(
        live_title(
            "⇄ Latest Transactions",
            list.is_refreshing(),
            list.refresh_failed(),
        ),
        focused,
    );

    if list.is_empty() {
        let empty = Paragraph::new("No transactions available")
            .block(block)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = list
        .items()
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            format_tx_row(
                tx,
                &app.config.native_symbol,
                app.now,
                focused && i == app.live_selected,
                list.is_new(&tx.hash),
            )
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_search_bar_with_selection(frame: &mut Frame, app: &App, area: Rect, selected: bool) {
    let border_color = if selected {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" 🔍 Search ")
        .title_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search_input.visual_scroll(inner_width);

    let display_text = if app.search_input.value().is_empty() {
        Span::styled(
            "Search by Address / Txn Hash / Block",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(app.search_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));

    frame.render_widget(input, area);

    // Only show cursor if search bar is selected
    if selected {
        let cursor_x =
            area.x + 1 + (app.search_input.visual_cursor().saturating_sub(scroll)) as u16;
        let cursor_y = area.y + 1;

        if cursor_x < (area.x + area.width).saturating_sub(1) {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn draw_history_list(frame: &mut Frame, app: &App, area: Rect) {
    let recent_searches = app.get_recent_searches();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recent Searches ");

    let items: Vec<ListItem> = recent_searches
        .iter()
        .enumerate()
        .take(5)
        .map(|(i, query)| {
            let is_selected = app.selected_history_index == Some(i);
            let style = if is_selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };

            let display = truncate_end(query, 60);

            ListItem::new(format!(" {display}")).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn draw_loading(frame: &mut Frame, msg: &str) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Loading ");

    let spinner_frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let idx = (millis / 100) as usize % spinner_frames.len();

    let text = format!("{} {}", spinner_frames[idx], msg);
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));

    let centered = centered_rect_fixed(50, 5, area);
    frame.render_widget(paragraph, centered);
}

fn draw_error(frame: &mut Frame, msg: &str) {
    let area = frame.area();
    let padded = padded_rect(area, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ❌ Error ");

    let mut lines: Vec<Line> = msg
        .lines()
        .map(|line| Line::from(line.to_string()).fg(Color::Red))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(NAV_HELP_NO_LIST).fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(paragraph, padded);
}
