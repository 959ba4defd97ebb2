use super::helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, ContractsResult};
use crate::ui::{NAV_HELP, NAV_HELP_NO_LIST};

pub fn draw_contracts(frame: &mut Frame, app: &App, result: &ContractsResult) {
    let area = frame.area();
    let symbol = app.config.native_symbol.as_str();

    let chunks = Layout::vertical([
        Constraint::Min(3),    // Contract list
        Constraint::Length(1), // Nav help
    ])
    .split(padded_rect(area, 1));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📜 Contracts ({}) ", result.contracts.len()));

    if result.contracts.is_empty() {
        let empty_msg = Paragraph::new("No contracts indexed yet")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, chunks[0]);
    } else {
        let visible_count = chunks[0].height.saturating_sub(3) as usize; // -2 borders, -1 header
        let start = result.selected_index.saturating_sub(visible_count / 2);

        let header = ListItem::new(Line::from(vec![Span::styled(
            format!(
                "  {:<42}  {:<19}  {:>8}  {:>16}",
                "Contract", "Creator", "Txns", "Balance"
            ),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )]));

        let mut items = vec![header];
        items.extend(
            result
                .contracts
                .iter()
                .enumerate()
                .skip(start)
                .take(visible_count)
                .map(|(i, contract)| {
                    let selected = i == result.selected_index;
                    let creator = contract
                        .contract_creator
                        .as_deref()
                        .map(format_addr_fixed_width)
                        .unwrap_or_else(|| format!("{:<19}", "-"));

                    let line = Line::from(vec![
                        Span::styled(
                            format!("{} ", if selected { "▶" } else { " " }),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(
                            format!("{:<42}", contract.address),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::styled(format!("  {creator}"), Style::default().fg(Color::Gray)),
                        Span::styled(
                            format!("  {:>8}", contract.transaction_count),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(
                            format!("  {:>16}", format_native_str(&contract.balance, symbol)),
                            Style::default().fg(Color::Yellow),
                        ),
                    ]);

                    let style = if selected {
                        Style::default().bg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    ListItem::new(line).style(style)
                }),
        );

        frame.render_widget(List::new(items).block(block), chunks[0]);
    }

    let nav_help = if result.contracts.is_empty() {
        NAV_HELP_NO_LIST
    } else {
        NAV_HELP
    };
    let help = Paragraph::new(nav_help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}
