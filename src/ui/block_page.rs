use super::helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::api::{parse_quantity, parse_u64};
use crate::app::{App, BlockResult};
use crate::ui::NAV_HELP;

pub fn draw_block_result(frame: &mut Frame, app: &App, result: &BlockResult) {
    let area = frame.area();
    let info = &result.block;
    let transactions = info.transactions.as_deref().unwrap_or_default();
    let padded = padded_rect(area, 1);

    let block_info_height: u16 = 13;

    // Transaction list: at least 3 rows, at most half the terminal
    let min_tx_height: u16 = 5;
    let max_tx_height = padded.height / 2;
    let remaining = padded.height.saturating_sub(block_info_height + 1); // +1 for nav help
    let tx_list_height = remaining.max(min_tx_height).min(max_tx_height);

    let chunks = Layout::vertical([
        Constraint::Length(padded.height.saturating_sub(tx_list_height + 1)), // Block info takes what's left
        Constraint::Length(tx_list_height),                                   // Transaction list
        Constraint::Length(1),                                                // Nav help
    ])
    .split(padded);

    // Block info section
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📦 Block #{} ", info.number));

    let mut lines = vec![
        format_kv("Hash", &info.hash),
        format_kv("Parent Hash", &info.parent_hash),
        format_kv(
            "Timestamp",
            &format!(
                "{} ({})",
                format_time_ago(&info.timestamp, app.now),
                info.timestamp
            ),
        ),
        format_kv("Miner", &info.miner),
        Line::from(""),
        format_kv("Transactions", &info.transaction_count.to_string()),
    ];

    // Gas usage with a bar when both sides parse
    match (parse_u64(&info.gas_used), parse_u64(&info.gas_limit)) {
        (Some(used), Some(limit)) if limit > 0 => {
            let gas_pct = (used as f64 / limit as f64) * 100.0;
            let bar_width = 20;
            let filled = (((gas_pct / 100.0) * bar_width as f64) as usize).min(bar_width);
            let gas_bar = format!(
                "[{}{}] {:.2}%",
                "█".repeat(filled),
                "░".repeat(bar_width - filled),
                gas_pct
            );

            lines.push(Line::from(vec![
                Span::styled("Gas Used: ", Style::default().fg(Color::DarkGray)),
                Span::styled(format_gas(used), Style::default().fg(Color::White)),
                Span::styled(" / ", Style::default().fg(Color::DarkGray)),
                Span::styled(format_gas(limit), Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {gas_bar}"),
                    Style::default().fg(if gas_pct > 90.0 {
                        Color::Red
                    } else if gas_pct > 70.0 {
                        Color::Yellow
                    } else {
                        Color::Green
                    }),
                ),
            ]));
        }
        _ => {
            lines.push(format_kv(
                "Gas Used",
                &format!("{} / {}", info.gas_used, info.gas_limit),
            ));
        }
    }

    lines.push(format_kv(
        "Base Fee",
        &info
            .base_fee_per_gas
            .as_deref()
            .and_then(parse_quantity)
            .map(format_gwei)
            .unwrap_or_else(|| "N/A".to_string()),
    ));

    if let Some(size) = info.size {
        lines.push(format_kv("Size", &format!("{size} bytes")));
    }

    if let Some(nonce) = &info.nonce {
        lines.push(format_kv("Nonce", nonce));
    }

    if let Some(root) = &info.state_root {
        lines.push(format_kv("State Root", root));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, chunks[0]);

    // Transaction list section
    let tx_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Transactions ({}) ", transactions.len()));

    if transactions.is_empty() {
        let empty_msg = Paragraph::new("No transactions in this block")
            .block(tx_block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, chunks[1]);
    } else {
        // Account for header row and borders
        let visible_count = (chunks[1].height.saturating_sub(3)) as usize; // -2 borders, -1 header
        let start = result.selected_index.saturating_sub(visible_count / 2);

        let mut items: Vec<ListItem> = vec![format_tx_list_header()];

        items.extend(
            transactions
                .iter()
                .enumerate()
                .skip(start)
                .take(visible_count)
                .map(|(i, tx)| {
                    format_tx_list_item(
                        i,
                        tx,
                        &app.config.native_symbol,
                        i == result.selected_index,
                    )
                }),
        );

        let list = List::new(items).block(tx_block);
        frame.render_widget(list, chunks[1]);
    }

    // Navigation help
    let help = Paragraph::new(NAV_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
