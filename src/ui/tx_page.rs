use super::helper::*;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::{parse_quantity, parse_u64, AddressMetadata};
use crate::app::{App, TxResult};
use crate::ui::NAV_HELP;

/// Logs shown at once; the window follows the selected log
const MAX_VISIBLE_LOGS: usize = 5;

fn link_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    }
}

fn metadata_name(metadata: Option<&AddressMetadata>) -> Option<&str> {
    metadata.map(|m| m.name.as_str()).filter(|n| !n.is_empty())
}

pub fn draw_tx_result(frame: &mut Frame, app: &App, result: &TxResult) {
    let area = frame.area();
    let info = &result.detail.tx;
    let symbol = app.config.native_symbol.as_str();

    let chunks = Layout::vertical([
        Constraint::Min(20),   // Tx info
        Constraint::Length(1), // Nav help
    ])
    .split(padded_rect(area, 1));

    let status_str = match info.status {
        Some(true) => "✓ Success",
        Some(false) => "✗ Failed",
        None => "Pending",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 📄 Transaction ({status_str}) "));

    let mut link_idx = 0;

    let mut lines = vec![
        format_kv("Hash", &info.hash),
        format_kv("Type", info.type_name()),
    ];

    if let Some(sig) = &info.function_signature {
        lines.push(format_kv("Method", sig));
    } else if let Some(id) = &info.method_id {
        lines.push(format_kv("Method", id));
    }

    // From (link 0)
    let from_display = format_address_with_name(
        &info.from,
        metadata_name(result.detail.from_metadata.as_ref()),
    );
    lines.push(format_kv_link(
        "From",
        &from_display,
        result.selected_link == link_idx,
    ));
    link_idx += 1;

    // To or contract creation
    if let Some(to) = &info.to {
        let to_display =
            format_address_with_name(to, metadata_name(result.detail.to_metadata.as_ref()));
        lines.push(format_kv_link(
            "To",
            &to_display,
            result.selected_link == link_idx,
        ));
        link_idx += 1;
    } else {
        lines.push(format_kv("To", "Contract Creation"));
    }

    lines.push(Line::from(""));
    lines.push(format_kv("Value", &format_native_str(&info.value, symbol)));

    if let Some(fee) = info.fee_paid() {
        lines.push(format_kv("Fee Paid", &format_native(fee, symbol)));
    }

    if let Some(max_fee) = info.max_fee_per_gas.as_deref().and_then(parse_quantity) {
        lines.push(format_kv("Max Fee", &format_gwei(max_fee)));
    }
    if let Some(priority) = info
        .max_priority_fee_per_gas
        .as_deref()
        .and_then(parse_quantity)
    {
        lines.push(format_kv("Priority Fee", &format_gwei(priority)));
    }
    if let Some(gp) = info
        .effective_gas_price
        .as_deref()
        .or(info.gas_price.as_deref())
        .and_then(parse_quantity)
    {
        lines.push(format_kv("Gas Price", &format_gwei(gp)));
    }

    lines.push(format_kv("Gas Limit", &format_gas_str(&info.gas)));

    match (parse_u64(&info.gas_used), parse_u64(&info.gas)) {
        (Some(used), Some(limit)) if limit > 0 => lines.push(format_kv(
            "Gas Used",
            &format!(
                "{} ({:.2}%)",
                format_gas(used),
                (used as f64 / limit as f64) * 100.0
            ),
        )),
        _ => lines.push(format_kv("Gas Used", &format_gas_str(&info.gas_used))),
    }

    lines.push(Line::from(""));
    lines.push(format_kv("Nonce", &info.nonce.to_string()));

    // Block (navigable link)
    if !info.block_number.is_empty() {
        lines.push(format_kv_link(
            "Block",
            &format!("#{}", info.block_number),
            result.selected_link == link_idx,
        ));
        link_idx += 1;
    }

    lines.push(format_kv("Tx Index", &info.transaction_index.to_string()));
    lines.push(format_kv(
        "Timestamp",
        &format!(
            "{} ({})",
            format_time_ago(&info.timestamp, app.now),
            info.timestamp
        ),
    ));

    // Input data (truncated)
    lines.push(Line::from(""));
    let input_size = info.input_size();
    match info.input.as_deref() {
        Some(input_hex) if input_size > 0 => {
            let display_data = truncate_middle(input_hex, 34, 32);
            lines.push(format_kv("Input", &format!("{input_size} bytes")));
            lines.push(Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::styled(display_data, Style::default().fg(Color::DarkGray)),
            ]));
        }
        _ => lines.push(format_kv("Input", &format!("None ({symbol} transfer)"))),
    }

    // Logs: a window of MAX_VISIBLE_LOGS around the selected log address
    if !info.logs.is_empty() {
        lines.push(Line::from(""));

        let first_log_link = link_idx;
        let selected_log = result
            .selected_link
            .checked_sub(first_log_link)
            .filter(|i| *i < info.logs.len());
        let scroll = selected_log
            .map(|i| i.saturating_sub(MAX_VISIBLE_LOGS - 1))
            .unwrap_or(0);
        let visible_end = (scroll + MAX_VISIBLE_LOGS).min(info.logs.len());

        let header_text = if scroll > 0 {
            format!("── Logs ({}) ── ↑{} more", info.logs.len(), scroll)
        } else {
            format!("── Logs ({}) ──", info.logs.len())
        };
        lines.push(Line::from(vec![Span::styled(
            header_text,
            Style::default().fg(Color::Magenta),
        )]));

        for (i, log) in info.logs[scroll..visible_end].iter().enumerate() {
            let log_num = scroll + i;
            let selected = selected_log == Some(log_num);

            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:>3}. ", log_num + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(log.address.clone(), link_style(selected)),
            ]));

            if let Some(topic0) = log.topics.first() {
                lines.push(Line::from(vec![Span::styled(
                    format!("       {}", truncate_hash(topic0)),
                    Style::default().fg(Color::White),
                )]));
            }

            if log.topics.len() > 1 {
                lines.push(Line::from(vec![Span::styled(
                    format!("       +{} indexed topics", log.topics.len() - 1),
                    Style::default().fg(Color::DarkGray),
                )]));
            }
        }

        if visible_end < info.logs.len() {
            lines.push(Line::from(vec![Span::styled(
                format!("  ↓ {} more logs", info.logs.len() - visible_end),
                Style::default().fg(Color::DarkGray),
            )]));
        }
    }

    // Internal calls, linked after the logs
    if !info.internal_transactions.is_empty() {
        lines.push(Line::from(""));

        let first_call_link = link_idx + info.logs.len();
        let selected_call = result.selected_link.checked_sub(first_call_link);
        let scroll = selected_call
            .map(|i| i.saturating_sub(MAX_VISIBLE_LOGS - 1))
            .unwrap_or(0);
        let visible_end = (scroll + MAX_VISIBLE_LOGS).min(info.internal_transactions.len());

        lines.push(Line::from(vec![Span::styled(
            format!(
                "── Internal Transactions ({}) ──",
                info.internal_transactions.len()
            ),
            Style::default().fg(Color::Magenta),
        )]));

        for (i, call) in info.internal_transactions[scroll..visible_end]
            .iter()
            .enumerate()
        {
            let call_num = scroll + i;
            let target = if call.to.is_empty() { &call.from } else { &call.to };

            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:>3}. {:<8} ", call_num + 1, truncate_end(&call.call_type, 8)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{} → ", truncate_hash(&call.from)),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    truncate_hash(target),
                    link_style(selected_call == Some(call_num)),
                ),
                Span::styled(
                    format!(
                        "  {}  gas {}",
                        format_native_str(&call.value, symbol),
                        format_gas_str(&call.gas_used)
                    ),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        if visible_end < info.internal_transactions.len() {
            lines.push(Line::from(vec![Span::styled(
                format!(
                    "  ↓ {} more calls",
                    info.internal_transactions.len() - visible_end
                ),
                Style::default().fg(Color::DarkGray),
            )]));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, chunks[0]);

    let help = Paragraph::new(NAV_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}
