use alloy::primitives::U256;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::api::{parse_quantity, parse_u64, BlockSummary, TxSummary};

// ============================================================================
// Helper Functions
// ============================================================================

pub fn truncate_hash(hash: &str) -> String {
    truncate_middle(hash, 10, 6)
}

/// Keep the first `head` and last `tail` chars of long values.
/// Counts chars, since indexer strings are not guaranteed to be ASCII.
pub fn truncate_middle(value: &str, head: usize, tail: usize) -> String {
    let len = value.chars().count();
    if len <= head + tail + 4 {
        return value.to_string();
    }
    let start: String = value.chars().take(head).collect();
    let end: String = value.chars().skip(len - tail).collect();
    format!("{start}...{end}")
}

/// Cut a value to at most `max` chars, ending with "..." when shortened
pub fn truncate_end(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let cut: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Truncated address padded to the width of a truncated hash
pub fn format_addr_fixed_width(addr: &str) -> String {
    format!("{:<19}", truncate_hash(addr))
}

/// Format an address with an optional display name
pub fn format_address_with_name(address: &str, name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("{name} ({address})"),
        _ => address.to_string(),
    }
}

/// Relative time of a numeric timestamp against the display clock.
/// Non-numeric timestamps are shown as given.
pub fn format_time_ago(timestamp: &str, now: u64) -> String {
    let Some(ts) = parse_u64(timestamp) else {
        return timestamp.to_string();
    };
    let secs_ago = now.saturating_sub(ts);

    if secs_ago < 60 {
        format!("{secs_ago} secs ago")
    } else if secs_ago < 3600 {
        format!("{} mins ago", secs_ago / 60)
    } else if secs_ago < 86400 {
        format!("{} hours ago", secs_ago / 3600)
    } else {
        format!("{} days ago", secs_ago / 86400)
    }
}

pub fn format_gas(gas: u64) -> String {
    if gas >= 1_000_000 {
        format!("{:.2}M", gas as f64 / 1_000_000.0)
    } else if gas >= 1_000 {
        format!("{:.2}K", gas as f64 / 1_000.0)
    } else {
        gas.to_string()
    }
}

/// Gas from an API quantity string
pub fn format_gas_str(gas: &str) -> String {
    parse_u64(gas).map(format_gas).unwrap_or_else(|| gas.to_string())
}

pub fn format_gwei(wei: U256) -> String {
    let gwei = wei.to_string().parse::<f64>().unwrap_or(0.0) / 1_000_000_000.0;
    if gwei >= 1.0 {
        format!("{gwei:.2} gwei")
    } else {
        format!("{gwei:.4} gwei")
    }
}

/// Native currency amount (18 decimals) with the configured symbol
pub fn format_native(wei: U256, symbol: &str) -> String {
    let wei_str = wei.to_string();
    if wei_str.len() <= 18 {
        let padded = format!("{wei_str:0>18}");
        format!("0.{} {symbol}", &padded[..6])
    } else {
        let (whole, frac) = wei_str.split_at(wei_str.len() - 18);
        format!("{whole}.{} {symbol}", &frac[..6])
    }
}

/// Native amount from an API quantity string; unparseable values pass through
pub fn format_native_str(value: &str, symbol: &str) -> String {
    parse_quantity(value)
        .map(|wei| format_native(wei, symbol))
        .unwrap_or_else(|| format!("{value} {symbol}"))
}

pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let amount_str = amount.to_string();
    let dec = decimals as usize;

    if dec == 0 {
        return amount_str;
    }

    let padded = if amount_str.len() <= dec {
        format!("{:0>width$}", amount_str, width = dec + 1)
    } else {
        amount_str
    };
    let (whole, frac) = padded.split_at(padded.len() - dec);

    if frac.trim_end_matches('0').is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, &frac[..4.min(frac.len())])
    }
}

fn live_row_style(selected: bool, is_new: bool) -> Style {
    if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else if is_new {
        Style::default().bg(Color::Rgb(20, 60, 30))
    } else {
        Style::default()
    }
}

fn new_marker(is_new: bool) -> Span<'static> {
    if is_new {
        Span::styled("NEW ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("    ")
    }
}

/// One row of the latest-blocks widget
pub fn format_block_row<'a>(
    block: &BlockSummary,
    now: u64,
    selected: bool,
    is_new: bool,
) -> ListItem<'a> {
    let line = Line::from(vec![
        new_marker(is_new),
        Span::styled(
            format!("#{:<10}", block.number),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:>14}", format_time_ago(&block.timestamp, now)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>4} txs", block.transaction_count),
            Style::default().fg(Color::White),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(truncate_hash(&block.miner), Style::default().fg(Color::Gray)),
    ]);

    ListItem::new(line).style(live_row_style(selected, is_new))
}

/// One row of the latest-transactions widget
pub fn format_tx_row<'a>(
    tx: &TxSummary,
    symbol: &str,
    now: u64,
    selected: bool,
    is_new: bool,
) -> ListItem<'a> {
    let status = match tx.status {
        Some(true) => Span::styled("✓ ", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("✗ ", Style::default().fg(Color::Red)),
        None => Span::styled("· ", Style::default().fg(Color::DarkGray)),
    };

    let line = Line::from(vec![
        new_marker(is_new),
        status,
        Span::styled(truncate_hash(&tx.hash), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:>14}", format_time_ago(&tx.timestamp, now)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>16}", format_native_str(&tx.value, symbol)),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    ListItem::new(line).style(live_row_style(selected, is_new))
}

pub fn format_tx_list_item<'a>(
    index: usize,
    tx: &TxSummary,
    symbol: &str,
    selected: bool,
) -> ListItem<'a> {
    let from_display = format_addr_fixed_width(&tx.from);
    let to_display = match &tx.to {
        Some(to) => format_addr_fixed_width(to),
        None => format!("{:>19}", "[Contract Create]"),
    };

    // Method: prefer decoded signature, then transfer/deploy
    let action = match (&tx.to, &tx.function_signature) {
        (None, _) => "deploy".to_string(),
        (_, Some(sig)) => {
            let name = sig.split('(').next().unwrap_or(sig);
            if name.chars().count() > 10 {
                let cut: String = name.chars().take(9).collect();
                format!("{cut}…")
            } else {
                name.to_string()
            }
        }
        (_, None) => "transfer".to_string(),
    };

    let value_str = format_native_str(&tx.value, symbol);

    let line = Line::from(vec![
        Span::styled(
            format!("{index:>3} "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(from_display, Style::default().fg(Color::Cyan)),
        Span::styled(" → ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            to_display,
            if tx.to.is_none() {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::Cyan)
            },
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{action:>10}"), Style::default().fg(Color::Gray)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{value_str:>16}"),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let style = if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

pub fn format_tx_list_header<'a>() -> ListItem<'a> {
    let line = Line::from(vec![
        Span::styled("    ", Style::default()), // index space
        Span::styled(
            format!("{:^19}", "From"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("   ", Style::default()), // arrow space
        Span::styled(
            format!("{:^19}", "To"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>10}", "Method"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:>16}", "Value"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(line).style(Style::default())
}

pub fn format_kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn format_kv_link(key: &str, value: &str, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    };

    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), style),
    ])
}

pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let popup_layout = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(area);

    popup_layout[1]
}

pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Length(height),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical[1]);

    horizontal[1]
}

pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y + padding,
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    }
}
