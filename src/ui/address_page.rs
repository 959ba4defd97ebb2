use super::helper::*;
use alloy::primitives::Address;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::api::{
    parse_quantity, AddressDetail, InternalTransaction, NftToken, NftTransfer, TokenTransfer,
};
use crate::app::{AddressResult, AddressTab, App};

const ADDRESS_HELP: &str = "←→ tabs • ↑↓ navigate • Enter select • b back • h home • Esc quit";

/// EIP-55 form of a lowercase address; anything unparseable is shown as is
fn checksummed(address: &str) -> String {
    address
        .parse::<Address>()
        .map(|a| a.to_checksum(None))
        .unwrap_or_else(|_| address.to_string())
}

pub fn draw_address_result(frame: &mut Frame, app: &App, result: &AddressResult) {
    let area = frame.area();
    let detail = &result.detail;
    let info = &detail.info;
    let symbol = app.config.native_symbol.as_str();

    let addr_type = match &detail.metadata {
        Some(meta) if meta.is_token == Some(true) => {
            meta.token_standard.as_deref().unwrap_or("Token")
        }
        _ if info.is_contract => "Contract",
        _ => "EOA",
    };

    let padded = padded_rect(area, 1);
    let row_count = result.tab.row_count(detail);
    let list_height = if row_count == 0 {
        3
    } else {
        (row_count as u16 + 2).min(padded.height / 2)
    };

    let chunks = Layout::vertical([
        Constraint::Min(10),             // Address info
        Constraint::Length(1),           // Activity tabs
        Constraint::Length(list_height), // Rows of the active tab
        Constraint::Length(1),           // Nav help
    ])
    .split(padded);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" 👤 {addr_type} "));

    let mut lines = vec![];

    // Metadata card
    if let Some(meta) = &detail.metadata {
        let mut title = vec![Span::styled(
            meta.name.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(symbol) = &meta.symbol {
            title.push(Span::styled(
                format!(" ({symbol})"),
                Style::default().fg(Color::Yellow),
            ));
        }
        if meta.verified() {
            title.push(Span::styled(" ✓ verified", Style::default().fg(Color::Green)));
        }
        lines.push(Line::from(title));

        if !meta.label.is_empty() {
            lines.push(format_kv("Label", &meta.label));
        }
        if let Some(category) = &meta.category {
            lines.push(format_kv("Category", category));
        }
        if let Some(project) = &meta.project_name {
            lines.push(format_kv("Project", project));
        }
        if !meta.tags.is_empty() {
            lines.push(format_kv("Tags", &meta.tags.join(", ")));
        }
        if let Some(description) = &meta.description {
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(Color::Gray),
            )));
        }
        if let Some(website) = &meta.website {
            lines.push(format_kv("Website", website));
        }
        lines.push(Line::from(""));
    }

    lines.push(format_kv("Address", &checksummed(&info.address)));
    lines.push(Line::from(""));
    lines.push(format_kv(
        &format!("{symbol} Balance"),
        &format_native_str(&info.balance, symbol),
    ));
    lines.push(format_kv("Transactions", &info.transaction_count.to_string()));

    if let Some(first) = &info.first_seen_block {
        lines.push(format_kv("First Seen", &format!("#{first}")));
    }
    if let Some(last) = &info.last_seen_block {
        lines.push(format_kv("Last Seen", &format!("#{last}")));
    }

    // Contract creator (link 0 when present)
    if let Some(creator) = &info.contract_creator {
        lines.push(Line::from(""));
        lines.push(format_kv_link(
            "Creator",
            &checksummed(creator),
            result.selected_link == 0,
        ));
        if let Some(tx) = &info.contract_creation_tx {
            lines.push(format_kv("Creation Tx", tx));
        }
    }

    if !detail.token_balances.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            "── Token Balances ──",
            Style::default().fg(Color::Yellow),
        )]));

        for balance in &detail.token_balances {
            let amount = parse_quantity(&balance.balance)
                .map(|raw| format_token_amount(raw, balance.token.decimals))
                .unwrap_or_else(|| balance.balance.clone());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {amount:>12} "),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    balance.token.symbol.clone(),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!(" ({})", balance.token.name),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, chunks[0]);

    let tabs = Tabs::new(AddressTab::ALL.iter().map(|tab| tab.title()))
        .select(result.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, chunks[1]);

    draw_activity(frame, app, result, chunks[2]);

    let help = Paragraph::new(ADDRESS_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Rows of the active tab. Each row is one link, after the creator link.
fn draw_activity(frame: &mut Frame, app: &App, result: &AddressResult, area: Rect) {
    let detail = &result.detail;
    let symbol = app.config.native_symbol.as_str();
    let row_count = result.tab.row_count(detail);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ({row_count}) ", result.tab.title()));

    if row_count == 0 {
        let empty_msg = Paragraph::new(empty_message(result.tab))
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_msg, area);
        return;
    }

    let first_row_link = usize::from(detail.info.contract_creator.is_some());
    let visible_count = area.height.saturating_sub(2) as usize;
    let selected_row = result.selected_link.checked_sub(first_row_link);
    let start = selected_row
        .map(|i| i.saturating_sub(visible_count.saturating_sub(1)))
        .unwrap_or(0);

    let items: Vec<ListItem> = (start..row_count.min(start + visible_count))
        .map(|i| {
            let selected = selected_row == Some(i);
            match result.tab {
                AddressTab::Transactions => {
                    format_tx_list_item(i, &detail.transactions[i], symbol, selected)
                }
                AddressTab::TokenTransfers => {
                    token_transfer_item(detail, &detail.token_transfers[i], app.now, selected)
                }
                AddressTab::InternalTransactions => {
                    internal_tx_item(&detail.internal_transactions[i], symbol, selected)
                }
                AddressTab::Nfts => nft_item(&detail.nfts[i], selected),
                AddressTab::NftTransfers => {
                    nft_transfer_item(detail, &detail.nft_transfers[i], app.now, selected)
                }
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn empty_message(tab: AddressTab) -> &'static str {
    match tab {
        AddressTab::Transactions => "No transactions found",
        AddressTab::TokenTransfers => "No token transfers found",
        AddressTab::InternalTransactions => "No internal transactions found",
        AddressTab::Nfts => "No NFTs found",
        AddressTab::NftTransfers => "No NFT transfers found",
    }
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn direction(detail: &AddressDetail, from: &str) -> Span<'static> {
    if from.eq_ignore_ascii_case(&detail.info.address) {
        Span::styled("OUT ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" IN ", Style::default().fg(Color::Green))
    }
}

fn token_transfer_item<'a>(
    detail: &AddressDetail,
    transfer: &TokenTransfer,
    now: u64,
    selected: bool,
) -> ListItem<'a> {
    let amount = parse_quantity(&transfer.value)
        .map(|raw| format_token_amount(raw, transfer.token.decimals))
        .unwrap_or_else(|| transfer.value.clone());

    let line = Line::from(vec![
        direction(detail, &transfer.from),
        Span::styled(
            truncate_hash(&transfer.transaction_hash),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "  {} → {}",
                format_addr_fixed_width(&transfer.from),
                format_addr_fixed_width(&transfer.to)
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("  {amount:>14} "), Style::default().fg(Color::White)),
        Span::styled(
            truncate_end(&transfer.token.symbol, 10),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  {}", format_time_ago(&transfer.timestamp, now)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(line).style(row_style(selected))
}

fn internal_tx_item<'a>(call: &InternalTransaction, symbol: &str, selected: bool) -> ListItem<'a> {
    let line = Line::from(vec![
        Span::styled(
            format!("{:<12}", truncate_end(&call.call_type, 12)),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!(
                "{} → {}",
                format_addr_fixed_width(&call.from),
                format_addr_fixed_width(&call.to)
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  {:>16}", format_native_str(&call.value, symbol)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("  gas {}", format_gas_str(&call.gas_used)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(line).style(row_style(selected))
}

fn nft_item<'a>(nft: &NftToken, selected: bool) -> ListItem<'a> {
    let (name, kind) = match &nft.collection {
        Some(collection) => (collection.display_name(), collection.token_type.as_str()),
        None => ("", ""),
    };
    let name = if name.is_empty() {
        truncate_hash(&nft.collection_address)
    } else {
        truncate_end(name, 24)
    };

    let mut spans = vec![
        Span::styled(format!("{name:<24}"), Style::default().fg(Color::Green)),
        Span::styled(
            format!("  #{}", truncate_end(&nft.token_id, 20)),
            Style::default().fg(Color::White),
        ),
    ];
    if let Some(amount) = nft.amount.as_deref().filter(|a| *a != "1") {
        spans.push(Span::styled(
            format!("  ×{amount}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if !kind.is_empty() {
        spans.push(Span::styled(
            format!("  {kind}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans)).style(row_style(selected))
}

fn nft_transfer_item<'a>(
    detail: &AddressDetail,
    transfer: &NftTransfer,
    now: u64,
    selected: bool,
) -> ListItem<'a> {
    let name = transfer
        .collection
        .as_ref()
        .map(|c| c.display_name())
        .filter(|n| !n.is_empty())
        .map(|n| truncate_end(n, 20))
        .unwrap_or_else(|| truncate_hash(&transfer.collection_address));

    let line = Line::from(vec![
        direction(detail, &transfer.from),
        Span::styled(
            truncate_hash(&transfer.transaction_hash),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("  {name}"), Style::default().fg(Color::Green)),
        Span::styled(
            format!(" #{}", truncate_end(&transfer.token_id, 20)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "  {} → {}",
                format_addr_fixed_width(&transfer.from),
                format_addr_fixed_width(&transfer.to)
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  {}", format_time_ago(&transfer.timestamp, now)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(line).style(row_style(selected))
}
