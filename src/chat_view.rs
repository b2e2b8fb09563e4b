use crate::api::send_chat;
use crate::app::{App, Focus};
use crate::chat_message::{MessageStatus, Sender};
use crate::constants::{FALLBACK_REPLY, QUICK_OPTIONS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let horizontal_chunks = if app.show_logs {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .margin(1)
            .split(size)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 1)])
            .margin(1)
            .split(size)
    };

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),    // transcript
                Constraint::Length(1), // status line
                Constraint::Length(3), // quick replies
                Constraint::Length(3), // input
                Constraint::Length(1), // footer
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);
    app.status_indicator.render(f, chat_vertical_chunks[1]);
    draw_options(f, app, chat_vertical_chunks[2]);
    draw_input(f, app, chat_vertical_chunks[3]);
    draw_footer(f, app, chat_vertical_chunks[4]);

    if app.show_logs {
        draw_logs(f, app, horizontal_chunks[1]);
    }
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in &app.messages {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    let scroll = app.clamp_scroll(max_scroll);

    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((scroll, 0)), area);
}

fn draw_options(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::QuickReplies;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Quick replies")
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut spans = Vec::new();
    for (idx, option) in QUICK_OPTIONS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if focused && idx == app.selected_option {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", option), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Scroll horizontally once the buffer outgrows the inner width.
    let visible_width = area.width.saturating_sub(2);
    let text_width = app.input.as_str().width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width.saturating_sub(1));

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Message")
                .border_style(border_style),
        );

    f.render_widget(input.scroll((0, scroll_offset)), area);

    if focused {
        let cursor_x = area.x + 1 + (text_width - scroll_offset);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let instructions = if app.in_flight {
        "Waiting for the server. PgUp/PgDn to scroll, Ctrl+L for diagnostics."
    } else {
        match app.focus {
            Focus::Input => {
                "Type your message and press Enter to send. Tab for quick replies, Esc to quit."
            }
            Focus::QuickReplies => {
                "Left/Right to choose a quick reply, Enter to send it. Tab to type instead."
            }
        }
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Diagnostics")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    // Newest entries stay visible.
    let total_lines = log_lines.len() as u16;
    let scroll = total_lines.saturating_sub(inner.height);

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para.scroll((scroll, 0)), inner);
}

/// Runs one chat turn: append the user bubble, POST the text, append the
/// reply or the fallback. Spawned as a task so the draw loop keeps running.
///
/// Failures never leave this function; they land in the transcript as the
/// fallback bubble plus a diagnostics entry.
pub async fn submit_message(app: Arc<Mutex<App>>, client: Client, text: String) {
    let text = text.trim().to_string();
    if text.is_empty() {
        return;
    }

    let (endpoint, seq) = {
        let mut guard = app.lock().await;
        if guard.in_flight {
            guard
                .logs
                .add("Submission dropped: a request is already in flight");
            return;
        }
        guard.in_flight = true;
        guard.request_seq += 1;
        guard.push_message(text.clone(), Sender::User);
        guard.status_indicator.set_waiting(true);
        let seq = guard.request_seq;
        guard.logs.add(format!("[#{}] Sending message", seq));
        (guard.endpoint.clone(), seq)
    };

    match send_chat(&client, &endpoint, &text).await {
        Ok(reply) => {
            let mut guard = app.lock().await;
            guard.logs.add(format!("[#{}] Reply received", seq));
            guard.mark_last_user_message(MessageStatus::Sent);
            guard.push_message(reply.content, Sender::Bot);
        }
        Err(e) => {
            log::error!("chat request #{} failed: {}", seq, e);
            let mut guard = app.lock().await;
            guard.logs.add(format!("[#{}] Error: {}", seq, e));
            guard.mark_last_user_message(MessageStatus::Failed);
            guard.push_message(FALLBACK_REPLY.to_string(), Sender::Bot);
        }
    }

    let mut guard = app.lock().await;
    guard.in_flight = false;
    guard.status_indicator.set_waiting(false);
    guard.status_indicator.clear_status();
}
