use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

use crate::constants::{BOT_AVATAR, USER_AVATAR};

/// Which side of the conversation a bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Delivery state of a user bubble. Bot bubbles are always `Sent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Sending,
    Sent,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    content: String,
    sender: Sender,
    timestamp: DateTime<Local>,
    status: MessageStatus,
}

impl ChatMessage {
    pub fn new(content: String, sender: Sender) -> Self {
        Self {
            content,
            sender,
            timestamp: Local::now(),
            status: match sender {
                Sender::User => MessageStatus::Sending,
                Sender::Bot => MessageStatus::Sent,
            },
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
    }

    /// Renders the bubble as styled lines for the transcript panel.
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, area, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn base_style(&self) -> Style {
        let mut style = Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128),
            Sender::Bot => Color::Rgb(144, 238, 144),
        });

        match self.status {
            MessageStatus::Failed => style = style.fg(Color::Red).add_modifier(Modifier::DIM),
            MessageStatus::Sending => style = style.add_modifier(Modifier::DIM),
            MessageStatus::Sent => {}
        }

        style
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let avatar = match self.sender {
            Sender::User => USER_AVATAR,
            Sender::Bot => BOT_AVATAR,
        };
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let indent = self.indent();

        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(format!("{} ", avatar), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ".to_string(), style),
            Span::styled(self.status_icon().to_string(), style),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let indent = self.indent();
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);

        for wrapped_line in wrap(&self.content, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }

    fn status_icon(&self) -> &'static str {
        if self.sender == Sender::Bot {
            return "";
        }
        match self.status {
            MessageStatus::Sending => "○",
            MessageStatus::Sent => "●",
            MessageStatus::Failed => "✗",
        }
    }

    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }
}
