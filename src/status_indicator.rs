use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spinner + status text shown between the transcript and the input.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    waiting: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            waiting: false,
            status_text: String::new(),
            spinner_idx: 0,
        }
    }

    pub fn set_waiting(&mut self, waiting: bool) {
        self.waiting = waiting;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let spinner = if self.waiting {
            spinner_frames[self.spinner_idx % spinner_frames.len()]
        } else {
            " "
        };

        let status_text = if !self.status_text.is_empty() {
            self.status_text.as_str()
        } else if self.waiting {
            "Waiting for reply..."
        } else {
            ""
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }
}
