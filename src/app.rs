use crate::chat_message::{ChatMessage, MessageStatus, Sender};
use crate::constants::QUICK_OPTIONS;
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    QuitConfirm,
    Quit,
}

/// Which control owns the keyboard inside the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    QuickReplies,
}

pub struct App {
    pub screen: AppScreen,
    pub focus: Focus,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub selected_option: usize,
    pub chat_scroll: u16,
    pub follow_bottom: bool,
    pub in_flight: bool,
    pub request_seq: u64,
    pub endpoint: String,
    pub show_logs: bool,
    pub logs: LogView,
    pub status_indicator: StatusIndicator,
}

impl App {
    pub fn new(endpoint: String) -> App {
        App {
            screen: AppScreen::Chat,
            focus: Focus::Input,
            messages: Vec::new(),
            input: String::new(),
            selected_option: 0,
            chat_scroll: 0,
            follow_bottom: true,
            in_flight: false,
            request_seq: 0,
            endpoint,
            show_logs: false,
            logs: LogView::new(),
            status_indicator: StatusIndicator::new(),
        }
    }

    /// Appends a message and snaps the transcript back to the newest entry.
    pub fn push_message(&mut self, content: String, sender: Sender) {
        self.messages.push(ChatMessage::new(content, sender));
        self.follow_bottom = true;
    }

    /// Marks the user bubble a reply is pending for.
    pub fn mark_last_user_message(&mut self, status: MessageStatus) {
        if let Some(msg) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.sender() == Sender::User)
        {
            msg.set_status(status);
        }
    }

    /// Resolves the scroll offset against the rendered content height.
    /// Called once per frame with the overflow of the transcript panel.
    pub fn clamp_scroll(&mut self, max_scroll: u16) -> u16 {
        if self.follow_bottom || self.chat_scroll >= max_scroll {
            self.follow_bottom = true;
            self.chat_scroll = max_scroll;
        }
        self.chat_scroll
    }

    pub fn scroll_up(&mut self) {
        self.follow_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Takes the trimmed input, leaving the buffer empty.
    pub fn take_input(&mut self) -> String {
        let text = self.input.trim().to_string();
        self.input.clear();
        text
    }

    /// Copies the highlighted quick option into the input, then takes it,
    /// as if the user had typed the label and pressed Enter.
    pub fn pick_quick_option(&mut self) -> String {
        self.input = QUICK_OPTIONS[self.selected_option].to_string();
        self.focus = Focus::Input;
        self.take_input()
    }

    pub fn next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % QUICK_OPTIONS.len();
    }

    pub fn prev_option(&mut self) {
        self.selected_option =
            (self.selected_option + QUICK_OPTIONS.len() - 1) % QUICK_OPTIONS.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new("http://127.0.0.1:5000/api/chat".to_string())
    }

    #[test]
    fn take_input_trims_and_clears() {
        let mut app = app();
        app.input = "  hello  ".to_string();
        assert_eq!(app.take_input(), "hello");
        assert!(app.input.is_empty());
    }

    #[test]
    fn push_message_snaps_scroll_to_bottom() {
        let mut app = app();
        app.push_message("one".to_string(), Sender::User);
        assert_eq!(app.clamp_scroll(10), 10);

        app.scroll_up();
        assert_eq!(app.clamp_scroll(10), 9);
        assert!(!app.follow_bottom);

        app.push_message("two".to_string(), Sender::Bot);
        assert!(app.follow_bottom);
        assert_eq!(app.clamp_scroll(12), 12);
    }

    #[test]
    fn scrolling_past_the_end_reattaches() {
        let mut app = app();
        app.push_message("one".to_string(), Sender::User);
        app.clamp_scroll(10);

        app.scroll_up();
        app.scroll_up();
        assert_eq!(app.clamp_scroll(10), 8);

        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.clamp_scroll(10), 10);
        assert!(app.follow_bottom);
    }

    #[test]
    fn pick_quick_option_yields_the_literal_label() {
        let mut app = app();
        for (idx, label) in QUICK_OPTIONS.iter().enumerate() {
            app.focus = Focus::QuickReplies;
            app.selected_option = idx;
            assert_eq!(app.pick_quick_option(), *label);
            assert!(app.input.is_empty());
            assert_eq!(app.focus, Focus::Input);
        }
    }

    #[test]
    fn option_cycling_wraps_both_ways() {
        let mut app = app();
        app.prev_option();
        assert_eq!(app.selected_option, QUICK_OPTIONS.len() - 1);
        app.next_option();
        assert_eq!(app.selected_option, 0);
    }

    #[test]
    fn mark_last_user_message_skips_bot_bubbles() {
        let mut app = app();
        app.push_message("question".to_string(), Sender::User);
        app.push_message("answer".to_string(), Sender::Bot);
        app.mark_last_user_message(MessageStatus::Sent);

        assert_eq!(app.messages[0].status(), MessageStatus::Sent);
        assert_eq!(app.messages[1].status(), MessageStatus::Sent);

        app.push_message("followup".to_string(), Sender::User);
        app.mark_last_user_message(MessageStatus::Failed);

        assert_eq!(app.messages[0].status(), MessageStatus::Sent);
        assert_eq!(app.messages[2].status(), MessageStatus::Failed);
    }
}
