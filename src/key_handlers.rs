use crate::app::{App, AppScreen, Focus};
use crate::chat_view::submit_message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_chat_input(key: KeyEvent, app: &Arc<Mutex<App>>, client: &Client) {
    // Collected outside the lock so the spawned task can own it.
    let mut pending: Option<String> = None;

    {
        let mut guard = app.lock().await;
        match key.code {
            KeyCode::Enter => {
                // Leave the buffer untouched while a request is pending;
                // submit_message holds the authoritative guard.
                if guard.in_flight {
                    guard
                        .status_indicator
                        .set_status("Still waiting on the previous reply");
                } else {
                    let text = match guard.focus {
                        Focus::Input => guard.take_input(),
                        Focus::QuickReplies => guard.pick_quick_option(),
                    };
                    if !text.is_empty() {
                        pending = Some(text);
                    }
                }
            }
            KeyCode::Tab => {
                guard.focus = match guard.focus {
                    Focus::Input => Focus::QuickReplies,
                    Focus::QuickReplies => Focus::Input,
                };
            }
            KeyCode::Left if guard.focus == Focus::QuickReplies => guard.prev_option(),
            KeyCode::Right if guard.focus == Focus::QuickReplies => guard.next_option(),
            KeyCode::Esc => guard.screen = AppScreen::QuitConfirm,
            KeyCode::PageUp => guard.scroll_up(),
            KeyCode::PageDown => guard.scroll_down(),
            KeyCode::Backspace => {
                guard.input.pop();
            }
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match c {
                        'c' => guard.screen = AppScreen::QuitConfirm,
                        'l' => guard.show_logs = !guard.show_logs,
                        'u' => guard.scroll_up(),
                        'd' => guard.scroll_down(),
                        _ => {}
                    }
                } else {
                    // Typing always lands in the input box.
                    guard.focus = Focus::Input;
                    guard.input.push(c);
                }
            }
            _ => {}
        }
    }

    if let Some(text) = pending {
        let clone = Arc::clone(app);
        let client = client.clone();
        tokio::spawn(async move {
            submit_message(clone, client, text).await;
        });
    }
}

pub async fn handle_quit_confirm_input(key: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            guard.screen = AppScreen::Quit;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            guard.screen = AppScreen::Chat;
        }
        _ => {}
    }
}
