// UI Constants
pub const USER_AVATAR: &str = "👤";
pub const BOT_AVATAR: &str = "🤖";

// API Constants
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shown as the bot's reply whenever the round trip fails.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting to the server.";

/// Canned replies offered below the transcript, in display order.
pub const QUICK_OPTIONS: [&str; 5] = [
    "Account issues",
    "Order status",
    "Product information",
    "Payment questions",
    "Talk to a human",
];
