// ui/constants.rs

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

pub const CARD_WIDTH: u16 = 36;
pub const CARD_HEIGHT: u16 = 7;
pub const MAX_CARD_COLUMNS: u16 = 3;

pub const DASHBOARD_KEYS: &str =
    "↑↓/jk select · a/Enter give XP · Tab admin · r reload · t token · q quit";
pub const AWARD_KEYS: &str = "Type an amount · Enter give · Esc cancel";
pub const ADMIN_KEYS: &str =
    "↑↓/jk select · n recruit · d banish · Tab dashboard · r reload · t token · q quit";
pub const FORM_KEYS: &str = "Tab switch field · Enter recruit · Esc cancel";
pub const TOKEN_KEYS: &str =
    "Enter save · Ctrl+v paste · type 'reset' to forget the stored token · Esc refuse";

pub const BANISH_PROMPT: &str = "Are you sure you want to banish this soul? (y/n)";
