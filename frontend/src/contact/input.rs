/// Formats a Turkish phone number as `+90 5xx xxx xx xx` while typing.
/// Already formatted input comes back unchanged.
pub fn format_phone(raw: &str) -> String {
    let mut value: String = raw.chars().filter(char::is_ascii_digit).collect();

    if let Some(rest) = value.strip_prefix("90") {
        value = rest.to_string();
    }
    if let Some(rest) = value.strip_prefix('0') {
        value = rest.to_string();
    }

    if value.len() >= 3 {
        value.insert(3, ' ');
    }
    if value.len() >= 7 {
        value.insert(7, ' ');
    }
    if value.len() >= 10 {
        let tail = value[10..value.len().min(12)].to_string();
        value.truncate(10);
        value.push(' ');
        value.push_str(&tail);
    }

    if value.is_empty() {
        value
    } else {
        format!("+90 {}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Danger,
}

/// `current / max` counter under the message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCounter {
    pub current: usize,
    pub max: usize,
}

impl CharacterCounter {
    pub fn new(text: &str, max: usize) -> Self {
        Self { current: text.chars().count(), max }
    }

    pub fn level(&self) -> CounterLevel {
        if self.current * 100 > self.max * 95 {
            CounterLevel::Danger
        } else if self.current * 100 > self.max * 80 {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }

    pub fn class(&self) -> &'static str {
        match self.level() {
            CounterLevel::Normal => "character-counter",
            CounterLevel::Warning => "character-counter warning",
            CounterLevel::Danger => "character-counter warning danger",
        }
    }
}
