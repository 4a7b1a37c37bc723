use ratatui::{
    style::Stylize,
    text::{Line, Span, Text},
};

/// One key binding of the page: the keys that trigger it and what it does.
#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub description: Option<String>,
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

/// Renders the usage info as one line per binding, every key in its own
/// bold `(key)` chip so arrow glyphs and single letters read the same way.
pub fn widget_usage_to_text<'a>(usage: UsageInfo) -> Text<'a> {
    let mut lines: Vec<Line> = Vec::with_capacity(usage.lines.len() + 1);

    if let Some(description) = usage.description {
        lines.push(Line::from(description));
    }

    for binding in usage.lines {
        let mut spans: Vec<Span> = Vec::with_capacity(binding.keys.len() + 1);

        for key in &binding.keys {
            spans.push(Span::from(format!("({})", key)).bold());
        }
        spans.push(Span::from(format!(" {}", binding.description)));

        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
