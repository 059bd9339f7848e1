use colored::Colorize;
use craic::api::{CmdMessage, MessageLevel};
use craic::annotator::AnnotatorView;
use craic::config::CraicConfig;
use craic::index::{ListedDocument, ListedSet};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const ID_WIDTH: usize = 34;
const SELECTED_MARKER: &str = "▸";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_documents(documents: &[ListedDocument]) -> String {
    if documents.is_empty() {
        return "No documents uploaded.\n".to_string();
    }
    documents
        .iter()
        .map(|ld| render_row(ld.position, &ld.document.name, &ld.document.id, ld.selected))
        .collect()
}

pub(super) fn render_sets(sets: &[ListedSet]) -> String {
    if sets.is_empty() {
        return "No annotation sets.\n".to_string();
    }
    sets.iter()
        .map(|ls| render_row(ls.position, &ls.set.name, &ls.set.id, ls.selected))
        .collect()
}

fn render_row(position: usize, name: &str, id: &str, selected: bool) -> String {
    let marker = if selected {
        format!(" {} ", SELECTED_MARKER)
    } else {
        "   ".to_string()
    };
    let idx_str = format!("{}. ", position);

    let fixed_width = marker.width() + idx_str.width() + ID_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);
    let name_display = truncate_to_width(name, available);
    let padding = available.saturating_sub(name_display.width());

    let (marker, idx, name_display) = if selected {
        (
            marker.green(),
            idx_str.green(),
            name_display.bold().to_string(),
        )
    } else {
        (marker.normal(), idx_str.normal(), name_display)
    };

    format!(
        "{}{}{}{}  {}\n",
        marker,
        idx,
        name_display,
        " ".repeat(padding),
        id.dimmed()
    )
}

pub(super) fn render_view(view: &AnnotatorView) -> String {
    let mut output = view.render();
    if !output.ends_with('\n') {
        output.push('\n');
    }
    if view.document.is_none() {
        return output.dimmed().to_string();
    }
    output
}

pub(super) fn render_config(config: &CraicConfig) -> String {
    CraicConfig::KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
