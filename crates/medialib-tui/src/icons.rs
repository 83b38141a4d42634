//! Nerd Font icon mapping for library items.

use medialib_core::{FileSystemItem, ItemKind};

/// Returns a Nerd Font icon for the given item, or a plain marker when
/// icons are disabled.
pub fn icon_for_item(item: &FileSystemItem, show_icons: bool) -> &'static str {
    if !show_icons {
        return match item.kind() {
            ItemKind::Folder => "/ ",
            ItemKind::Image => "* ",
            ItemKind::File => "  ",
        };
    }
    match item.kind() {
        ItemKind::Folder => "\u{f07b} ",
        ItemKind::Image => "\u{f1c5} ",
        ItemKind::File => icon_for_extension(&item.extension()),
    }
}

fn icon_for_extension(ext: &str) -> &'static str {
    match ext {
        "pdf" => "\u{f1c1} ",
        "doc" | "docx" | "odt" | "rtf" => "\u{f1c2} ",
        "xls" | "xlsx" | "ods" | "csv" => "\u{f1c3} ",
        "ppt" | "pptx" | "odp" | "key" => "\u{f1c4} ",
        "zip" | "tar" | "gz" | "7z" | "rar" => "\u{f1c6} ",
        "mp3" | "wav" | "flac" | "ogg" | "m4a" => "\u{f1c7} ",
        "mp4" | "mov" | "mkv" | "webm" | "avi" => "\u{f1c8} ",
        "md" | "txt" => "\u{f15c} ",
        "json" | "toml" | "yaml" | "yml" => "\u{e60b} ",
        _ => "\u{f15b} ",
    }
}
