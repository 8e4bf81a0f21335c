// src/ui/print.rs
use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use crate::filesystem::{Entry, EntryKind, Listing};

fn colored_name(entry: &Entry) -> ColoredString {
    let name = entry.name.as_str();
    match entry.kind {
        EntryKind::Directory => name.blue().bold(),
        EntryKind::Executable => name.green(),
        EntryKind::Image => name.magenta(),
        EntryKind::Video => name.yellow(),
        EntryKind::Code => name.cyan(),
        EntryKind::Other => name.normal(),
    }
}

/// One line per entry: permissions, size, name.
pub fn print_listing<W: Write>(listing: &Listing, out: &mut W) -> io::Result<()> {
    for entry in listing.entries() {
        writeln!(out, "{}  {:>10}  {}", entry.permissions, entry.size_display, colored_name(entry))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::classify;

    #[test]
    fn test_print_listing() {
        let mut listing = Listing::new("/srv");
        listing.insert(classify("notes.txt", false, 0o644, 2048));
        listing.insert(classify("data", true, 0o755, 4096));

        let mut out = Vec::new();
        print_listing(&listing, &mut out).expect("print");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("drwxr-xr-x       4 KiB  "));
        assert!(lines[0].contains("data"));
        assert!(lines[1].starts_with("-rw-r--r--       2 KiB  "));
        assert!(lines[1].contains("notes.txt"));
    }
}
