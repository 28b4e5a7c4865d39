//! Text layout for the top-level help and the filter listing.

use crate::filters::registry::FilterRegistry;

/// Re-wrap `doc` into lines that fit `width` once `prefix` is accounted for.
///
/// Words are packed greedily into lines of at most `width - prefix` chars.
/// The first line is returned bare; every following line starts with
/// `prefix`. A word longer than the budget gets a line of its own and is
/// never split.
pub fn format_doc(doc: &str, width: usize, prefix: &str) -> String {
    let columns = width.saturating_sub(prefix.chars().count());
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in doc.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= columns {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// Render the filter listing: a header, then one row per filter in
/// registry order.
pub fn filter_table(registry: &FilterRegistry, width: usize, prefix: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(" {:<9} | Description\n", "Filter"));
    out.push_str(&format!("-----------+{}\n", "-".repeat(width.saturating_sub(12))));

    for entry in registry.entries() {
        out.push_str(&format!(
            "{:<10} | {}\n",
            entry.metadata.key(),
            format_doc(&entry.metadata.doc, width, prefix)
        ));
    }
    out
}

/// Top-level usage text for `program`.
pub fn usage(program: &str) -> String {
    format!(
        "This program allows you to play with image filters. To get started, list
all the filters available with the following command:

  $ {program} list

To get specialized help on a particular filter and options just do:

  $ {program} crop --help

Usage:
  {program} <filter> [options] <arguments...>
  {program} list | -l
  {program} help | --help | -h | -?
"
    )
}
