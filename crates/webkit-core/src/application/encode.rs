//! Serialization formats shared by the engine and the tracker.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Tab-indented JSON followed by a single newline.
pub fn json_tabs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Block-style YAML, two-space indentation. Sequences under a mapping key
/// are indented one level below the key.
pub fn yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value).map(|out| indent_sequences(&out))
}

/// serde_yaml writes `key:\n- item`; shift each such sequence, and
/// everything nested in it, two spaces to the right.
fn indent_sequences(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    // Original indentation of every open sequence that needs shifting.
    let mut open: Vec<usize> = Vec::new();
    let mut prev_key_col: Option<usize> = None;

    for line in yaml.lines() {
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();
        let is_item = content == "-" || content.starts_with("- ");

        while let Some(&base) = open.last() {
            if indent > base || (indent == base && is_item) {
                break;
            }
            open.pop();
        }
        if is_item && prev_key_col == Some(indent) && open.last() != Some(&indent) {
            open.push(indent);
        }

        if !content.is_empty() {
            out.push_str(&" ".repeat(indent + 2 * open.len()));
        }
        out.push_str(content);
        out.push('\n');

        prev_key_col = content.ends_with(':').then(|| key_column(indent, content));
    }
    out
}

/// Column where the mapping key on a line starts, past any `- ` markers.
fn key_column(indent: usize, content: &str) -> usize {
    let mut col = indent;
    let mut rest = content;
    while let Some(stripped) = rest.strip_prefix("- ") {
        col += 2;
        rest = stripped;
    }
    col
}
