//! Stored encoding for rich-text fields.
//!
//! Values are persisted as a raw-content JSON object:
//!
//! ```text
//! {"blocks":[{"key":"a1b2c","text":"Led the platform team","type":"unstyled","depth":0,
//!             "inlineStyleRanges":[{"offset":4,"length":3,"style":"BOLD"}],
//!             "entityRanges":[],"data":{}}],
//!  "entityMap":{}}
//! ```
//!
//! Offsets and lengths count UTF-16 code units, matching the browser editor that
//! writes these values. Decoding never fails: anything that does not parse as raw
//! content is legacy plain text and becomes a single unstyled paragraph.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::richtext::model::{Block, BlockKind, InlineStyle, RichTextDocument, Run};

#[derive(Debug, Deserialize)]
struct RawContent {
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(rename = "type", default)]
    block_type: Option<String>,
    #[serde(default)]
    inline_style_ranges: Vec<RawStyleRange>,
}

#[derive(Debug, Deserialize)]
struct RawStyleRange {
    offset: usize,
    length: usize,
    style: String,
}

/// Decodes a stored rich-text value.
///
/// - `None` or `""` → a single empty paragraph
/// - raw content → the parsed, normalized document
/// - anything else → the input verbatim as one unstyled paragraph
pub fn decode(serialized: Option<&str>) -> RichTextDocument {
    let raw = match serialized {
        None | Some("") => return RichTextDocument::empty(),
        Some(raw) => raw,
    };

    match serde_json::from_str::<RawContent>(raw) {
        Ok(content) => RichTextDocument {
            blocks: content.blocks.into_iter().map(block_from_raw).collect(),
        }
        .normalized(),
        Err(e) => {
            debug!("Rich-text value is not raw content ({e}); treating as plain text");
            RichTextDocument::from_plain_text(raw)
        }
    }
}

/// Encodes a document into its stored form. `decode(Some(&encode(d)))` equals `d`
/// for any normalized `d`.
pub fn encode(doc: &RichTextDocument) -> String {
    let blocks: Vec<Value> = doc.blocks.iter().map(block_to_raw).collect();
    json!({
        "blocks": blocks,
        "entityMap": {},
    })
    .to_string()
}

fn block_from_raw(raw: RawBlock) -> Block {
    let ranges: Vec<(usize, usize, InlineStyle)> = raw
        .inline_style_ranges
        .iter()
        .filter_map(|r| {
            InlineStyle::from_name(&r.style)
                .map(|style| (r.offset, r.offset.saturating_add(r.length), style))
        })
        .collect();

    let mut runs: Vec<Run> = Vec::new();
    let mut pos = 0usize;
    for ch in raw.text.chars() {
        let styles: BTreeSet<InlineStyle> = ranges
            .iter()
            .filter(|(start, end, _)| *start <= pos && pos < *end)
            .map(|(_, _, style)| *style)
            .collect();
        match runs.last_mut() {
            Some(last) if last.styles == styles => last.text.push(ch),
            _ => runs.push(Run {
                text: ch.to_string(),
                styles,
            }),
        }
        pos += ch.len_utf16();
    }

    Block {
        key: raw.key,
        kind: raw
            .block_type
            .as_deref()
            .map(BlockKind::from_stored_type)
            .unwrap_or_default(),
        runs,
    }
}

fn block_to_raw(block: &Block) -> Value {
    let mut style_ranges = Vec::new();
    for style in InlineStyle::ALL {
        let mut pos = 0usize;
        let mut open: Option<usize> = None;
        for run in &block.runs {
            if run.styles.contains(&style) {
                open.get_or_insert(pos);
            } else if let Some(start) = open.take() {
                style_ranges.push(style_range(start, pos, style));
            }
            pos += run.text.encode_utf16().count();
        }
        if let Some(start) = open {
            style_ranges.push(style_range(start, pos, style));
        }
    }

    let mut raw = json!({
        "text": block.text(),
        "type": block.kind.stored_type(),
        "depth": 0,
        "inlineStyleRanges": style_ranges,
        "entityRanges": [],
        "data": {},
    });
    if let (Some(key), Some(obj)) = (&block.key, raw.as_object_mut()) {
        obj.insert("key".to_string(), Value::String(key.clone()));
    }
    raw
}

fn style_range(start: usize, end: usize, style: InlineStyle) -> Value {
    json!({
        "offset": start,
        "length": end - start,
        "style": style.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r#"{"blocks":[
        {"key":"8k2f1","text":"Led platform team","type":"unstyled","depth":0,
         "inlineStyleRanges":[{"offset":4,"length":8,"style":"BOLD"},
                              {"offset":4,"length":13,"style":"ITALIC"}],
         "entityRanges":[],"data":{}},
        {"key":"9abc0","text":"Rust","type":"unordered-list-item","depth":0,
         "inlineStyleRanges":[],"entityRanges":[],"data":{}}
    ],"entityMap":{}}"#;

    #[test]
    fn test_decode_empty_is_single_empty_paragraph() {
        assert_eq!(decode(None), RichTextDocument::empty());
        assert_eq!(decode(Some("")), RichTextDocument::empty());
    }

    #[test]
    fn test_decode_plain_text_fallback_is_verbatim() {
        let input = "not valid structured json";
        let doc = decode(Some(input));
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks[0].runs, vec![Run::plain(input)]);
    }

    #[test]
    fn test_decode_json_without_blocks_is_plain_text() {
        let doc = decode(Some(r#"{"title":"Engineer"}"#));
        assert_eq!(doc.to_plain_text(), r#"{"title":"Engineer"}"#);

        let doc = decode(Some("42"));
        assert_eq!(doc.to_plain_text(), "42");
    }

    #[test]
    fn test_decode_stored_content_builds_runs() {
        let doc = decode(Some(STORED));
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].key.as_deref(), Some("8k2f1"));
        assert_eq!(
            doc.blocks[0].runs,
            vec![
                Run::plain("Led "),
                Run::styled("platform", [InlineStyle::Bold, InlineStyle::Italic]),
                Run::styled(" team", [InlineStyle::Italic]),
            ]
        );
        assert_eq!(doc.blocks[1].kind, BlockKind::UnorderedListItem);
        assert_eq!(doc.blocks[1].runs, vec![Run::plain("Rust")]);
    }

    #[test]
    fn test_round_trip_decoded_documents() {
        for input in [
            None,
            Some("legacy summary text"),
            Some(STORED),
            Some(r#"{"blocks":[]}"#),
        ] {
            let doc = decode(input);
            assert_eq!(decode(Some(encode(&doc).as_str())), doc, "round trip of {input:?}");
        }
    }

    #[test]
    fn test_unknown_styles_and_types_degrade() {
        let stored = r#"{"blocks":[{"text":"code","type":"code-block",
            "inlineStyleRanges":[{"offset":0,"length":4,"style":"CODE"}]}],"entityMap":{}}"#;
        let doc = decode(Some(stored));
        assert_eq!(doc.blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks[0].runs, vec![Run::plain("code")]);
        assert_eq!(doc.blocks[0].key, None);
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        // "🚀" is two UTF-16 code units.
        let doc = RichTextDocument {
            blocks: vec![Block::new(
                BlockKind::Paragraph,
                vec![Run::plain("🚀 "), Run::styled("shipped", [InlineStyle::Bold])],
            )],
        };
        let encoded: Value = serde_json::from_str(&encode(&doc)).unwrap();
        let range = &encoded["blocks"][0]["inlineStyleRanges"][0];
        assert_eq!(range["offset"], 3);
        assert_eq!(range["length"], 7);
        assert_eq!(decode(Some(encode(&doc).as_str())), doc);
    }

    #[test]
    fn test_encode_omits_missing_keys() {
        let encoded: Value =
            serde_json::from_str(&encode(&RichTextDocument::from_plain_text("x"))).unwrap();
        assert!(encoded["blocks"][0].get("key").is_none());
        assert_eq!(encoded["blocks"][0]["type"], "unstyled");
        assert_eq!(encoded["entityMap"], json!({}));
    }
}
