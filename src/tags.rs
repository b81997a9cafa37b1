//! Struct tag decoding: `` `json:"id,omitempty" xml:"id"` ``.
//!
//! A tag is a list of `key:"value"` pairs where the value is an interpreted
//! string literal and splits on `,` into a name followed by options. Pairs are
//! normally space-separated, but pairs written back to back
//! (`json:"a"xml:"b"`) are accepted too.

use thiserror::Error;

use crate::lit;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("tag literal is not a valid string")]
    BadLiteral,
    #[error("bad syntax for struct tag key at byte {0}")]
    KeySyntax(usize),
    #[error("bad syntax for struct tag value of `{0}`")]
    ValueSyntax(String),
}

/// One `key:"name,opt1,opt2"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

/// Decoded entries in source order. Duplicated keys are kept; [`get`](Self::get)
/// returns the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    pub tags: Vec<Tag>,
}

impl StructTag {
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Decodes a tag literal as written in source, backquotes or double quotes
/// included.
pub fn parse_literal(raw: &str) -> Result<StructTag, TagError> {
    let text = lit::unquote(raw).ok_or(TagError::BadLiteral)?;
    parse(&text)
}

/// Decodes the text of a tag (literal quotes already removed).
pub fn parse(text: &str) -> Result<StructTag, TagError> {
    let bytes = text.as_bytes();
    let mut tags = Vec::new();
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let key_start = i;
        while i < bytes.len() && is_key_byte(bytes[i]) {
            i += 1;
        }
        if i == key_start || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            return Err(TagError::KeySyntax(key_start));
        }
        let key = &text[key_start..i];

        // Opening quote; scan to the closing one, skipping escapes.
        i += 1;
        let value_start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            return Err(TagError::ValueSyntax(key.to_string()));
        }
        i += 1;

        let value = lit::unquote(&text[value_start..i])
            .ok_or_else(|| TagError::ValueSyntax(key.to_string()))?;
        let mut parts = value.split(',').map(str::to_string);
        let name = parts.next().unwrap_or_default();
        tags.push(Tag {
            key: key.to_string(),
            name,
            options: parts.collect(),
        });
    }
    Ok(StructTag { tags })
}

#[inline]
fn is_key_byte(b: u8) -> bool {
    b > b' ' && b != b':' && b != b'"' && b != 0x7F
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_name_and_options() {
        let tag = parse(r#"json:"id,omitempty,string" xml:"id""#).unwrap();
        assert_eq!(tag.len(), 2);
        let json = tag.get("json").unwrap();
        assert_eq!(json.name, "id");
        assert_eq!(json.options, vec!["omitempty", "string"]);
        assert!(tag.get("xml").unwrap().options.is_empty());
    }

    #[test]
    fn decodes_from_literal() {
        let tag = parse_literal(r#"`gorm:"type:varchar(100)" json:"-"`"#).unwrap();
        assert_eq!(tag.get("gorm").unwrap().name, "type:varchar(100)");
        assert_eq!(tag.get("json").unwrap().name, "-");

        let tag = parse_literal(r#""json:\"name\"""#).unwrap();
        assert_eq!(tag.get("json").unwrap().name, "name");
    }

    #[test]
    fn empty_and_blank_tags() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
        let tag = parse(r#"json:"""#).unwrap();
        assert_eq!(tag.get("json").unwrap().name, "");
    }

    #[test]
    fn escaped_quote_inside_value() {
        let tag = parse(r#"doc:"say \"hi\"""#).unwrap();
        assert_eq!(tag.get("doc").unwrap().name, "say \"hi\"");
    }

    #[test]
    fn first_duplicate_wins() {
        let tag = parse(r#"json:"a" json:"b""#).unwrap();
        assert_eq!(tag.len(), 2);
        assert_eq!(tag.get("json").unwrap().name, "a");
    }

    #[test]
    fn malformed_tags() {
        assert_eq!(parse("json"), Err(TagError::KeySyntax(0)));
        assert_eq!(parse(r#":"x""#), Err(TagError::KeySyntax(0)));
        assert_eq!(parse(r#"json:x"#), Err(TagError::KeySyntax(0)));
        assert_eq!(
            parse(r#"json:"open"#),
            Err(TagError::ValueSyntax("json".into()))
        );
        assert_eq!(parse_literal("`unterminated"), Err(TagError::BadLiteral));
        assert_eq!(parse_literal("é"), Err(TagError::BadLiteral));
        assert_eq!(parse_literal("`json:\"a\"`é"), Err(TagError::BadLiteral));
    }

    #[test]
    fn unspaced_pairs() {
        let tag = parse(r#"json:"i,j"xml:"i,k""#).unwrap();
        assert_eq!(tag.len(), 2);
        assert_eq!(tag.get("xml").unwrap().options, ["k"]);
    }
}
