//! Typed `key=value` field parsing shared by the front ends
//!
//! Each recognized option name maps to a typed parser. Unknown keys are
//! rejected rather than ignored, and numeric values that fail to parse are
//! validation errors.

use std::sync::OnceLock;
use regex::Regex;
use crate::frame::NewFrame;
use crate::query::SearchCriteria;
use crate::{Error, Result};

/// How a field's raw text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
}

/// A parsed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl FieldKind {
    /// Parse raw input. Blank input means "not given" and yields `None`.
    pub fn parse(&self, field: &str, raw: &str) -> Result<Option<FieldValue>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let value = match self {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Integer => raw.parse::<i64>().map(FieldValue::Integer).map_err(|_| {
                Error::validation(format!("{} must be a whole number, got '{}'", field, raw))
            })?,
            FieldKind::Decimal => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => FieldValue::Decimal(v),
                _ => {
                    return Err(Error::validation(format!(
                        "{} must be a number, got '{}'",
                        field, raw
                    )));
                }
            },
        };
        Ok(Some(value))
    }
}

/// A recognized option: canonical name, accepted aliases and parser
#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub help: &'static str,
}

impl FieldDef {
    fn accepts(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }
}

/// Options accepted when describing a frame
pub const FRAME_FIELDS: &[FieldDef] = &[
    FieldDef { name: "model_code", aliases: &["model"], kind: FieldKind::Text, help: "Your internal or manufacturer code (required)" },
    FieldDef { name: "brand", aliases: &[], kind: FieldKind::Text, help: "Brand or label (can be empty)" },
    FieldDef { name: "material", aliases: &[], kind: FieldKind::Text, help: "Frame material (plastic, metal, titanium, ...)" },
    FieldDef { name: "lens_width", aliases: &["lens"], kind: FieldKind::Integer, help: "Lens width in mm" },
    FieldDef { name: "bridge_size", aliases: &["bridge"], kind: FieldKind::Integer, help: "Bridge size in mm" },
    FieldDef { name: "temple_length", aliases: &["temple"], kind: FieldKind::Integer, help: "Temple arm length in mm" },
    FieldDef { name: "color", aliases: &[], kind: FieldKind::Text, help: "Color or finish" },
    FieldDef { name: "shape", aliases: &[], kind: FieldKind::Text, help: "Frame shape (round, rectangular, cat-eye, ...)" },
    FieldDef { name: "gender", aliases: &[], kind: FieldKind::Text, help: "Intended audience (men, women, unisex, child)" },
    FieldDef { name: "price", aliases: &[], kind: FieldKind::Decimal, help: "Price" },
    FieldDef { name: "stock", aliases: &[], kind: FieldKind::Integer, help: "Quantity on hand (default 0)" },
    FieldDef { name: "notes", aliases: &[], kind: FieldKind::Text, help: "Free-form notes" },
];

/// Options accepted as search criteria
pub const SEARCH_FIELDS: &[FieldDef] = &[
    FieldDef { name: "brand", aliases: &[], kind: FieldKind::Text, help: "Brand contains" },
    FieldDef { name: "model_code", aliases: &["model"], kind: FieldKind::Text, help: "Model code contains" },
    FieldDef { name: "material", aliases: &[], kind: FieldKind::Text, help: "Material contains" },
    FieldDef { name: "color", aliases: &[], kind: FieldKind::Text, help: "Color contains" },
    FieldDef { name: "shape", aliases: &[], kind: FieldKind::Text, help: "Shape contains" },
    FieldDef { name: "gender", aliases: &[], kind: FieldKind::Text, help: "Gender contains" },
    FieldDef { name: "min_price", aliases: &[], kind: FieldKind::Decimal, help: "Minimum price (inclusive)" },
    FieldDef { name: "max_price", aliases: &[], kind: FieldKind::Decimal, help: "Maximum price (inclusive)" },
    FieldDef { name: "lens_width", aliases: &["lens"], kind: FieldKind::Integer, help: "Exact lens width in mm" },
];

/// Find the definition accepting `key` (case-insensitive)
pub fn lookup(defs: &'static [FieldDef], key: &str) -> Option<&'static FieldDef> {
    let key = key.to_lowercase();
    defs.iter().find(|d| d.accepts(&key))
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r#"(?:[^\s"']+|"[^"]*"|'[^']*')+"#).expect("token pattern is valid")
    })
}

/// Split `key=value key2="quoted value"` into lowercase keys and unquoted values.
pub fn parse_pairs(text: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut last = 0;
    for m in token_regex().find_iter(text) {
        if !text[last..m.start()].trim().is_empty() {
            return Err(Error::validation(format!("unbalanced quote near '{}'", &text[last..])));
        }
        last = m.end();

        let token = m.as_str();
        let Some((key, value)) = token.split_once('=') else {
            return Err(Error::validation(format!("expected key=value, got '{}'", token)));
        };
        if key.is_empty() {
            return Err(Error::validation(format!("missing field name in '{}'", token)));
        }
        pairs.push((unquote(key).to_lowercase(), unquote(value)));
    }
    if !text[last..].trim().is_empty() {
        return Err(Error::validation(format!("unbalanced quote near '{}'", &text[last..])));
    }
    Ok(pairs)
}

fn unquote(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut quote: Option<char> = None;
    for c in s.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            None if c == '"' || c == '\'' => quote = Some(c),
            _ => out.push(c),
        }
    }
    out
}

/// Parse `text` against `defs`, rejecting unknown and repeated fields.
pub fn resolve(defs: &'static [FieldDef], text: &str) -> Result<Vec<(&'static FieldDef, Option<FieldValue>)>> {
    let mut resolved: Vec<(&'static FieldDef, Option<FieldValue>)> = Vec::new();
    for (key, raw) in parse_pairs(text)? {
        let def = lookup(defs, &key).ok_or_else(|| {
            Error::validation(format!("unrecognized field '{}'", key))
        })?;
        if resolved.iter().any(|(d, _)| d.name == def.name) {
            return Err(Error::validation(format!("field '{}' given more than once", def.name)));
        }
        resolved.push((def, def.kind.parse(def.name, &raw)?));
    }
    Ok(resolved)
}

/// Lowercase and trim a material name
pub fn normalize_material(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Set one frame field. `None` clears an optional field.
pub fn apply_frame_field(frame: &mut NewFrame, name: &str, value: Option<FieldValue>) -> Result<()> {
    fn text(value: Option<FieldValue>) -> Option<String> {
        match value {
            Some(FieldValue::Text(s)) => Some(s),
            Some(FieldValue::Integer(n)) => Some(n.to_string()),
            Some(FieldValue::Decimal(v)) => Some(v.to_string()),
            None => None,
        }
    }
    fn integer(value: Option<FieldValue>) -> Option<i64> {
        match value {
            Some(FieldValue::Integer(n)) => Some(n),
            _ => None,
        }
    }

    match name {
        "model_code" => frame.model_code = text(value).unwrap_or_default(),
        "brand" => frame.brand = text(value),
        "material" => frame.material = text(value).map(|m| normalize_material(&m)),
        "lens_width" => frame.lens_width = integer(value),
        "bridge_size" => frame.bridge_size = integer(value),
        "temple_length" => frame.temple_length = integer(value),
        "color" => frame.color = text(value),
        "shape" => frame.shape = text(value),
        "gender" => frame.gender = text(value),
        "price" => {
            frame.price = match value {
                Some(FieldValue::Decimal(v)) => Some(v),
                Some(FieldValue::Integer(n)) => Some(n as f64),
                _ => None,
            }
        }
        "stock" => frame.stock = integer(value).unwrap_or(0),
        "notes" => frame.notes = text(value),
        other => return Err(Error::validation(format!("unrecognized field '{}'", other))),
    }
    Ok(())
}

/// Merge `key=value` pairs into an existing frame draft
pub fn update_frame(frame: &mut NewFrame, text: &str) -> Result<()> {
    for (def, value) in resolve(FRAME_FIELDS, text)? {
        apply_frame_field(frame, def.name, value)?;
    }
    Ok(())
}

/// Build a validated frame from `key=value` pairs. `model` is required.
pub fn frame_from_pairs(text: &str) -> Result<NewFrame> {
    let mut frame = NewFrame::default();
    update_frame(&mut frame, text)?;
    if frame.model_code.is_empty() {
        return Err(Error::validation("missing model (use model=<code>)"));
    }
    frame.validate()?;
    Ok(frame)
}

/// Set one search criterion
pub fn apply_search_field(criteria: &mut SearchCriteria, name: &str, value: Option<FieldValue>) -> Result<()> {
    let text = match &value {
        Some(FieldValue::Text(s)) => Some(s.clone()),
        _ => None,
    };
    let decimal = match value {
        Some(FieldValue::Decimal(v)) => Some(v),
        _ => None,
    };
    match name {
        "brand" => criteria.brand = text,
        "model_code" => criteria.model_code = text,
        "material" => criteria.material = text,
        "color" => criteria.color = text,
        "shape" => criteria.shape = text,
        "gender" => criteria.gender = text,
        "min_price" => criteria.min_price = decimal,
        "max_price" => criteria.max_price = decimal,
        "lens_width" => {
            criteria.lens_width = match value {
                Some(FieldValue::Integer(n)) => Some(n),
                _ => None,
            }
        }
        other => return Err(Error::validation(format!("unrecognized search field '{}'", other))),
    }
    Ok(())
}

/// Build search criteria from `key=value` pairs
pub fn criteria_from_pairs(text: &str) -> Result<SearchCriteria> {
    let mut criteria = SearchCriteria::default();
    for (def, value) in resolve(SEARCH_FIELDS, text)? {
        apply_search_field(&mut criteria, def.name, value)?;
    }
    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_with_quotes() {
        let pairs = parse_pairs(r#"Brand=Ray color="matte black" notes='spring hinge' lens=52"#).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("brand".to_string(), "Ray".to_string()),
                ("color".to_string(), "matte black".to_string()),
                ("notes".to_string(), "spring hinge".to_string()),
                ("lens".to_string(), "52".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_pairs_rejects_bare_words_and_open_quotes() {
        assert!(parse_pairs("brand=Ray oops").unwrap_err().is_validation());
        assert!(parse_pairs("=x").unwrap_err().is_validation());
        assert!(parse_pairs(r#"notes="never closed"#).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_pairs_empty_input() {
        assert!(parse_pairs("   ").unwrap().is_empty());
    }

    #[test]
    fn test_frame_from_pairs_with_aliases() {
        let frame = frame_from_pairs(
            "model=RB1234 brand=RayBan material=Plastic lens=52 bridge=18 temple=140 price=120 stock=5",
        )
        .unwrap();
        assert_eq!(frame.model_code, "RB1234");
        assert_eq!(frame.material.as_deref(), Some("plastic"));
        assert_eq!(frame.lens_width, Some(52));
        assert_eq!(frame.bridge_size, Some(18));
        assert_eq!(frame.temple_length, Some(140));
        assert_eq!(frame.price, Some(120.0));
        assert_eq!(frame.stock, 5);
    }

    #[test]
    fn test_frame_from_pairs_requires_model() {
        let err = frame_from_pairs("brand=RayBan").unwrap_err();
        assert!(err.to_string().contains("missing model"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = frame_from_pairs("model=A size=52").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn test_repeated_field_rejected() {
        assert!(frame_from_pairs("model=A lens=50 lens_width=52").unwrap_err().is_validation());
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let err = frame_from_pairs("model=A price=cheap").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: price must be a number, got 'cheap'");
        assert!(frame_from_pairs("model=A stock=2.5").unwrap_err().is_validation());
        assert!(frame_from_pairs("model=A price=NaN").unwrap_err().is_validation());
    }

    #[test]
    fn test_negative_value_rejected() {
        assert!(frame_from_pairs("model=A stock=-1").unwrap_err().is_validation());
    }

    #[test]
    fn test_criteria_from_pairs() {
        let criteria = criteria_from_pairs("brand=ray material=plastic min_price=50 max_price=150 lens=52").unwrap();
        assert_eq!(criteria.brand.as_deref(), Some("ray"));
        assert_eq!(criteria.material.as_deref(), Some("plastic"));
        assert_eq!(criteria.min_price, Some(50.0));
        assert_eq!(criteria.max_price, Some(150.0));
        assert_eq!(criteria.lens_width, Some(52));
    }

    #[test]
    fn test_criteria_rejects_frame_only_fields() {
        assert!(criteria_from_pairs("stock=3").unwrap_err().is_validation());
        assert!(criteria_from_pairs("max_price=abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_update_frame_merges() {
        let mut frame = NewFrame::builder("A").stock(2).build().unwrap();
        update_frame(&mut frame, "color=red notes=\"new lot\"").unwrap();
        assert_eq!(frame.model_code, "A");
        assert_eq!(frame.stock, 2);
        assert_eq!(frame.color.as_deref(), Some("red"));
        assert_eq!(frame.notes.as_deref(), Some("new lot"));
    }
}
