//! Block-style YAML for `conf.yaml`.
//!
//! The document shape is fixed, so the layout is written here and only
//! scalars go through `serde_yaml`. `serde_yaml` quotes for YAML 1.2, but
//! the agent reads the file with YAML 1.1 rules, so strings that 1.1 would
//! resolve to a bool, number, null or timestamp are single-quoted first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::coerce::Value;
use crate::document::ConfigDocument;
use crate::error::Result;

const INDENT: &str = "  ";

static YAML11_BOOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:y|n|yes|no|true|false|on|off)$").unwrap());

static YAML11_NULL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:~|null|Null|NULL|)$").unwrap());

static YAML11_INT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[-+]?0b[0-1_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
    )
    .unwrap()
});

static YAML11_FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[-+]?[0-9][0-9_]*\.[0-9_]*(?:[eE][-+]?[0-9]+)?|[-+]?\.[0-9_]+(?:[eE][-+]?[0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .unwrap()
});

static YAML11_TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)$",
    )
    .unwrap()
});

/// Render the document as block-style YAML, keys in insertion order.
pub fn render(document: &ConfigDocument) -> Result<String> {
    let mut out = String::new();

    if document.init_config().is_empty() {
        out.push_str("init_config: {}\n");
    } else {
        out.push_str("init_config:\n");
        let fields = document.init_config().iter().map(|(k, v)| (k.as_str(), v));
        write_fields(&mut out, fields, INDENT, INDENT)?;
    }

    if document.instances().is_empty() {
        out.push_str("instances: []\n");
        return Ok(out);
    }
    out.push_str("instances:\n");
    for instance in document.instances() {
        if instance.is_empty() {
            out.push_str("- {}\n");
        } else {
            write_fields(&mut out, instance.iter(), "- ", INDENT)?;
        }
    }

    Ok(out)
}

/// Write mapping entries. `first` prefixes the first key, `rest` the others
/// and any nested list items.
fn write_fields<'a>(
    out: &mut String,
    fields: impl Iterator<Item = (&'a str, &'a Value)>,
    first: &str,
    rest: &str,
) -> Result<()> {
    for (i, (key, value)) in fields.enumerate() {
        out.push_str(if i == 0 { first } else { rest });
        out.push_str(&string(key)?);
        out.push(':');
        match value {
            Value::List(items) if items.is_empty() => out.push_str(" []\n"),
            Value::List(items) => {
                out.push('\n');
                for item in items {
                    out.push_str(rest);
                    out.push_str("- ");
                    out.push_str(&string(item)?);
                    out.push('\n');
                }
            }
            Value::Str(s) => {
                out.push(' ');
                out.push_str(&string(s)?);
                out.push('\n');
            }
            other => {
                out.push(' ');
                out.push_str(serde_yaml::to_string(other)?.trim_end());
                out.push('\n');
            }
        }
    }
    Ok(())
}

/// Render a string scalar on one line, quoted whenever a YAML 1.1 or 1.2
/// reader would not read it back as the same string.
fn string(s: &str) -> Result<String> {
    if is_yaml11_implicit(s) {
        return Ok(format!("'{}'", s.replace('\'', "''")));
    }
    let rendered = serde_yaml::to_string(s)?;
    let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
    if rendered.contains('\n') {
        // JSON strings are valid double-quoted YAML scalars.
        return Ok(serde_json::to_string(s)?);
    }
    Ok(rendered.to_string())
}

/// True when a YAML 1.1 reader resolves the plain scalar `s` to a non-string.
fn is_yaml11_implicit(s: &str) -> bool {
    s == "="
        || s == "<<"
        || YAML11_BOOL_RE.is_match(s)
        || YAML11_NULL_RE.is_match(s)
        || YAML11_INT_RE.is_match(s)
        || YAML11_FLOAT_RE.is_match(s)
        || YAML11_TIMESTAMP_RE.is_match(s)
}
