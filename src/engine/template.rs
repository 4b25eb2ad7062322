//! Variable resolution for command templates.
//!
//! Command text may contain `{{ tag }}` placeholders resolved against two
//! namespaces:
//!
//! - `{{args.<key>}}` - value from the supplied arguments mapping; a missing
//!   key resolves to the empty string, never an error.
//! - `{{env.<key>}}` - current process environment variable, read live at
//!   resolution time; missing resolves to the empty string.
//!
//! Any other tag (unknown namespace, malformed) is left verbatim, delimiters
//! included, so unresolved placeholders stay visible in the output instead of
//! being silently dropped.
//!
//! Resolution degrades gracefully: an unterminated `{{` makes the whole
//! template unparseable, and `resolve` then returns the original text
//! unchanged rather than failing the command. This fallback is a deliberate,
//! tested contract.

use std::collections::BTreeMap;

/// A `{{` with no closing `}}` in the remainder of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UnclosedTag;

/// Resolve all placeholders in `template` against `args` and the live
/// process environment. Infallible: on a template parse failure the original
/// template is returned unchanged.
pub fn resolve(template: &str, args: &BTreeMap<String, String>) -> String {
    match try_resolve(template, args) {
        Ok(resolved) => resolved,
        Err(UnclosedTag) => template.to_string(),
    }
}

fn try_resolve(template: &str, args: &BTreeMap<String, String>) -> Result<String, UnclosedTag> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        // The tag ends at the next `}}`; tags do not nest.
        let Some(end) = after.find("}}") else {
            return Err(UnclosedTag);
        };
        let tag = &after[..end];

        match expand_tag(tag, args) {
            Some(value) => out.push_str(&value),
            // Unknown namespace: keep the placeholder verbatim.
            None => {
                out.push_str("{{");
                out.push_str(tag);
                out.push_str("}}");
            }
        }

        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Expand a single tag, or return None when the namespace is unrecognized.
fn expand_tag(tag: &str, args: &BTreeMap<String, String>) -> Option<String> {
    let trimmed = tag.trim();
    if let Some(key) = trimmed.strip_prefix("args.") {
        Some(args.get(key).cloned().unwrap_or_default())
    } else if let Some(key) = trimmed.strip_prefix("env.") {
        Some(std::env::var(key).unwrap_or_default())
    } else {
        None
    }
}
