use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen",
    // Path keywords cannot be raw identifiers; field names turn them into `self_`, `crate_` and `super_`.
    "self", "Self",
  ]
  .into_iter()
  .collect()
});

static RESERVED_PASCAL_CASE: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  ["Clone", "Copy", "Default", "Display", "Self", "Send", "Sync", "Vec", "Option", "Result", "Box", "String"]
    .into_iter()
    .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores, collapses consecutive
/// underscores and trims leading or trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Splits a `PascalCase` name into words, keeping acronyms together (`APIService` -> `API`, `Service`).
pub(crate) fn split_pascal_case(name: &str) -> Vec<String> {
  if name.is_empty() {
    return vec![];
  }

  let mut words = vec![];
  let mut current_word = String::new();
  let chars: Vec<char> = name.chars().collect();

  for (i, &ch) in chars.iter().enumerate() {
    if ch.is_uppercase() && !current_word.is_empty() {
      let prev_is_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
      let next_is_lower = i + 1 < chars.len() && chars[i + 1].is_lowercase();

      if prev_is_lower || next_is_lower {
        words.push(std::mem::take(&mut current_word));
      }
    }
    current_word.push(ch);
  }

  if !current_word.is_empty() {
    words.push(current_word);
  }

  words
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}_{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// Converts a JSON property or parameter name into a valid Rust field name (`snake_case`).
///
/// # Rules:
/// 1. A leading `$` becomes `_`, so `$ref` is `_ref` and `$schema` is `_schema`.
/// 2. Sanitizes the rest, so `x-kubernetes-embedded-resource` loses its punctuation.
/// 3. Converts to `snake_case`.
/// 4. If the result is `self`, `crate` or `super`, it gets a trailing `_`.
/// 5. If the result is a keyword, it gets a raw identifier prefix (`r#`).
/// 6. If the result starts with a digit, it's prefixed with `_`.
/// 7. If the result is empty, it becomes `_`.
pub(crate) fn to_rust_field_name(name: &str) -> String {
  if let Some(rest) = name.strip_prefix('$') {
    let ident = sanitize(rest).to_snake_case();
    if !ident.is_empty() {
      return format!("_{ident}");
    }
  }

  let mut ident = sanitize(name).to_snake_case();

  if ident.is_empty() {
    return "_".to_string();
  }

  if matches!(ident.as_str(), "self" | "crate" | "super") {
    return format!("{ident}_");
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("r#{ident}");
  }

  prefix_if_digit_start(&mut ident, '_');
  ident
}

/// Converts a Kubernetes type name into a valid Rust type name (`PascalCase`).
///
/// Names that already mix upper and lower case without separators keep their capitalization,
/// so `APIService` and `CSIDriver` survive unchanged.
pub(crate) fn to_rust_type_name(name: &str) -> String {
  let has_separators = name.contains(['-', '_', '.', ' ', '$']);
  let has_upper = name.chars().any(|c| c.is_ascii_uppercase());
  let has_lower = name.chars().any(|c| c.is_ascii_lowercase());

  let mut ident = if !has_separators && has_upper && has_lower {
    let cleaned: String = any_ascii(name).chars().filter(char::is_ascii_alphanumeric).collect();
    capitalize(&cleaned)
  } else {
    sanitize(name).to_pascal_case()
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if RESERVED_PASCAL_CASE.contains(ident.as_str()) {
    ident.push('_');
    return ident;
  }

  prefix_if_digit_start(&mut ident, 'T');
  ident
}

/// Converts a package segment (`v1beta1`, `rbacAuthorization`, `core`) into a module name.
pub(crate) fn to_module_name(segment: &str) -> String {
  to_rust_field_name(segment)
}

/// The file module that holds a single type: `APIService` -> `api_service`.
pub(crate) fn to_type_module_name(type_name: &str) -> String {
  let joined = split_pascal_case(&sanitize(type_name))
    .iter()
    .map(|word| word.to_lowercase())
    .collect::<Vec<_>>()
    .join("_");
  to_module_name(&joined)
}

/// Builds the client method name for an action and an optional subresource:
/// `get` + `status` -> `get_status`, `deleteCollection` -> `delete_collection`.
pub(crate) fn to_method_name(action: &str, subresource: Option<&str>) -> String {
  match subresource {
    Some(subresource) => to_rust_field_name(&format!("{action}{}", capitalize(subresource))),
    None => to_rust_field_name(action),
  }
}

/// Uppercases the first character, leaving the rest untouched.
pub(crate) fn capitalize(input: &str) -> String {
  let mut chars = input.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

fn prefix_if_digit_start(ident: &mut String, prefix: char) {
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, prefix);
  }
}
