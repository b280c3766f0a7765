use super::ProductInfo;

/// Decode a model reply into a `ProductInfo`, trying progressively more
/// tolerant readings in a fixed order:
///
/// 1. the trimmed reply as strict JSON;
/// 2. the outermost `{…}` span, with code fences and surrounding prose
///    discarded, as strict JSON;
/// 3. that same span with single-quoted keys and values rewritten to
///    double quotes (models sometimes emit Python-repr style objects).
///
/// Returns `None` when every attempt fails. Never panics.
pub fn parse_product_info(content: &str) -> Option<ProductInfo> {
    let trimmed = content.trim();

    if let Ok(info) = serde_json::from_str::<ProductInfo>(trimmed) {
        return Some(info);
    }

    let span = match object_span(trimmed) {
        Some(span) => span,
        None => {
            log::warn!("No JSON object found in model reply");
            return None;
        }
    };

    if let Ok(info) = serde_json::from_str::<ProductInfo>(span) {
        log::debug!("Model reply parsed after trimming to the embedded object");
        return Some(info);
    }

    match serde_json::from_str::<ProductInfo>(&normalize_quotes(span)) {
        Ok(info) => {
            log::debug!("Model reply parsed by the lenient decoder");
            Some(info)
        }
        Err(e) => {
            log::warn!("Fallback JSON parse failed: {}", e);
            None
        }
    }
}

/// The outermost brace-delimited span, if any.
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Rewrite single-quoted strings as double-quoted JSON strings. Content of
/// double-quoted strings is left untouched; escaped quotes keep their
/// meaning on both sides.
fn normalize_quotes(span: &str) -> String {
    let mut out = String::with_capacity(span.len() + 8);
    let mut chars = span.chars();
    let mut in_double = false;
    let mut in_single = false;

    while let Some(c) = chars.next() {
        if in_double {
            match c {
                '\\' => {
                    out.push('\\');
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => {
                    in_double = false;
                    out.push('"');
                }
                _ => out.push(c),
            }
        } else if in_single {
            match c {
                '\\' => match chars.next() {
                    // \' has no meaning in JSON; emit the bare apostrophe
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => {}
                },
                '\'' => {
                    in_single = false;
                    out.push('"');
                }
                '"' => out.push_str("\\\""),
                _ => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    in_double = true;
                    out.push('"');
                }
                '\'' => {
                    in_single = true;
                    out.push('"');
                }
                _ => out.push(c),
            }
        }
    }

    out
}
