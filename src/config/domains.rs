/// Domain used when neither `DOMAINS` nor `DOMAIN` yields anything usable.
pub const DEFAULT_DOMAIN: &str = "plosca.ru";

const SEPARATORS: &[char] = &['\n', ' ', ';', '|'];

/// Resolve the ordered list of domains to reconcile.
///
/// `list` is the raw `DOMAINS` value and takes precedence over the single
/// `DOMAIN` value. Any of newline, space, semicolon and pipe act as commas.
/// Empty pieces are dropped, order and duplicates are kept, and the result
/// is never empty.
pub fn resolve_domains(list: Option<&str>, single: Option<&str>) -> Vec<String> {
    let domains: Vec<String> = match (list, single) {
        (Some(list), _) if !list.is_empty() => list
            .replace(SEPARATORS, ",")
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect(),
        (_, Some(single)) if !single.is_empty() => {
            let single = single.trim();
            if single.is_empty() {
                Vec::new()
            } else {
                vec![single.to_string()]
            }
        }
        _ => Vec::new(),
    };

    if domains.is_empty() {
        return vec![DEFAULT_DOMAIN.to_string()];
    }

    domains
}
