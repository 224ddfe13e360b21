/// Expand `%VAR%`, `$VAR`, `${VAR}` and a leading `~` in a candidate path.
///
/// Returns `None` when any referenced variable is unset or empty; such a
/// candidate cannot name a real location and is skipped by the locator.
pub(super) fn expand_env<F>(template: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    if let Some(after) = rest.strip_prefix('~') {
        if after.is_empty() || after.starts_with(['/', '\\']) {
            out.push_str(&var("HOME").or_else(|| var("USERPROFILE"))?);
            rest = after;
        }
    }

    while let Some(pos) = rest.find(['%', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(body) = tail.strip_prefix('%') {
            match body.find('%') {
                // `%%` is a literal percent sign
                Some(0) => {
                    out.push('%');
                    rest = &body[1..];
                }
                Some(end) => {
                    out.push_str(&var(&body[..end])?);
                    rest = &body[end + 1..];
                }
                None => {
                    out.push('%');
                    rest = body;
                }
            }
        } else {
            let body = &tail[1..];
            if let Some(braced) = body.strip_prefix('{') {
                let end = braced.find('}')?;
                out.push_str(&var(&braced[..end])?);
                rest = &braced[end + 1..];
            } else {
                let len = body
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(body.len());
                if len == 0 {
                    out.push('$');
                } else {
                    out.push_str(&var(&body[..len])?);
                }
                rest = &body[len..];
            }
        }
    }

    out.push_str(rest);
    Some(out)
}
