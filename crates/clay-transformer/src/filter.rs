//! Cheap checks deciding whether a module is worth matching at all.

/// Extensions of modules that can contain JSX, the rewrite target.
const JSX_EXTENSIONS: [&str; 2] = [".tsx", ".jsx"];

/// Returns true if the module at `path` should be considered for rewriting.
///
/// The module must end in `.tsx` or `.jsx` and must not live under a
/// `vendor_dir` path segment.
pub fn is_eligible(path: &str, vendor_dir: &str) -> bool {
    if !JSX_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }
    !path.split(|c: char| c == '/' || c == '\\').any(|segment| segment == vendor_dir)
}

/// Returns true if `text` could contain a clay declaration.
///
/// Looks for `<namespace>.`, `<namespace>(` or the global-style identifier as
/// plain substrings. May report modules that turn out to contain no
/// declaration; never misses one that does.
pub fn might_contain_clay(text: &str, namespace: &str, global_style_ident: &str) -> bool {
    text.match_indices(namespace).any(|(offset, matched)| {
        matches!(
            text.as_bytes().get(offset + matched.len()),
            Some(b'.') | Some(b'(')
        )
    }) || text.contains(global_style_ident)
}
