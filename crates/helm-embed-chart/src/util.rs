use camino::{Utf8Component, Utf8Path};

/// Lexically normalize a tree path into its components.
///
/// `.` is dropped, `..` pops the previous component and repeated or
/// platform-specific separators are accepted. Returns `None` if the path
/// escapes the tree root or carries a platform prefix (e.g. `C:`).
pub(crate) fn normalize(path: &str) -> Option<Vec<&str>> {
    let mut out: Vec<&str> = Vec::new();
    for component in Utf8Path::new(path).components() {
        match component {
            Utf8Component::Prefix(_) => return None,
            Utf8Component::RootDir | Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                out.pop()?;
            }
            Utf8Component::Normal(name) => out.push(name),
        }
    }
    Some(out)
}

/// Join `name` onto `base`, producing a normalized slash-separated tree path.
///
/// `..` in `name` may walk back out of `base`, but never out of the tree.
pub(crate) fn join(base: &str, name: &str) -> Option<String> {
    let joined = format!("{base}/{name}");
    Some(normalize(&joined)?.join("/"))
}

/// Express `path` relative to `base`, both interpreted as tree paths.
///
/// The result always uses forward slashes. Returns `None` if `path` does not
/// lie strictly below `base`.
pub(crate) fn relative_to(base: &str, path: &str) -> Option<String> {
    let base = normalize(base)?;
    let path = normalize(path)?;
    let rest = path.strip_prefix(base.as_slice())?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.join("/"))
}
