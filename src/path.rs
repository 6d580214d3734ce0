//! Home-directory expansion for configured paths.

use std::borrow::Cow;
use std::path::Path;

/// Expands a leading `~` component to the user's home directory.
///
/// - `~/docsets` becomes `/home/user/docsets`
/// - `~` becomes `/home/user`
/// - `~other/x` and paths without a leading `~` are returned unchanged
///
/// Returns `Cow::Borrowed` when no expansion happened (including when the home
/// directory cannot be determined).
pub fn expand_tilde(path: &Path) -> Cow<'_, Path> {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) if rest.as_os_str().is_empty() => Cow::Owned(home),
            Some(home) => Cow::Owned(home.join(rest)),
            None => Cow::Borrowed(path),
        },
        Err(_) => Cow::Borrowed(path),
    }
}
