//! Editor preference

/// Environment variable holding the preferred editor
pub const EDITOR_ENV: &str = "EDITOR";

/// Editor used when none is configured
pub const DEFAULT_EDITOR: &str = "vim";

/// Resolve the editor command from the environment
pub fn editor_from_env() -> String {
    resolve_editor(std::env::var(EDITOR_ENV).ok().as_deref())
}

/// Resolve an editor preference; unset or blank falls back to `vim`
pub fn resolve_editor(preference: Option<&str>) -> String {
    match preference.map(str::trim) {
        Some(editor) if !editor.is_empty() => editor.to_string(),
        _ => DEFAULT_EDITOR.to_string(),
    }
}
