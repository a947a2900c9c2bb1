use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand environment variables in a path string.
/// Handles Windows `%VAR%` as well as `$VAR` / `${VAR}` forms.
/// Unset variables are left in place verbatim.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '%' => {
                if let Some(end) = input[i + 1..].find('%') {
                    let name = &input[i + 1..i + 1 + end];
                    if let Ok(value) = std::env::var(name) {
                        out.push_str(&value);
                    } else {
                        out.push('%');
                        out.push_str(name);
                        out.push('%');
                    }
                    // skip past the closing '%'
                    for _ in 0..name.chars().count() + 1 {
                        chars.next();
                    }
                } else {
                    out.push('%');
                }
            }
            '$' => {
                let rest = &input[i + 1..];
                let (name, consumed) = if rest.starts_with('{') {
                    match rest.find('}') {
                        Some(close) => (&rest[1..close], close + 1),
                        None => ("", 0),
                    }
                } else {
                    let len = rest
                        .chars()
                        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                        .count();
                    (&rest[..len], len)
                };

                if name.is_empty() {
                    out.push('$');
                } else {
                    match std::env::var(name) {
                        Ok(value) => out.push_str(&value),
                        Err(_) => {
                            out.push('$');
                            out.push_str(&rest[..consumed]);
                        }
                    }
                    for _ in 0..rest[..consumed].chars().count() {
                        chars.next();
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Expand environment variables and make the path absolute.
/// Does not require the path to exist.
pub fn normalize_path(raw: &str) -> PathBuf {
    let expanded = expand_env_vars(raw);
    let path = PathBuf::from(expanded);
    std::path::absolute(&path).unwrap_or(path)
}

/// Compute total size of a directory recursively.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Get size of a file or directory.
pub fn entry_size(path: &Path) -> u64 {
    if path.is_dir() {
        dir_size(path)
    } else {
        path.metadata().map(|m| m.len()).unwrap_or(0)
    }
}

/// Format byte count as human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.2} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{} B", bytes)
    }
}
