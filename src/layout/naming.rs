//! File name resolution for exported records
//!
//! Names are derived purely from record content. There is no counter or
//! random suffix; repeated names are handled by the
//! [`CollisionPolicy`](super::CollisionPolicy) at write time.

use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Name used when a record carries none of the naming fields
pub const DEFAULT_NAME: &str = "default";

/// Candidate naming fields in precedence order
const NAME_FIELDS: [&str; 3] = ["name", "displayName", "functionName"];

static LEADING_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-zA-Z0-9]+").expect("valid regex"));
static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\-_]").expect("valid regex"));

/// Resolve the file stem for `record` written into `folder`
///
/// Precedence is `name` > `displayName` > `functionName` > `fallback`.
/// Records in the `environment` folder are named by `kind`, records in
/// `app-assets` by their sanitized `assetData.localPath`, when present.
///
/// # Example
/// ```
/// use digia_sync::layout::resolve_name;
/// use serde_json::json;
///
/// let asset = json!({"assetData": {"localPath": "/icons/home.png"}});
/// assert_eq!(resolve_name(&asset, "app-assets", "default"), "icons-home");
///
/// let component = json!({"displayName": "Card", "functionName": "card"});
/// assert_eq!(resolve_name(&component, "components", "default"), "Card");
/// ```
pub fn resolve_name(record: &Value, folder: &str, fallback: &str) -> String {
    let generic = NAME_FIELDS
        .iter()
        .find_map(|field| non_empty_str(record.get(field)))
        .unwrap_or(fallback);

    let overridden = match folder {
        "environment" => non_empty_str(record.get("kind")).map(str::to_string),
        "app-assets" => non_empty_str(record.pointer("/assetData/localPath"))
            .map(sanitize_file_name)
            .filter(|name| !name.is_empty()),
        _ => None,
    };

    match overridden {
        Some(name) => safe_segment(&name),
        None => safe_segment(generic),
    }
}

/// Turn a path-like string into a file-system-legal stem
///
/// Strips the extension, replaces path separators with `-`, drops leading
/// non-alphanumeric characters, then replaces anything outside
/// `[A-Za-z0-9-_]` with `-`.
pub fn sanitize_file_name(original: &str) -> String {
    let no_ext = match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) => original
            .strip_suffix(&format!(".{ext}"))
            .unwrap_or(original),
        None => original,
    };

    let separated = no_ext.replace(['/', '\\'], "-");
    let trimmed = LEADING_JUNK.replace(&separated, "");
    ILLEGAL_CHARS.replace_all(&trimmed, "-").into_owned()
}

/// Make a name usable as a single path segment inside its folder
///
/// Path separators become `-`. Empty and dot-only names (`.`, `..`) would
/// resolve outside the folder and become [`DEFAULT_NAME`].
pub fn safe_segment(name: &str) -> String {
    let segment = name.replace(['/', '\\'], "-");
    match segment.chars().all(|c| c == '.') {
        true => DEFAULT_NAME.to_string(),
        false => segment,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
