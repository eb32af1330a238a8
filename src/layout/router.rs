//! Shape-based routing for singleton records
//!
//! Singleton records under `design` and `project` carry marker fields that
//! decide which folder (or file stem) they are written to. Rules are checked
//! in table order and the first match wins.

use serde_json::Value;

/// A single routing rule: records under `parent` with a truthy value at
/// `marker` (a JSON pointer) are routed to `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub parent: &'static str,
    pub marker: &'static str,
    pub destination: &'static str,
}

impl RouteRule {
    const fn new(parent: &'static str, marker: &'static str, destination: &'static str) -> Self {
        Self {
            parent,
            marker,
            destination,
        }
    }

    /// Check whether this rule applies to `data` under `parent`
    pub fn matches(&self, parent: &str, data: &Value) -> bool {
        self.parent == parent && data.pointer(self.marker).is_some_and(is_truthy)
    }
}

/// Routing table, highest priority first
pub const ROUTE_RULES: [RouteRule; 6] = [
    RouteRule::new("design", "/APP_ASSETS", "app-assets"),
    RouteRule::new("design", "/APP_STATE", "app-state"),
    RouteRule::new("design", "/APP_SETTINGS", "app-settings"),
    RouteRule::new("design", "/THEME", "color-tokens"),
    RouteRule::new("design", "/TYPOGRAPHY", "font-tokens"),
    RouteRule::new("project", "/appDetails/displayName", "project-details"),
];

/// Pick the destination for a singleton record under `parent`
///
/// Falls back to `default` when no rule matches.
///
/// # Example
/// ```
/// use digia_sync::layout::route;
/// use serde_json::json;
///
/// let theme = json!({"THEME": {"primary": "#fff"}});
/// assert_eq!(route("design", &theme, "font-tokens"), "color-tokens");
/// assert_eq!(route("design", &json!({"other": 1}), "font-tokens"), "font-tokens");
/// ```
pub fn route<'a>(parent: &str, data: &Value, default: &'a str) -> &'a str {
    ROUTE_RULES
        .iter()
        .find(|rule| rule.matches(parent, data))
        .map(|rule| rule.destination)
        .unwrap_or(default)
}

/// JavaScript-style truthiness, which is what the backend's marker fields rely on
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_design_markers() {
        let cases = [
            ("TYPOGRAPHY", "font-tokens"),
            ("THEME", "color-tokens"),
            ("APP_SETTINGS", "app-settings"),
            ("APP_STATE", "app-state"),
            ("APP_ASSETS", "app-assets"),
        ];

        for (marker, expected) in cases {
            let data = json!({ marker: {"value": 1} });
            assert_eq!(route("design", &data, "fallback"), expected, "marker {marker}");
        }
    }

    #[test]
    fn test_theme_ignores_caller_default() {
        let data = json!({"THEME": {"dark": true}});
        assert_eq!(route("design", &data, "font-tokens"), "color-tokens");
        assert_eq!(route("design", &data, "app-settings"), "color-tokens");
    }

    #[test]
    fn test_no_marker_uses_default() {
        let data = json!({"colors": []});
        assert_eq!(route("design", &data, "color-tokens"), "color-tokens");
    }

    #[test]
    fn test_markers_only_apply_to_their_parent() {
        let data = json!({"THEME": {}, "appDetails": {"displayName": "App"}});
        assert_eq!(route("widgets", &data, "widgets"), "widgets");
        assert_eq!(route("project", &data, "project"), "project-details");
    }

    #[test]
    fn test_project_details_requires_display_name() {
        let with_name = json!({"appDetails": {"displayName": "Shop"}});
        let empty_name = json!({"appDetails": {"displayName": ""}});
        let no_details = json!({"projectId": "p1"});

        assert_eq!(route("project", &with_name, "project"), "project-details");
        assert_eq!(route("project", &empty_name, "project"), "project");
        assert_eq!(route("project", &no_details, "project"), "project");
    }

    #[test]
    fn test_falsy_marker_does_not_route() {
        let data = json!({"THEME": null, "TYPOGRAPHY": false});
        assert_eq!(route("design", &data, "app-state"), "app-state");
    }

    #[test]
    fn test_priority_when_several_markers_present() {
        let data = json!({"TYPOGRAPHY": {}, "THEME": {}, "APP_ASSETS": []});
        assert_eq!(route("design", &data, "x"), "app-assets");

        let data = json!({"TYPOGRAPHY": {}, "THEME": {}});
        assert_eq!(route("design", &data, "x"), "color-tokens");
    }
}
