use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_font_size: f32,
    pub text_color: String,
    pub key_color: String,
    pub value_color: String,
    pub add_color: String,
    pub del_color: String,
    pub comment_color: String,
    pub background: String,
    pub corner_radius: f32,
}

impl Theme {
    /// GitHub dark palette. Downstream consumers diff against these exact values.
    pub fn github_dark() -> Self {
        Self {
            font_family: "Andale Mono,AndaleMono,Consolas,monospace".to_string(),
            font_size: 16.0,
            text_font_size: 40.0,
            text_color: "#c9d1d9".to_string(),
            key_color: "#ffa657".to_string(),
            value_color: "#a5d6ff".to_string(),
            add_color: "#3fb950".to_string(),
            del_color: "#f85149".to_string(),
            comment_color: "#8b949e".to_string(),
            background: "#161b22".to_string(),
            corner_radius: 15.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::github_dark()
    }
}
