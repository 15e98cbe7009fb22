use crate::ir::Item;
use crate::theme::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "output/neofetch.svg";

pub const IMAGE_CONVERSION_KEY_VAR: &str = "API_LEAGUE_KEY";
pub const IDENTITY_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const ACTIVITY_KEY_VAR: &str = "WAKATIME_API_KEY";

/// Credentials for the upstream services. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub image_conversion_key: Option<String>,
    pub identity_token: Option<String>,
    pub activity_key: Option<String>,
}

impl ApiKeys {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            image_conversion_key: get(IMAGE_CONVERSION_KEY_VAR),
            identity_token: get(IDENTITY_TOKEN_VAR),
            activity_key: get(ACTIVITY_KEY_VAR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            width: 125,
            height: 125,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub system: Vec<Item>,
    pub profile: Vec<Item>,
    pub art: ArtConfig,
    pub output: PathBuf,
    pub theme: Theme,
    pub keys: ApiKeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            avatar_url: None,
            system: Vec::new(),
            profile: Vec::new(),
            art: ArtConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            theme: Theme::github_dark(),
            keys: ApiKeys::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    username: Option<String>,
    avatar_url: Option<String>,
    #[serde(default)]
    system: Vec<Item>,
    #[serde(default)]
    profile: Vec<Item>,
    art: Option<ArtConfigFile>,
    output: Option<PathBuf>,
    theme_variables: Option<ThemeVariables>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtConfigFile {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    text_color: Option<String>,
    key_color: Option<String>,
    value_color: Option<String>,
    add_color: Option<String>,
    del_color: Option<String>,
    comment_color: Option<String>,
    background: Option<String>,
}

/// Loads the card config. Keys always come from the environment, never the file.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config {
        keys: ApiKeys::from_env(),
        ..Config::default()
    };
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed = parse_config_file(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn parse_config_file(contents: &str) -> anyhow::Result<ConfigFile> {
    json5::from_str(contents).map_err(|err| anyhow::anyhow!("invalid config: {err}"))
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if parsed.username.is_some() {
        config.username = parsed.username;
    }
    if parsed.avatar_url.is_some() {
        config.avatar_url = parsed.avatar_url;
    }
    config.system = parsed.system;
    config.profile = parsed.profile;
    if let Some(art) = parsed.art {
        if let Some(v) = art.width {
            config.art.width = v;
        }
        if let Some(v) = art.height {
            config.art.height = v;
        }
    }
    if let Some(output) = parsed.output {
        config.output = output;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.key_color {
            config.theme.key_color = v;
        }
        if let Some(v) = vars.value_color {
            config.theme.value_color = v;
        }
        if let Some(v) = vars.add_color {
            config.theme.add_color = v;
        }
        if let Some(v) = vars.del_color {
            config.theme.del_color = v;
        }
        if let Some(v) = vars.comment_color {
            config.theme.comment_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }
}
