//! Collects the card data from GitHub, WakaTime, the streak-stats service and
//! the image-to-ASCII converter.
//!
//! Requests run as an ordered pipeline of named [`Stage`]s. Identity comes first
//! because every later stage needs the resolved login or avatar. All network
//! access goes through the [`Fetcher`] trait so the pipeline can run against
//! canned responses.

use crate::config::{ACTIVITY_KEY_VAR, ApiKeys, ArtConfig, Config, IMAGE_CONVERSION_KEY_VAR};
use crate::format::{
    format_duration_hours, format_long_date, format_short_date, parse_iso_date, parse_timestamp,
    relative_time,
};
use crate::ir::{Item, Section, UserRecord};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

const GITHUB_API: &str = "https://api.github.com";
const WAKATIME_ALL_TIME: &str = "https://wakatime.com/api/v1/users/current/all_time_since_today";
const STREAK_STATS: &str = "https://streak-stats.demolab.com/";
const ASCII_CONVERTER: &str = "https://api.apileague.com/convert-image-to-ascii-txt";
const REPOS_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Identity,
    Stars,
    Activity,
    Streak,
    Art,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Identity => "github identity",
            Stage::Stars => "github stars",
            Stage::Activity => "wakatime activity",
            Stage::Streak => "streak stats",
            Stage::Art => "ascii art",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("response status: {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("{stage} request failed: {source}")]
    Fetch { stage: Stage, source: FetchError },
    #[error("{stage} response could not be decoded: {source}")]
    Decode {
        stage: Stage,
        source: serde_json::Error,
    },
    #[error("{stage} needs {key} to be set")]
    MissingKey { stage: Stage, key: &'static str },
    #[error("{stage} needs {field}")]
    MissingField { stage: Stage, field: &'static str },
    #[error("{stage} url is invalid: {message}")]
    InvalidUrl { stage: Stage, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

pub trait Fetcher {
    /// Performs a GET and returns the body. Non-success statuses are errors.
    fn get(&self, request: &Request) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("devcard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, request: &Request) -> Result<String, FetchError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        let response = builder
            .send()
            .map_err(|err| FetchError::Transport(err.without_url().to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|err| FetchError::Transport(err.without_url().to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub login: String,
    pub name: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
    /// Only present on the authenticated `/user` endpoint.
    pub total_private_repos: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Repo {
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Debug, Deserialize)]
struct ActivityResponse {
    data: Activity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub total_seconds: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub total_contributions: u64,
    pub first_contribution: Option<String>,
    pub current_streak: Streak,
    pub longest_streak: Streak,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Streak {
    pub start: String,
    pub end: String,
    pub length: u64,
}

/// Everything the stages produced, before it is flattened into a record.
#[derive(Debug, Clone)]
pub struct Stats {
    pub identity: Identity,
    pub stars: u64,
    pub activity: Option<Activity>,
    pub streak: StreakStats,
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub record: UserRecord,
    pub art: Option<String>,
}

pub struct Aggregator<F> {
    fetcher: F,
    keys: ApiKeys,
    username: Option<String>,
    avatar_url: Option<String>,
    system: Vec<Item>,
    profile: Vec<Item>,
    art: ArtConfig,
    now: DateTime<Utc>,
}

impl<F: Fetcher> Aggregator<F> {
    pub fn new(fetcher: F, keys: ApiKeys) -> Self {
        Self {
            fetcher,
            keys,
            username: None,
            avatar_url: None,
            system: Vec::new(),
            profile: Vec::new(),
            art: ArtConfig::default(),
            now: Utc::now(),
        }
    }

    pub fn from_config(fetcher: F, config: &Config) -> Self {
        Self {
            username: config.username.clone(),
            avatar_url: config.avatar_url.clone(),
            system: config.system.clone(),
            profile: config.profile.clone(),
            art: config.art,
            ..Self::new(fetcher, config.keys.clone())
        }
    }

    /// Reference instant for "N days ago" values.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Runs every stage. The art stage is skipped when `with_art` is false.
    pub fn run(&self, with_art: bool) -> Result<Aggregate, AggregateError> {
        let stats = self.collect()?;
        let art = if with_art {
            let avatar = self.avatar_for(Some(&stats.identity))?;
            Some(self.ascii_art(&avatar)?)
        } else {
            None
        };
        Ok(Aggregate {
            record: self.build_record(&stats),
            art,
        })
    }

    pub fn collect(&self) -> Result<Stats, AggregateError> {
        let identity = self.identity()?;
        let stars = self.stars(&identity)?;
        let activity = self.activity()?;
        let streak = self.streak(&identity)?;
        Ok(Stats {
            identity,
            stars,
            activity,
            streak,
        })
    }

    /// Art for a card whose record came from elsewhere. Looks up the avatar
    /// only if none is configured.
    pub fn art_only(&self) -> Result<String, AggregateError> {
        let avatar = match &self.avatar_url {
            Some(url) => url.clone(),
            None => {
                let identity = self.identity()?;
                self.avatar_for(Some(&identity))?
            }
        };
        self.ascii_art(&avatar)
    }

    pub fn identity(&self) -> Result<Identity, AggregateError> {
        let stage = Stage::Identity;
        // an explicit username wins; /user resolves to the token owner
        let url = match (&self.username, &self.keys.identity_token) {
            (Some(username), _) => format!("{GITHUB_API}/users/{username}"),
            (None, Some(_)) => format!("{GITHUB_API}/user"),
            (None, None) => {
                return Err(AggregateError::MissingField {
                    stage,
                    field: "a username or GITHUB_TOKEN",
                });
            }
        };
        info!("Fetching {stage}");
        let identity: Identity = self.get_json(stage, self.github(url))?;
        debug!("Resolved GitHub login {}", identity.login);
        Ok(identity)
    }

    pub fn stars(&self, identity: &Identity) -> Result<u64, AggregateError> {
        let stage = Stage::Stars;
        info!("Fetching {stage}");
        let base = format!("{GITHUB_API}/users/{}/repos", identity.login);
        let per_page = REPOS_PER_PAGE.to_string();
        let mut total = 0;
        for page in 1.. {
            let page = page.to_string();
            let url = endpoint(
                stage,
                &base,
                &[("per_page", per_page.as_str()), ("page", page.as_str())],
            )?;
            let repos: Vec<Repo> = self.get_json(stage, self.github(url))?;
            total += repos.iter().map(|repo| repo.stargazers_count).sum::<u64>();
            if repos.len() < REPOS_PER_PAGE {
                break;
            }
        }
        Ok(total)
    }

    /// `None` when no WakaTime key is configured.
    pub fn activity(&self) -> Result<Option<Activity>, AggregateError> {
        let stage = Stage::Activity;
        let Some(key) = &self.keys.activity_key else {
            info!("Skipping {stage}: {ACTIVITY_KEY_VAR} is not set");
            return Ok(None);
        };
        info!("Fetching {stage}");
        let url = endpoint(stage, WAKATIME_ALL_TIME, &[("api_key", key.as_str())])?;
        let response: ActivityResponse = self.get_json(stage, Request::get(url))?;
        Ok(Some(response.data))
    }

    pub fn streak(&self, identity: &Identity) -> Result<StreakStats, AggregateError> {
        let stage = Stage::Streak;
        info!("Fetching {stage}");
        let url = endpoint(
            stage,
            STREAK_STATS,
            &[("user", identity.login.as_str()), ("type", "json")],
        )?;
        self.get_json(stage, Request::get(url))
    }

    pub fn ascii_art(&self, avatar_url: &str) -> Result<String, AggregateError> {
        let stage = Stage::Art;
        let Some(key) = &self.keys.image_conversion_key else {
            return Err(AggregateError::MissingKey {
                stage,
                key: IMAGE_CONVERSION_KEY_VAR,
            });
        };
        info!("Fetching {stage}");
        let width = self.art.width.to_string();
        let height = self.art.height.to_string();
        let url = endpoint(
            stage,
            ASCII_CONVERTER,
            &[
                ("width", width.as_str()),
                ("height", height.as_str()),
                ("api-key", key.as_str()),
                ("url", avatar_url),
            ],
        )?;
        let art = self.get_text(stage, &Request::get(url))?;
        info!("Gotten ASCII text from image");
        Ok(art)
    }

    pub fn build_record(&self, stats: &Stats) -> UserRecord {
        let identity = &stats.identity;

        let mut system = self.system.clone();
        if let Some(activity) = &stats.activity {
            system.push(Item::new(
                "Wakatime",
                format_duration_hours(activity.total_seconds),
            ));
        }

        let mut profile = self.profile.clone();
        if let Some(handle) = non_empty(&identity.twitter_username) {
            profile.push(Item::new("Twitter", format!("@{handle}")));
        }
        if let Some(blog) = non_empty(&identity.blog) {
            profile.push(Item::new("Portfolio", blog));
        }
        if let Some(joined) = identity.created_at.as_deref().and_then(parse_timestamp) {
            profile.push(Item::new("Joined", relative_time(joined, self.now)));
        }

        let repos = match identity.total_private_repos {
            Some(private) => format!(
                "{} Total ({} Public | {} Private)",
                identity.public_repos + private,
                identity.public_repos,
                private
            ),
            None => format!("{} Public", identity.public_repos),
        };
        let streak = &stats.streak;
        let contributions = match streak.first_contribution.as_deref().and_then(parse_iso_date) {
            Some(first) => format!(
                "{} ({} - Present)",
                streak.total_contributions,
                format_long_date(first)
            ),
            None => streak.total_contributions.to_string(),
        };
        let mut github = vec![
            Item::new(
                "Audience",
                format!(
                    "{} Followers | {} Following",
                    identity.followers, identity.following
                ),
            ),
            Item::new("Repos", repos),
            Item::new("Stars", stats.stars.to_string()),
            Item::new("Contributions", contributions),
            Item::new("Current Streak", format_streak(&streak.current_streak, false)),
            Item::new("Longest Streak", format_streak(&streak.longest_streak, true)),
        ];
        if let Some(active) = identity.updated_at.as_deref().and_then(parse_timestamp) {
            github.push(Item::new("Last Active", relative_time(active, self.now)));
        }

        let mut sections = Vec::new();
        if !system.is_empty() {
            sections.push(Section::unnamed(system));
        }
        if !profile.is_empty() {
            sections.push(Section::named("Profile", profile));
        }
        sections.push(Section::named("GitHub", github));

        UserRecord {
            username: identity.login.clone(),
            sections,
        }
    }

    fn avatar_for(&self, identity: Option<&Identity>) -> Result<String, AggregateError> {
        self.avatar_url
            .clone()
            .or_else(|| identity.and_then(|id| id.avatar_url.clone()))
            .ok_or(AggregateError::MissingField {
                stage: Stage::Art,
                field: "an avatar url",
            })
    }

    fn github(&self, url: String) -> Request {
        let request = Request::get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.keys.identity_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    fn get_text(&self, stage: Stage, request: &Request) -> Result<String, AggregateError> {
        self.fetcher
            .get(request)
            .map_err(|source| AggregateError::Fetch { stage, source })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        stage: Stage,
        request: Request,
    ) -> Result<T, AggregateError> {
        let body = self.get_text(stage, &request)?;
        serde_json::from_str(&body).map_err(|source| AggregateError::Decode { stage, source })
    }
}

fn endpoint(stage: Stage, base: &str, params: &[(&str, &str)]) -> Result<String, AggregateError> {
    reqwest::Url::parse_with_params(base, params)
        .map(|url| url.to_string())
        .map_err(|err| AggregateError::InvalidUrl {
            stage,
            message: err.to_string(),
        })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn format_streak(streak: &Streak, with_year: bool) -> String {
    let (Some(start), Some(end)) = (parse_iso_date(&streak.start), parse_iso_date(&streak.end))
    else {
        return streak.length.to_string();
    };
    if with_year {
        format!(
            "{} ({} - {})",
            streak.length,
            format_long_date(start),
            format_long_date(end)
        )
    } else if start == end {
        format!("{} ({})", streak.length, format_short_date(end))
    } else {
        format!(
            "{} ({} - {})",
            streak.length,
            format_short_date(start),
            format_short_date(end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;

    const USER_JSON: &str = r#"{
        "login": "Judge-Paul",
        "name": "Paul",
        "blog": "https://jadge.vercel.app",
        "twitter_username": "jadge_dev",
        "avatar_url": "https://avatars.githubusercontent.com/u/110723341?v=4",
        "followers": 42,
        "following": 75,
        "public_repos": 39,
        "total_private_repos": 29,
        "created_at": "2022-08-01T09:00:00Z",
        "updated_at": "2024-11-07T12:00:00Z"
    }"#;

    const STREAK_JSON: &str = r#"{
        "mode": "daily",
        "totalContributions": 2087,
        "firstContribution": "2022-08-06",
        "longestStreak": {"start": "2023-02-04", "end": "2023-03-05", "length": 30},
        "currentStreak": {"start": "2024-11-07", "end": "2024-11-07", "length": 0}
    }"#;

    struct StubFetcher {
        routes: Vec<(String, Result<String, u16>)>,
        seen: RefCell<Vec<Request>>,
    }

    impl StubFetcher {
        fn new() -> Self {
            Self {
                routes: Vec::new(),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn route(mut self, prefix: &str, body: &str) -> Self {
            self.routes.push((prefix.to_string(), Ok(body.to_string())));
            self
        }

        fn fail(mut self, prefix: &str, status: u16) -> Self {
            self.routes.push((prefix.to_string(), Err(status)));
            self
        }

        fn urls(&self) -> Vec<String> {
            self.seen.borrow().iter().map(|r| r.url.clone()).collect()
        }
    }

    impl Fetcher for &StubFetcher {
        fn get(&self, request: &Request) -> Result<String, FetchError> {
            self.seen.borrow_mut().push(request.clone());
            // longest matching prefix wins
            match self
                .routes
                .iter()
                .filter(|(prefix, _)| request.url.starts_with(prefix.as_str()))
                .max_by_key(|(prefix, _)| prefix.len())
            {
                Some((_, Ok(body))) => Ok(body.clone()),
                Some((_, Err(status))) => Err(FetchError::Status(*status)),
                None => Err(FetchError::Transport(format!("no route for {}", request.url))),
            }
        }
    }

    fn repos(count: usize, stars: u64) -> String {
        let repo = format!(r#"{{"stargazers_count": {stars}}}"#);
        format!("[{}]", vec![repo; count].join(","))
    }

    fn github_stub() -> StubFetcher {
        StubFetcher::new()
            .route("https://api.github.com/user", USER_JSON)
            .route(
                "https://api.github.com/users/Judge-Paul/repos?per_page=100&page=1",
                &repos(2, 20),
            )
            .route("https://streak-stats.demolab.com/", STREAK_JSON)
            .route(
                "https://wakatime.com/api/v1/users/current/all_time_since_today",
                r#"{"data": {"total_seconds": 5271840.0, "text": "1,464 hrs 24 mins"}}"#,
            )
            .route(
                "https://api.apileague.com/convert-image-to-ascii-txt",
                "@@@\n###\n",
            )
    }

    fn keys() -> ApiKeys {
        ApiKeys {
            image_conversion_key: Some("league".to_string()),
            identity_token: Some("ghp_token".to_string()),
            activity_key: Some("waka".to_string()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 10, 12, 0, 0).unwrap()
    }

    fn find<'a>(record: &'a UserRecord, label: &str) -> Option<&'a str> {
        record
            .sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|item| item.label == label)
            .map(|item| item.value.as_str())
    }

    #[test]
    fn builds_full_record() {
        let stub = github_stub();
        let config = Config {
            system: vec![Item::new("OS", "Arch Linux")],
            profile: vec![Item::new("Role", "Software Developer")],
            keys: keys(),
            ..Config::default()
        };
        let aggregate = Aggregator::from_config(&stub, &config)
            .at(now())
            .run(true)
            .expect("aggregate");
        let record = &aggregate.record;

        assert_eq!(record.username, "Judge-Paul");
        let names: Vec<_> = record.sections.iter().map(|s| s.name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("Profile"), Some("GitHub")]);
        assert_eq!(find(record, "Wakatime"), Some("1464 hours, 24 mins"));
        assert_eq!(find(record, "Twitter"), Some("@jadge_dev"));
        assert_eq!(find(record, "Portfolio"), Some("https://jadge.vercel.app"));
        assert_eq!(find(record, "Joined"), Some("2 years ago"));
        assert_eq!(find(record, "Audience"), Some("42 Followers | 75 Following"));
        assert_eq!(find(record, "Repos"), Some("68 Total (39 Public | 29 Private)"));
        assert_eq!(find(record, "Stars"), Some("40"));
        assert_eq!(find(record, "Contributions"), Some("2087 (Aug 6, 2022 - Present)"));
        assert_eq!(find(record, "Current Streak"), Some("0 (Nov 7)"));
        assert_eq!(
            find(record, "Longest Streak"),
            Some("30 (Feb 4, 2023 - Mar 5, 2023)")
        );
        assert_eq!(find(record, "Last Active"), Some("3 days ago"));
        assert_eq!(aggregate.art.as_deref(), Some("@@@\n###\n"));
    }

    #[test]
    fn sends_token_and_encodes_avatar_url() {
        let stub = github_stub();
        Aggregator::new(&stub, keys()).at(now()).run(true).expect("aggregate");
        let seen = stub.seen.borrow();
        let user = seen
            .iter()
            .find(|r| r.url == "https://api.github.com/user")
            .expect("identity request");
        assert!(user
            .headers
            .contains(&("Authorization", "Bearer ghp_token".to_string())));
        let art = seen.last().expect("art request");
        assert!(art.url.contains("width=125&height=125&api-key=league&url=https%3A%2F%2Favatars"));
    }

    #[test]
    fn stars_page_until_short_page() {
        let stub = StubFetcher::new()
            .route(
                "https://api.github.com/users/alice/repos?per_page=100&page=1",
                &repos(100, 1),
            )
            .route(
                "https://api.github.com/users/alice/repos?per_page=100&page=2",
                &repos(3, 5),
            );
        let identity: Identity = serde_json::from_str(r#"{"login": "alice"}"#).expect("identity");
        let stars = Aggregator::new(&stub, ApiKeys::default())
            .stars(&identity)
            .expect("stars");
        assert_eq!(stars, 115);
        assert_eq!(stub.urls().len(), 2);
    }

    #[test]
    fn missing_optional_fields_are_omitted() {
        let stub = StubFetcher::new()
            .route(
                "https://api.github.com/users/alice",
                r#"{"login": "alice", "blog": "", "followers": 1, "public_repos": 2}"#,
            )
            .route("https://api.github.com/users/alice/repos", "[]")
            .route("https://streak-stats.demolab.com/", STREAK_JSON);
        let config = Config {
            username: Some("alice".to_string()),
            ..Config::default()
        };
        let aggregate = Aggregator::from_config(&stub, &config)
            .at(now())
            .run(false)
            .expect("aggregate");
        let record = &aggregate.record;

        assert_eq!(record.sections.len(), 1);
        assert_eq!(find(record, "Twitter"), None);
        assert_eq!(find(record, "Portfolio"), None);
        assert_eq!(find(record, "Wakatime"), None);
        assert_eq!(find(record, "Repos"), Some("2 Public"));
        assert!(aggregate.art.is_none());
        assert!(!stub.urls().iter().any(|url| url.contains("wakatime")));
    }

    #[test]
    fn upstream_status_fails_with_stage() {
        let stub = StubFetcher::new().fail("https://api.github.com/user", 401);
        let err = Aggregator::new(&stub, keys()).run(false).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::Fetch {
                stage: Stage::Identity,
                source: FetchError::Status(401)
            }
        ));
        assert_eq!(
            err.to_string(),
            "github identity request failed: response status: 401"
        );
    }

    #[test]
    fn username_with_token_fetches_that_user() {
        let stub = github_stub()
            .route(
                "https://api.github.com/users/alice",
                r#"{"login": "alice", "followers": 3, "public_repos": 1}"#,
            )
            .route("https://api.github.com/users/alice/repos", &repos(1, 7));
        let config = Config {
            username: Some("alice".to_string()),
            keys: keys(),
            ..Config::default()
        };
        let aggregate = Aggregator::from_config(&stub, &config)
            .at(now())
            .run(false)
            .expect("aggregate");

        assert_eq!(aggregate.record.username, "alice");
        assert_eq!(find(&aggregate.record, "Stars"), Some("7"));
        assert_eq!(find(&aggregate.record, "Audience"), Some("3 Followers | 0 Following"));

        let urls = stub.urls();
        assert!(!urls.iter().any(|url| url == "https://api.github.com/user"));
        assert!(!urls.iter().any(|url| url.contains("Judge-Paul")));
        assert!(urls.contains(&"https://streak-stats.demolab.com/?user=alice&type=json".to_string()));

        let seen = stub.seen.borrow();
        let identity = seen.first().expect("identity request");
        assert_eq!(identity.url, "https://api.github.com/users/alice");
        assert!(identity
            .headers
            .contains(&("Authorization", "Bearer ghp_token".to_string())));
    }

    #[test]
    fn identity_needs_username_or_token() {
        let stub = StubFetcher::new();
        let err = Aggregator::new(&stub, ApiKeys::default()).identity().unwrap_err();
        assert!(matches!(err, AggregateError::MissingField { stage: Stage::Identity, .. }));
        assert!(stub.urls().is_empty());
    }

    #[test]
    fn art_needs_conversion_key() {
        let stub = StubFetcher::new();
        let config = Config {
            avatar_url: Some("https://example.com/me.png".to_string()),
            ..Config::default()
        };
        let err = Aggregator::from_config(&stub, &config).art_only().unwrap_err();
        assert!(matches!(
            err,
            AggregateError::MissingKey { stage: Stage::Art, key: IMAGE_CONVERSION_KEY_VAR }
        ));
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        let stub = StubFetcher::new().route("https://api.github.com/user", "<html>");
        let err = Aggregator::new(&stub, keys()).identity().unwrap_err();
        assert!(matches!(err, AggregateError::Decode { stage: Stage::Identity, .. }));
    }

    #[test]
    fn streak_ranges() {
        let streak = Streak {
            start: "2024-11-03".to_string(),
            end: "2024-11-07".to_string(),
            length: 5,
        };
        assert_eq!(format_streak(&streak, false), "5 (Nov 3 - Nov 7)");
        let broken = Streak {
            start: String::new(),
            end: String::new(),
            length: 0,
        };
        assert_eq!(format_streak(&broken, true), "0");
    }
}
