//! yt-dlp fetch strategies.
//!
//! Each strategy is one parameterized attempt to acquire the source asset
//! with a specific client identity / credential combination. Strategy order
//! in the pipeline encodes empirically-ranked likelihood of getting past
//! access restrictions; see [`super::pipeline`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use autoclip_models::alternate_watch_url;

/// Optional credential material for authenticated strategies.
///
/// Absent cookies mean strategies that need them self-skip without being
/// attempted.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    /// Netscape-format cookie file, if one was found
    pub cookies: Option<PathBuf>,
}

impl AuthContext {
    /// Locate a cookie file using the fixed search order:
    /// `$HOME/.config/yt-dlp/cookies.txt`, `./cookies.txt`,
    /// then the `YOUTUBE_COOKIES` environment variable.
    pub fn discover() -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(home) = std::env::var("HOME") {
            candidates.push(
                Path::new(&home)
                    .join(".config")
                    .join("yt-dlp")
                    .join("cookies.txt"),
            );
        }
        candidates.push(PathBuf::from("cookies.txt"));
        if let Ok(env_path) = std::env::var("YOUTUBE_COOKIES") {
            if !env_path.is_empty() {
                candidates.push(PathBuf::from(env_path));
            }
        }

        for candidate in candidates {
            if candidate.exists() {
                info!(path = %candidate.display(), "found cookie file");
                return Self {
                    cookies: Some(candidate),
                };
            }
        }

        warn!("no cookie file found, authenticated strategies will be skipped");
        Self::default()
    }

    /// Auth context with an explicit cookie file.
    pub fn with_cookies(path: impl Into<PathBuf>) -> Self {
        Self {
            cookies: Some(path.into()),
        }
    }

    fn cookies_str(&self) -> Option<String> {
        self.cookies
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }
}

/// What to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Resource reference (video URL)
    pub url: String,
    /// Destination file path, exclusively owned during acquisition
    pub dest: PathBuf,
    /// Quality preference string (1080p/720p/480p/360p/worst)
    pub quality: String,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, dest: impl Into<PathBuf>, quality: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dest: dest.into(),
            quality: quality.into(),
        }
    }

    fn dest_str(&self) -> String {
        self.dest.to_string_lossy().to_string()
    }
}

/// Map a quality preference to a yt-dlp format selector.
pub fn quality_format(preference: &str) -> &'static str {
    match preference {
        "1080p" => "best[height<=1080]/worst",
        "720p" => "best[height<=720]/worst",
        "480p" => "best[height<=480]/worst",
        "360p" => "18/worst",
        "worst" => "worst",
        _ => "best[height<=720]/worst",
    }
}

/// One ordered acquisition attempt.
///
/// Implementations are immutable configuration; they build an argv (or
/// decline) and the pipeline drives execution through the command runner.
pub trait FetchStrategy: Send + Sync {
    /// Strategy name for logging.
    fn name(&self) -> &'static str;

    /// Retry budget handed to the command runner for this strategy.
    fn retry_budget(&self) -> u32 {
        3
    }

    /// Build the yt-dlp invocation, or `None` to self-skip (missing auth,
    /// inapplicable URL form).
    fn command(&self, request: &FetchRequest, auth: &AuthContext) -> Option<Vec<String>>;
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// TV-embedded player client with cookie authentication.
pub struct TvEmbeddedClient;

impl FetchStrategy for TvEmbeddedClient {
    fn name(&self) -> &'static str {
        "tv_embedded_with_cookies"
    }

    fn command(&self, request: &FetchRequest, auth: &AuthContext) -> Option<Vec<String>> {
        let cookies = auth.cookies_str()?;
        let mut cmd = argv(&[
            "yt-dlp",
            "--extractor-args",
            "youtube:player_client=tv_embedded",
            "--user-agent",
            "Mozilla/5.0 (SMART-TV; Linux; Tizen 2.4.0) AppleWebkit/538.1",
            "--merge-output-format",
            "mp4",
            "-f",
            quality_format(&request.quality),
            "--cookies",
        ]);
        cmd.extend(argv(&[
            &cookies,
            "--sleep-interval",
            "2",
            "--max-sleep-interval",
            "5",
            "-o",
            &request.dest_str(),
            &request.url,
        ]));
        Some(cmd)
    }
}

/// Android app client with cookie authentication.
pub struct AndroidClient;

impl FetchStrategy for AndroidClient {
    fn name(&self) -> &'static str {
        "android_client_with_cookies"
    }

    fn command(&self, request: &FetchRequest, auth: &AuthContext) -> Option<Vec<String>> {
        let cookies = auth.cookies_str()?;
        let mut cmd = argv(&[
            "yt-dlp",
            "--extractor-args",
            "youtube:player_client=android",
            "--user-agent",
            "com.google.android.youtube/19.09.37 (Linux; U; Android 11) gzip",
            "--merge-output-format",
            "mp4",
            "-f",
            "18/worst",
            "--cookies",
        ]);
        cmd.extend(argv(&[
            &cookies,
            "--sleep-interval",
            "3",
            "--max-sleep-interval",
            "7",
            "-o",
            &request.dest_str(),
            &request.url,
        ]));
        Some(cmd)
    }
}

/// Direct browser cookie store lookup; no cookie file needed.
pub struct BrowserCookies;

impl FetchStrategy for BrowserCookies {
    fn name(&self) -> &'static str {
        "browser_cookie_store"
    }

    fn command(&self, request: &FetchRequest, _auth: &AuthContext) -> Option<Vec<String>> {
        let mut cmd = argv(&[
            "yt-dlp",
            "--cookies-from-browser",
            "chrome",
            "--merge-output-format",
            "mp4",
            "-f",
            "18/worst",
            "--sleep-interval",
            "2",
            "-o",
        ]);
        cmd.extend(argv(&[&request.dest_str(), &request.url]));
        Some(cmd)
    }
}

/// Unauthenticated web client with browser-like headers.
pub struct WebClient;

impl FetchStrategy for WebClient {
    fn name(&self) -> &'static str {
        "web_client_with_headers"
    }

    fn command(&self, request: &FetchRequest, _auth: &AuthContext) -> Option<Vec<String>> {
        let mut cmd = argv(&[
            "yt-dlp",
            "--extractor-args",
            "youtube:player_client=web",
            "--user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            "--add-header",
            "Accept-Language:en-US,en;q=0.9",
            "--merge-output-format",
            "mp4",
            "-f",
            "18/worst",
            "--sleep-interval",
            "4",
            "-o",
        ]);
        cmd.extend(argv(&[&request.dest_str(), &request.url]));
        Some(cmd)
    }
}

/// Alternate resource-identifier form (canonical watch URL).
pub struct AlternateUrl;

impl FetchStrategy for AlternateUrl {
    fn name(&self) -> &'static str {
        "alternate_url_form"
    }

    fn command(&self, request: &FetchRequest, _auth: &AuthContext) -> Option<Vec<String>> {
        let alt = match alternate_watch_url(&request.url) {
            Some(alt) => alt,
            None => {
                debug!(url = %request.url, "no alternate URL form, skipping");
                return None;
            }
        };
        let mut cmd = argv(&[
            "yt-dlp",
            "--merge-output-format",
            "mp4",
            "-f",
            "18/worst",
            "--sleep-interval",
            "2",
            "-o",
        ]);
        cmd.extend(argv(&[&request.dest_str(), &alt]));
        Some(cmd)
    }
}

/// Minimal-parameter attempt.
pub struct Minimal;

impl FetchStrategy for Minimal {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn command(&self, request: &FetchRequest, _auth: &AuthContext) -> Option<Vec<String>> {
        let mut cmd = argv(&["yt-dlp", "-f", "worst", "-o"]);
        cmd.extend(argv(&[&request.dest_str(), &request.url]));
        Some(cmd)
    }
}

/// Generic header-spoofing attempt.
pub struct ProxyHeaders;

impl FetchStrategy for ProxyHeaders {
    fn name(&self) -> &'static str {
        "proxy_like_headers"
    }

    fn command(&self, request: &FetchRequest, _auth: &AuthContext) -> Option<Vec<String>> {
        let mut cmd = argv(&[
            "yt-dlp",
            "--user-agent",
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
            "--add-header",
            "Accept-Encoding:gzip, deflate, br",
            "-f",
            "worst",
            "-o",
        ]);
        cmd.extend(argv(&[&request.dest_str(), &request.url]));
        Some(cmd)
    }
}

/// The default strategy chain, most-authenticated first.
pub fn default_strategies() -> Vec<Box<dyn FetchStrategy>> {
    vec![
        Box::new(TvEmbeddedClient),
        Box::new(AndroidClient),
        Box::new(BrowserCookies),
        Box::new(WebClient),
        Box::new(AlternateUrl),
        Box::new(Minimal),
        Box::new(ProxyHeaders),
    ]
}
