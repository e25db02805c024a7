//! Web font loading for typography tokens
//!
//! Changing `font-sans`, `font-serif` or `font-mono` applies the token at
//! once; the font itself loads in the background. Each token has at most one
//! wait in flight, and a newer request for the same token aborts the older
//! one.

use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::task::{AbortHandle, JoinHandle};

use crate::config::FontConfig;
use crate::tokens::StyleToken;

/// Families provided by the platform; these are never fetched
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "math",
    "emoji",
    "fangsong",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "-apple-system",
    "blinkmacsystemfont",
    "inherit",
    "initial",
    "unset",
];

/// Remote font provider
pub trait FontService: Send + Sync + 'static {
    /// Request the stylesheet for `family`. `false` when the request could not be made.
    fn inject_stylesheet(&self, family: &str) -> bool;

    /// Whether `family` is ready to render
    fn is_available(&self, family: &str) -> bool;
}

/// First family of a `font-family` stack, unquoted, if it needs loading.
///
/// ```
/// use tinct_theme::fonts::primary_family;
///
/// assert_eq!(primary_family("\"Inter\", sans-serif").as_deref(), Some("Inter"));
/// assert_eq!(primary_family("system-ui, sans-serif"), None);
/// ```
pub fn primary_family(stack: &str) -> Option<String> {
    let mut quote: Option<char> = None;
    let mut end = stack.len();
    for (i, c) in stack.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, ',') => {
                end = i;
                break;
            }
            _ => {}
        }
    }

    let first = stack[..end].trim();
    let family = first
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .or_else(|| first.strip_prefix('\'').and_then(|f| f.strip_suffix('\'')))
        .unwrap_or(first)
        .trim();

    let generic = GENERIC_FAMILIES
        .iter()
        .any(|g| g.eq_ignore_ascii_case(family));
    if family.is_empty() || generic {
        None
    } else {
        Some(family.to_string())
    }
}

/// A pending font load
#[derive(Debug)]
pub struct FontLoad {
    family: String,
    task: JoinHandle<bool>,
}

impl FontLoad {
    pub fn family(&self) -> &str {
        &self.family
    }

    /// `true` once the font is available; `false` on timeout, failure, or
    /// when superseded by a newer request.
    pub async fn wait(self) -> bool {
        match self.task.await {
            Ok(loaded) => loaded,
            Err(e) if e.is_cancelled() => {
                tracing::debug!("font load for {:?} was superseded", self.family);
                false
            }
            Err(e) => {
                tracing::warn!("font load for {:?} failed: {}", self.family, e);
                false
            }
        }
    }
}

/// Starts font loads and keeps one in-flight wait per token
pub struct FontLoader {
    service: Arc<dyn FontService>,
    timeout: Duration,
    poll_interval: Duration,
    in_flight: FxHashMap<StyleToken, AbortHandle>,
}

impl FontLoader {
    pub fn new(service: Arc<dyn FontService>, config: &FontConfig) -> Self {
        Self {
            service,
            timeout: config.timeout(),
            poll_interval: config.poll_interval(),
            in_flight: FxHashMap::default(),
        }
    }

    /// Load the primary family of `stack` for `token`.
    ///
    /// Any earlier load for `token` is aborted, even when `stack` needs no
    /// loading. Returns `None` when nothing was started, including when no
    /// tokio runtime is running.
    pub fn load(&mut self, token: StyleToken, stack: &str) -> Option<FontLoad> {
        self.cancel(token);

        let family = primary_family(stack)?;
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::warn!("no async runtime; not loading font {:?}", family);
                return None;
            }
        };

        tracing::debug!("loading font {:?} for {}", family, token);
        let service = Arc::clone(&self.service);
        let (timeout, poll_interval) = (self.timeout, self.poll_interval);
        let name = family.clone();

        let task = runtime.spawn(async move {
            if !service.inject_stylesheet(&name) {
                tracing::warn!("font stylesheet for {:?} could not be injected", name);
                return false;
            }

            let available = async {
                loop {
                    if service.is_available(&name) {
                        return true;
                    }
                    tokio::time::sleep(poll_interval).await;
                }
            };

            let loaded = tokio::time::timeout(timeout, available)
                .await
                .unwrap_or(false);
            if !loaded {
                tracing::debug!("font {:?} not available after {:?}", name, timeout);
            }
            loaded
        });

        self.in_flight.insert(token, task.abort_handle());
        Some(FontLoad { family, task })
    }

    /// Abort the in-flight load for `token`, if any
    pub fn cancel(&mut self, token: StyleToken) {
        if let Some(previous) = self.in_flight.remove(&token) {
            if !previous.is_finished() {
                tracing::trace!("aborting font load for {}", token);
                previous.abort();
            }
        }
    }

    pub fn is_loading(&self, token: StyleToken) -> bool {
        self.in_flight
            .get(&token)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for FontLoader {
    fn drop(&mut self) {
        for handle in self.in_flight.values() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for FontLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLoader")
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Becomes available after `ready_after` polls; never when `None`
    struct FakeFonts {
        ready_after: Option<usize>,
        polls: AtomicUsize,
        injected: Mutex<Vec<String>>,
    }

    impl FakeFonts {
        fn new(ready_after: Option<usize>) -> Arc<Self> {
            Arc::new(Self {
                ready_after,
                polls: AtomicUsize::new(0),
                injected: Mutex::new(Vec::new()),
            })
        }
    }

    impl FontService for FakeFonts {
        fn inject_stylesheet(&self, family: &str) -> bool {
            self.injected.lock().unwrap().push(family.to_string());
            true
        }

        fn is_available(&self, _family: &str) -> bool {
            let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            self.ready_after.is_some_and(|n| polls >= n)
        }
    }

    #[test]
    fn primary_family_parsing() {
        assert_eq!(primary_family("Inter").as_deref(), Some("Inter"));
        assert_eq!(
            primary_family("'Fira Code', ui-monospace").as_deref(),
            Some("Fira Code")
        );
        assert_eq!(
            primary_family("\"Odd, Name\", serif").as_deref(),
            Some("Odd, Name")
        );
        assert_eq!(primary_family("  "), None);
        assert_eq!(primary_family("Sans-Serif"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_once_available() {
        let fonts = FakeFonts::new(Some(3));
        let mut loader = FontLoader::new(fonts.clone(), &FontConfig::default());

        let load = loader.load(StyleToken::FontSans, "Inter, sans-serif").unwrap();
        assert_eq!(load.family(), "Inter");
        assert!(load.wait().await);
        assert_eq!(fonts.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_with_false() {
        let fonts = FakeFonts::new(None);
        let mut loader = FontLoader::new(fonts.clone(), &FontConfig::default());

        let load = loader.load(StyleToken::FontMono, "\"JetBrains Mono\"").unwrap();
        assert!(!load.wait().await);
        // 3s at 100ms intervals
        assert!(fonts.polls.load(Ordering::SeqCst) >= 30);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_request_aborts_older_one() {
        let fonts = FakeFonts::new(None);
        let mut loader = FontLoader::new(fonts.clone(), &FontConfig::default());

        let first = loader.load(StyleToken::FontSans, "Inter").unwrap();
        let second = loader.load(StyleToken::FontSans, "Roboto").unwrap();
        let other = loader.load(StyleToken::FontSerif, "Lora").unwrap();

        assert!(!first.wait().await);
        assert!(loader.is_loading(StyleToken::FontSans));
        assert!(loader.is_loading(StyleToken::FontSerif));

        assert!(!second.wait().await);
        assert!(!other.wait().await);
        assert!(!loader.is_loading(StyleToken::FontSans));
    }

    #[tokio::test(start_paused = true)]
    async fn generic_stack_only_cancels() {
        let fonts = FakeFonts::new(None);
        let mut loader = FontLoader::new(fonts.clone(), &FontConfig::default());

        let _pending = loader.load(StyleToken::FontSans, "Inter").unwrap();
        assert!(loader.load(StyleToken::FontSans, "system-ui, sans-serif").is_none());
        assert!(!loader.is_loading(StyleToken::FontSans));
    }

    #[test]
    fn no_runtime_starts_nothing() {
        let fonts = FakeFonts::new(Some(1));
        let mut loader = FontLoader::new(fonts.clone(), &FontConfig::default());
        assert!(loader.load(StyleToken::FontSans, "Inter").is_none());
        assert!(fonts.injected.lock().unwrap().is_empty());
    }
}
