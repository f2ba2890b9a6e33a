//! Video-page URL classifier
//!
//! A URL is supported when its host contains one of the known portal domains
//! and the URL text contains a match for one of that portal's path patterns.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::Url;

/// Portal domain and the path patterns a video page on it must match
#[derive(Debug, Clone, Copy)]
pub struct DomainRule {
    pub domain: &'static str,
    pub patterns: &'static [&'static str],
}

/// Known portals
pub const SUPPORTED_DOMAINS: [DomainRule; 11] = [
    DomainRule {
        domain: "youku.com",
        patterns: &[r"v\.youku\.com/v_show/id_[^?]+"],
    },
    DomainRule {
        domain: "iqiyi.com",
        patterns: &[r"www\.iqiyi\.com/[vw]_[^?]+"],
    },
    DomainRule {
        domain: "v.qq.com",
        patterns: &[r"v\.qq\.com/x/cover/", r"v\.qq\.com/x/page/[^?]+"],
    },
    DomainRule {
        domain: "bilibili.com",
        patterns: &[r"www\.bilibili\.com/video/[^?]+"],
    },
    DomainRule {
        domain: "mgtv.com",
        patterns: &[r"www\.mgtv\.com/b/[^?]+"],
    },
    DomainRule {
        domain: "le.com",
        patterns: &[r"www\.le\.com/ptv/vplay/[^?]+"],
    },
    DomainRule {
        domain: "sohu.com",
        patterns: &[r"tv\.sohu\.com/v/[^?]+"],
    },
    DomainRule {
        domain: "1905.com",
        patterns: &[r"www\.1905\.com/vod/play/[^?]+"],
    },
    DomainRule {
        domain: "pptv.com",
        patterns: &[r"v\.pptv\.com/show/[^?]+"],
    },
    DomainRule {
        domain: "fun.tv",
        patterns: &[r"www\.fun\.tv/vplay/[^?]+"],
    },
    DomainRule {
        domain: "acfun.cn",
        patterns: &[r"www\.acfun\.cn/v/[^?]+"],
    },
];

#[derive(Debug)]
struct CompiledRule {
    domain: &'static str,
    patterns: Vec<Regex>,
}

/// Classifier compiled from a fixed rule table
#[derive(Debug)]
pub struct UrlClassifier {
    rules: Vec<CompiledRule>,
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self::new(&SUPPORTED_DOMAINS)
    }
}

impl UrlClassifier {
    /// Compile a rule table. Patterns that fail to compile are skipped with a
    /// warning, so the rule can never match.
    pub fn new(rules: &[DomainRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CompiledRule {
                domain: rule.domain,
                patterns: rule
                    .patterns
                    .iter()
                    .filter_map(|pattern| match Regex::new(pattern) {
                        Ok(regex) => Some(regex),
                        Err(e) => {
                            warn!("⚠️ Skipping invalid pattern for {}: {}", rule.domain, e);
                            None
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { rules }
    }

    /// Whether `url` is a recognised video page. Never fails.
    pub fn is_supported_video_url(&self, url: &str) -> bool {
        self.classify(url).is_some()
    }

    /// Domain of the first rule matching `url`
    pub fn classify(&self, url: &str) -> Option<&'static str> {
        if url.is_empty() {
            return None;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("URL rejected ({}): {:?}", e, url);
                return None;
            }
        };
        let host = parsed.host_str()?;

        self.rules
            .iter()
            .find(|rule| {
                host.contains(rule.domain) && rule.patterns.iter().any(|p| p.is_match(url))
            })
            .map(|rule| rule.domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.domain)
    }
}

/// Check `url` against the built-in portal table
pub fn is_supported_video_url(url: &str) -> bool {
    static DEFAULT_CLASSIFIER: OnceLock<UrlClassifier> = OnceLock::new();
    DEFAULT_CLASSIFIER
        .get_or_init(UrlClassifier::default)
        .is_supported_video_url(url)
}
