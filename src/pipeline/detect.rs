//! Block-page detection: is this a captcha / verification wall or real content?
//!
//! Two rule sets, one per pipeline. The static set uses regexes because raw
//! HTTP responses need structural hints (a `<title>` mentioning
//! verification, a `captcha` class) to avoid flagging ordinary articles.
//! The rendered set is plain substring tokens over the lower-cased DOM.
//!
//! Rules are evaluated in list order; the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// One entry in a rule set.
#[derive(Debug)]
pub struct BlockIndicator {
    /// Name reported in the failure message.
    pub label: &'static str,
    matcher: Matcher,
}

#[derive(Debug)]
enum Matcher {
    Pattern(Regex),
    /// Must already be lower-case.
    Token(&'static str),
}

impl BlockIndicator {
    fn pattern(pattern: &str, label: &'static str) -> Self {
        Self {
            label,
            matcher: Matcher::Pattern(
                Regex::new(&format!("(?is){pattern}")).expect("static block pattern is valid"),
            ),
        }
    }

    fn token(token: &'static str) -> Self {
        Self {
            label: token,
            matcher: Matcher::Token(token),
        }
    }

    /// `lowered` is only consulted by token matchers.
    fn matches(&self, raw: &str, lowered: &str) -> bool {
        match &self.matcher {
            Matcher::Pattern(re) => re.is_match(raw),
            Matcher::Token(t) => lowered.contains(t),
        }
    }
}

/// Regex rules applied to raw HTTP responses.
pub static STATIC_RULES: Lazy<Vec<BlockIndicator>> = Lazy::new(|| {
    vec![
        BlockIndicator::pattern(r"环境异常.*完成验证", "环境异常验证页"),
        BlockIndicator::pattern(r"<title>.*验证.*</title>", "验证页面"),
        BlockIndicator::pattern(r#"class="captcha""#, "captcha"),
        BlockIndicator::pattern(
            r"Access Denied.*You don't have permission",
            "access denied",
        ),
        BlockIndicator::pattern(r"rate.?limit.*exceeded", "rate limit"),
    ]
});

/// Substring rules applied to browser-rendered markup.
pub static RENDERED_RULES: Lazy<Vec<BlockIndicator>> = Lazy::new(|| {
    ["环境异常", "完成验证", "captcha", "blocked", "access denied"]
        .into_iter()
        .map(BlockIndicator::token)
        .collect()
});

/// Run `rules` against `markup`, returning the first indicator that matches.
pub fn detect<'r>(rules: &'r [BlockIndicator], markup: &str) -> Option<&'r BlockIndicator> {
    let lowered = if rules.iter().any(|r| matches!(r.matcher, Matcher::Token(_))) {
        markup.to_lowercase()
    } else {
        String::new()
    };
    rules.iter().find(|r| r.matches(markup, &lowered))
}

/// [`detect`] with [`STATIC_RULES`].
pub fn detect_static(html: &str) -> Option<&'static BlockIndicator> {
    detect(&STATIC_RULES, html)
}

/// [`detect`] with [`RENDERED_RULES`].
pub fn detect_rendered(markup: &str) -> Option<&'static BlockIndicator> {
    detect(&RENDERED_RULES, markup)
}
