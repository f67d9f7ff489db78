//! Touch/mobile classification used to decide auto-play on readiness.

use regex::Regex;
use std::sync::OnceLock;

/// Read-only "is this a touch/mobile viewing context" check.
pub trait DeviceProbe {
    fn is_touch_device(&self) -> bool;
}

impl<F> DeviceProbe for F
where
    F: Fn() -> bool,
{
    fn is_touch_device(&self) -> bool {
        self()
    }
}

fn mobile_user_agent_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)android|webos|iphone|ipad|ipod|blackberry|bb10|iemobile|opera mini|windows phone|kindle|silk/|mobile",
        )
        .ok()
    })
    .as_ref()
}

/// Returns true if the user agent identifies a phone or tablet browser.
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    mobile_user_agent_regex().is_some_and(|re| re.is_match(user_agent))
}

/// Classifies the viewing context from a captured user-agent string.
#[derive(Debug, Clone, Default)]
pub struct UserAgentProbe {
    user_agent: String,
}

impl UserAgentProbe {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl DeviceProbe for UserAgentProbe {
    fn is_touch_device(&self) -> bool {
        is_mobile_user_agent(&self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const DESKTOP_CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const DESKTOP_FIREFOX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile_user_agent(IPHONE));
        assert!(is_mobile_user_agent(ANDROID));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
    }

    #[test]
    fn test_desktop_user_agents() {
        assert!(!is_mobile_user_agent(DESKTOP_CHROME));
        assert!(!is_mobile_user_agent(DESKTOP_FIREFOX));
        assert!(!is_mobile_user_agent(""));
    }

    #[test]
    fn test_user_agent_probe() {
        assert!(UserAgentProbe::new(ANDROID).is_touch_device());
        assert!(!UserAgentProbe::new(DESKTOP_CHROME).is_touch_device());
    }

    #[test]
    fn test_closure_probe() {
        let probe = || true;
        assert!(probe.is_touch_device());
    }
}
