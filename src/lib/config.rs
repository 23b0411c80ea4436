//! Build-time configuration for the backend endpoint and flow timings with an
//! optional runtime override. In the browser the override is read from
//! `window.ALUMNI_CONFIG` so static deployments can change endpoints without
//! rebuilding; on host targets it is read from the process environment.
//! Configuration values are public; do not store secrets here.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";
/// Seconds a user waits between OTP resends.
pub const DEFAULT_RESEND_COOLDOWN_SECS: u32 = 30;
/// Delay before following a redirect that announces success.
pub const DEFAULT_REDIRECT_DELAY_MS: u32 = 2_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

#[cfg(not(target_arch = "wasm32"))]
const ENV_API_BASE_URL: &str = "ALUMNI_API_BASE_URL";
#[cfg(not(target_arch = "wasm32"))]
const ENV_RESEND_COOLDOWN_SECS: &str = "ALUMNI_RESEND_COOLDOWN_SECS";
#[cfg(not(target_arch = "wasm32"))]
const ENV_REDIRECT_DELAY_MS: &str = "ALUMNI_REDIRECT_DELAY_MS";
#[cfg(not(target_arch = "wasm32"))]
const ENV_REQUEST_TIMEOUT_MS: &str = "ALUMNI_REQUEST_TIMEOUT_MS";

/// Client configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub resend_cooldown_secs: u32,
    pub redirect_delay_ms: u32,
    pub request_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            resend_cooldown_secs: DEFAULT_RESEND_COOLDOWN_SECS,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let build_time = RuntimeConfig {
            api_base_url: option_env!("ALUMNI_API_BASE_URL").and_then(normalize_runtime_value),
            resend_cooldown_secs: option_env!("ALUMNI_RESEND_COOLDOWN_SECS").and_then(parse_number),
            redirect_delay_ms: option_env!("ALUMNI_REDIRECT_DELAY_MS").and_then(parse_number),
            request_timeout_ms: option_env!("ALUMNI_REQUEST_TIMEOUT_MS").and_then(parse_number),
        };

        let mut config = Self::default();
        apply_runtime_overrides(&mut config, build_time);

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    #[must_use]
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.redirect_delay_ms))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.request_timeout_ms))
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    resend_cooldown_secs: Option<u32>,
    redirect_delay_ms: Option<u32>,
    request_timeout_ms: Option<u32>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.resend_cooldown_secs {
        config.resend_cooldown_secs = value;
    }
    if let Some(value) = runtime.redirect_delay_ms {
        config.redirect_delay_ms = value;
    }
    if let Some(value) = runtime.request_timeout_ms {
        // a zero timeout would fail every request
        if value > 0 {
            config.request_timeout_ms = value;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("ALUMNI_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        resend_cooldown_secs: read_runtime_value(&object, "resend_cooldown_secs")
            .as_deref()
            .and_then(parse_number),
        redirect_delay_ms: read_runtime_value(&object, "redirect_delay_ms")
            .as_deref()
            .and_then(parse_number),
        request_timeout_ms: read_runtime_value(&object, "request_timeout_ms")
            .as_deref()
            .and_then(parse_number),
    })
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let value = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| number.to_string()))?;
    normalize_runtime_value(&value)
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    let read = |key: &str| {
        std::env::var(key)
            .ok()
            .and_then(|value| normalize_runtime_value(&value))
    };

    let runtime = RuntimeConfig {
        api_base_url: read(ENV_API_BASE_URL),
        resend_cooldown_secs: read(ENV_RESEND_COOLDOWN_SECS)
            .as_deref()
            .and_then(parse_number),
        redirect_delay_ms: read(ENV_REDIRECT_DELAY_MS)
            .as_deref()
            .and_then(parse_number),
        request_timeout_ms: read(ENV_REQUEST_TIMEOUT_MS)
            .as_deref()
            .and_then(parse_number),
    };

    Some(runtime)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_number(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    trimmed
        .parse::<u32>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_u32))
}

// bounds are checked before the cast
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_u32(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ENV_API_BASE_URL, ENV_REQUEST_TIMEOUT_MS, ENV_RESEND_COOLDOWN_SECS,
        RuntimeConfig, apply_runtime_overrides, normalize_runtime_value, parse_number,
    };

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://alumni.example/api/ "),
            Some("https://alumni.example/api/".to_string())
        );
    }

    #[test]
    fn parse_number_accepts_integers_only() {
        assert_eq!(parse_number("30"), Some(30));
        assert_eq!(parse_number(" 45 "), Some(45));
        assert_eq!(parse_number("12.0"), Some(12));
        assert_eq!(parse_number("12.5"), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number("soon"), None);
    }

    #[test]
    fn apply_runtime_overrides_ignores_missing_values() {
        let mut config = AppConfig::default();
        apply_runtime_overrides(&mut config, RuntimeConfig::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override/"),
            resend_cooldown_secs: Some(5),
            redirect_delay_ms: Some(0),
            request_timeout_ms: Some(2_500),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override/");
        assert_eq!(config.resend_cooldown_secs, 5);
        assert_eq!(config.redirect_delay_ms, 0);
        assert_eq!(config.request_timeout_ms, 2_500);
    }

    #[test]
    fn zero_timeout_override_is_ignored() {
        let mut config = AppConfig::default();
        let runtime = RuntimeConfig {
            request_timeout_ms: Some(0),
            ..RuntimeConfig::default()
        };
        apply_runtime_overrides(&mut config, runtime);
        assert_eq!(config.request_timeout_ms, super::DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                (ENV_API_BASE_URL, Some("https://alumni.example/api/")),
                (ENV_RESEND_COOLDOWN_SECS, Some("10")),
                (ENV_REQUEST_TIMEOUT_MS, Some("   ")),
            ],
            || {
                let config = AppConfig::load();
                assert_eq!(config.api_base_url, "https://alumni.example/api/");
                assert_eq!(config.resend_cooldown_secs, 10);
                assert_eq!(
                    config.request_timeout_ms,
                    super::DEFAULT_REQUEST_TIMEOUT_MS
                );
            },
        );
    }

    #[test]
    fn load_defaults_to_thirty_second_cooldown() {
        temp_env::with_vars_unset(
            [
                ENV_API_BASE_URL,
                ENV_RESEND_COOLDOWN_SECS,
                super::ENV_REDIRECT_DELAY_MS,
                ENV_REQUEST_TIMEOUT_MS,
            ],
            || {
                let config = AppConfig::load();
                assert_eq!(config.resend_cooldown_secs, 30);
                assert_eq!(config.redirect_delay().as_millis(), 2_000);
            },
        );
    }
}
