//! `${VAR}` and `${VAR:-default}` expansion for config strings.

use crate::ConfigError;

/// Unset variable reported by the lookup closure.
struct Unset(String);

/// Expand environment variable references in `value`.
///
/// Only the braced form is recognized; a bare `$name` is left alone so URLs
/// and paths containing `$` survive unchanged. `field` names the config key
/// in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, Unset> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| Unset(name.to_owned()))
    };

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}
