use anyhow::Context;
pub use datalake_env::Environment;

/// The bucket every uploaded object is copied into unless `DESTINATION_BUCKET` is set
pub const DEFAULT_DESTINATION_BUCKET: &str = "datalake-intro";

/// The configuration parameters for the lambda.
///
/// Everything is pulled from environment variables and every variable is optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// The bucket objects are copied into
    pub destination_bucket: String,

    /// Whether object keys from the notification are url decoded before copying.
    /// S3 url encodes keys in event notifications, so keys with spaces or special
    /// characters are only found when this is enabled.
    pub decode_object_keys: bool,

    /// The environment we are in
    pub environment: Environment,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DESTINATION_BUCKET, false, Environment::Production)
    }
}

impl Config {
    pub fn new(
        destination_bucket: &str,
        decode_object_keys: bool,
        environment: Environment,
    ) -> Self {
        Config {
            destination_bucket: destination_bucket.to_string(),
            decode_object_keys,
            environment,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let destination_bucket = std::env::var("DESTINATION_BUCKET")
            .unwrap_or_else(|_| DEFAULT_DESTINATION_BUCKET.to_string());

        let decode_object_keys =
            decode_object_keys_from(std::env::var("DECODE_OBJECT_KEYS").ok().as_deref())?;

        let environment = Environment::new_or_prod();

        Ok(Config::new(
            destination_bucket.as_str(),
            decode_object_keys,
            environment,
        ))
    }
}

/// Interprets the raw `DECODE_OBJECT_KEYS` value, unset means disabled
fn decode_object_keys_from(value: Option<&str>) -> anyhow::Result<bool> {
    match value {
        Some(value) => parse_flag(value)
            .with_context(|| format!("DECODE_OBJECT_KEYS is not a boolean: {value}")),
        None => Ok(false),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_copies_into_datalake_intro() {
        let config = Config::default();
        assert_eq!(config.destination_bucket, "datalake-intro");
        assert!(!config.decode_object_keys);
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 1 "), Some(true));
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), Some(false));
    }

    #[test]
    fn decode_object_keys_defaults_to_disabled() {
        assert!(!decode_object_keys_from(None).unwrap());
        assert!(decode_object_keys_from(Some("true")).unwrap());
    }

    #[test]
    fn decode_object_keys_rejects_unparsable_value() {
        let err = decode_object_keys_from(Some("enabled")).unwrap_err();
        assert_eq!(err.to_string(), "DECODE_OBJECT_KEYS is not a boolean: enabled");
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        assert_eq!(parse_flag("enabled"), None);
        assert_eq!(parse_flag("2"), None);
    }
}
