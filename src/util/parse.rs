use crate::error::config::ConfigError;

/// Parses a u64 value from an environment variable's raw value
///
/// # Arguments
/// - `name` - Name of the environment variable, used in the error
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(ConfigError::InvalidEnvVar)` - Failed to parse the string as a u64
pub fn parse_u64_from_string(name: &str, value: String) -> Result<u64, ConfigError> {
    let result = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.clone(),
            source: e,
        })?;

    Ok(result)
}

/// Parses a u32 value from an environment variable's raw value
///
/// # Returns
/// - `Ok(u32)` - Successfully parsed String to `u32`
/// - `Err(ConfigError::InvalidEnvVar)` - Not a number or out of range for `u32`
pub fn parse_u32_from_string(name: &str, value: String) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.clone(),
            source: e,
        })
}

/// Rejects a parsed value of zero
///
/// # Returns
/// - `Ok(value)` - The value is positive
/// - `Err(ConfigError::ZeroValue)` - The value is zero
pub fn require_non_zero<T>(name: &str, value: T) -> Result<T, ConfigError>
where
    T: Default + PartialEq,
{
    if value == T::default() {
        return Err(ConfigError::ZeroValue(name.to_string()));
    }

    Ok(value)
}
