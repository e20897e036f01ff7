//! Command payload structures
//!
//! The payload must be a single JSON object. Fields inside it are decoded
//! independently: a field with the wrong type, an out-of-range value or an
//! incomplete color group is treated as absent and the other fields still
//! apply.

use serde::{Deserialize, Serialize};

/// RGB color group.
///
/// All three channels are required, so a partial color group is dropped
/// instead of silently zeroing the missing channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaRgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HaRgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Light command payload received on the command topic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HaLightCommand<'a> {
    /// Requested state ("ON" or "OFF")
    pub state: Option<&'a str>,
    /// Requested RGB color
    pub color: Option<HaRgbColor>,
    /// Requested brightness (0-255)
    pub brightness: Option<u8>,
    /// Requested effect name
    pub effect: Option<&'a str>,
    /// Requested white channel level (0-255)
    pub white_value: Option<u8>,
}

/// Any JSON object; every key is skipped.
#[derive(Deserialize)]
#[allow(clippy::empty_structs_with_brackets)]
struct CommandObject {}

#[derive(Deserialize)]
struct StateField<'a> {
    #[serde(default, borrow)]
    state: Option<&'a str>,
}

#[derive(Deserialize)]
struct ColorField {
    #[serde(default)]
    color: Option<HaRgbColor>,
}

#[derive(Deserialize)]
struct BrightnessField {
    #[serde(default)]
    brightness: Option<u8>,
}

#[derive(Deserialize)]
struct EffectField<'a> {
    #[serde(default, borrow)]
    effect: Option<&'a str>,
}

#[derive(Deserialize)]
struct WhiteField {
    #[serde(default)]
    white_value: Option<u8>,
}

/// Decode one field wrapper, treating any decode error as "absent"
fn field<'a, T: Deserialize<'a>>(payload: &'a [u8]) -> Option<T> {
    serde_json_core::from_slice::<T>(payload)
        .ok()
        .map(|(value, _)| value)
}

/// Decode a command payload.
///
/// Fails only if the payload is not one well-formed JSON object; see the
/// module docs for how individual fields are treated.
pub fn parse_light_command(
    payload: &[u8],
) -> Result<HaLightCommand<'_>, serde_json_core::de::Error> {
    serde_json_core::from_slice::<CommandObject>(payload)?;

    Ok(HaLightCommand {
        state: field::<StateField<'_>>(payload).and_then(|f| f.state),
        color: field::<ColorField>(payload).and_then(|f| f.color),
        brightness: field::<BrightnessField>(payload).and_then(|f| f.brightness),
        effect: field::<EffectField<'_>>(payload).and_then(|f| f.effect),
        white_value: field::<WhiteField>(payload).and_then(|f| f.white_value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command() {
        let payload = concat!(
            r#"{"state":"ON","color":{"r":255,"g":128,"b":0},"#,
            r#""brightness":200,"effect":"flash","white_value":12}"#,
        );
        let command = parse_light_command(payload.as_bytes()).unwrap();

        assert_eq!(
            command,
            HaLightCommand {
                state: Some("ON"),
                color: Some(HaRgbColor::new(255, 128, 0)),
                brightness: Some(200),
                effect: Some("flash"),
                white_value: Some(12),
            }
        );
    }

    #[test]
    fn empty_object_has_no_fields() {
        let command = parse_light_command(b"{}").unwrap();
        assert_eq!(command, HaLightCommand::default());
    }

    #[test]
    fn null_fields_are_absent() {
        let command = parse_light_command(br#"{"state":null,"brightness":null}"#).unwrap();
        assert_eq!(command, HaLightCommand::default());
    }

    #[test]
    fn whitespace_is_accepted() {
        let payload = b"{ \"state\" : \"OFF\" ,\n  \"white_value\" : 3 }";
        let command = parse_light_command(payload).unwrap();

        assert_eq!(command.state, Some("OFF"));
        assert_eq!(command.white_value, Some(3));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let command =
            parse_light_command(br#"{"transition":2,"extra":{"a":[1,2]},"state":"ON"}"#).unwrap();
        assert_eq!(command.state, Some("ON"));
    }

    #[test]
    fn partial_color_drops_only_the_color() {
        let command = parse_light_command(br#"{"color":{"r":10,"g":20},"brightness":7}"#).unwrap();

        assert_eq!(command.color, None);
        assert_eq!(command.brightness, Some(7));
    }

    #[test]
    fn out_of_range_values_drop_only_that_field() {
        let command =
            parse_light_command(br#"{"state":"ON","brightness":300,"white_value":-1}"#).unwrap();

        assert_eq!(command.state, Some("ON"));
        assert_eq!(command.brightness, None);
        assert_eq!(command.white_value, None);
    }

    #[test]
    fn wrong_types_drop_only_that_field() {
        let payload =
            br#"{"state":1,"effect":5,"brightness":"high","color":"red","white_value":9}"#;
        let command = parse_light_command(payload).unwrap();

        assert_eq!(
            command,
            HaLightCommand {
                white_value: Some(9),
                ..HaLightCommand::default()
            }
        );
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(parse_light_command(b"").is_err());
        assert!(parse_light_command(b"ON").is_err());
        assert!(parse_light_command(b"[1,2]").is_err());
        assert!(parse_light_command(br#"{"state":"ON""#).is_err());
        assert!(parse_light_command(br#"{"state":"ON"} x"#).is_err());
    }
}
