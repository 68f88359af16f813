//! G600 mode page layout and the three-mode mouse mapping
//!
//! Payload layout of one mode (153 bytes):
//! - 0x00-0x02: LED colour, normal state
//! - 0x03-0x04: Lighting effect and change rate
//! - 0x05-0x09: Reserved
//! - 0x0A: Poll rate
//! - 0x0B-0x10: DPI group (shift DPI, default index, four DPI slots)
//! - 0x11-0x1D: Reserved
//! - 0x1E-0x59: Button map, normal (20 x 3 bytes)
//! - 0x5A-0x5C: LED colour, G-shift state
//! - 0x5D-0x98: Button map, G-shift (20 x 3 bytes)

use crate::codes::{KB_SCAN_CODES, LIGHTING_EFFECTS, MOUSE_SCAN_CODES};
use crate::error::{BuildError, ConfigError, DecodeError, LoadError, PathSegment};
use crate::field::Field;
use crate::protocol::{MODE_COUNT, MODE_PAYLOAD_LEN, REPORT_IDS, frame_report, split_report};
use crate::scalar::PrecisionWarning;
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Buttons on the G600, including the tilt wheel directions
pub const BUTTON_COUNT: usize = 20;

pub const MODE_NAMES: [&str; MODE_COUNT] = ["Mode1 (default)", "Mode2", "Mode3"];

/// Key of the discriminator in the textual form
pub const CONFIG_FORMAT_KEY: &str = "configFormat";

pub const BUTTON_ACTION: Field = Field::Record(&[
    ("mouseScanCode", Field::Symbolic(&MOUSE_SCAN_CODES)),
    ("kbModifier", Field::Modifiers),
    ("kbScanCode", Field::Symbolic(&KB_SCAN_CODES)),
]);

pub const LED_COLORS: Field = Field::Record(&[
    ("Red", Field::Byte),
    ("Green", Field::Byte),
    ("Blue", Field::Byte),
]);

pub const LIGHTING: Field = Field::Record(&[
    ("Lighting Effect", Field::Symbolic(&LIGHTING_EFFECTS)),
    ("Lighting Change Rate (0-15)", Field::Byte),
]);

pub const DPI_GROUP: Field = Field::Record(&[
    ("DPI_SHIFT DPI", Field::Dpi),
    ("DefaultDPIIndex", Field::Byte),
    ("DPI1", Field::Dpi),
    ("DPI2", Field::Dpi),
    ("DPI3", Field::Dpi),
    ("DPI4", Field::Dpi),
]);

pub const BUTTON_MAP: Field = Field::Array {
    elem: &BUTTON_ACTION,
    len: BUTTON_COUNT,
};

pub const MODE_RECORD: Field = Field::Record(&[
    ("LedColorsNormal", LED_COLORS),
    ("Lighting", LIGHTING),
    (
        "Reserved0",
        Field::Array {
            elem: &Field::Byte,
            len: 5,
        },
    ),
    ("PollRate", Field::PollRate),
    ("DPI", DPI_GROUP),
    (
        "Reserved1",
        Field::Array {
            elem: &Field::Byte,
            len: 13,
        },
    ),
    ("buttonMapNormal", BUTTON_MAP),
    ("LedColorsShifted", LED_COLORS),
    ("buttonMapShifted", BUTTON_MAP),
]);

/// A whole mode page as plain integers
pub const RAW_MODE: Field = Field::Array {
    elem: &Field::Byte,
    len: MODE_PAYLOAD_LEN,
};

/// Which of the two interchangeable textual forms a document uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// Scan codes, modifiers, DPI and poll rate as readable tokens
    #[default]
    HumanReadable,
    /// Every byte as an integer; stable across vocabulary changes
    Bytes,
}

impl ConfigFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::HumanReadable => "HumanReadableFormat",
            ConfigFormat::Bytes => "BytesFormat",
        }
    }

    pub fn mode_field(&self) -> &'static Field {
        match self {
            ConfigFormat::HumanReadable => &MODE_RECORD,
            ConfigFormat::Bytes => &RAW_MODE,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HumanReadableFormat" => Ok(ConfigFormat::HumanReadable),
            "BytesFormat" => Ok(ConfigFormat::Bytes),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

pub type ModePayload = [u8; MODE_PAYLOAD_LEN];

/// The complete configuration of the mouse: three mode pages
#[derive(Clone, PartialEq, Eq)]
pub struct MouseMapping {
    modes: [ModePayload; MODE_COUNT],
}

/// A mapping built from a value, plus any rounding that happened on the way
#[derive(Debug, Clone)]
pub struct Built {
    pub mapping: MouseMapping,
    pub warnings: Vec<PrecisionWarning>,
}

impl MouseMapping {
    pub fn from_payloads(modes: [ModePayload; MODE_COUNT]) -> Self {
        Self { modes }
    }

    pub fn payloads(&self) -> &[ModePayload; MODE_COUNT] {
        &self.modes
    }

    /// Build from the three reports read off the control interface.
    ///
    /// The leading report id of each buffer is dropped; the rest must be
    /// exactly one mode page.
    pub fn from_mode_buffers<B: AsRef<[u8]>>(buffers: &[B]) -> Result<Self, DecodeError> {
        if buffers.len() != MODE_COUNT {
            return Err(DecodeError::ModeCount {
                expected: MODE_COUNT,
                actual: buffers.len(),
            });
        }
        let mut modes = [[0u8; MODE_PAYLOAD_LEN]; MODE_COUNT];
        for (index, (buffer, name)) in buffers.iter().zip(MODE_NAMES).enumerate() {
            let (_report_id, payload) = split_report(buffer.as_ref())
                .ok_or(DecodeError::EmptyModeBuffer { index })?;
            // validates the width before the copy
            MODE_RECORD
                .decode_exact(payload)
                .map_err(|e| e.within(PathSegment::Field(name)))?;
            modes[index].copy_from_slice(payload);
        }
        Ok(Self { modes })
    }

    /// Reports to send to the control interface, in mode order
    pub fn to_mode_buffers(&self) -> [Vec<u8>; MODE_COUNT] {
        std::array::from_fn(|i| frame_report(REPORT_IDS[i], &self.modes[i]))
    }

    /// Decoded view of a single mode page
    pub fn mode_value(&self, index: usize, format: ConfigFormat) -> Result<Value, DecodeError> {
        format
            .mode_field()
            .decode_exact(&self.modes[index])
            .map_err(|e| e.within(PathSegment::Field(MODE_NAMES[index])))
    }

    /// Structured form of the whole mapping, including the discriminator
    pub fn to_value(&self, format: ConfigFormat) -> Result<Value, DecodeError> {
        let mut entries = Vec::with_capacity(MODE_COUNT + 1);
        for (index, name) in MODE_NAMES.iter().enumerate() {
            entries.push((name.to_string(), self.mode_value(index, format)?));
        }
        entries.push((CONFIG_FORMAT_KEY.to_string(), Value::text(format.as_str())));
        Ok(Value::Record(entries))
    }

    /// Build from a structured document, dispatching on its discriminator
    pub fn from_value(value: &Value) -> Result<Built, LoadError> {
        let Value::Record(entries) = value else {
            return Err(ConfigError::NotAnObject.into());
        };
        let format: ConfigFormat = match value.get(CONFIG_FORMAT_KEY) {
            None => return Err(ConfigError::MissingFormat.into()),
            Some(Value::Text(name)) => name.parse()?,
            Some(_) => return Err(ConfigError::FormatNotText.into()),
        };
        let modes: Vec<(String, Value)> = entries
            .iter()
            .filter(|(key, _)| key != CONFIG_FORMAT_KEY)
            .cloned()
            .collect();
        Ok(Self::build_modes(&Value::Record(modes), format)?)
    }

    fn build_modes(modes: &Value, format: ConfigFormat) -> Result<Built, BuildError> {
        let schema = match format {
            ConfigFormat::HumanReadable => &SYMBOLIC_MAPPING,
            ConfigFormat::Bytes => &RAW_MAPPING,
        };
        let encoded = schema.encode_value(modes)?;

        let mut payloads = [[0u8; MODE_PAYLOAD_LEN]; MODE_COUNT];
        for (payload, chunk) in payloads
            .iter_mut()
            .zip(encoded.bytes.chunks_exact(MODE_PAYLOAD_LEN))
        {
            payload.copy_from_slice(chunk);
        }
        Ok(Built {
            mapping: Self { modes: payloads },
            warnings: encoded.warnings,
        })
    }

    /// Pretty JSON with 4-space indentation, keys in schema order
    pub fn to_json(&self, format: ConfigFormat) -> anyhow::Result<String> {
        let value = self.to_value(format)?;
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;
        Ok(String::from_utf8(out)?)
    }

    pub fn from_json(text: &str) -> Result<Built, LoadError> {
        let value: Value = serde_json::from_str(text).map_err(ConfigError::Syntax)?;
        Self::from_value(&value)
    }
}

impl fmt::Debug for MouseMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_struct("MouseMapping");
        for (name, payload) in MODE_NAMES.iter().zip(&self.modes) {
            list.field(name, &format_args!("{:02x?}", payload));
        }
        list.finish()
    }
}

const SYMBOLIC_MAPPING: Field = Field::Record(&[
    ("Mode1 (default)", MODE_RECORD),
    ("Mode2", MODE_RECORD),
    ("Mode3", MODE_RECORD),
]);

const RAW_MAPPING: Field = Field::Record(&[
    ("Mode1 (default)", RAW_MODE),
    ("Mode2", RAW_MODE),
    ("Mode3", RAW_MODE),
]);
