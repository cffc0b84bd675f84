//! The parameter model: the tagged value type every decoded field is expressed in.

/// An unsigned integer that remembers the wire width it was read at.
///
/// The width is part of the value's identity, not just a rendering hint: the
/// canonical string form (`Numeric::to_hex`) zero-pads to `2 * width_bytes`
/// hex digits, so a `U8(0x07)` prints as `0x07` while a `U32(0x07)` prints as
/// `0x00000007`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl Numeric {
    /// Lowercase hex form, zero-padded to the variant's byte width times two.
    pub fn to_hex(self) -> String {
        match self {
            Numeric::U8(v) => format!("0x{v:02x}"),
            Numeric::U16(v) => format!("0x{v:04x}"),
            Numeric::U32(v) => format!("0x{v:08x}"),
            Numeric::U64(v) => format!("0x{v:016x}"),
        }
    }

    /// The value widened to `u64`, regardless of the stored width.
    pub fn as_u64(self) -> u64 {
        match self {
            Numeric::U8(v) => v as u64,
            Numeric::U16(v) => v as u64,
            Numeric::U32(v) => v as u64,
            Numeric::U64(v) => v,
        }
    }
}

/// A single decoded field, tagged by what it represents.
///
/// `Param` values are produced once and never mutated afterwards; a decoder
/// builds a sequence of them (a [`Params`]) describing a section's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// An empty separator line.
    Blank,
    /// A section/sub-block title; the text lives in the "value" slot, name is empty.
    Heading(String),
    /// Preformatted text passed through verbatim (may contain embedded newlines).
    Raw(String),
    /// A named true/false field.
    Boolean(String, bool),
    /// A named field holding a width-tagged unsigned integer.
    Numeric(String, Numeric),
    /// A named field holding text, trimmed of trailing ASCII whitespace.
    String(String, String),
}

impl Param {
    /// Builds a `String` param, trimming trailing ASCII whitespace from `value`.
    pub fn string(name: impl Into<String>, value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim_end_matches(|c: char| c.is_ascii_whitespace());
        Param::String(name.into(), trimmed.to_string())
    }

    /// Builds a `Boolean` param.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Param::Boolean(name.into(), value)
    }

    /// Builds a `Numeric` param.
    pub fn numeric(name: impl Into<String>, value: Numeric) -> Self {
        Param::Numeric(name.into(), value)
    }

    /// Builds a `Heading` param.
    pub fn heading(title: impl Into<String>) -> Self {
        Param::Heading(title.into())
    }

    /// Builds a `Raw` param.
    pub fn raw(text: impl Into<String>) -> Self {
        Param::Raw(text.into())
    }

    /// The field name; empty for `Blank`, `Heading` and `Raw`.
    pub fn name(&self) -> &str {
        match self {
            Param::Blank | Param::Heading(_) | Param::Raw(_) => "",
            Param::Boolean(name, _) | Param::Numeric(name, _) | Param::String(name, _) => name,
        }
    }

    /// The canonical string form of the value, per the table in the parameter model.
    pub fn value(&self) -> String {
        match self {
            Param::Blank => String::new(),
            Param::Heading(title) => title.clone(),
            Param::Raw(text) => text.clone(),
            Param::Boolean(_, v) => if *v { "True" } else { "False" }.to_string(),
            Param::Numeric(_, n) => n.to_hex(),
            Param::String(_, text) => text.clone(),
        }
    }
}

/// An ordered sequence of [`Param`]s; insertion order is significant.
pub type Params = Vec<Param>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_canonical_form_widths() {
        assert_eq!(Numeric::U8(0x7).to_hex(), "0x07");
        assert_eq!(Numeric::U16(0x7).to_hex(), "0x0007");
        assert_eq!(Numeric::U32(0x7).to_hex(), "0x00000007");
        assert_eq!(Numeric::U64(0x7).to_hex(), "0x0000000000000007");
    }

    #[test]
    fn string_param_trims_only_trailing_whitespace() {
        let p = Param::string("Name", "  value  ");
        assert_eq!(p.value(), "  value");
    }

    #[test]
    fn blank_and_heading_have_empty_name() {
        assert_eq!(Param::Blank.name(), "");
        assert_eq!(Param::heading("Title").name(), "");
        assert_eq!(Param::heading("Title").value(), "Title");
    }

    #[test]
    fn boolean_value_form() {
        assert_eq!(Param::boolean("Flag", true).value(), "True");
        assert_eq!(Param::boolean("Flag", false).value(), "False");
    }
}
