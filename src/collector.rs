//! The parameter-collector callback interface a decoder emits fields through,
//! and the core's default `Params`-appending implementation of it.
use crate::hexdump::hex_dump;
use crate::param::{Numeric, Param, Params};

/// A sink a section (or a plugin decoder) emits named/typed fields into,
/// without knowing how the caller will ultimately render them.
///
/// A collector does not own the storage it writes into; an implementation
/// typically borrows a [`Params`] for the duration of one decode call and
/// must not be retained past it.
pub trait ParamCollector {
    /// Emits a `String` param; trims trailing whitespace. A missing or empty
    /// `value` still produces the param, with an empty value.
    fn emit_string(&mut self, name: &str, value: Option<&str>);
    /// Emits a `Boolean` param.
    fn emit_bool(&mut self, name: &str, value: bool);
    /// Emits a width-classified `Numeric` param from a signed 32-bit value
    /// (see the module-level numeric classification rule).
    fn emit_number_i32(&mut self, name: &str, fmt: &str, value: i32);
    /// Emits a width-classified `Numeric` param from an unsigned 64-bit value.
    fn emit_number_u64(&mut self, name: &str, fmt: &str, value: u64);
    /// Emits a `Raw` param containing a canonical hex dump of `data`.
    fn emit_hex_dump(&mut self, data: &[u8]);
    /// Emits a `Heading` param.
    fn emit_heading(&mut self, title: &str);
    /// Emits a `Blank` separator param.
    fn emit_blank(&mut self);
    /// Emits a `Raw` param containing `text` verbatim.
    fn emit_trace(&mut self, text: &str);
}

/// The default [`ParamCollector`]: appends every emitted field to a borrowed [`Params`].
pub struct ParamsCollector<'a> {
    params: &'a mut Params,
}

impl<'a> ParamsCollector<'a> {
    /// Borrows `params` for the duration of this collector's use.
    pub fn new(params: &'a mut Params) -> Self {
        Self { params }
    }

    fn emit_classified(&mut self, name: &str, fmt: &str, value: u64) {
        if fmt.contains(' ') {
            self.params.push(Param::string(name, format_c_style(fmt, value)));
            return;
        }
        self.params.push(Param::numeric(name, classify(fmt, value)));
    }
}

impl<'a> ParamCollector for ParamsCollector<'a> {
    fn emit_string(&mut self, name: &str, value: Option<&str>) {
        self.params.push(Param::string(name, value.unwrap_or("")));
    }

    fn emit_bool(&mut self, name: &str, value: bool) {
        self.params.push(Param::boolean(name, value));
    }

    fn emit_number_i32(&mut self, name: &str, fmt: &str, value: i32) {
        // Sign-extend to 64 bits before reinterpreting as unsigned, matching
        // the reference implementation's `static_cast<uint64_t>(int)`.
        self.emit_classified(name, fmt, value as i64 as u64);
    }

    fn emit_number_u64(&mut self, name: &str, fmt: &str, value: u64) {
        self.emit_classified(name, fmt, value);
    }

    fn emit_hex_dump(&mut self, data: &[u8]) {
        self.params.push(Param::raw(hex_dump(data)));
    }

    fn emit_heading(&mut self, title: &str) {
        self.params.push(Param::heading(title));
    }

    fn emit_blank(&mut self) {
        self.params.push(Param::Blank);
    }

    fn emit_trace(&mut self, text: &str) {
        self.params.push(Param::raw(text));
    }
}

/// The numeric classification rule: picks the narrowest unsigned width that
/// fits both `value` and the digit-count hints in `fmt` (`'4'`, `'8'`, `"16"`).
fn classify(fmt: &str, value: u64) -> Numeric {
    if value > u32::MAX as u64 || fmt.contains("16") {
        Numeric::U64(value)
    } else if value > u16::MAX as u64 || fmt.contains('8') {
        Numeric::U32(value as u32)
    } else if value > u8::MAX as u64 || fmt.contains('4') {
        Numeric::U16(value as u16)
    } else {
        Numeric::U8(value as u8)
    }
}

/// A small subset of `printf`-style formatting, enough for the one-conversion
/// format strings a decoder plugin passes when it wants string rendering
/// instead of the default numeric classification (`fmt` containing a space).
/// Supports `%[0][width]{d,i,u,x,X,o}`; anything else in `fmt` is copied verbatim.
fn format_c_style(fmt: &str, value: u64) -> String {
    // Indexed by char, not by byte, so literal text outside the `%`
    // conversions (the units/labels a plugin writes around them) survives
    // round-trip even when it isn't plain ASCII.
    let chars: Vec<char> = fmt.chars().collect();
    let mut out = String::with_capacity(fmt.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' && i + 1 < chars.len() {
            if chars[i + 1] == '%' {
                out.push('%');
                i += 2;
                continue;
            }
            let mut j = i + 1;
            let zero_pad = j < chars.len() && chars[j] == '0';
            if zero_pad {
                j += 1;
            }
            let width_start = j;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let width: usize = chars[width_start..j]
                .iter()
                .collect::<String>()
                .parse()
                .unwrap_or(0);
            if j < chars.len() && matches!(chars[j], 'd' | 'i' | 'u' | 'x' | 'X' | 'o') {
                let rendered = match chars[j] {
                    'd' | 'i' => format!("{}", value as i64),
                    'u' => format!("{value}"),
                    'x' => format!("{value:x}"),
                    'X' => format!("{value:X}"),
                    'o' => format!("{value:o}"),
                    _ => unreachable!(),
                };
                if width > rendered.len() {
                    let pad = if zero_pad { '0' } else { ' ' };
                    out.extend(std::iter::repeat(pad).take(width - rendered.len()));
                }
                out.push_str(&rendered);
                i = j + 1;
                continue;
            }
            // Not a recognized conversion: copy the '%' as-is and keep scanning.
            out.push('%');
            i += 1;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_picks_narrowest_width_for_value() {
        assert_eq!(classify("", 5), Numeric::U8(5));
        assert_eq!(classify("", 300), Numeric::U16(300));
        assert_eq!(classify("", 70_000), Numeric::U32(70_000));
        assert_eq!(classify("", 1u64 << 40), Numeric::U64(1 << 40));
    }

    #[test]
    fn classification_honors_format_digit_hints() {
        assert_eq!(classify("%4x", 1), Numeric::U16(1));
        assert_eq!(classify("%8x", 1), Numeric::U32(1));
        assert_eq!(classify("%16x", 1), Numeric::U64(1));
    }

    #[test]
    fn format_with_space_emits_a_string_not_a_number() {
        let mut params = Params::new();
        let mut collector = ParamsCollector::new(&mut params);
        collector.emit_number_u64("Reserved", "reserved %u", 5);
        match &params[0] {
            Param::String(name, value) => {
                assert_eq!(name, "Reserved");
                assert_eq!(value, "reserved 5");
            }
            other => panic!("expected a String param, got {other:?}"),
        }
    }

    #[test]
    fn zero_padded_hex_conversion() {
        assert_eq!(format_c_style("addr %08x end", 0xab), "addr 000000ab end");
    }

    #[test]
    fn plain_width_without_zero_flag_pads_with_spaces() {
        assert_eq!(format_c_style("val %8x end", 0xab), "val       ab end");
    }

    #[test]
    fn non_ascii_literal_text_survives_the_conversion() {
        assert_eq!(format_c_style("%u \u{b0}C", 5), "5 \u{b0}C");
    }

    #[test]
    fn signed_i32_sign_extends_before_classification() {
        let mut params = Params::new();
        let mut collector = ParamsCollector::new(&mut params);
        collector.emit_number_i32("Value", "", -1);
        match &params[0] {
            Param::Numeric(_, Numeric::U64(v)) => assert_eq!(*v, u64::MAX),
            other => panic!("expected Numeric::U64(u64::MAX), got {other:?}"),
        }
    }

    #[test]
    fn hex_dump_param_is_raw() {
        let mut params = Params::new();
        let mut collector = ParamsCollector::new(&mut params);
        collector.emit_hex_dump(&[1, 2, 3]);
        assert!(matches!(&params[0], Param::Raw(_)));
    }
}
