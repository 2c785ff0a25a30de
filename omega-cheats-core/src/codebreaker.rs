//! Code Breaker → EZ-Flash Omega cheat translation.
//!
//! A Code Breaker code is a flat `+`-separated list alternating between an
//! 8-digit address token and a value token. The first nibble of the address
//! selects the code type. The Omega kernel only patches fixed values into
//! memory, so only the two plain write types can be translated:
//!
//! | Type | Meaning            | Omega directive            |
//! |------|--------------------|----------------------------|
//! | `3`  | 8-bit write        | `4AAAA,VV`                 |
//! | `8`  | 16-bit write       | `4AAAA,LO,HI`              |
//! | `4`, `6`, `7`, `A`, `D` | slide / conditional | unsupported |
//!
//! Omega addresses are written as `4` followed by the low 16 bits of the
//! Code Breaker address.

use std::fmt;

use crate::error::CheatError;
use crate::libretro::LibretroCheat;

/// Marker appended to the description of every imported cheat.
pub const PROVENANCE_TAG: &str = "(LRDB)";

/// Code Breaker types that are valid but cannot be expressed on the Omega.
const UNSUPPORTED_TYPES: &[char] = &['4', '6', '7', 'A', 'D'];

/// One Omega memory patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Write a single byte.
    Byte { address: String, value: String },
    /// Write a little-endian halfword, low byte first.
    Halfword {
        address: String,
        low: String,
        high: String,
    },
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte { address, value } => write!(f, "4{address},{value}"),
            Self::Halfword { address, low, high } => write!(f, "4{address},{low},{high}"),
        }
    }
}

/// A translated cheat, ready to be written into an Omega `.cht` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmegaCheat {
    pub desc: String,
    pub directives: Vec<Directive>,
}

impl fmt::Display for OmegaCheat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}{PROVENANCE_TAG}]\nON=", self.desc)?;
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

/// Translate one Libretro cheat into Omega directives.
///
/// Any failing address/value pair fails the whole cheat; a partial
/// translation is never returned.
///
/// # Errors
/// * [`CheatError::Parse`] for an odd token count, an address that is not
///   8 characters long, a value too short for its write width, or an
///   unknown code type.
/// * [`CheatError::Unsupported`] for a non-hex value or a code type the
///   Omega cannot model.
pub fn translate(cheat: &LibretroCheat) -> Result<OmegaCheat, CheatError> {
    let tokens: Vec<&str> = cheat.code.split('+').collect();
    let mut directives = Vec::with_capacity(tokens.len() / 2);

    for pair in tokens.chunks(2) {
        let &[address, value] = pair else {
            return Err(CheatError::parse(
                "unexpected number of tokens in Libretro cheat",
            ));
        };
        directives.push(translate_pair(address, value)?);
    }

    Ok(OmegaCheat {
        desc: cheat.desc.clone(),
        directives,
    })
}

fn translate_pair(address: &str, value: &str) -> Result<Directive, CheatError> {
    let address_len = address.chars().count();
    if address_len != 8 {
        return Err(CheatError::parse(format!(
            "expected cheat target address of len 8, got len {address_len} for address {address}"
        )));
    }

    if !value.chars().all(|c| matches!(c, '0'..='9' | 'A'..='F')) {
        return Err(CheatError::unsupported(format!(
            "value is not hexadecimal ({value})"
        )));
    }

    // Address is exactly 8 chars, so this is always Some
    let code_type = address.chars().next().unwrap_or_default();
    let low_address = tail(address, 4).to_string();
    let value_len = value.chars().count();

    match code_type {
        '3' if value_len < 2 => Err(CheatError::parse(format!(
            "expected 8-bit value of at least len 2, got len {value_len} for value {value}"
        ))),
        '3' => Ok(Directive::Byte {
            address: low_address,
            value: tail(value, 2).to_string(),
        }),
        '8' if value_len != 4 => Err(CheatError::parse(format!(
            "expected 16-bit value of len 4, got len {value_len} for value {value}"
        ))),
        '8' => Ok(Directive::Halfword {
            address: low_address,
            low: skip(value, 2).to_string(),
            high: head(value, 2).to_string(),
        }),
        t if UNSUPPORTED_TYPES.contains(&t) => Err(CheatError::unsupported(format!(
            "Code Breaker cheat type {t} is not supported"
        ))),
        t => Err(CheatError::parse(format!(
            "unknown Code Breaker cheat code type of '{t}'"
        ))),
    }
}

/// The last `n` characters of `s`, or all of `s` if it is shorter.
fn tail(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    skip(s, count.saturating_sub(n))
}

/// The first `n` characters of `s`, or all of `s` if it is shorter.
fn head(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// `s` without its first `n` characters.
fn skip(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}
