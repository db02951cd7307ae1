// src/debug/printers.rs

//! Printer helpers for test and debug builds.

#[doc(hidden)]
#[allow(unused_imports)]
use ::utf8_iter::Utf8CharsEx; // provides `.chars()` on `&[u8]`

/// Turn passed `char` into a visible `char`. Control characters become
/// their pictoral unicode representation, e.g. `'\n'` returns `'␊'`.
///
/// Unlike `fmt::Debug` of a `str`, the printing width of a control
/// character stays `1`.
///
/// only intended to aid visual debugging
#[cfg(any(debug_assertions, test))]
pub const fn char_to_char_noraw(c: char) -> char {
    // https://en.wikipedia.org/wiki/C0_and_C1_control_codes#C0_controls
    match c as u32 {
        0 => '␀',
        9 => '␉',  // '\t'
        10 => '␊', // '\n'
        11 => '␋', // '\v'
        12 => '␌', // '\f'
        13 => '␍', // '\r'
        27 => '␛', // '\e'
        // remaining C0 controls map in order onto U+2400..U+241F
        1..=31 => match char::from_u32(0x2400 + c as u32) {
            Some(c_) => c_,
            None => c,
        },
        127 => '␡',
        _ => c,
    }
}

/// transform buffer of bytes to a non-raw String
/// bytes may be invalid utf-8
///
/// only intended for debugging
#[doc(hidden)]
#[allow(non_snake_case)]
#[cfg(any(debug_assertions, test))]
pub fn buffer_to_String_noraw(buffer: &[u8]) -> String {
    let mut s2: String = String::with_capacity(buffer.len() + 1);
    for c in buffer.chars() {
        s2.push(char_to_char_noraw(c));
    }

    s2
}
