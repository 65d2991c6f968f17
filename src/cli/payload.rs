//! Command input: a positional argument, or stdin when it is omitted.

use std::io::Read;

use crate::error::Result;

/// Return `arg`, or all of stdin with surrounding whitespace trimmed.
pub fn read(arg: Option<String>) -> Result<String> {
    match arg {
        Some(value) => Ok(value),
        None => from_reader(std::io::stdin().lock()),
    }
}

fn from_reader(mut reader: impl Read) -> Result<String> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_used_verbatim() {
        assert_eq!(read(Some(" value\n".into())).unwrap(), " value\n");
    }

    #[test]
    fn test_reader_trimmed() {
        let input = "  AQICAHh...==\n\n".as_bytes();
        assert_eq!(from_reader(input).unwrap(), "AQICAHh...==");
    }
}
