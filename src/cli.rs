// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive prompts.
//!
//! Generic over the reader and writer so the prompt loop can be driven by
//! tests. Every prompt returns `Ok(None)` once input is exhausted.

use crate::models::{DataType, OutputFormat, QueryRequest};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Ask for every field of a query, re-prompting on invalid answers.
pub fn prompt_request<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<QueryRequest>> {
    writeln!(out, "\n=== Street Data Extraction Tool ===")?;
    writeln!(out, "Please enter the following information:")?;

    let Some(address) = ask_until(input, out, "\nEnter address: ", |line| {
        (!line.is_empty())
            .then(|| line.to_string())
            .ok_or("Address cannot be empty, please re-enter!")
    })?
    else {
        return Ok(None);
    };

    let Some(radius_miles) = ask_until(input, out, "\nEnter search radius (miles): ", |line| {
        match line.parse::<f64>() {
            Ok(r) if r.is_finite() && r > 0.0 => Ok(r),
            Ok(_) => Err("Radius must be greater than 0, please re-enter!"),
            Err(_) => Err("Please enter a valid number!"),
        }
    })?
    else {
        return Ok(None);
    };

    let Some(data_type) = ask_until(
        input,
        out,
        "\nSelect data type (1: Centerline, 2: Sidewalk): ",
        |line| DataType::from_choice(line).ok_or("Please enter 1 or 2!"),
    )?
    else {
        return Ok(None);
    };

    let Some(output_format) = ask_until(
        input,
        out,
        "\nSelect output format (1: HTML map, 2: SVG file, 3: Both): ",
        |line| OutputFormat::from_choice(line).ok_or("Please enter 1, 2, or 3!"),
    )?
    else {
        return Ok(None);
    };

    write!(
        out,
        "\nEnter export file base name or path (leave blank for default): "
    )?;
    out.flush()?;
    let Some(export) = read_line(input)? else {
        return Ok(None);
    };

    Ok(Some(QueryRequest {
        address,
        radius_miles,
        data_type,
        output_format,
        export_path: (!export.is_empty()).then(|| PathBuf::from(export)),
    }))
}

/// Ask a yes/no question. Only `y` (any case) means yes.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(out, "\n{question} (y/n): ")?;
    out.flush()?;
    Ok(read_line(input)?.is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
}

fn ask_until<R, W, T, F>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    parse: F,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, &'static str>,
{
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => writeln!(out, "{message}")?,
        }
    }
}

/// One trimmed line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Option<QueryRequest>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let request = prompt_request(&mut input, &mut out).unwrap();
        (request, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_full_request() {
        let (request, _) = run("350 5th Ave, New York, NY\n0.5\n2\n3\nout/midtown\n");
        let request = request.unwrap();

        assert_eq!(request.address, "350 5th Ave, New York, NY");
        assert_eq!(request.radius_miles, 0.5);
        assert_eq!(request.data_type, DataType::Pedestrian);
        assert_eq!(request.output_format, OutputFormat::Both);
        assert_eq!(request.export_path, Some(PathBuf::from("out/midtown")));
    }

    #[test]
    fn test_reprompts_on_invalid_answers() {
        let (request, output) = run("\nBroadway\nabc\n-1\n1\n7\n1\n2\n\n");
        let request = request.unwrap();

        assert_eq!(request.address, "Broadway");
        assert_eq!(request.radius_miles, 1.0);
        assert_eq!(request.data_type, DataType::Traffic);
        assert_eq!(request.output_format, OutputFormat::Vector);
        assert_eq!(request.export_path, None);

        assert!(output.contains("Address cannot be empty"));
        assert!(output.contains("Please enter a valid number!"));
        assert!(output.contains("Radius must be greater than 0"));
        assert!(output.contains("Please enter 1 or 2!"));
    }

    #[test]
    fn test_eof_returns_none() {
        let (request, _) = run("Broadway\n1\n");
        assert!(request.is_none());
    }

    #[test]
    fn test_confirm() {
        let mut out = Vec::new();
        assert!(confirm(&mut Cursor::new(b"Y\n".to_vec()), &mut out, "Again?").unwrap());
        assert!(!confirm(&mut Cursor::new(b"yes\n".to_vec()), &mut out, "Again?").unwrap());
        assert!(!confirm(&mut Cursor::new(Vec::new()), &mut out, "Again?").unwrap());
    }
}
