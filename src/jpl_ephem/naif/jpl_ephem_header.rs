//! Descriptive header found in the comment area of JPL planetary kernels.
//!
//! The block looks like:
//!
//! ```text
//! JPL planetary and lunar ephemeris DE440
//! Integrated 25 June 2020
//!
//! Time span covered by ephemeris:
//!
//! 31-DEC-1549 00:00 to   25-JAN-2650 00:00
//! JD   2287184.5   to   JD   2688976.5
//! ```
//!
//! Not every kernel carries it, so callers treat a parse failure as "no header".

use std::fmt;

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::{line_ending, multispace0, not_line_ending, space1},
    number::complete::double,
    IResult, Parser,
};

#[derive(Debug, PartialEq, Clone)]
pub struct JPLEphemHeader {
    pub version: String,
    pub creation_date: String,
    pub start_ephem: String,
    pub end_ephem: String,
    pub start_jd: f64,
    pub end_jd: f64,
}

/// Value following `label` on the first line that contains it.
fn labelled_line<'a>(label: &'static str, input: &'a str) -> IResult<&'a str, &'a str> {
    let (input, _) = take_until(label)(input)?;
    let (input, _) = tag(label)(input)?;
    let (input, value) = not_line_ending(input)?;
    Ok((input, value.trim()))
}

impl JPLEphemHeader {
    fn parse_date_range(input: &str) -> IResult<&str, (&str, &str)> {
        let (input, _) = take_until("Time span covered by ephemeris:")(input)?;
        let (input, _) = tag("Time span covered by ephemeris:")(input)?;
        let (input, _) = multispace0(input)?;
        let (input, (start, _, end)) =
            (take_until(" to "), tag(" to "), not_line_ending).parse(input)?;
        Ok((input, (start.trim(), end.trim())))
    }

    fn parse_jd_range(input: &str) -> IResult<&str, (f64, f64)> {
        let (input, _) = (line_ending, tag("JD"), space1).parse(input)?;
        let (input, start_jd) = double(input)?;
        let (input, _) = (space1, tag("to"), space1, tag("JD"), space1).parse(input)?;
        let (input, end_jd) = double(input)?;
        Ok((input, (start_jd, end_jd)))
    }

    pub fn parse(input: &str) -> IResult<&str, Self> {
        let (input, version) = labelled_line("JPL planetary and lunar ephemeris ", input)?;
        let (input, creation_date) = labelled_line("Integrated ", input)?;
        let (input, (start_ephem, end_ephem)) = Self::parse_date_range(input)?;
        let (input, (start_jd, end_jd)) = Self::parse_jd_range(input)?;
        Ok((
            input,
            JPLEphemHeader {
                version: version.to_string(),
                creation_date: creation_date.to_string(),
                start_ephem: start_ephem.to_string(),
                end_ephem: end_ephem.to_string(),
                start_jd,
                end_jd,
            },
        ))
    }
}

impl fmt::Display for JPLEphemHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 14;
        const VALUE_WIDTH: usize = 24;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 2,
            value = VALUE_WIDTH + 2
        );
        let rows = [
            ("Version", self.version.clone()),
            ("Integrated", self.creation_date.clone()),
            ("Start", self.start_ephem.clone()),
            ("End", self.end_ephem.clone()),
            ("Start JD", format!("{:.1}", self.start_jd)),
            ("End JD", format!("{:.1}", self.end_jd)),
        ];

        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(f, "| {label:<LABEL_WIDTH$} | {value:<VALUE_WIDTH$} |")?;
        }
        writeln!(f, "{border}")
    }
}
