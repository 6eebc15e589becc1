mod instrument;
mod rental;

pub use self::{instrument::*, rental::*};

use error_stack::{Report, ResultExt};
use time::macros::format_description;
use time::Date;

use crate::MalformedInput;

fn required<'a>(
    field: &'static str,
    raw: &'a Option<String>,
) -> Result<&'a str, Report<MalformedInput>> {
    match raw.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Report::new(MalformedInput).attach_printable(format!("{field} is missing"))),
    }
}

fn parse_id(field: &'static str, raw: &Option<String>) -> Result<i32, Report<MalformedInput>> {
    let value = required(field, raw)?;
    value
        .parse::<i32>()
        .change_context(MalformedInput)
        .attach_printable_lazy(|| format!("{field} is not an identifier: {value}"))
}

fn parse_date(field: &'static str, raw: &Option<String>) -> Result<Date, Report<MalformedInput>> {
    let value = required(field, raw)?;
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .change_context(MalformedInput)
        .attach_printable_lazy(|| format!("{field} is not a YYYY-MM-DD date: {value}"))
}
