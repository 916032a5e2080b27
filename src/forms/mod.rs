//! Parameter forms, one per query.
//!
//! Every form exposes the same capability: take raw field edits and report a
//! complete, possibly partial, [`ParameterSet`] back to whoever mounted it.
//! Nothing upstream inspects which form it is talking to.

pub mod personnel;
pub mod rental;
pub mod schedule;
pub mod stats;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{ConsoleError, Result};
use crate::model::{ParamValue, ParameterSet};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_MINUTES: &str = "%Y-%m-%dT%H:%M";
const DATETIME_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Input kind of a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// YYYY-MM-DD
    Date,
    /// YYYY-MM-DDTHH:MM, seconds optional
    DateTime,
    Limit { min: i64, max: i64 },
    Choice(&'static [&'static str]),
    /// Comma separated choices, reported as a list
    MultiChoice(&'static [&'static str]),
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    /// Query-string name the backend expects
    pub wire: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            wire: name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            wire: name,
            kind,
            required: false,
        }
    }

    pub const fn on_wire(self, wire: &'static str) -> Self {
        Self { wire, ..self }
    }

    /// Validate raw input. Blank input yields `None`.
    pub fn parse(&self, raw: &str) -> Result<Option<ParamValue>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let value = match self.kind {
            FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(|date| ParamValue::Text(date.format(DATE_FORMAT).to_string()))
                .map_err(|_| ConsoleError::validation(self.name, "expected YYYY-MM-DD"))?,
            FieldKind::DateTime => {
                let parsed = NaiveDateTime::parse_from_str(raw, DATETIME_SECONDS)
                    .or_else(|_| NaiveDateTime::parse_from_str(raw, DATETIME_MINUTES))
                    .map_err(|_| ConsoleError::validation(self.name, "expected YYYY-MM-DDTHH:MM"))?;
                ParamValue::Text(format_datetime(&parsed))
            }
            FieldKind::Limit { min, max } => {
                let n: i64 = raw
                    .parse()
                    .map_err(|_| ConsoleError::validation(self.name, "expected a whole number"))?;
                if !(min..=max).contains(&n) {
                    return Err(ConsoleError::validation(
                        self.name,
                        format!("must be between {} and {}", min, max),
                    ));
                }
                ParamValue::Number(n)
            }
            FieldKind::Choice(options) => ParamValue::Text(self.choose(options, raw)?),
            FieldKind::MultiChoice(options) => {
                let chosen = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| self.choose(options, item))
                    .collect::<Result<Vec<_>>>()?;
                if chosen.is_empty() {
                    return Ok(None);
                }
                ParamValue::List(chosen)
            }
            FieldKind::Text => ParamValue::Text(raw.to_string()),
        };

        Ok(Some(value))
    }

    fn choose(&self, options: &[&str], raw: &str) -> Result<String> {
        options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(raw))
            .map(|option| option.to_string())
            .ok_or_else(|| {
                ConsoleError::validation(self.name, format!("expected one of {}", options.join(", ")))
            })
    }
}

fn format_datetime(value: &NaiveDateTime) -> String {
    if value.second() == 0 {
        value.format(DATETIME_MINUTES).to_string()
    } else {
        value.format(DATETIME_SECONDS).to_string()
    }
}

/// Current local date, as a date field expects it
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Current local time truncated to the minute
pub fn now_minute() -> String {
    Local::now().format(DATETIME_MINUTES).to_string()
}

/// The capability every query form provides.
pub trait ParamForm: Send {
    fn fields(&self) -> &'static [FieldSpec];

    /// Parameters as they stand right now
    fn values(&self) -> &ParameterSet;

    /// Report made once when the form is mounted. Forms without fields
    /// report an empty set, which counts as complete.
    fn mount(&mut self) -> ParameterSet {
        self.values().clone()
    }

    /// Apply one field edit and return the full replacement set.
    fn edit(&mut self, field: &str, raw: &str) -> Result<ParameterSet>;

    /// Free-text forms report only after a quiet period
    fn debounced(&self) -> bool {
        false
    }
}

/// A form driven entirely by its field specs. Queries differ only in their
/// defaults and in whether edits are debounced.
///
/// Required fields start out blank so the set reads as incomplete until the
/// user fills them. Blank optional fields are left out entirely.
#[derive(Debug, Clone)]
pub struct FieldForm {
    fields: &'static [FieldSpec],
    values: ParameterSet,
    debounced: bool,
}

impl FieldForm {
    pub fn new(fields: &'static [FieldSpec]) -> Self {
        let values = fields
            .iter()
            .filter(|field| field.required)
            .map(|field| (field.name, ParamValue::Text(String::new())))
            .collect();
        Self {
            fields,
            values,
            debounced: false,
        }
    }

    pub fn with_default(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Report edits only after the quiet period
    pub fn free_text(mut self) -> Self {
        self.debounced = true;
        self
    }

    pub fn boxed(self) -> Box<dyn ParamForm> {
        Box::new(self)
    }

    fn apply(&mut self, name: &str, raw: &str) -> Result<ParameterSet> {
        let field = self
            .fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| ConsoleError::validation(name, "no such field for this query"))?;

        match field.parse(raw)? {
            Some(value) => self.values.insert(field.name, value),
            None if field.required => self.values.insert(field.name, ""),
            None => {
                self.values.remove(field.name);
            }
        }

        Ok(self.values.clone())
    }
}

impl ParamForm for FieldForm {
    fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    fn values(&self) -> &ParameterSet {
        &self.values
    }

    fn edit(&mut self, field: &str, raw: &str) -> Result<ParameterSet> {
        self.apply(field, raw)
    }

    fn debounced(&self) -> bool {
        self.debounced
    }
}
