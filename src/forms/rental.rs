use crate::forms::{now_minute, today, FieldForm, FieldKind, FieldSpec, ParamForm};
use crate::model::{QueryDescriptor, QueryKind};

pub static LOCATION_ON_DATES: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::LocationOnDates,
    label: "Find available rental places between two datetimes",
    path: "/rental/available",
    fields: &[
        FieldSpec::required("start_dt", "From", FieldKind::DateTime),
        FieldSpec::required("end_dt", "Until", FieldKind::DateTime),
    ],
    form: location_on_dates_form,
};

pub static LOCATION_USE: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::LocationUse,
    label: "Rental places in use on a day",
    path: "/rental/in-use-on-date",
    fields: &[FieldSpec::required("target_date", "Day", FieldKind::Date)],
    form: location_use_form,
};

fn location_on_dates_form() -> Box<dyn ParamForm> {
    FieldForm::new(LOCATION_ON_DATES.fields)
        .with_default("start_dt", now_minute())
        .boxed()
}

fn location_use_form() -> Box<dyn ParamForm> {
    FieldForm::new(LOCATION_USE.fields)
        .with_default("target_date", today())
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParamValue;

    #[test]
    fn test_location_use_defaults_to_today() {
        let mut form = LOCATION_USE.form();
        let report = form.mount();
        assert_eq!(report.get("target_date"), Some(&ParamValue::Text(today())));
        assert!(report.is_complete());
    }

    #[test]
    fn test_clearing_a_date_makes_report_incomplete() {
        let mut form = LOCATION_USE.form();
        let report = form.edit("target_date", "").unwrap();
        assert!(!report.is_complete());

        let report = form.edit("target_date", "2024-03-01").unwrap();
        assert_eq!(
            report.get("target_date"),
            Some(&ParamValue::Text("2024-03-01".to_string()))
        );
    }
}
