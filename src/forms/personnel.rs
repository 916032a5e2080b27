use crate::forms::{now_minute, FieldForm, FieldKind, FieldSpec, ParamForm};
use crate::model::{QueryDescriptor, QueryKind};

pub const POSITIONS: &[&str] = &[
    "Director",
    "Costumer",
    "Makeup",
    "Actor",
    "Actress",
    "Singer",
    "Dancer",
    "Photographer",
    "Editor",
    "Writer",
    "Producer",
    "Cinematographer",
    "Crew",
];

const LIMIT: FieldKind = FieldKind::Limit { min: 1, max: 100 };

pub static EMPLOYEES_BY_POSITION: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::EmployeesByPosition,
    label: "Find all employees that are a given position",
    path: "/personnel/by-type",
    fields: &[
        FieldSpec::required("position", "Position", FieldKind::MultiChoice(POSITIONS))
            .on_wire("personnel_types"),
        FieldSpec::required("limit", "Limit", LIMIT),
    ],
    form: employees_by_position_form,
};

pub static FREE_EMPLOYEES_BY_ROLE: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::FreeEmployeesByRole,
    label: "Find personnel free between two datetimes",
    path: "/personnel/available",
    fields: &[
        FieldSpec::required("start_dt", "From", FieldKind::DateTime),
        FieldSpec::required("end_dt", "Until", FieldKind::DateTime),
        FieldSpec::required("personnel_types", "Positions", FieldKind::MultiChoice(POSITIONS)),
    ],
    form: free_employees_by_role_form,
};

pub static TOP_ACTORS: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::TopActors,
    label: "Top N actors with most production projects",
    path: "/personnel/actors/top-projects",
    fields: &[FieldSpec::required("limit", "Top", LIMIT).on_wire("n")],
    form: top_actors_form,
};

pub static LEAST_JOB: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::LeastJob,
    label: "N actors with the least jobs",
    path: "/personnel/actors/least-jobs",
    fields: &[FieldSpec::required("limit", "Count", LIMIT).on_wire("n")],
    form: least_job_form,
};

fn employees_by_position_form() -> Box<dyn ParamForm> {
    FieldForm::new(EMPLOYEES_BY_POSITION.fields)
        .with_default("limit", 10i64)
        .boxed()
}

/// Start defaults to the current minute; the end is left for the user.
fn free_employees_by_role_form() -> Box<dyn ParamForm> {
    FieldForm::new(FREE_EMPLOYEES_BY_ROLE.fields)
        .with_default("start_dt", now_minute())
        .with_default("personnel_types", vec!["Actor".to_string(), "Crew".to_string()])
        .boxed()
}

fn top_actors_form() -> Box<dyn ParamForm> {
    FieldForm::new(TOP_ACTORS.fields).with_default("limit", 3i64).boxed()
}

fn least_job_form() -> Box<dyn ParamForm> {
    FieldForm::new(LEAST_JOB.fields).with_default("limit", 5i64).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParamValue, ParameterSet};

    #[test]
    fn test_top_actors_mounts_with_default_limit() {
        let mut form = TOP_ACTORS.form();
        let report = form.mount();
        assert_eq!(report, ParameterSet::new().with("limit", 3i64));
        assert_eq!(
            TOP_ACTORS.query_pairs(&report),
            vec![("n".to_string(), "3".to_string())]
        );
    }

    #[test]
    fn test_position_is_blank_until_chosen() {
        let mut form = EMPLOYEES_BY_POSITION.form();
        assert!(!form.mount().is_complete());

        let report = form.edit("position", "actor").unwrap();
        assert_eq!(
            report.get("position"),
            Some(&ParamValue::List(vec!["Actor".to_string()]))
        );
        assert_eq!(report.get("limit"), Some(&ParamValue::Number(10)));
        assert!(report.is_complete());
    }

    #[test]
    fn test_free_employees_waits_for_end_of_range() {
        let mut form = FREE_EMPLOYEES_BY_ROLE.form();
        let report = form.mount();
        assert!(report.contains("start_dt"));
        assert!(!report.is_complete());

        let report = form.edit("end_dt", "2099-01-01T18:00").unwrap();
        assert!(report.is_complete());
        assert_eq!(
            report.get("personnel_types"),
            Some(&ParamValue::List(vec!["Actor".to_string(), "Crew".to_string()]))
        );
    }
}
