use crate::forms::{FieldForm, FieldKind, FieldSpec, ParamForm};
use crate::model::{QueryDescriptor, QueryKind};

/// Both filters are optional, so the blank mount report is empty and does
/// not submit: the unfiltered listing the backend also serves is never
/// requested. Typing into either filter loads the matching assignments.
pub static EMPLOYEES_ASSIGN: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::EmployeesAssign,
    label: "Personnel and their assignments (searchable)",
    path: "/stats/personnel/assignments",
    fields: &[
        FieldSpec::optional("name_search", "Name contains", FieldKind::Text),
        FieldSpec::optional("title_search", "Title contains", FieldKind::Text),
    ],
    form: employees_assign_form,
};

pub static CONTRACT_OVERLAP: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::ContractOverlap,
    label: "Personnel whose contract overlaps a date range",
    path: "/stats/personnel/contracts",
    fields: &[
        FieldSpec::required("start_date", "From", FieldKind::Date),
        FieldSpec::required("end_date", "Until", FieldKind::Date),
        FieldSpec::optional("name_search", "Name contains", FieldKind::Text),
    ],
    form: contract_overlap_form,
};

pub static PRODUCTION_EXPENSE: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::ProductionExpense,
    label: "Total expense per production",
    path: "/stats/production/expenses/summary",
    fields: &[],
    form: no_input_form,
};

pub static ALL_PERFORMER: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::AllPerformer,
    label: "All performers with performance type and agency",
    path: "/stats/performers",
    fields: &[],
    form: no_input_form,
};

pub static PERFORMER_PARTNER: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::PerformerPartner,
    label: "Partners contracted with a performer",
    path: "/stats/partners/for-performer",
    fields: &[FieldSpec::required("performer_name", "Performer", FieldKind::Text)],
    form: performer_partner_form,
};

fn employees_assign_form() -> Box<dyn ParamForm> {
    FieldForm::new(EMPLOYEES_ASSIGN.fields).free_text().boxed()
}

fn contract_overlap_form() -> Box<dyn ParamForm> {
    FieldForm::new(CONTRACT_OVERLAP.fields).free_text().boxed()
}

fn performer_partner_form() -> Box<dyn ParamForm> {
    FieldForm::new(PERFORMER_PARTNER.fields).free_text().boxed()
}

/// No inputs at all. The empty mount report is complete, so selecting the
/// query submits straight away.
fn no_input_form() -> Box<dyn ParamForm> {
    FieldForm::new(&[]).boxed()
}
