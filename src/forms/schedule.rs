use crate::forms::{now_minute, today, FieldForm, FieldKind, FieldSpec, ParamForm};
use crate::model::{QueryDescriptor, QueryKind};

pub static ACTIVITIES_ON_DATES: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::ActivitiesOnDates,
    label: "Count activity types between two datetimes",
    path: "/schedule/activity/counts",
    fields: &[
        FieldSpec::required("start_dt", "From", FieldKind::DateTime),
        FieldSpec::required("end_dt", "Until", FieldKind::DateTime),
    ],
    form: activities_on_dates_form,
};

pub static MUSIC_RELEASE: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::MusicRelease,
    label: "Music productions with performers and planned release since a date",
    path: "/schedule/production/music",
    fields: &[FieldSpec::required("start_date", "Since", FieldKind::Date)],
    form: music_release_form,
};

pub static UPCOMING_PRODUCTION: QueryDescriptor = QueryDescriptor {
    kind: QueryKind::UpcomingProduction,
    label: "Upcoming production schedule",
    path: "/schedule/upcoming",
    fields: &[FieldSpec::required("current_datetime", "Starting at", FieldKind::DateTime)],
    form: upcoming_production_form,
};

fn activities_on_dates_form() -> Box<dyn ParamForm> {
    FieldForm::new(ACTIVITIES_ON_DATES.fields)
        .with_default("start_dt", now_minute())
        .boxed()
}

/// Reports on mount with today's date, so it loads without any input.
fn music_release_form() -> Box<dyn ParamForm> {
    FieldForm::new(MUSIC_RELEASE.fields)
        .with_default("start_date", today())
        .boxed()
}

fn upcoming_production_form() -> Box<dyn ParamForm> {
    FieldForm::new(UPCOMING_PRODUCTION.fields)
        .with_default("current_datetime", now_minute())
        .boxed()
}
