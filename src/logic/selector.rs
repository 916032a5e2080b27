use log::debug;

use crate::error::{ConsoleError, Result};
use crate::forms::{FieldSpec, ParamForm};
use crate::model::{ParameterSet, QueryKind};

/// A query ready to be sent, as handed to the submit callback.
///
/// `activation` is the mount that produced it; once another query is
/// selected the submission no longer belongs to the active form.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: QueryKind,
    pub params: ParameterSet,
    pub activation: u64,
}

/// The form's answer to an edit, before readiness is decided.
///
/// `activation` identifies the mount the report came from, so a delayed
/// report can be dropped once the user has moved on.
#[derive(Debug, Clone, PartialEq)]
pub struct FormReport {
    pub activation: u64,
    pub params: ParameterSet,
    pub debounced: bool,
}

pub struct ActiveQuery {
    kind: QueryKind,
    form: Box<dyn ParamForm>,
    params: ParameterSet,
    activation: u64,
}

pub enum SelectorState {
    Selecting,
    Active(ActiveQuery),
}

/// Ready when every reported value is filled in and every required field is
/// present. An empty set is only ready for a form that has no fields at all.
pub fn is_ready(fields: &[FieldSpec], params: &ParameterSet) -> bool {
    if params.is_empty() {
        return fields.is_empty();
    }
    params.is_complete()
        && fields
            .iter()
            .filter(|field| field.required)
            .all(|field| params.contains(field.name))
}

/// Two-mode selector: pick a query, then feed its form until the reported
/// parameters are ready, at which point `on_submit` fires.
///
/// The selector never looks at which form it holds; readiness is decided
/// from the field specs and the reported bag alone.
pub struct QuerySelector<F> {
    state: SelectorState,
    activations: u64,
    on_submit: F,
}

impl<F> QuerySelector<F>
where
    F: FnMut(Submission),
{
    pub fn new(on_submit: F) -> Self {
        Self {
            state: SelectorState::Selecting,
            activations: 0,
            on_submit,
        }
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectorState::Selecting)
    }

    pub fn active(&self) -> Option<QueryKind> {
        match &self.state {
            SelectorState::Active(active) => Some(active.kind),
            SelectorState::Selecting => None,
        }
    }

    pub fn params(&self) -> Option<&ParameterSet> {
        match &self.state {
            SelectorState::Active(active) => Some(&active.params),
            SelectorState::Selecting => None,
        }
    }

    pub fn form(&self) -> Option<&dyn ParamForm> {
        match &self.state {
            SelectorState::Active(active) => Some(active.form.as_ref()),
            SelectorState::Selecting => None,
        }
    }

    pub fn activation(&self) -> Option<u64> {
        match &self.state {
            SelectorState::Active(active) => Some(active.activation),
            SelectorState::Selecting => None,
        }
    }

    /// Mount a fresh form for `kind` and process its mount report.
    /// Returns true when that report was submitted.
    pub fn select(&mut self, kind: QueryKind) -> bool {
        self.activations += 1;
        let mut form = kind.descriptor().form();
        let initial = form.mount();

        self.state = SelectorState::Active(ActiveQuery {
            kind,
            form,
            params: ParameterSet::new(),
            activation: self.activations,
        });

        self.params_changed(initial)
    }

    /// Back to the dropdown; the parameters are thrown away
    pub fn dismiss(&mut self) {
        self.state = SelectorState::Selecting;
    }

    /// Pass a raw field edit to the mounted form.
    pub fn edit(&mut self, field: &str, raw: &str) -> Result<FormReport> {
        match &mut self.state {
            SelectorState::Active(active) => {
                let params = active.form.edit(field, raw)?;
                Ok(FormReport {
                    activation: active.activation,
                    params,
                    debounced: active.form.debounced(),
                })
            }
            SelectorState::Selecting => Err(ConsoleError::validation(field, "no query is selected")),
        }
    }

    /// Replace the accumulated parameters and submit them if ready.
    pub fn params_changed(&mut self, params: ParameterSet) -> bool {
        let SelectorState::Active(active) = &mut self.state else {
            debug!("ignoring parameters reported while selecting");
            return false;
        };

        active.params = params;
        if !is_ready(active.kind.descriptor().fields, &active.params) {
            debug!("{} not ready: {:?}", active.kind, active.params);
            return false;
        }

        (self.on_submit)(Submission {
            kind: active.kind,
            params: active.params.clone(),
            activation: active.activation,
        });
        true
    }

    /// Like [`Self::params_changed`] but only for the mount that produced it.
    pub fn report(&mut self, activation: u64, params: ParameterSet) -> bool {
        if self.activation() != Some(activation) {
            debug!("dropping report from superseded form #{}", activation);
            return false;
        }
        self.params_changed(params)
    }
}
