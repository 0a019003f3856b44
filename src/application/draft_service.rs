use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::draft::{DraftField, DurationPart, ItemField, RentalOrderDraft};
use crate::domain::errors::DomainError;
use crate::domain::input::InputValue;
use crate::domain::ports::OrderSubmitter;
use crate::domain::totals::OrderTotals;
use crate::domain::user::User;

/// One edit applied to a draft, as produced by the order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftCommand {
    SetField { field: DraftField, value: String },
    SetDuration { part: DurationPart, value: InputValue },
    SetItemField { index: usize, field: ItemField, value: InputValue },
    AddItem,
    RemoveItem { index: usize },
    AcceptTerms { accepted: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Editing,
    Submitted(Uuid),
}

/// Owns a draft for one user and the handler its order is submitted to.
pub struct DraftSession<S> {
    draft: RentalOrderDraft,
    submitter: S,
    state: SessionState,
}

impl<S: OrderSubmitter> DraftSession<S> {
    pub fn new(user: &User, submitter: S) -> Self {
        Self {
            draft: RentalOrderDraft::for_user(user),
            submitter,
            state: SessionState::Editing,
        }
    }

    pub fn draft(&self) -> &RentalOrderDraft {
        &self.draft
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn totals(&self) -> OrderTotals {
        self.draft.compute_totals()
    }

    pub fn apply(&mut self, command: DraftCommand) -> Result<(), DomainError> {
        self.ensure_editing()?;

        match command {
            DraftCommand::SetField { field, value } => self.draft.set_field(field, value),
            DraftCommand::SetDuration { part, value } => {
                self.draft.set_duration_field(part, &value)?
            }
            DraftCommand::SetItemField {
                index,
                field,
                value,
            } => self.draft.set_item_field(index, field, &value)?,
            DraftCommand::AddItem => self.draft.add_item(),
            DraftCommand::RemoveItem { index } => {
                self.draft.remove_item(index)?;
            }
            DraftCommand::AcceptTerms { accepted } => self.draft.set_terms_accepted(accepted),
        }
        Ok(())
    }

    pub fn apply_all<I>(&mut self, commands: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = DraftCommand>,
    {
        commands.into_iter().try_for_each(|c| self.apply(c))
    }

    /// Submit the draft once. A rejected submit leaves the session editable.
    pub fn submit(&mut self) -> Result<Uuid, DomainError> {
        self.ensure_editing()?;

        let order_id = self.draft.submit(&self.submitter)?;
        log::info!(
            "Rental order {} submitted for '{}' ({} items, total {})",
            order_id,
            self.draft.field(DraftField::Customer),
            self.draft.items().len(),
            self.totals().total
        );
        self.state = SessionState::Submitted(order_id);
        Ok(order_id)
    }

    fn ensure_editing(&self) -> Result<(), DomainError> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Submitted(_) => Err(DomainError::AlreadySubmitted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::RentalOrderPayload;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSubmitter {
        calls: AtomicUsize,
    }

    impl OrderSubmitter for CountingSubmitter {
        fn create_order(&self, _payload: RentalOrderPayload) -> Result<Uuid, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Uuid::new_v4())
        }
    }

    struct FailingSubmitter;

    impl OrderSubmitter for FailingSubmitter {
        fn create_order(&self, _payload: RentalOrderPayload) -> Result<Uuid, DomainError> {
            Err(DomainError::Internal("backend unavailable".to_string()))
        }
    }

    fn session() -> DraftSession<CountingSubmitter> {
        DraftSession::new(&User::new("Ada"), CountingSubmitter::default())
    }

    #[test]
    fn commands_deserialize_from_json() {
        let json = r#"[
            {"op": "set_field", "field": "invoice_address", "value": "1 Main St"},
            {"op": "set_duration", "part": "days", "value": 3},
            {"op": "set_item_field", "index": 0, "field": "unit_price", "value": "150.5"},
            {"op": "add_item"},
            {"op": "remove_item", "index": 1},
            {"op": "accept_terms", "accepted": true}
        ]"#;
        let commands: Vec<DraftCommand> = serde_json::from_str(json).expect("valid script");

        assert_eq!(commands.len(), 6);
        assert_eq!(
            commands[1],
            DraftCommand::SetDuration {
                part: DurationPart::Days,
                value: InputValue::from(3u32),
            }
        );
        assert_eq!(commands[3], DraftCommand::AddItem);
    }

    #[test]
    fn submit_before_terms_is_rejected_and_session_stays_editable() {
        let mut s = session();

        assert!(matches!(s.submit(), Err(DomainError::TermsNotAccepted)));
        assert_eq!(s.submitter().calls.load(Ordering::SeqCst), 0);
        assert_eq!(s.state(), SessionState::Editing);

        s.apply(DraftCommand::AcceptTerms { accepted: true })
            .expect("still editable");
        let id = s.submit().expect("submit succeeds");
        assert_eq!(s.state(), SessionState::Submitted(id));
        assert_eq!(s.submitter().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn submitted_session_rejects_further_work() {
        let mut s = session();
        s.apply(DraftCommand::AcceptTerms { accepted: true })
            .unwrap();
        s.submit().expect("submit succeeds");

        assert!(matches!(
            s.apply(DraftCommand::AddItem),
            Err(DomainError::AlreadySubmitted)
        ));
        assert!(matches!(s.submit(), Err(DomainError::AlreadySubmitted)));
        assert_eq!(s.submitter().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_failure_keeps_session_editing() {
        let mut s = DraftSession::new(&User::new("Ada"), FailingSubmitter);
        s.apply(DraftCommand::AcceptTerms { accepted: true })
            .unwrap();

        assert!(matches!(s.submit(), Err(DomainError::Internal(_))));
        assert_eq!(s.state(), SessionState::Editing);
    }

    #[test]
    fn apply_all_stops_at_first_error() {
        let mut s = session();
        let result = s.apply_all(vec![
            DraftCommand::AddItem,
            DraftCommand::RemoveItem { index: 9 },
            DraftCommand::AddItem,
        ]);

        assert!(matches!(
            result,
            Err(DomainError::ItemIndexOutOfRange { index: 9, len: 2 })
        ));
        assert_eq!(s.draft().items().len(), 2);
    }
}
