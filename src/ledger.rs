//! View state of the accounting entries page.
//!
//! [ViewState::update] applies one [Action] and returns the requests that
//! should be made as [Effect]s. The state never performs I/O, which keeps the
//! whole workflow testable without a browser. Results of effects come back
//! in as further actions.
//!
//! Every fetch is tagged with the generation it was issued under. Bumping the
//! generation on each new fetch sequence means that a slow response for a
//! filter the user has already left is dropped instead of overwriting the
//! newer data.

use time::Month;

use crate::{
    error::ApiError,
    filter::Filter,
    form::{EntryForm, FieldErrors, FormInput},
    models::{NewTransaction, Summary, Transaction, TransactionId},
};

pub const SAVE_FAILED: &str = "Could not save the transaction.";

/// The open entry dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct Dialog {
    /// Identifies this dialog among all dialogs opened so far, so that a save
    /// finishing after the dialog was closed cannot affect a newer one.
    pub seq: u64,
    /// The transaction being edited, `None` when creating a new one.
    pub editing: Option<Transaction>,
    pub form: EntryForm,
    pub errors: FieldErrors,
    /// A create or update request is in flight.
    pub submitting: bool,
    pub save_error: Option<&'static str>,
}

impl Dialog {
    fn create(seq: u64) -> Self {
        Self {
            seq,
            editing: None,
            form: EntryForm::blank(),
            errors: FieldErrors::default(),
            submitting: false,
            save_error: None,
        }
    }

    fn edit(seq: u64, transaction: Transaction) -> Self {
        Self {
            form: EntryForm::from_transaction(&transaction),
            editing: Some(transaction),
            ..Self::create(seq)
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    MonthSelected(Month),
    YearSelected(i32),
    OpenCreate,
    OpenEdit(Transaction),
    FormInput(FormInput),
    Submit,
    Cancel,
    Saved {
        dialog: u64,
        result: Result<Transaction, ApiError>,
    },
    DeleteRequested(TransactionId),
    DeleteDismissed,
    DeleteConfirmed,
    Deleted(Result<(), ApiError>),
    TransactionsLoaded {
        generation: u64,
        result: Result<Vec<Transaction>, ApiError>,
    },
    SummaryLoaded {
        generation: u64,
        result: Result<Summary, ApiError>,
    },
}

/// A request the page must make on behalf of the view state.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchTransactions { generation: u64, filter: Filter },
    FetchSummary { generation: u64, filter: Filter },
    Create {
        dialog: u64,
        payload: NewTransaction,
    },
    Update {
        dialog: u64,
        transaction: Transaction,
    },
    Delete(TransactionId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    filter: Filter,
    transactions: Vec<Transaction>,
    summary: Summary,
    dialog: Option<Dialog>,
    pending_delete: Option<TransactionId>,
    generation: u64,
    dialog_seq: u64,
}

impl ViewState {
    /// Start with nothing loaded and request the data for `filter`.
    pub fn new(filter: Filter) -> (Self, Vec<Effect>) {
        let mut state = Self {
            filter,
            transactions: Vec::new(),
            summary: Summary::default(),
            dialog: None,
            pending_delete: None,
            generation: 0,
            dialog_seq: 0,
        };
        let effects = state.refresh();

        (state, effects)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&TransactionId> {
        self.pending_delete.as_ref()
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::MonthSelected(month) => {
                self.change_filter(Filter::new(month, self.filter.year))
            }
            Action::YearSelected(year) => {
                self.change_filter(Filter::new(self.filter.month, year))
            }
            Action::OpenCreate => {
                self.dialog_seq += 1;
                self.dialog = Some(Dialog::create(self.dialog_seq));
                Vec::new()
            }
            Action::OpenEdit(transaction) => {
                self.dialog_seq += 1;
                self.dialog = Some(Dialog::edit(self.dialog_seq, transaction));
                Vec::new()
            }
            Action::FormInput(input) => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.errors.clear_for(&input);
                    dialog.form.apply(input);
                }
                Vec::new()
            }
            Action::Submit => self.submit(),
            Action::Cancel => {
                self.dialog = None;
                Vec::new()
            }
            Action::Saved { dialog, result } => self.saved(dialog, result),
            Action::DeleteRequested(id) => {
                self.pending_delete = Some(id);
                Vec::new()
            }
            Action::DeleteDismissed => {
                self.pending_delete = None;
                Vec::new()
            }
            Action::DeleteConfirmed => match self.pending_delete.take() {
                Some(id) => vec![Effect::Delete(id)],
                None => Vec::new(),
            },
            Action::Deleted(Ok(())) => self.refresh(),
            Action::Deleted(Err(error)) => {
                tracing::error!("Failed to delete transaction: {error}");
                Vec::new()
            }
            Action::TransactionsLoaded { generation, result } => {
                self.transactions_loaded(generation, result);
                Vec::new()
            }
            Action::SummaryLoaded { generation, result } => {
                self.summary_loaded(generation, result);
                Vec::new()
            }
        }
    }

    /// Start a new fetch sequence for the active filter.
    fn refresh(&mut self) -> Vec<Effect> {
        self.generation += 1;
        let generation = self.generation;
        let filter = self.filter;

        vec![
            Effect::FetchTransactions { generation, filter },
            Effect::FetchSummary { generation, filter },
        ]
    }

    fn change_filter(&mut self, filter: Filter) -> Vec<Effect> {
        if filter == self.filter {
            return Vec::new();
        }

        tracing::debug!("Filter changed from {} to {filter}", self.filter);
        self.filter = filter;
        self.refresh()
    }

    fn submit(&mut self) -> Vec<Effect> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Vec::new();
        };

        if dialog.submitting {
            return Vec::new();
        }

        let payload = match dialog.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::debug!("Entry form is invalid: {errors:?}");
                dialog.errors = errors;
                return Vec::new();
            }
        };

        dialog.errors = FieldErrors::default();
        dialog.save_error = None;
        dialog.submitting = true;

        let seq = dialog.seq;
        match &dialog.editing {
            Some(transaction) => vec![Effect::Update {
                dialog: seq,
                transaction: payload.with_id(transaction.id.clone()),
            }],
            None => vec![Effect::Create {
                dialog: seq,
                payload,
            }],
        }
    }

    /// The open dialog, if it is the one with sequence number `seq`.
    fn dialog_with_seq(&mut self, seq: u64) -> Option<&mut Dialog> {
        self.dialog.as_mut().filter(|dialog| dialog.seq == seq)
    }

    fn saved(&mut self, seq: u64, result: Result<Transaction, ApiError>) -> Vec<Effect> {
        match result {
            Ok(transaction) => {
                tracing::info!("Saved transaction {}", transaction.id);
                if self.dialog_with_seq(seq).is_some() {
                    self.dialog = None;
                } else {
                    tracing::debug!("Dialog {seq} was closed before its save finished");
                }
                self.refresh()
            }
            Err(error) => {
                tracing::error!("Failed to save transaction: {error}");
                if let Some(dialog) = self.dialog_with_seq(seq) {
                    dialog.submitting = false;
                    dialog.save_error = Some(SAVE_FAILED);
                }
                Vec::new()
            }
        }
    }

    fn is_current(&self, generation: u64, what: &str) -> bool {
        if generation == self.generation {
            return true;
        }

        tracing::debug!(
            "Discarding {what} from generation {generation}, current is {}",
            self.generation
        );
        false
    }

    fn transactions_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Transaction>, ApiError>,
    ) {
        if !self.is_current(generation, "transactions") {
            return;
        }

        match result {
            Ok(transactions) => self.transactions = transactions,
            Err(error) => tracing::error!("Failed to fetch transactions: {error}"),
        }
    }

    fn summary_loaded(&mut self, generation: u64, result: Result<Summary, ApiError>) {
        if !self.is_current(generation, "summary") {
            return;
        }

        match result {
            Ok(summary) => self.summary = summary,
            Err(error) => {
                tracing::error!("Failed to fetch transaction summary: {error}");
                self.summary = Summary::default();
            }
        }
    }
}
