//! The fields of the entry dialog and their validation.

use time::{format_description::FormatItem, macros::format_description, Date};

use crate::{
    currency::{
        format_minor_units, is_well_formed_amount, mask_amount_input,
        parse_display_to_minor_units,
    },
    models::{NewTransaction, PaymentType, Transaction},
};

/// The value format of `<input type="date">`.
const DATE_INPUT_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub const DATE_REQUIRED: &str = "Please select a date";
pub const AMOUNT_REQUIRED: &str = "Please enter a value";
pub const AMOUNT_MALFORMED: &str = "Please enter a valid amount (e.g., 1.000,00)";
pub const TYPE_REQUIRED: &str = "Please select a type";
pub const DESCRIPTION_REQUIRED: &str = "Please enter a description";

/// Raw field values as the user sees them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryForm {
    /// `YYYY-MM-DD`, empty until a date is picked.
    pub date: String,
    /// Masked display amount, e.g. `1.234,56`.
    pub amount: String,
    pub payment_type: Option<PaymentType>,
    pub description: String,
}

/// A single edit to one field of the form.
#[derive(Clone, Debug, PartialEq)]
pub enum FormInput {
    Date(String),
    Amount(String),
    PaymentType(PaymentType),
    Description(String),
}

/// Inline messages shown under each invalid field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub date: Option<&'static str>,
    pub amount: Option<&'static str>,
    pub payment_type: Option<&'static str>,
    pub description: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Forget the message of the field that `input` just changed.
    pub fn clear_for(&mut self, input: &FormInput) {
        match input {
            FormInput::Date(_) => self.date = None,
            FormInput::Amount(_) => self.amount = None,
            FormInput::PaymentType(_) => self.payment_type = None,
            FormInput::Description(_) => self.description = None,
        }
    }
}

impl EntryForm {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-populate the form for editing `transaction`.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            date: transaction
                .transaction_date
                .format(DATE_INPUT_FORMAT)
                .unwrap_or_default(),
            amount: format_minor_units(transaction.amount),
            payment_type: Some(transaction.payment_type),
            description: transaction.description.clone(),
        }
    }

    pub fn apply(&mut self, input: FormInput) {
        match input {
            FormInput::Date(date) => self.date = date,
            // Digits that no longer fit keep the previous value.
            FormInput::Amount(raw) => {
                if let Some(masked) = mask_amount_input(&raw) {
                    self.amount = masked;
                }
            }
            FormInput::PaymentType(payment_type) => self.payment_type = Some(payment_type),
            FormInput::Description(description) => self.description = description,
        }
    }

    /// Check every field and build the request payload.
    ///
    /// All fields are checked so that every problem is reported at once.
    pub fn validate(&self) -> Result<NewTransaction, FieldErrors> {
        let mut errors = FieldErrors::default();

        let date = if self.date.trim().is_empty() {
            errors.date = Some(DATE_REQUIRED);
            None
        } else {
            match Date::parse(self.date.trim(), DATE_INPUT_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.date = Some(DATE_REQUIRED);
                    None
                }
            }
        };

        let amount = if self.amount.trim().is_empty() {
            errors.amount = Some(AMOUNT_REQUIRED);
            None
        } else if !is_well_formed_amount(self.amount.trim()) {
            errors.amount = Some(AMOUNT_MALFORMED);
            None
        } else {
            match parse_display_to_minor_units(&self.amount) {
                Ok(amount) => Some(amount),
                Err(_) => {
                    errors.amount = Some(AMOUNT_MALFORMED);
                    None
                }
            }
        };

        if self.payment_type.is_none() {
            errors.payment_type = Some(TYPE_REQUIRED);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.description = Some(DESCRIPTION_REQUIRED);
        }

        match (date, amount, self.payment_type) {
            (Some(transaction_date), Some(amount), Some(payment_type)) if errors.is_empty() => {
                Ok(NewTransaction {
                    transaction_date,
                    description: description.to_string(),
                    amount,
                    payment_type,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        EntryForm, FieldErrors, FormInput, AMOUNT_MALFORMED, AMOUNT_REQUIRED, DATE_REQUIRED,
        DESCRIPTION_REQUIRED, TYPE_REQUIRED,
    };
    use crate::models::{NewTransaction, PaymentType, Transaction, TransactionId};

    fn filled_form() -> EntryForm {
        EntryForm {
            date: "2024-05-01".to_string(),
            amount: "150,00".to_string(),
            payment_type: Some(PaymentType::Credit),
            description: "Salary".to_string(),
        }
    }

    #[test]
    fn valid_form_builds_payload_in_minor_units() {
        let got = filled_form().validate();

        assert_eq!(
            got,
            Ok(NewTransaction {
                transaction_date: date!(2024 - 05 - 01),
                description: "Salary".to_string(),
                amount: 15000,
                payment_type: PaymentType::Credit,
            })
        );
    }

    #[test]
    fn blank_form_reports_every_field() {
        let got = EntryForm::blank().validate();

        assert_eq!(
            got,
            Err(FieldErrors {
                date: Some(DATE_REQUIRED),
                amount: Some(AMOUNT_REQUIRED),
                payment_type: Some(TYPE_REQUIRED),
                description: Some(DESCRIPTION_REQUIRED),
            })
        );
    }

    #[test]
    fn malformed_amount_is_rejected() {
        for amount in ["1234,00", "1.23", "12,5"] {
            let form = EntryForm {
                amount: amount.to_string(),
                ..filled_form()
            };

            let errors = form.validate().unwrap_err();
            assert_eq!(
                errors.amount,
                Some(AMOUNT_MALFORMED),
                "want {amount:?} to be rejected"
            );
        }
    }

    #[test]
    fn whitespace_description_is_missing() {
        let form = EntryForm {
            description: "   ".to_string(),
            ..filled_form()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            FieldErrors {
                description: Some(DESCRIPTION_REQUIRED),
                ..FieldErrors::default()
            }
        );
    }

    #[test]
    fn description_is_trimmed() {
        let form = EntryForm {
            description: "  Salary \n".to_string(),
            ..filled_form()
        };

        assert_eq!(form.validate().unwrap().description, "Salary");
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let form = EntryForm {
            date: "2024-02-30".to_string(),
            ..filled_form()
        };

        assert_eq!(form.validate().unwrap_err().date, Some(DATE_REQUIRED));
    }

    #[test]
    fn edit_form_is_prefilled_from_transaction() {
        let transaction = Transaction {
            id: TransactionId::new("1"),
            transaction_date: date!(2024 - 03 - 09),
            description: "Rent".to_string(),
            amount: 123456,
            payment_type: PaymentType::Debit,
        };

        let form = EntryForm::from_transaction(&transaction);

        assert_eq!(
            form,
            EntryForm {
                date: "2024-03-09".to_string(),
                amount: "1.234,56".to_string(),
                payment_type: Some(PaymentType::Debit),
                description: "Rent".to_string(),
            }
        );
        assert_eq!(
            form.validate(),
            Ok(NewTransaction {
                transaction_date: transaction.transaction_date,
                description: transaction.description.clone(),
                amount: transaction.amount,
                payment_type: transaction.payment_type,
            })
        );
    }

    #[test]
    fn amount_input_is_masked() {
        let mut form = EntryForm::blank();

        form.apply(FormInput::Amount("15000".to_string()));
        assert_eq!(form.amount, "150,00");

        form.apply(FormInput::Amount("150,00x".to_string()));
        assert_eq!(form.amount, "150,00");

        form.apply(FormInput::Amount(String::new()));
        assert_eq!(form.amount, "");
    }

    #[test]
    fn overflowing_amount_keeps_previous_value() {
        let mut form = EntryForm::blank();
        form.apply(FormInput::Amount("1,00".to_string()));

        form.apply(FormInput::Amount("99999999999999999999".to_string()));

        assert_eq!(form.amount, "1,00");
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut errors = EntryForm::blank().validate().unwrap_err();

        errors.clear_for(&FormInput::Description("Salary".to_string()));

        assert_eq!(errors.description, None);
        assert_eq!(errors.date, Some(DATE_REQUIRED));
    }
}
