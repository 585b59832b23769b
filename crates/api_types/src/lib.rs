use serde::{Deserialize, Serialize};

pub use validation::{FieldError, ValidationError};

mod validation;

/// Body of informational responses, e.g. the liveness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub mod error {
    use super::*;

    /// Body returned for every failed request.
    ///
    /// `details` is only present for validation failures and lists every
    /// offending field.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub details: Vec<FieldError>,
    }
}

pub mod expense {
    use core::fmt;

    use super::*;

    /// Spending category of an expense.
    ///
    /// The set is closed: the wire strings are matched exactly, case included.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Category {
        Groceries,
        Leisure,
        Electronics,
        Utilities,
        Clothing,
        Health,
        Others,
    }

    impl Category {
        /// Every category, in declaration order.
        pub const ALL: [Category; 7] = [
            Category::Groceries,
            Category::Leisure,
            Category::Electronics,
            Category::Utilities,
            Category::Clothing,
            Category::Health,
            Category::Others,
        ];

        /// Canonical wire string.
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                Category::Groceries => "Groceries",
                Category::Leisure => "Leisure",
                Category::Electronics => "Electronics",
                Category::Utilities => "Utilities",
                Category::Clothing => "Clothing",
                Category::Health => "Health",
                Category::Others => "Others",
            }
        }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl TryFrom<&str> for Category {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            Category::ALL
                .into_iter()
                .find(|category| category.as_str() == value)
                .ok_or_else(|| format!("unknown category: {value}"))
        }
    }

    /// How an expense was paid.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum PaymentMethod {
        Cash,
        #[serde(rename = "UPI/Debit Card")]
        UpiDebitCard,
        #[serde(rename = "Credit Card")]
        CreditCard,
    }

    impl PaymentMethod {
        /// Every payment method, in declaration order.
        pub const ALL: [PaymentMethod; 3] = [
            PaymentMethod::Cash,
            PaymentMethod::UpiDebitCard,
            PaymentMethod::CreditCard,
        ];

        /// Canonical wire string.
        #[must_use]
        pub const fn as_str(self) -> &'static str {
            match self {
                PaymentMethod::Cash => "Cash",
                PaymentMethod::UpiDebitCard => "UPI/Debit Card",
                PaymentMethod::CreditCard => "Credit Card",
            }
        }
    }

    impl fmt::Display for PaymentMethod {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl TryFrom<&str> for PaymentMethod {
        type Error = String;

        fn try_from(value: &str) -> Result<Self, Self::Error> {
            PaymentMethod::ALL
                .into_iter()
                .find(|method| method.as_str() == value)
                .ok_or_else(|| format!("unknown payment method: {value}"))
        }
    }

    /// Client supplied expense, used to create or replace a record.
    ///
    /// Build it from untrusted JSON with [`ExpenseInput::validate`], which
    /// reports every invalid field at once.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseInput {
        pub amount: f64,
        pub category: Category,
        pub payment_method: PaymentMethod,
        #[serde(default)]
        pub description: Option<String>,
    }

    /// Stored expense: the accepted input plus the server assigned id.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        #[serde(flatten)]
        pub input: ExpenseInput,
    }

    impl Expense {
        pub fn from_input(input: ExpenseInput, id: i64) -> Self {
            Self { id, input }
        }

        /// Input fields of the record, without the id.
        pub fn input(&self) -> ExpenseInput {
            self.input.clone()
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<Expense>,
    }
}

pub mod summary {
    use super::{Deserialize, Serialize, expense::Category};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: Category,
        pub count: usize,
        pub total: f64,
    }

    /// Aggregate over all stored expenses.
    ///
    /// `categories` only lists categories with at least one expense, in
    /// [`Category::ALL`] order.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    pub struct ExpenseSummary {
        pub count: usize,
        pub total: f64,
        pub categories: Vec<CategoryTotal>,
    }
}
